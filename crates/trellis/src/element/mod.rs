//! Element descriptors.
//!
//! An element is a widget descriptor: identity (its key), capability flags,
//! declared properties and, once created, a native handle. Elements are
//! declared in a [`Layout`], normalized in a prepare pass, created by the
//! layout builder, and then live in their window's element arena.
//!
//! Every element kind implements [`Element`]. Typed access goes through
//! downcasting (`window.element_as::<Input>("-name-")`); there is no
//! reflective fallback onto the native widget. Native properties are only
//! readable through [`ElementBase::property`] and only for the names on a
//! fixed allow-list.

mod context;
pub(crate) mod props;
pub mod widgets;

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_core::logging::targets;
use trellis_core::{
    BindingTable, ElementId, EventMode, Key, KeyOrigin, NativeHandle, Props, ToolkitError, Values,
};

use crate::application::Application;
use crate::toolkit::{Fill, Pad, PackProps, Side, StyleBinding, WidgetKind, WidgetSpec};

pub use context::{CreateContext, PrepareContext};

/// A layout: rows of elements.
pub type Layout = Vec<Vec<Box<dyn Element>>>;

/// Horizontal alignment of a row's contents or an element's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pack from the left edge.
    #[default]
    Left,
    /// Stretch to fill the row.
    Center,
    /// Pack from the right edge, in reverse declaration order.
    Right,
}

/// Vertical alignment of a container's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// Rows stack from the top.
    #[default]
    Top,
    /// Rows stack from the top, centered by the toolkit.
    Center,
    /// Rows stack from the bottom.
    Bottom,
}

/// A font: family and point size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    /// Font family.
    pub family: String,
    /// Point size.
    pub size: i32,
}

impl Font {
    /// Create a font.
    pub fn new(family: impl Into<String>, size: i32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The `[family, size]` property value.
    pub fn to_value(&self) -> Value {
        serde_json::json!([self.family, self.size])
    }
}

/// Geometry hints an element declares for itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOptions {
    /// Stretch horizontally.
    pub expand_x: bool,
    /// Stretch vertically; also lets the element's row expand.
    pub expand_y: bool,
    /// Horizontal padding.
    pub padx: Option<Pad>,
    /// Vertical padding.
    pub pady: Option<Pad>,
    /// Anchor inside the allotted space.
    pub anchor: Option<String>,
}

impl PackOptions {
    /// Pack properties for an element inside a row aligned with `align`.
    pub fn pack_props(&self, align: Align) -> PackProps {
        let mut pack = PackProps::default();
        match align {
            Align::Left => {}
            Align::Right => pack.side = Side::Right,
            Align::Center => {
                pack.fill = Fill::Both;
                pack.expand = true;
            }
        }
        let stretch = match (self.expand_x, self.expand_y) {
            (true, true) => Some(Fill::Both),
            (true, false) => Some(Fill::X),
            (false, true) => Some(Fill::Y),
            (false, false) => None,
        };
        if let Some(fill) = stretch {
            pack.expand = true;
            pack.fill = fill;
        }
        pack.padx = self.padx;
        pack.pady = self.pady;
        pack.anchor = self.anchor.clone();
        pack
    }
}

/// What an element wants done after a native interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Nothing to report.
    Ignore,
    /// Enqueue an event named after the element, with these values plus the
    /// current snapshot.
    Dispatch(Values),
}

impl Reaction {
    /// A dispatch carrying only `event_type`.
    pub fn event_type(event_type: &str) -> Self {
        Reaction::Dispatch(Values::new().with("event_type", event_type))
    }
}

struct Attachment {
    handle: NativeHandle,
    app: Application,
}

/// State shared by every element kind.
pub struct ElementBase {
    element_type: &'static str,
    style_class: Option<&'static str>,
    key: Option<Key>,
    key_origin: KeyOrigin,
    props: Props,
    pack: PackOptions,
    text_align: Align,
    vertical_alignment: VAlign,
    accepts_font: bool,
    style: Option<StyleBinding>,
    bindings: BindingTable,
    metadata: Option<Value>,
    position: Option<(usize, usize)>,
    id: Option<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    attachment: Option<Attachment>,
}

impl ElementBase {
    /// Create the base of an element of `element_type`.
    pub fn new(element_type: &'static str) -> Self {
        Self {
            element_type,
            style_class: None,
            key: None,
            key_origin: KeyOrigin::Generated,
            props: Props::new(),
            pack: PackOptions::default(),
            text_align: Align::Left,
            vertical_alignment: VAlign::Top,
            accepts_font: true,
            style: None,
            bindings: BindingTable::new(),
            metadata: None,
            position: None,
            id: None,
            prev: None,
            next: None,
            attachment: None,
        }
    }

    /// Render font and colors through a named style of `class`.
    pub fn with_style_class(mut self, class: &'static str) -> Self {
        self.style_class = Some(class);
        self
    }

    /// This element takes no font.
    pub fn without_font(mut self) -> Self {
        self.accepts_font = false;
        self
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Element type name, such as `Input`.
    pub fn element_type(&self) -> &'static str {
        self.element_type
    }

    /// The element key.
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Where the key came from.
    pub fn key_origin(&self) -> KeyOrigin {
        self.key_origin
    }

    /// Set the key explicitly. An empty string clears it.
    pub fn set_key(&mut self, key: impl Into<Key>) {
        let key = key.into();
        if key.is_empty() {
            self.key = None;
            self.key_origin = KeyOrigin::Generated;
        } else {
            self.key = Some(key);
            self.key_origin = KeyOrigin::Explicit;
        }
    }

    /// Default the key to `text` unless one is already set.
    pub(crate) fn derive_key(&mut self, text: &str) {
        if self.key.is_none() && !text.is_empty() {
            self.key = Some(Key::from(text));
            self.key_origin = KeyOrigin::Derived;
        }
    }

    /// Give an unkeyed element a generated key.
    pub(crate) fn generate_key(&mut self, key: String) {
        if self.key.is_none() {
            self.key = Some(Key::from(key));
            self.key_origin = KeyOrigin::Generated;
        }
    }

    /// The key as a string, `-` when unkeyed.
    pub fn key_label(&self) -> String {
        self.key.as_ref().map_or_else(|| "-".to_string(), Key::to_string)
    }

    /// Arena id, once created.
    pub fn id(&self) -> Option<ElementId> {
        self.id
    }

    /// `(row, column)` inside the parent layout, once created.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }

    /// The element declared before this one in its row.
    pub fn prev(&self) -> Option<ElementId> {
        self.prev
    }

    /// The element declared after this one in its row.
    pub fn next(&self) -> Option<ElementId> {
        self.next
    }

    pub(crate) fn place(&mut self, id: ElementId, row: usize, col: usize, prev: Option<ElementId>) {
        self.id = Some(id);
        self.position = Some((row, col));
        self.prev = prev;
    }

    pub(crate) fn set_next(&mut self, next: ElementId) {
        self.next = Some(next);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Declared properties.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Set a declared property.
    pub fn set_prop(&mut self, name: &str, value: impl Into<Value>) {
        self.props.insert(name.to_string(), value.into());
    }

    /// A declared string property.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// Geometry hints.
    pub fn pack_options(&self) -> &PackOptions {
        &self.pack
    }

    /// Mutable geometry hints.
    pub fn pack_options_mut(&mut self) -> &mut PackOptions {
        &mut self.pack
    }

    /// Alignment passed to child rows of a container, and text alignment.
    pub fn text_align(&self) -> Align {
        self.text_align
    }

    /// Set the alignment.
    pub fn set_text_align(&mut self, align: Align) {
        self.text_align = align;
    }

    /// Vertical alignment passed to child rows of a container.
    pub fn vertical_alignment(&self) -> VAlign {
        self.vertical_alignment
    }

    /// Set the vertical alignment.
    pub fn set_vertical_alignment(&mut self, align: VAlign) {
        self.vertical_alignment = align;
    }

    /// Caller-attached data.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Attach caller data.
    pub fn set_metadata(&mut self, metadata: Value) {
        self.metadata = Some(metadata);
    }

    /// Named style, if font or colors are rendered through one.
    pub fn style(&self) -> Option<&StyleBinding> {
        self.style.as_ref()
    }

    /// Look up a property by name.
    ///
    /// Aliases resolve first, then declared properties, then native
    /// properties on the allow-list.
    pub fn property(&self, name: &str) -> Option<Value> {
        let name = props::canonical_name(name);
        match name {
            "key" => return self.key.as_ref().map(|key| serde_json::json!(key)),
            "text_align" => return serde_json::to_value(self.text_align).ok(),
            _ => {}
        }
        if let Some(value) = self.props.get(name) {
            return Some(value.clone());
        }
        if let Some(value) = self.style.as_ref().and_then(|style| style.props.get(name)) {
            return Some(value.clone());
        }
        if !props::NATIVE_PROPERTY_ALLOW_LIST.contains(&name) {
            return None;
        }
        let attachment = self.attachment.as_ref()?;
        attachment
            .app
            .toolkit()
            .lock()
            .property(attachment.handle, name)
    }

    // =========================================================================
    // Prepare pass
    // =========================================================================

    /// Normalize declared properties before creation.
    pub(crate) fn prepare(&mut self, has_value: bool, cx: &PrepareContext<'_>) {
        if has_value {
            self.generate_key(cx.ids.element_key());
        }
        if self.accepts_font && !self.props.contains_key("font") {
            if let Some(font) = cx.font {
                self.props.insert("font".into(), font.to_value());
            }
        }

        let normalized = props::normalize(&mut self.props, &mut self.pack, &mut self.bindings);
        if let Some(align) = normalized.text_align {
            self.text_align = align;
        }
        if let Some(align) = normalized.vertical_alignment {
            self.vertical_alignment = align;
        }
        if let Some(metadata) = normalized.metadata {
            self.metadata = Some(metadata);
        }

        if let Some(class) = self.style_class {
            let mut style_props = Props::new();
            for name in props::STYLE_PROPERTIES {
                if let Some(value) = self.props.remove(name) {
                    style_props.insert(name.to_string(), value);
                }
            }
            if !style_props.is_empty() {
                let base = match &self.key {
                    Some(key) => key.to_string(),
                    None => cx.ids.style_key(self.element_type),
                };
                self.style = Some(StyleBinding {
                    name: format!("{base}.{class}"),
                    class: class.to_string(),
                    props: style_props,
                });
            }
        }
    }

    /// A widget spec carrying the normalized properties and style name.
    pub fn widget_spec(&self, kind: WidgetKind) -> WidgetSpec {
        WidgetSpec::new(kind)
            .with_props(self.props.clone())
            .with_style(self.style.as_ref().map(|style| style.name.clone()))
    }

    /// Declared properties rendered as JSON, for error messages.
    pub(crate) fn describe_props(&self) -> String {
        serde_json::to_string(&self.props).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// The binding table.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Bind a native interaction to a logical event.
    ///
    /// Before creation this only records the rule; the builder installs the
    /// native hooks. Afterwards a newly bound interaction is installed
    /// immediately.
    pub fn bind(
        &mut self,
        interaction: &str,
        handler_suffix: &str,
        propagate: bool,
        mode: EventMode,
    ) -> Result<(), ToolkitError> {
        let is_new = self.bindings.bind(interaction, handler_suffix, propagate, mode);
        match &self.attachment {
            Some(attachment) if is_new => attachment
                .app
                .toolkit()
                .lock()
                .bind(attachment.handle, interaction),
            _ => Ok(()),
        }
    }

    /// Bind several interactions with the same mode.
    pub fn bind_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = (&'a str, &'a str)>,
        mode: EventMode,
    ) -> Result<(), ToolkitError> {
        for (interaction, suffix) in events {
            self.bind(interaction, suffix, true, mode)?;
        }
        Ok(())
    }

    // =========================================================================
    // Native access
    // =========================================================================

    /// The native handle, once created.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.attachment.as_ref().map(|attachment| attachment.handle)
    }

    /// Whether the element has been created.
    pub fn is_created(&self) -> bool {
        self.attachment.is_some()
    }

    pub(crate) fn attach(&mut self, handle: NativeHandle, app: &Application) {
        self.attachment = Some(Attachment {
            handle,
            app: app.clone(),
        });
    }

    pub(crate) fn detach(&mut self) {
        self.attachment = None;
    }

    /// The owning application, once created.
    pub(crate) fn app(&self) -> Option<&Application> {
        self.attachment.as_ref().map(|attachment| &attachment.app)
    }

    fn attachment(&self) -> Result<&Attachment, ToolkitError> {
        self.attachment.as_ref().ok_or_else(|| {
            ToolkitError::new(format!(
                "{} `{}` has not been created",
                self.element_type,
                self.key_label()
            ))
        })
    }

    /// Read the native value.
    pub(crate) fn native_get(&self) -> Result<Value, ToolkitError> {
        let attachment = self.attachment()?;
        attachment.app.toolkit().lock().get(attachment.handle)
    }

    /// Write the native value.
    pub(crate) fn native_set(&self, value: Value) -> Result<(), ToolkitError> {
        let attachment = self.attachment()?;
        attachment.app.toolkit().lock().set(attachment.handle, value)
    }

    /// Change properties, before or after creation.
    ///
    /// Alias names are normalized the same way as in the prepare pass.
    /// Font and colors of a styled element update its style.
    pub fn update(&mut self, mut changes: Props) -> Result<(), ToolkitError> {
        let normalized = props::normalize(&mut changes, &mut self.pack, &mut self.bindings);
        if let Some(align) = normalized.text_align {
            self.text_align = align;
        }
        if let Some(metadata) = normalized.metadata {
            self.metadata = Some(metadata);
        }

        let mut restyle = false;
        if let Some(style) = self.style.as_mut() {
            for name in props::STYLE_PROPERTIES {
                if let Some(value) = changes.remove(name) {
                    style.props.insert(name.to_string(), value);
                    restyle = true;
                }
            }
        }
        for (name, value) in &changes {
            self.props.insert(name.clone(), value.clone());
        }

        let Some(attachment) = self.attachment.as_ref() else {
            return Ok(());
        };
        let mut toolkit = attachment.app.toolkit().lock();
        if restyle {
            if let Some(style) = &self.style {
                toolkit.apply_style(style)?;
            }
        }
        if changes.is_empty() {
            return Ok(());
        }
        toolkit.configure(attachment.handle, &changes)
    }

    /// Enable or disable the widget.
    pub fn set_disabled(&mut self, disabled: bool) -> Result<(), ToolkitError> {
        let mut changes = Props::new();
        changes.insert("disabled".into(), Value::Bool(disabled));
        self.update(changes)
    }

    /// Give the widget keyboard focus.
    pub fn focus(&self) -> Result<(), ToolkitError> {
        let attachment = self.attachment()?;
        attachment.app.toolkit().lock().focus(attachment.handle)
    }
}

impl std::fmt::Debug for ElementBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementBase")
            .field("element_type", &self.element_type)
            .field("key", &self.key)
            .field("props", &self.props)
            .field("handle", &self.handle())
            .finish_non_exhaustive()
    }
}

/// Upcast to [`Any`] for typed element access.
pub trait AsAny: Any {
    /// Borrow as `Any`.
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Capability interface implemented by every element kind.
pub trait Element: AsAny {
    /// Shared state.
    fn base(&self) -> &ElementBase;

    /// Mutable shared state.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Whether the element contributes to the values snapshot.
    fn has_value(&self) -> bool {
        false
    }

    /// Hand the child layout of a container to the builder.
    fn take_layout(&mut self) -> Option<Layout> {
        None
    }

    /// Whether children are added as notebook tabs instead of packed rows.
    fn hosts_tabs(&self) -> bool {
        false
    }

    /// Title used when this element is added as a tab.
    fn tab_title(&self) -> Option<String> {
        None
    }

    /// Normalize declared properties. Runs before any native object exists.
    fn prepare_create(&mut self, cx: &PrepareContext<'_>) {
        let has_value = self.has_value();
        self.base_mut().prepare(has_value, cx);
    }

    /// Create the native widget inside `parent`.
    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError>;

    /// Runs after children are built and the widget is attached.
    fn post_create(&mut self, _cx: &mut CreateContext<'_>) -> Result<(), ToolkitError> {
        Ok(())
    }

    /// The element's current value.
    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::Null)
    }

    /// Replace the element's value; the default changes its `text`.
    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        let mut changes = Props::new();
        changes.insert("text".into(), value);
        self.base_mut().update(changes)
    }

    /// React to a native interaction that no binding claimed.
    fn react(&mut self, _interaction: &str, _context: &Value) -> Reaction {
        Reaction::Ignore
    }
}

impl dyn Element + '_ {
    /// The element key.
    pub fn key(&self) -> Option<&Key> {
        self.base().key()
    }

    /// Element type name.
    pub fn element_type(&self) -> &'static str {
        self.base().element_type()
    }

    /// The native handle, once created.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.base().handle()
    }

    /// Downcast to a concrete element kind.
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete element kind.
    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Element + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.base(), f)
    }
}

/// Builder methods shared by every element kind.
pub trait ElementBuilder: Element + Sized {
    /// Set the key.
    fn key(mut self, key: impl Into<Key>) -> Self {
        self.base_mut().set_key(key);
        self
    }

    /// Set a raw declared property; aliases are normalized later.
    fn prop(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.base_mut().set_prop(name, value);
        self
    }

    /// Set the font.
    fn font(self, font: Font) -> Self {
        let value = font.to_value();
        self.prop("font", value)
    }

    /// Set the text color.
    fn text_color(self, color: &str) -> Self {
        self.prop("fg", color)
    }

    /// Set the background color.
    fn background_color(self, color: &str) -> Self {
        self.prop("bg", color)
    }

    /// Set the size in characters.
    fn size(self, width: u32, height: u32) -> Self {
        self.prop("width", width).prop("height", height)
    }

    /// Stretch horizontally.
    fn expand_x(mut self, expand: bool) -> Self {
        self.base_mut().pack_options_mut().expand_x = expand;
        self
    }

    /// Stretch vertically.
    fn expand_y(mut self, expand: bool) -> Self {
        self.base_mut().pack_options_mut().expand_y = expand;
        self
    }

    /// Padding on both axes.
    fn pad(mut self, padx: Pad, pady: Pad) -> Self {
        let pack = self.base_mut().pack_options_mut();
        pack.padx = Some(padx);
        pack.pady = Some(pady);
        self
    }

    /// Anchor inside the allotted space.
    fn anchor(mut self, anchor: &str) -> Self {
        self.base_mut().pack_options_mut().anchor = Some(anchor.to_string());
        self
    }

    /// Text alignment; for containers, the alignment of child rows.
    fn text_align(mut self, align: Align) -> Self {
        self.base_mut().set_text_align(align);
        self
    }

    /// Vertical alignment of child rows.
    fn vertical_alignment(mut self, align: VAlign) -> Self {
        self.base_mut().set_vertical_alignment(align);
        self
    }

    /// Create the widget disabled.
    fn disabled(self, disabled: bool) -> Self {
        self.prop("disabled", disabled)
    }

    /// Attach caller data.
    fn metadata(mut self, metadata: impl Into<Value>) -> Self {
        self.base_mut().set_metadata(metadata.into());
        self
    }

    /// Bind interactions in user mode: each fires `"{key}{suffix}"`.
    fn bind_events<'a>(mut self, events: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (interaction, suffix) in events {
            // Elements are not created yet, so binding cannot fail.
            let _ = self
                .base_mut()
                .bind(interaction, suffix, true, EventMode::User);
        }
        self
    }
}

impl<T: Element> ElementBuilder for T {}

pub(crate) fn log_update_failure(base: &ElementBase, error: &ToolkitError) {
    tracing::warn!(
        target: targets::WINDOW,
        element_type = base.element_type(),
        key = %base.key_label(),
        %error,
        "element update failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::widgets::{Button, Input, Text};
    use trellis_core::IdGenerator;

    #[test]
    fn test_pack_props_follow_alignment_and_expansion() {
        let options = PackOptions::default();
        assert_eq!(options.pack_props(Align::Left), PackProps::default());
        assert_eq!(options.pack_props(Align::Right).side, Side::Right);
        let centered = options.pack_props(Align::Center);
        assert_eq!((centered.fill, centered.expand), (Fill::Both, true));

        let stretched = PackOptions {
            expand_x: true,
            padx: Some(Pad::Uniform(3)),
            ..PackOptions::default()
        }
        .pack_props(Align::Right);
        assert_eq!(stretched.side, Side::Right);
        assert_eq!((stretched.fill, stretched.expand), (Fill::X, true));
        assert_eq!(stretched.padx, Some(Pad::Uniform(3)));
    }

    #[test]
    fn test_derived_and_explicit_keys() {
        let button = Button::new("OK");
        assert_eq!(button.base().key_origin(), KeyOrigin::Derived);
        let button = Button::new("OK").key("-ok-");
        assert_eq!(button.base().key_origin(), KeyOrigin::Explicit);
        assert_eq!(button.base().key(), Some(&Key::from("-ok-")));
    }

    #[test]
    fn test_prepare_generates_keys_and_applies_font() {
        let ids = IdGenerator::new();
        let font = Font::new("Arial", 12);
        let cx = PrepareContext {
            font: Some(&font),
            ids: &ids,
        };
        let mut input = Input::new("");
        input.prepare_create(&cx);
        assert_eq!(input.base().key(), Some(&Key::from("-element1-")));
        assert_eq!(input.base().key_origin(), KeyOrigin::Generated);

        let mut text = Text::new("hello").prop("text_color", "red");
        text.prepare_create(&cx);
        assert_eq!(text.base().props()["font"], font.to_value());
        assert_eq!(text.base().prop_str("fg"), Some("red"));
    }

    #[test]
    fn test_styled_element_moves_colors_into_style() {
        let ids = IdGenerator::new();
        let cx = PrepareContext {
            font: None,
            ids: &ids,
        };
        let mut button = Button::new("Go").key("-go-").background_color("navy");
        button.prepare_create(&cx);
        let style = button.base().style().expect("style binding");
        assert_eq!(style.name, "-go-.TButton");
        assert_eq!(style.props["bg"], Value::from("navy"));
        assert!(!button.base().props().contains_key("bg"));
        assert_eq!(button.base().property("bg"), Some(Value::from("navy")));
    }

    #[test]
    fn test_property_lookup_respects_aliases_and_allow_list() {
        let button = Button::new("Go").prop("secret", 1);
        assert_eq!(button.base().property("ButtonText"), Some(Value::from("Go")));
        assert_eq!(button.base().property("caption"), Some(Value::from("Go")));
        assert_eq!(button.base().property("secret"), Some(Value::from(1)));
        assert_eq!(button.base().property("winfo_id"), None);
    }

    #[test]
    fn test_update_before_creation_records_props() {
        let mut text = Text::new("a");
        text.base_mut()
            .update(serde_json::from_value(serde_json::json!({"color": "green"})).unwrap())
            .unwrap();
        assert_eq!(text.base().prop_str("fg"), Some("green"));
    }
}
