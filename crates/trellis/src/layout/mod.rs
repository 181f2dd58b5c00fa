//! Turning a layout into a live widget tree.
//!
//! The builder walks a layout depth-first. Each level runs a prepare pass
//! over all of its elements before anything native exists, then creates one
//! row container per row and the elements inside it:
//!
//! 1. the element is created, attached and stored in the window arena with
//!    its `(row, column)` position and its `prev` sibling,
//! 2. its key is registered (value-capable or explicitly keyed elements
//!    only) and offered as the initial focus target,
//! 3. a container's own layout is built into its native handle,
//! 4. `post_create` runs, bindings are installed and the widget is packed
//!    (or added as a page when its parent is a notebook).
//!
//! Right-aligned rows are traversed in reverse, so the rightmost declared
//! element is packed first against the right edge.

mod json;

use std::collections::HashMap;

use slotmap::SlotMap;
use trellis_core::logging::targets;
use trellis_core::{
    ElementId, Error, FocusTarget, Hook, IdGenerator, KeyIndex, NativeHandle, Props,
    RadioGroupRegistry, Result, ToolkitError,
};

use crate::application::Application;
use crate::element::{Align, CreateContext, Element, Font, Layout, PrepareContext, VAlign};
use crate::toolkit::{Fill, Pad, PackProps, Side, WidgetKind, WidgetSpec};
use crate::window::Window;

pub use json::layout_from_json;

/// Build a [`Layout`] from rows of element expressions.
///
/// ```
/// use trellis::prelude::*;
///
/// let layout = trellis::layout![
///     [Text::new("Name"), Input::new("").key("-name-")],
///     [Button::new("OK"), Button::new("Cancel")],
/// ];
/// assert_eq!(layout.len(), 2);
/// assert_eq!(layout[1].len(), 2);
/// ```
#[macro_export]
macro_rules! layout {
    ($([$($element:expr),* $(,)?]),* $(,)?) => {
        vec![$(
            vec![$(
                ::std::boxed::Box::new($element) as ::std::boxed::Box<dyn $crate::element::Element>
            ),*]
        ),*]
    };
}

/// Everything the builder produced for one window.
pub(crate) struct BuiltLayout {
    pub(crate) elements: SlotMap<ElementId, Box<dyn Element>>,
    pub(crate) order: Vec<ElementId>,
    pub(crate) rows: Vec<Vec<ElementId>>,
    pub(crate) by_handle: HashMap<NativeHandle, ElementId>,
    pub(crate) key_index: KeyIndex,
    pub(crate) radio_groups: RadioGroupRegistry,
    pub(crate) focus: FocusTarget<NativeHandle>,
    pub(crate) hooks: Vec<(String, Hook<Window>)>,
}

impl BuiltLayout {
    fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            order: Vec::new(),
            rows: Vec::new(),
            by_handle: HashMap::new(),
            key_index: KeyIndex::new(),
            radio_groups: RadioGroupRegistry::new(),
            focus: FocusTarget::new(),
            hooks: Vec::new(),
        }
    }
}

/// Builds a layout into a native window.
pub(crate) struct LayoutBuilder<'a> {
    app: &'a Application,
    window: NativeHandle,
    font: Option<&'a Font>,
    row_padding: u32,
    out: BuiltLayout,
}

impl<'a> LayoutBuilder<'a> {
    pub(crate) fn new(
        app: &'a Application,
        window: NativeHandle,
        font: Option<&'a Font>,
        row_padding: u32,
    ) -> Self {
        Self {
            app,
            window,
            font,
            row_padding,
            out: BuiltLayout::new(),
        }
    }

    /// Build `layout` into `root`, the window's content area.
    #[tracing::instrument(
        name = "trellis::layout::build",
        skip_all,
        fields(rows = layout.len()),
        level = "debug"
    )]
    pub(crate) fn build(mut self, root: NativeHandle, layout: Layout) -> Result<BuiltLayout> {
        if layout.is_empty() {
            return Err(Error::invalid_layout("[]"));
        }
        let rows = self.build_level(root, layout, Align::Left, VAlign::Top, false)?;
        self.out.rows = rows;
        tracing::debug!(
            target: targets::LAYOUT,
            elements = self.out.order.len(),
            keys = self.out.key_index.len(),
            "layout built"
        );
        Ok(self.out)
    }

    fn ids(&self) -> &'a IdGenerator {
        self.app.ids()
    }

    fn build_level(
        &mut self,
        parent: NativeHandle,
        mut layout: Layout,
        align: Align,
        valign: VAlign,
        hosts_tabs: bool,
    ) -> Result<Vec<Vec<ElementId>>> {
        let prepare = PrepareContext {
            font: self.font,
            ids: self.ids(),
        };
        for element in layout.iter_mut().flatten() {
            element.prepare_create(&prepare);
        }

        let mut rows = Vec::with_capacity(layout.len());
        for (row_index, row) in layout.into_iter().enumerate() {
            rows.push(self.build_row(parent, row_index, row, align, valign, hosts_tabs)?);
        }
        Ok(rows)
    }

    fn build_row(
        &mut self,
        parent: NativeHandle,
        row_index: usize,
        mut row: Vec<Box<dyn Element>>,
        align: Align,
        valign: VAlign,
        hosts_tabs: bool,
    ) -> Result<Vec<ElementId>> {
        let container = if hosts_tabs {
            parent
        } else {
            self.create_row_container(parent)?
        };
        let mut row_pack = PackProps {
            side: if valign == VAlign::Bottom {
                Side::Bottom
            } else {
                Side::Top
            },
            fill: Fill::X,
            expand: false,
            padx: None,
            pady: Some(Pad::Uniform(self.row_padding)),
            anchor: None,
        };

        if align == Align::Right {
            row.reverse();
        }
        let mut ids = Vec::with_capacity(row.len());
        let mut prev = None;
        for (col_index, element) in row.into_iter().enumerate() {
            let pack = element.base().pack_options().clone();
            let id = self.build_element(container, element, row_index, col_index, prev, align, hosts_tabs)?;
            if pack.expand_y {
                row_pack.expand = true;
                row_pack.fill = Fill::Both;
            }
            if pack.pady.is_some() {
                row_pack.pady = pack.pady;
            }
            prev = Some(id);
            ids.push(id);
        }

        if !hosts_tabs {
            self.app
                .toolkit()
                .lock()
                .pack(container, &row_pack)
                .map_err(|source| Error::ElementCreation {
                    element_type: "Row".to_string(),
                    key: format!("row{row_index}"),
                    props: "{}".to_string(),
                    source,
                })?;
        }
        Ok(ids)
    }

    fn create_row_container(&self, parent: NativeHandle) -> Result<NativeHandle> {
        let mut toolkit = self.app.toolkit().lock();
        let mut props = Props::new();
        if let Some(bg) = toolkit.property(parent, "bg") {
            props.insert("bg".into(), bg);
        }
        toolkit
            .create(parent, &WidgetSpec::new(WidgetKind::Row).with_props(props))
            .map_err(|source| Error::ElementCreation {
                element_type: "Row".to_string(),
                key: "-".to_string(),
                props: "{}".to_string(),
                source,
            })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_element(
        &mut self,
        parent: NativeHandle,
        mut element: Box<dyn Element>,
        row: usize,
        col: usize,
        prev: Option<ElementId>,
        align: Align,
        hosts_tabs: bool,
    ) -> Result<ElementId> {
        let annotate = |element: &dyn Element, source: ToolkitError| Error::ElementCreation {
            element_type: element.element_type().to_string(),
            key: element.base().key_label(),
            props: element.base().describe_props(),
            source,
        };

        let tab_title = element.tab_title();
        if hosts_tabs && tab_title.is_none() {
            let source = ToolkitError::new("only Tab elements can be placed in a TabGroup");
            return Err(annotate(&*element, source));
        }

        let handle = {
            let mut cx = CreateContext {
                app: self.app,
                radio_groups: &mut self.out.radio_groups,
                hooks: &mut self.out.hooks,
                window: self.window,
            };
            match element.create(&mut cx, parent) {
                Ok(handle) => handle,
                Err(source) => return Err(annotate(&*element, source)),
            }
        };
        element.base_mut().attach(handle, self.app);
        let children = element.take_layout();
        let child_align = element.base().text_align();
        let child_valign = element.base().vertical_alignment();
        let child_tabs = element.hosts_tabs();

        let id = self.out.elements.insert_with_key(|id| {
            element.base_mut().place(id, row, col, prev);
            element
        });
        self.out.order.push(id);
        self.out.by_handle.insert(handle, id);
        if let Some(prev) = prev.and_then(|prev| self.out.elements.get_mut(prev)) {
            prev.base_mut().set_next(id);
        }
        self.register(id, handle)?;

        if let Some(children) = children {
            self.build_level(handle, children, child_align, child_valign, child_tabs)
                .map_err(|source| {
                    let base = self.out.elements[id].base();
                    Error::ChildCreation {
                        element_type: base.element_type().to_string(),
                        key: base.key_label(),
                        props: base.describe_props(),
                        source: Box::new(source),
                    }
                })?;
        }

        let element = &mut self.out.elements[id];
        let mut cx = CreateContext {
            app: self.app,
            radio_groups: &mut self.out.radio_groups,
            hooks: &mut self.out.hooks,
            window: self.window,
        };
        element
            .post_create(&mut cx)
            .map_err(|source| annotate(&**element, source))?;

        let mut toolkit = self.app.toolkit().lock();
        for interaction in element.base().bindings().interactions() {
            toolkit
                .bind(handle, interaction)
                .map_err(|source| annotate(&**element, source))?;
        }
        let placed = match tab_title {
            Some(title) if hosts_tabs => toolkit.add_tab(parent, handle, &title),
            _ => toolkit.pack(handle, &element.base().pack_options().pack_props(align)),
        };
        placed.map_err(|source| annotate(&**element, source))?;
        Ok(id)
    }

    fn register(&mut self, id: ElementId, handle: NativeHandle) -> Result<()> {
        let element = &self.out.elements[id];
        let has_value = element.has_value();
        let base = element.base();
        let Some(key) = base.key() else {
            return Ok(());
        };
        self.out
            .key_index
            .register(key, base.key_origin(), has_value, id, base.element_type())?;
        if has_value {
            self.out.focus.offer_value(handle);
        } else {
            self.out.focus.offer_action(key.as_str().unwrap_or_default(), handle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::widgets::{Button, Input, Text};
    use crate::element::ElementBuilder;

    #[test]
    fn test_layout_macro_boxes_elements() {
        let layout: Layout = crate::layout![
            [Text::new("a"), Input::new("").key("-in-")],
            [],
            [Button::new("OK")],
        ];
        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0][1].element_type(), "Input");
        assert!(layout[1].is_empty());
    }
}
