//! In-memory toolkit.
//!
//! Keeps every created object in a table, records geometry, styles, bindings
//! and focus, and lets callers simulate user input. Clones share the same
//! state, so a test can keep one clone for driving and inspection while the
//! application owns another.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use trellis_core::logging::targets;
use trellis_core::{NativeHandle, Props, ToolkitError, Value};

use super::{
    Interaction, PackProps, StyleBinding, Toolkit, WidgetKind, WidgetSpec, WindowSpec,
    interactions,
};

/// A recorded native object.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWidget {
    /// Widget class, `None` for windows.
    pub kind: Option<WidgetKind>,
    /// Parent object, `None` for windows.
    pub parent: Option<NativeHandle>,
    /// Current properties.
    pub props: Props,
    /// Current value.
    pub value: Value,
    /// Style name the widget was created with.
    pub style: Option<String>,
    /// Geometry, once packed.
    pub pack: Option<PackProps>,
    /// Pages added to a notebook, with their titles.
    pub tabs: Vec<(NativeHandle, String)>,
    /// Interactions with an installed native hook.
    pub bound: BTreeSet<String>,
    /// Child objects in creation order.
    pub children: Vec<NativeHandle>,
}

impl HeadlessWidget {
    fn new(kind: Option<WidgetKind>, parent: Option<NativeHandle>) -> Self {
        Self {
            kind,
            parent,
            props: Props::new(),
            value: Value::Null,
            style: None,
            pack: None,
            tabs: Vec::new(),
            bound: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    /// The `text` property as a string.
    pub fn text(&self) -> Option<&str> {
        self.props.get("text").and_then(Value::as_str)
    }
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_handle: u64,
    objects: HashMap<NativeHandle, HeadlessWidget>,
    windows: HashMap<NativeHandle, WindowSpec>,
    pending: HashMap<NativeHandle, VecDeque<Interaction>>,
    styles: HashMap<String, StyleBinding>,
    focused: Option<NativeHandle>,
    failing_kinds: HashSet<WidgetKind>,
    failing_gets: HashSet<NativeHandle>,
    destroyed: HashSet<NativeHandle>,
    quit: bool,
}

impl HeadlessState {
    fn allocate(&mut self) -> NativeHandle {
        self.next_handle += 1;
        NativeHandle(self.next_handle)
    }

    fn object(&self, handle: NativeHandle) -> Result<&HeadlessWidget, ToolkitError> {
        self.objects
            .get(&handle)
            .ok_or_else(|| ToolkitError::new(format!("invalid native handle {handle}")))
    }

    fn object_mut(&mut self, handle: NativeHandle) -> Result<&mut HeadlessWidget, ToolkitError> {
        self.objects
            .get_mut(&handle)
            .ok_or_else(|| ToolkitError::new(format!("invalid native handle {handle}")))
    }

    fn window_of(&self, mut handle: NativeHandle) -> Option<NativeHandle> {
        loop {
            let object = self.objects.get(&handle)?;
            match object.parent {
                Some(parent) => handle = parent,
                None => return Some(handle),
            }
        }
    }

    fn deliver(&mut self, target: NativeHandle, name: &str, context: Value) -> bool {
        let Some(object) = self.objects.get(&target) else {
            return false;
        };
        if !object.bound.contains(name) && !interactions::INTRINSIC.contains(&name) {
            return false;
        }
        let Some(window) = self.window_of(target) else {
            return false;
        };
        self.pending.entry(window).or_default().push_back(Interaction {
            target,
            name: name.to_string(),
            context,
        });
        true
    }

    fn remove_tree(&mut self, handle: NativeHandle) {
        if let Some(object) = self.objects.remove(&handle) {
            for child in object.children {
                self.remove_tree(child);
            }
        }
        self.windows.remove(&handle);
        self.pending.remove(&handle);
        self.destroyed.insert(handle);
        if self.focused == Some(handle) {
            self.focused = None;
        }
    }
}

/// The in-memory toolkit. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessToolkit {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessToolkit {
    /// Create an empty toolkit.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Simulated input
    // =========================================================================

    /// Report `name` on `target`.
    ///
    /// Only intrinsic interactions and interactions with an installed hook
    /// are delivered. Returns whether the interaction was delivered.
    pub fn fire(&self, target: NativeHandle, name: &str, context: Value) -> bool {
        self.state.lock().deliver(target, name, context)
    }

    /// Click a widget: `<Button-1>` if hooked, then `command` for buttons.
    pub fn click(&self, target: NativeHandle) -> bool {
        let mut state = self.state.lock();
        let pressed = state.deliver(target, interactions::BUTTON_1, json!({"num": 1}));
        let is_button = state
            .objects
            .get(&target)
            .is_some_and(|object| object.kind == Some(WidgetKind::Button));
        let commanded = is_button && state.deliver(target, interactions::COMMAND, Value::Null);
        pressed || commanded
    }

    /// Type into an entry or text area, replacing its text.
    pub fn type_text(&self, target: NativeHandle, text: &str) -> bool {
        self.set_user_value(target, Value::String(text.to_string()))
    }

    /// Change a widget's value the way a user would.
    pub fn set_user_value(&self, target: NativeHandle, value: Value) -> bool {
        let mut state = self.state.lock();
        let Ok(object) = state.object_mut(target) else {
            return false;
        };
        object.value = value;
        state.deliver(target, interactions::CHANGE, Value::Null)
    }

    /// Pick a radio button.
    pub fn select(&self, target: NativeHandle) -> bool {
        self.fire(target, interactions::CHANGE, Value::Null)
    }

    /// Change a list or table selection.
    pub fn set_selection(&self, target: NativeHandle, selection: Value) -> bool {
        let mut state = self.state.lock();
        let Ok(object) = state.object_mut(target) else {
            return false;
        };
        object.value = selection;
        state.deliver(target, interactions::SELECT, Value::Null)
    }

    /// Press a key while `window` has focus.
    pub fn press_key(&self, window: NativeHandle, keysym: &str, keycode: u32) -> bool {
        let char = if keysym.chars().count() == 1 { keysym } else { "" };
        self.fire(
            window,
            interactions::KEY_PRESS,
            json!({"keysym": keysym, "keycode": keycode, "char": char}),
        )
    }

    /// Ask the window manager to close `window`.
    pub fn request_close(&self, window: NativeHandle) -> bool {
        self.fire(window, interactions::CLOSE_REQUEST, Value::Null)
    }

    // =========================================================================
    // Failure injection
    // =========================================================================

    /// Make every later creation of `kind` fail.
    pub fn fail_create(&self, kind: WidgetKind) {
        self.state.lock().failing_kinds.insert(kind);
    }

    /// Make value reads of `handle` fail until [`HeadlessToolkit::heal`].
    pub fn fail_get(&self, handle: NativeHandle) {
        self.state.lock().failing_gets.insert(handle);
    }

    /// Undo [`HeadlessToolkit::fail_get`].
    pub fn heal(&self, handle: NativeHandle) {
        self.state.lock().failing_gets.remove(&handle);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// A copy of the recorded object.
    pub fn widget(&self, handle: NativeHandle) -> Option<HeadlessWidget> {
        self.state.lock().objects.get(&handle).cloned()
    }

    /// The current value of an object.
    pub fn value(&self, handle: NativeHandle) -> Option<Value> {
        self.state.lock().objects.get(&handle).map(|o| o.value.clone())
    }

    /// The spec a window was created from, with later configuration applied.
    pub fn window_spec(&self, handle: NativeHandle) -> Option<WindowSpec> {
        self.state.lock().windows.get(&handle).cloned()
    }

    /// Open windows.
    pub fn windows(&self) -> Vec<NativeHandle> {
        let mut windows: Vec<_> = self.state.lock().windows.keys().copied().collect();
        windows.sort();
        windows
    }

    /// Handles of every live object of `kind`, in creation order.
    pub fn handles_of_kind(&self, kind: WidgetKind) -> Vec<NativeHandle> {
        let state = self.state.lock();
        let mut handles: Vec<_> = state
            .objects
            .iter()
            .filter(|(_, object)| object.kind == Some(kind))
            .map(|(&handle, _)| handle)
            .collect();
        handles.sort();
        handles
    }

    /// A registered style.
    pub fn style(&self, name: &str) -> Option<StyleBinding> {
        self.state.lock().styles.get(name).cloned()
    }

    /// The widget holding keyboard focus.
    pub fn focused(&self) -> Option<NativeHandle> {
        self.state.lock().focused
    }

    /// Whether `handle` was destroyed.
    pub fn is_destroyed(&self, handle: NativeHandle) -> bool {
        self.state.lock().destroyed.contains(&handle)
    }

    /// Whether [`Toolkit::quit`] was called.
    pub fn has_quit(&self) -> bool {
        self.state.lock().quit
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_window(&mut self, spec: &WindowSpec) -> Result<NativeHandle, ToolkitError> {
        let mut state = self.state.lock();
        let handle = state.allocate();
        let mut window = HeadlessWidget::new(None, None);
        window.props.insert("title".into(), Value::String(spec.title.clone()));
        window.props.insert("state".into(), Value::String("normal".into()));
        state.objects.insert(handle, window);
        state.windows.insert(handle, spec.clone());
        tracing::debug!(target: targets::TOOLKIT, %handle, title = %spec.title, "headless window created");
        Ok(handle)
    }

    fn create(
        &mut self,
        parent: NativeHandle,
        spec: &WidgetSpec,
    ) -> Result<NativeHandle, ToolkitError> {
        let mut state = self.state.lock();
        if state.failing_kinds.contains(&spec.kind) {
            return Err(ToolkitError::new(format!("cannot create {:?}", spec.kind)));
        }
        if let Some(style) = &spec.style {
            if !state.styles.contains_key(style) {
                return Err(ToolkitError::new(format!("unknown style `{style}`")));
            }
        }
        state.object(parent)?;
        let handle = state.allocate();
        let mut widget = HeadlessWidget::new(Some(spec.kind), Some(parent));
        widget.props = spec.props.clone();
        widget.value = spec.value.clone();
        widget.style = spec.style.clone();
        state.objects.insert(handle, widget);
        state.object_mut(parent)?.children.push(handle);
        Ok(handle)
    }

    fn apply_style(&mut self, style: &StyleBinding) -> Result<(), ToolkitError> {
        self.state
            .lock()
            .styles
            .insert(style.name.clone(), style.clone());
        Ok(())
    }

    fn pack(&mut self, handle: NativeHandle, pack: &PackProps) -> Result<(), ToolkitError> {
        self.state.lock().object_mut(handle)?.pack = Some(pack.clone());
        Ok(())
    }

    fn add_tab(
        &mut self,
        notebook: NativeHandle,
        page: NativeHandle,
        title: &str,
    ) -> Result<(), ToolkitError> {
        let mut state = self.state.lock();
        state.object(page)?;
        let notebook = state.object_mut(notebook)?;
        if notebook.kind != Some(WidgetKind::Notebook) {
            return Err(ToolkitError::new("tabs can only be added to a notebook"));
        }
        notebook.tabs.push((page, title.to_string()));
        Ok(())
    }

    fn get(&self, handle: NativeHandle) -> Result<Value, ToolkitError> {
        let state = self.state.lock();
        if state.failing_gets.contains(&handle) {
            return Err(ToolkitError::new(format!("cannot read {handle}")));
        }
        Ok(state.object(handle)?.value.clone())
    }

    fn set(&mut self, handle: NativeHandle, value: Value) -> Result<(), ToolkitError> {
        self.state.lock().object_mut(handle)?.value = value;
        Ok(())
    }

    fn configure(&mut self, handle: NativeHandle, props: &Props) -> Result<(), ToolkitError> {
        let mut state = self.state.lock();
        let object = state.object_mut(handle)?;
        for (name, value) in props {
            object.props.insert(name.clone(), value.clone());
        }
        if let Some(spec) = state.windows.get_mut(&handle) {
            if let Some(title) = props.get("title").and_then(Value::as_str) {
                spec.title = title.to_string();
            }
        }
        Ok(())
    }

    fn property(&self, handle: NativeHandle, name: &str) -> Option<Value> {
        self.state.lock().objects.get(&handle)?.props.get(name).cloned()
    }

    fn bind(&mut self, handle: NativeHandle, interaction: &str) -> Result<(), ToolkitError> {
        self.state
            .lock()
            .object_mut(handle)?
            .bound
            .insert(interaction.to_string());
        Ok(())
    }

    fn focus(&mut self, handle: NativeHandle) -> Result<(), ToolkitError> {
        let mut state = self.state.lock();
        state.object(handle)?;
        state.focused = Some(handle);
        Ok(())
    }

    fn pump(&mut self, window: NativeHandle) -> Vec<Interaction> {
        self.state
            .lock()
            .pending
            .get_mut(&window)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    fn destroy(&mut self, handle: NativeHandle) -> Result<(), ToolkitError> {
        let mut state = self.state.lock();
        let parent = state.object(handle)?.parent;
        if let Some(parent) = parent.and_then(|p| state.objects.get_mut(&p)) {
            parent.children.retain(|&child| child != handle);
        }
        state.remove_tree(handle);
        Ok(())
    }

    fn quit(&mut self) {
        tracing::debug!(target: targets::TOOLKIT, "headless toolkit quit");
        self.state.lock().quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(toolkit: &mut HeadlessToolkit) -> NativeHandle {
        toolkit
            .create_window(&WindowSpec {
                title: "test".into(),
                ..WindowSpec::default()
            })
            .unwrap()
    }

    #[test]
    fn test_unbound_interactions_are_dropped() {
        let mut toolkit = HeadlessToolkit::new();
        let win = window(&mut toolkit);
        let label = toolkit.create(win, &WidgetSpec::new(WidgetKind::Label)).unwrap();
        assert!(!toolkit.fire(label, "<Button-3>", Value::Null));
        toolkit.bind(label, "<Button-3>").unwrap();
        toolkit.bind(label, "<Button-3>").unwrap();
        assert!(toolkit.fire(label, "<Button-3>", Value::Null));
        assert_eq!(toolkit.pump(win).len(), 1);
        assert!(toolkit.pump(win).is_empty());
    }

    #[test]
    fn test_interactions_route_to_owning_window() {
        let mut toolkit = HeadlessToolkit::new();
        let first = window(&mut toolkit);
        let second = window(&mut toolkit);
        let row = toolkit.create(second, &WidgetSpec::new(WidgetKind::Row)).unwrap();
        let button = toolkit.create(row, &WidgetSpec::new(WidgetKind::Button)).unwrap();
        assert!(toolkit.click(button));
        assert!(toolkit.pump(first).is_empty());
        let pumped = toolkit.pump(second);
        assert_eq!(pumped.len(), 1);
        assert_eq!(pumped[0].name, interactions::COMMAND);
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut toolkit = HeadlessToolkit::new();
        let win = window(&mut toolkit);
        let row = toolkit.create(win, &WidgetSpec::new(WidgetKind::Row)).unwrap();
        let entry = toolkit.create(row, &WidgetSpec::new(WidgetKind::Entry)).unwrap();
        toolkit.destroy(win).unwrap();
        assert!(toolkit.is_destroyed(entry));
        assert!(toolkit.get(entry).is_err());
        assert!(toolkit.windows().is_empty());
    }

    #[test]
    fn test_failure_injection() {
        let mut toolkit = HeadlessToolkit::new();
        let win = window(&mut toolkit);
        let entry = toolkit
            .create(win, &WidgetSpec::new(WidgetKind::Entry).with_value("x"))
            .unwrap();
        toolkit.fail_get(entry);
        assert!(toolkit.get(entry).is_err());
        toolkit.heal(entry);
        assert_eq!(toolkit.get(entry).unwrap(), Value::from("x"));

        toolkit.fail_create(WidgetKind::Scale);
        assert!(toolkit.create(win, &WidgetSpec::new(WidgetKind::Scale)).is_err());
    }
}
