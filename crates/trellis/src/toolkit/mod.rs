//! The native toolkit contract.
//!
//! The engine never talks to a widget library directly. Everything it needs
//! goes through [`Toolkit`]: create a native object from declared properties,
//! read and write its value, pack it into its parent, apply named styles,
//! install interaction hooks and pump the interactions that fired.
//!
//! [`HeadlessToolkit`] is an in-memory implementation used by tests and by
//! applications that drive windows without a display.

mod headless;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use trellis_core::{NativeHandle, Props, ToolkitError, Value};

pub use headless::{HeadlessToolkit, HeadlessWidget};

/// Shared handle to the toolkit of an application.
pub type ToolkitRef = Arc<Mutex<dyn Toolkit>>;

/// Interaction names shared by the engine and toolkits.
pub mod interactions {
    /// The user asked the window manager to close a window.
    pub const CLOSE_REQUEST: &str = "WM_DELETE_WINDOW";
    /// A key was pressed while the window had focus.
    pub const KEY_PRESS: &str = "<Key>";
    /// A button was activated.
    pub const COMMAND: &str = "command";
    /// The user changed a widget's value.
    pub const CHANGE: &str = "change";
    /// The user changed a list or table selection.
    pub const SELECT: &str = "select";
    /// Primary mouse button pressed.
    pub const BUTTON_1: &str = "<Button-1>";
    /// Secondary mouse button pressed.
    pub const BUTTON_3: &str = "<Button-3>";
    /// Return key pressed.
    pub const RETURN: &str = "<Return>";
    /// A widget gained keyboard focus.
    pub const FOCUS_IN: &str = "<FocusIn>";
    /// A widget lost keyboard focus.
    pub const FOCUS_OUT: &str = "<FocusOut>";

    /// Interactions every widget reports without an explicit bind.
    pub const INTRINSIC: [&str; 4] = [CLOSE_REQUEST, COMMAND, CHANGE, SELECT];
}

/// Native widget classes the engine asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Invisible container holding one layout row.
    Row,
    /// Static text.
    Label,
    /// Push button.
    Button,
    /// Single-line text entry.
    Entry,
    /// Multi-line text area.
    TextArea,
    /// Check box.
    Checkbutton,
    /// Radio button.
    Radiobutton,
    /// Drop-down combo box.
    Combobox,
    /// List box.
    Listbox,
    /// Slider.
    Scale,
    /// Table with headings.
    Treeview,
    /// Plain container.
    Frame,
    /// Container with a title.
    LabelFrame,
    /// Tabbed container.
    Notebook,
    /// Horizontal or vertical rule.
    Separator,
}

/// Everything needed to create one native widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    /// Widget class.
    pub kind: WidgetKind,
    /// Normalized properties.
    pub props: Props,
    /// Initial value.
    pub value: Value,
    /// Name of a style applied beforehand with [`Toolkit::apply_style`].
    pub style: Option<String>,
}

impl WidgetSpec {
    /// Create a spec with no properties and a null value.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            props: Props::new(),
            value: Value::Null,
            style: None,
        }
    }

    /// Set the properties.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the style name.
    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }
}

/// Everything needed to create a native window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    /// Window title.
    pub title: String,
    /// Requested size in pixels.
    pub size: Option<(u32, u32)>,
    /// Requested position in pixels.
    pub location: Option<(i32, i32)>,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Whether the window grabs input from its parent.
    pub modal: bool,
    /// Keep above other windows.
    pub keep_on_top: bool,
    /// Hide the title bar.
    pub no_titlebar: bool,
    /// Window opacity from 0.0 to 1.0.
    pub alpha: Option<f32>,
    /// Center the window on screen.
    pub center: bool,
    /// Inner padding in pixels.
    pub padding: (u32, u32),
    /// Parent window for modal nesting.
    pub parent: Option<NativeHandle>,
}

/// Which side of its parent a widget is packed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left edge, the default for elements.
    #[default]
    Left,
    /// Right edge.
    Right,
    /// Top edge, the default for rows.
    Top,
    /// Bottom edge.
    Bottom,
}

/// Which directions a packed widget stretches in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    /// Natural size.
    #[default]
    None,
    /// Stretch horizontally.
    X,
    /// Stretch vertically.
    Y,
    /// Stretch both ways.
    Both,
}

impl Fill {
    /// Combine two fills.
    pub fn union(self, other: Fill) -> Fill {
        match (self, other) {
            (Fill::None, f) | (f, Fill::None) => f,
            (Fill::X, Fill::X) => Fill::X,
            (Fill::Y, Fill::Y) => Fill::Y,
            _ => Fill::Both,
        }
    }
}

/// Padding on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pad {
    /// Same padding on both sides.
    Uniform(u32),
    /// `(before, after)` padding.
    Pair(u32, u32),
}

/// Geometry options for placing a widget in its parent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackProps {
    /// Edge to pack against.
    pub side: Side,
    /// Stretch directions.
    pub fill: Fill,
    /// Whether to take extra space.
    pub expand: bool,
    /// Horizontal padding.
    pub padx: Option<Pad>,
    /// Vertical padding.
    pub pady: Option<Pad>,
    /// Anchor inside the allotted space, such as `w` or `center`.
    pub anchor: Option<String>,
}

/// A named style: properties the toolkit resolves by name instead of per
/// widget.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBinding {
    /// Style name, `"{key}.{class}"`.
    pub name: String,
    /// Base style class, such as `TButton`.
    pub class: String,
    /// Properties moved out of the widget into the style.
    pub props: Props,
}

/// An interaction the toolkit observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// Widget or window the interaction happened on.
    pub target: NativeHandle,
    /// Interaction name, such as `command` or `<Button-3>`.
    pub name: String,
    /// Toolkit-provided context: coordinates, key symbol and so on.
    pub context: Value,
}

/// A native widget toolkit.
pub trait Toolkit: Send {
    /// Create a top-level window.
    fn create_window(&mut self, spec: &WindowSpec) -> Result<NativeHandle, ToolkitError>;

    /// Create a widget inside `parent`.
    fn create(&mut self, parent: NativeHandle, spec: &WidgetSpec)
    -> Result<NativeHandle, ToolkitError>;

    /// Register or replace a named style.
    fn apply_style(&mut self, style: &StyleBinding) -> Result<(), ToolkitError>;

    /// Place a widget in its parent.
    fn pack(&mut self, handle: NativeHandle, pack: &PackProps) -> Result<(), ToolkitError>;

    /// Add `page` as a tab of `notebook`.
    fn add_tab(
        &mut self,
        notebook: NativeHandle,
        page: NativeHandle,
        title: &str,
    ) -> Result<(), ToolkitError>;

    /// Read a widget's current value.
    fn get(&self, handle: NativeHandle) -> Result<Value, ToolkitError>;

    /// Replace a widget's value.
    fn set(&mut self, handle: NativeHandle, value: Value) -> Result<(), ToolkitError>;

    /// Change widget or window properties.
    fn configure(&mut self, handle: NativeHandle, props: &Props) -> Result<(), ToolkitError>;

    /// Read a single native property.
    fn property(&self, handle: NativeHandle, name: &str) -> Option<Value>;

    /// Install the native hook for `interaction` on `handle`.
    ///
    /// Installing the same hook twice must not make it fire twice.
    fn bind(&mut self, handle: NativeHandle, interaction: &str) -> Result<(), ToolkitError>;

    /// Give keyboard focus to a widget.
    fn focus(&mut self, handle: NativeHandle) -> Result<(), ToolkitError>;

    /// Drain the interactions observed under `window` since the last pump.
    ///
    /// Never blocks.
    fn pump(&mut self, window: NativeHandle) -> Vec<Interaction>;

    /// Destroy a window or widget and everything inside it.
    fn destroy(&mut self, handle: NativeHandle) -> Result<(), ToolkitError>;

    /// The last window closed; release the native application.
    fn quit(&mut self);
}
