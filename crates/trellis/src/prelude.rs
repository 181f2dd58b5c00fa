//! Prelude module for Trellis.
//!
//! ```
//! use trellis::prelude::*;
//! ```
//!
//! Brings in the application and window types, the element builder trait,
//! every element kind and the reserved event names.

// ============================================================================
// Application and Windows
// ============================================================================

pub use crate::application::Application;
pub use crate::window::{Window, WindowConfig};

// ============================================================================
// Values and Events
// ============================================================================

pub use trellis_core::{
    EventMode, HookOutcome, Key, TIMEOUT_KEY, Value, Values, WINDOW_CLOSED, WINDOW_KEY_EVENT,
};

// ============================================================================
// Elements
// ============================================================================

pub use crate::element::{Align, Element, ElementBuilder, Font, Layout, VAlign};
pub use crate::element::widgets::{
    Browse, BrowseKind, Button, Checkbox, CloseButton, Column, Combo, Frame, HSeparator, Input,
    InputText, Label, Listbox, Multiline, Orientation, Output, Radio, SelectMode, Slider, Submit,
    Tab, TabGroup, Table, Text, Textarea, VSeparator,
};
