use serde_json::Value;
use trellis_core::{EventMode, NativeHandle, Props, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Reaction};
use crate::toolkit::{WidgetKind, interactions};

fn bind_key_events(base: &mut ElementBase) {
    let _ = base.bind(interactions::KEY_PRESS, "key", true, EventMode::System);
}

fn bind_focus_events(base: &mut ElementBase) {
    let _ = base.bind_events(
        [
            (interactions::FOCUS_IN, "focusin"),
            (interactions::FOCUS_OUT, "focusout"),
            (interactions::BUTTON_1, "click"),
            (interactions::BUTTON_3, "right_click"),
        ],
        EventMode::System,
    );
}

fn value_as_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Single-line text entry.
#[derive(Debug)]
pub struct Input {
    base: ElementBase,
    default_text: String,
    readonly: bool,
    enable_events: bool,
}

/// Alias of [`Input`].
pub type InputText = Input;

impl Input {
    /// Create an entry holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new("Input"),
            default_text: text.into(),
            readonly: false,
            enable_events: false,
        }
    }

    /// Report edits as `change` events and Return as `return` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        if enable {
            let _ = self
                .base
                .bind(interactions::RETURN, "return", true, EventMode::System);
        }
        self
    }

    /// Report key presses as `key` events.
    pub fn enable_key_events(mut self, enable: bool) -> Self {
        if enable {
            bind_key_events(&mut self.base);
        }
        self
    }

    /// Report focus changes and clicks.
    pub fn enable_focus_events(mut self, enable: bool) -> Self {
        if enable {
            bind_focus_events(&mut self.base);
        }
        self
    }

    /// Mask typed characters with `mask`.
    pub fn password_char(mut self, mask: char) -> Self {
        self.base.set_prop("show", mask.to_string());
        self
    }

    /// Create the entry read-only.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Current text.
    pub fn get_text(&self) -> Result<String, ToolkitError> {
        self.base.native_get().map(value_as_text)
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        self.base.native_set(Value::from(text))
    }

    /// Toggle read-only mode.
    pub fn set_readonly(&mut self, readonly: bool) -> Result<(), ToolkitError> {
        self.readonly = readonly;
        let mut changes = Props::new();
        let state = if readonly { "readonly" } else { "normal" };
        changes.insert("state".into(), Value::from(state));
        self.base.update(changes)
    }

    /// Whether the entry is read-only.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Copy the whole text to the clipboard.
    pub fn copy(&self) -> Result<(), ToolkitError> {
        let text = self.get_text()?;
        match self.base.app() {
            Some(app) => app.set_clipboard_text(&text),
            None => Ok(()),
        }
    }

    /// Append the clipboard text.
    pub fn paste(&mut self) -> Result<(), ToolkitError> {
        let Some(app) = self.base.app() else {
            return Ok(());
        };
        let pasted = app.clipboard_text()?;
        let text = self.get_text()? + &pasted;
        self.set_text(&text)
    }
}

impl Element for Input {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let mut spec = self
            .base
            .widget_spec(WidgetKind::Entry)
            .with_value(self.default_text.clone());
        if self.readonly {
            spec.props.insert("state".into(), Value::from("readonly"));
        }
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        self.get_text().map(Value::from)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        self.base.native_set(Value::from(value_as_text(value)))
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::CHANGE {
            Reaction::event_type("change")
        } else {
            Reaction::Ignore
        }
    }
}

/// Multi-line text area.
#[derive(Debug)]
pub struct Multiline {
    base: ElementBase,
    default_text: String,
    readonly: bool,
    enable_events: bool,
}

/// Alias of [`Multiline`].
pub type Textarea = Multiline;

/// Alias of [`Multiline`], for log output areas.
pub type Output = Multiline;

impl Multiline {
    /// Create a text area holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new("Multiline"),
            default_text: text.into(),
            readonly: false,
            enable_events: false,
        }
    }

    /// Report edits as `change` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    /// Report key presses as `key` events.
    pub fn enable_key_events(mut self, enable: bool) -> Self {
        if enable {
            bind_key_events(&mut self.base);
        }
        self
    }

    /// Report focus changes and clicks.
    pub fn enable_focus_events(mut self, enable: bool) -> Self {
        if enable {
            bind_focus_events(&mut self.base);
        }
        self
    }

    /// Create the area read-only.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Current text.
    pub fn get_text(&self) -> Result<String, ToolkitError> {
        self.base.native_get().map(value_as_text)
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        self.base.native_set(Value::from(text))
    }

    /// Append `text` and a newline.
    pub fn print(&mut self, text: &str) -> Result<(), ToolkitError> {
        let mut current = self.get_text()?;
        current.push_str(text);
        current.push('\n');
        self.set_text(&current)
    }

    /// Copy the whole text to the clipboard.
    pub fn copy(&self) -> Result<(), ToolkitError> {
        let text = self.get_text()?;
        match self.base.app() {
            Some(app) => app.set_clipboard_text(&text),
            None => Ok(()),
        }
    }

    /// Append the clipboard text.
    pub fn paste(&mut self) -> Result<(), ToolkitError> {
        let Some(app) = self.base.app() else {
            return Ok(());
        };
        let pasted = app.clipboard_text()?;
        let text = self.get_text()? + &pasted;
        self.set_text(&text)
    }
}

impl Element for Multiline {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let mut spec = self
            .base
            .widget_spec(WidgetKind::TextArea)
            .with_value(self.default_text.clone());
        if self.readonly {
            spec.props.insert("state".into(), Value::from("disabled"));
        }
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        self.get_text().map(Value::from)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        self.base.native_set(Value::from(value_as_text(value)))
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::CHANGE {
            Reaction::event_type("change")
        } else {
            Reaction::Ignore
        }
    }
}
