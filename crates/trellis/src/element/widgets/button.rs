use serde_json::Value;
use trellis_core::{EventMode, HookOutcome, NativeHandle, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, PrepareContext, Reaction};
use crate::toolkit::{WidgetKind, interactions};

fn button_base(element_type: &'static str, text: String) -> ElementBase {
    let mut base = ElementBase::new(element_type).with_style_class("TButton");
    base.derive_key(&text);
    base.set_prop("text", text);
    let _ = base.bind_events(
        [
            (interactions::BUTTON_3, "right_click"),
            (interactions::RETURN, "return"),
        ],
        EventMode::System,
    );
    base
}

/// A push button. Its key defaults to its text; a click produces
/// `(key, {event_type: "command", ...values})`.
#[derive(Debug)]
pub struct Button {
    base: ElementBase,
}

/// Alias of [`Button`].
pub type Submit = Button;

impl Button {
    /// Create a button.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: button_base("Button", text.into()),
        }
    }

    /// The button label.
    pub fn get_text(&self) -> String {
        self.base.prop_str("text").unwrap_or_default().to_string()
    }

    /// Replace the button label.
    pub fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        self.set_value(Value::from(text))
    }
}

impl Element for Button {
    element_base!();

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Button))
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::from(self.get_text()))
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if interaction == interactions::COMMAND {
            Reaction::event_type("command")
        } else {
            Reaction::Ignore
        }
    }
}

/// A button that closes its window.
///
/// The click is still returned by `read`; the window is no longer alive
/// afterwards.
#[derive(Debug)]
pub struct CloseButton {
    base: ElementBase,
}

impl CloseButton {
    /// Create a close button.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: button_base("CloseButton", text.into()),
        }
    }
}

impl Element for CloseButton {
    element_base!();

    fn prepare_create(&mut self, cx: &PrepareContext<'_>) {
        self.base.generate_key(cx.ids.style_key("CloseButton"));
        self.base.prepare(false, cx);
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let handle = cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Button))?;
        let event = self.base.key_label();
        cx.register_hook(event, |window, _, _| {
            window.close();
            HookOutcome::Continue
        });
        Ok(handle)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::from(self.base.prop_str("text").unwrap_or_default()))
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if interaction == interactions::COMMAND {
            Reaction::event_type("command")
        } else {
            Reaction::Ignore
        }
    }
}
