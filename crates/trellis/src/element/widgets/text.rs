use serde_json::Value;
use trellis_core::{EventMode, NativeHandle, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase};
use crate::toolkit::{WidgetKind, interactions};

/// Static text. Its key defaults to the text itself.
#[derive(Debug)]
pub struct Text {
    base: ElementBase,
}

/// Alias of [`Text`].
pub type Label = Text;

impl Text {
    /// Create a text element.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = ElementBase::new("Text");
        base.derive_key(&text);
        base.set_prop("text", text);
        Self { base }
    }

    /// Report clicks as `{key}` events with `event_type` `click`.
    pub fn enable_events(mut self, enable: bool) -> Self {
        if enable {
            let _ = self
                .base
                .bind(interactions::BUTTON_1, "click", true, EventMode::System);
        }
        self
    }

    /// The displayed text.
    pub fn get_text(&self) -> String {
        self.base.prop_str("text").unwrap_or_default().to_string()
    }

    /// Replace the displayed text.
    pub fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        self.set_value(Value::from(text))
    }
}

impl Element for Text {
    element_base!();

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Label))
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::from(self.get_text()))
    }
}
