use serde_json::Value;
use trellis_core::{EventMode, NativeHandle, RadioMembership, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Reaction};
use crate::toolkit::{WidgetKind, interactions};

/// A check box. Its key defaults to its text; every user toggle produces a
/// `change` event.
#[derive(Debug)]
pub struct Checkbox {
    base: ElementBase,
    default: bool,
}

impl Checkbox {
    /// Create a check box labelled `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = ElementBase::new("Checkbox").with_style_class("TCheckbutton");
        base.derive_key(&text);
        base.set_prop("text", text);
        Self {
            base,
            default: false,
        }
    }

    /// Initial state.
    pub fn default(mut self, checked: bool) -> Self {
        self.default = checked;
        self
    }

    /// Also report right clicks.
    pub fn enable_events(mut self, enable: bool) -> Self {
        if enable {
            let _ = self
                .base
                .bind(interactions::BUTTON_3, "right_click", true, EventMode::System);
        }
        self
    }

    /// Whether the box is checked.
    pub fn get_value(&self) -> Result<bool, ToolkitError> {
        self.base
            .native_get()
            .map(|value| value.as_bool().unwrap_or(false))
    }

    /// Check or uncheck the box.
    pub fn set_checked(&mut self, checked: bool) -> Result<(), ToolkitError> {
        self.base.native_set(Value::Bool(checked))
    }
}

impl Element for Checkbox {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let spec = self
            .base
            .widget_spec(WidgetKind::Checkbutton)
            .with_value(self.default);
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        self.get_value().map(Value::Bool)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        self.set_checked(value.as_bool().unwrap_or(false))
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if interaction == interactions::CHANGE {
            Reaction::event_type("change")
        } else {
            Reaction::Ignore
        }
    }
}

/// A radio button.
///
/// Radios with the same group id share one selection variable inside their
/// window; selecting one deselects the others. The key defaults to the text.
#[derive(Debug)]
pub struct Radio {
    base: ElementBase,
    group_id: String,
    default: bool,
    membership: Option<RadioMembership>,
}

impl Radio {
    /// Create a radio labelled `text` in group `group_id`.
    pub fn new(text: impl Into<String>, group_id: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = ElementBase::new("Radio").with_style_class("TRadiobutton");
        base.derive_key(&text);
        base.set_prop("text", text);
        let group_id = group_id.into();
        Self {
            base,
            group_id: if group_id.is_empty() {
                "group".to_string()
            } else {
                group_id
            },
            default: false,
            membership: None,
        }
    }

    /// Select this radio when the window is built.
    pub fn default(mut self, selected: bool) -> Self {
        self.default = selected;
        self
    }

    /// Also report right clicks.
    pub fn enable_events(mut self, enable: bool) -> Self {
        if enable {
            let _ = self
                .base
                .bind(interactions::BUTTON_3, "right_click", true, EventMode::System);
        }
        self
    }

    /// The group id.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The value that marks this radio as selected, once created.
    pub fn group_value(&self) -> Option<i64> {
        self.membership.as_ref().map(|m| m.value)
    }

    /// The group's current selection value, once created.
    pub fn group_selection(&self) -> Option<i64> {
        self.membership.as_ref().map(|m| m.selection.get())
    }

    /// Make this radio the selected member of its group.
    pub fn select(&mut self) {
        if let Some(membership) = &self.membership {
            membership.select();
        } else {
            self.default = true;
        }
    }

    /// Whether this radio is the selected member of its group.
    pub fn is_selected(&self) -> bool {
        self.membership
            .as_ref()
            .map_or(self.default, RadioMembership::is_selected)
    }
}

impl Element for Radio {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let membership = cx.join_radio_group(&self.group_id);
        if self.default {
            membership.select();
        }
        let mut spec = self.base.widget_spec(WidgetKind::Radiobutton);
        spec.props.insert("value".into(), Value::from(membership.value));
        spec.props.insert("group".into(), Value::from(self.group_id.clone()));
        self.membership = Some(membership);
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::Bool(self.is_selected()))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        if value.as_bool().unwrap_or(false) {
            self.select();
        }
        Ok(())
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if interaction == interactions::CHANGE {
            self.select();
            Reaction::event_type("change")
        } else {
            Reaction::Ignore
        }
    }
}
