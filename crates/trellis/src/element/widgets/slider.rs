use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_core::{NativeHandle, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Reaction};
use crate::toolkit::{WidgetKind, interactions};

/// Slider direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Orientation {
    fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A numeric slider over a closed range.
#[derive(Debug)]
pub struct Slider {
    base: ElementBase,
    range: (f64, f64),
    default_value: Option<f64>,
    enable_events: bool,
}

impl Slider {
    /// Create a slider from `min` to `max`.
    pub fn new(min: f64, max: f64) -> Self {
        let mut base = ElementBase::new("Slider");
        base.set_prop("from", min);
        base.set_prop("to", max);
        base.set_prop("orient", Orientation::Horizontal.as_str());
        Self {
            base,
            range: (min, max),
            default_value: None,
            enable_events: false,
        }
    }

    /// Initial value; defaults to the minimum.
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Step between values.
    pub fn resolution(mut self, step: f64) -> Self {
        self.base.set_prop("resolution", step);
        self
    }

    /// Direction.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.base.set_prop("orient", orientation.as_str());
        self
    }

    /// Report moves as `change` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    /// `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn clamp(&self, value: f64) -> f64 {
        let (low, high) = if self.range.0 <= self.range.1 {
            self.range
        } else {
            (self.range.1, self.range.0)
        };
        value.clamp(low, high)
    }

    /// Current value.
    pub fn get_value(&self) -> Result<f64, ToolkitError> {
        let value = self.base.native_get()?;
        Ok(value.as_f64().unwrap_or(self.range.0))
    }

    /// Move the slider, clamped to the range.
    pub fn set(&mut self, value: f64) -> Result<(), ToolkitError> {
        self.base.native_set(Value::from(self.clamp(value)))
    }
}

impl Element for Slider {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let initial = self.clamp(self.default_value.unwrap_or(self.range.0));
        let spec = self.base.widget_spec(WidgetKind::Scale).with_value(initial);
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        self.get_value().map(Value::from)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        let number = value
            .as_f64()
            .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
            .ok_or_else(|| ToolkitError::new(format!("slider value must be a number, got {value}")))?;
        self.set(number)
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::CHANGE {
            Reaction::event_type("change")
        } else {
            Reaction::Ignore
        }
    }
}
