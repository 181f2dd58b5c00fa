use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_core::{NativeHandle, Props, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Reaction};
use crate::toolkit::{WidgetKind, interactions};

fn string_list(values: &[String]) -> Value {
    Value::from(values.to_vec())
}

/// A drop-down list with an editable or read-only entry.
#[derive(Debug)]
pub struct Combo {
    base: ElementBase,
    values: Vec<String>,
    default_value: String,
    enable_events: bool,
}

impl Combo {
    /// Create a combo offering `values`.
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            base: ElementBase::new("Combo").with_style_class("TCombobox"),
            values: values.into_iter().map(Into::into).collect(),
            default_value: String::new(),
            enable_events: false,
        }
    }

    /// Initially selected value.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Only allow picking from the list.
    pub fn readonly(mut self, readonly: bool) -> Self {
        let state = if readonly { "readonly" } else { "normal" };
        self.base.set_prop("state", state);
        self
    }

    /// Report selections as `select` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    /// The offered values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replace the offered values.
    pub fn set_values<S: Into<String>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
    ) -> Result<(), ToolkitError> {
        self.values = values.into_iter().map(Into::into).collect();
        let mut changes = Props::new();
        changes.insert("values".into(), string_list(&self.values));
        self.base.update(changes)
    }
}

impl Element for Combo {
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
            .widget_spec(WidgetKind::Combobox)
            .with_value(self.default_value.clone());
        spec.props.insert("values".into(), string_list(&self.values));
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        self.base.native_get()
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        self.base.native_set(value)
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::SELECT {
            Reaction::event_type("select")
        } else {
            Reaction::Ignore
        }
    }
}

/// How many rows of a list box may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    /// One row, changed by dragging.
    #[default]
    Browse,
    /// One row.
    Single,
    /// Any number of rows, toggled one by one.
    Multiple,
    /// Any number of rows, with range selection.
    Extended,
}

impl SelectMode {
    fn as_str(self) -> &'static str {
        match self {
            SelectMode::Browse => "browse",
            SelectMode::Single => "single",
            SelectMode::Multiple => "multiple",
            SelectMode::Extended => "extended",
        }
    }
}

/// A list of strings with row selection. Its value is the list of selected
/// strings.
#[derive(Debug)]
pub struct Listbox {
    base: ElementBase,
    values: Vec<String>,
    default_values: Vec<String>,
    enable_events: bool,
}

impl Listbox {
    /// Create a list box of `values`.
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            base: ElementBase::new("Listbox"),
            values: values.into_iter().map(Into::into).collect(),
            default_values: Vec::new(),
            enable_events: false,
        }
    }

    /// Initially selected values.
    pub fn default_values<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.default_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Selection mode.
    pub fn select_mode(mut self, mode: SelectMode) -> Self {
        self.base.set_prop("selectmode", mode.as_str());
        self
    }

    /// Report selections as `select` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    /// The listed values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn indices_of(&self, selected: &[String]) -> Value {
        Value::from(
            self.values
                .iter()
                .enumerate()
                .filter(|(_, value)| selected.contains(value))
                .map(|(index, _)| index)
                .collect::<Vec<_>>(),
        )
    }

    fn selected_indices(&self) -> Result<Vec<usize>, ToolkitError> {
        let value = self.base.native_get()?;
        Ok(value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|index| usize::try_from(index).ok())
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Replace the listed values and clear the selection.
    pub fn set_values<S: Into<String>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
    ) -> Result<(), ToolkitError> {
        self.values = values.into_iter().map(Into::into).collect();
        let mut changes = Props::new();
        changes.insert("values".into(), string_list(&self.values));
        self.base.update(changes)?;
        self.base.native_set(Value::Array(Vec::new()))
    }

    /// Select the rows holding `values`.
    pub fn select_values(&mut self, values: &[String]) -> Result<(), ToolkitError> {
        let indices = self.indices_of(values);
        self.base.native_set(indices)
    }

    /// Index of the first selected row.
    pub fn get_cursor_index(&self) -> Result<Option<usize>, ToolkitError> {
        Ok(self.selected_indices()?.first().copied())
    }

    /// Select exactly row `index`.
    pub fn set_cursor_index(&mut self, index: usize) -> Result<(), ToolkitError> {
        if index >= self.values.len() {
            return Err(ToolkitError::new(format!("row {index} out of range")));
        }
        self.base.native_set(Value::from(vec![index]))
    }
}

impl Element for Listbox {
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
            .widget_spec(WidgetKind::Listbox)
            .with_value(self.indices_of(&self.default_values));
        spec.props.insert("values".into(), string_list(&self.values));
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        let selected: Vec<String> = self
            .selected_indices()?
            .into_iter()
            .filter_map(|index| self.values.get(index).cloned())
            .collect();
        Ok(Value::from(selected))
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        let wanted: Vec<String> = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Value::String(item) => vec![item],
            _ => Vec::new(),
        };
        self.select_values(&wanted)
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::SELECT {
            Reaction::event_type("select")
        } else {
            Reaction::Ignore
        }
    }
}
