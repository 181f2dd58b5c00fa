use serde_json::Value;
use trellis_core::{NativeHandle, Props, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Reaction};
use crate::toolkit::{WidgetKind, interactions};

/// A table of rows with optional column headings.
///
/// The native value is the index of the selected row, or null. The element
/// value is `[index]`, or the row itself when `event_returns_values` is set,
/// or `[]` without a selection.
#[derive(Debug)]
pub struct Table {
    base: ElementBase,
    rows: Vec<Vec<Value>>,
    headings: Vec<String>,
    returns_values: bool,
    enable_events: bool,
}

impl Table {
    /// Create a table of `rows`.
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            base: ElementBase::new("Table"),
            rows,
            headings: Vec::new(),
            returns_values: false,
            enable_events: false,
        }
    }

    /// Column headings.
    pub fn headings<S: Into<String>>(mut self, headings: impl IntoIterator<Item = S>) -> Self {
        self.headings = headings.into_iter().map(Into::into).collect();
        self
    }

    /// Report the selected row's cells instead of its index.
    pub fn event_returns_values(mut self, enable: bool) -> Self {
        self.returns_values = enable;
        self
    }

    /// Report selections as `select` events.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    /// The rows.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Index of the selected row.
    pub fn selected_row(&self) -> Result<Option<usize>, ToolkitError> {
        let value = self.base.native_get()?;
        Ok(value
            .as_u64()
            .and_then(|index| usize::try_from(index).ok())
            .filter(|&index| index < self.rows.len()))
    }

    /// Replace the rows and clear the selection.
    pub fn set_values(&mut self, rows: Vec<Vec<Value>>) -> Result<(), ToolkitError> {
        self.rows = rows;
        let mut changes = Props::new();
        changes.insert("values".into(), Value::from(self.rows.clone()));
        self.base.update(changes)?;
        self.base.native_set(Value::Null)
    }

    /// Select row `index`.
    pub fn select_row(&mut self, index: usize) -> Result<(), ToolkitError> {
        if index >= self.rows.len() {
            return Err(ToolkitError::new(format!("row {index} out of range")));
        }
        self.base.native_set(Value::from(index))
    }
}

impl Element for Table {
    element_base!();

    fn has_value(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let mut spec = self.base.widget_spec(WidgetKind::Treeview);
        spec.props.insert("values".into(), Value::from(self.rows.clone()));
        if !self.headings.is_empty() {
            spec.props
                .insert("headings".into(), Value::from(self.headings.clone()));
        }
        cx.create_widget(parent, &self.base, spec)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        let value = match self.selected_row()? {
            Some(index) if self.returns_values => Value::from(self.rows[index].clone()),
            Some(index) => Value::from(vec![index]),
            None => Value::Array(Vec::new()),
        };
        Ok(value)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        let rows = match value {
            Value::Array(rows) => rows
                .into_iter()
                .map(|row| match row {
                    Value::Array(cells) => cells,
                    cell => vec![cell],
                })
                .collect(),
            other => {
                return Err(ToolkitError::new(format!(
                    "table values must be a list of rows, got {other}"
                )));
            }
        };
        self.set_values(rows)
    }

    fn react(&mut self, interaction: &str, _context: &Value) -> Reaction {
        if self.enable_events && interaction == interactions::SELECT {
            Reaction::event_type("select")
        } else {
            Reaction::Ignore
        }
    }
}
