//! Layouts described as JSON.
//!
//! A document is an array of rows, each an array of element descriptors:
//!
//! ```json
//! [
//!   [{"type": "Text", "text": "Name"}, {"type": "Input", "key": "-name-"}],
//!   [{"type": "Button", "text": "OK"}]
//! ]
//! ```
//!
//! Constructor arguments (`text`, `values`, `layout`, ...) are consumed by
//! type; `key` sets the key and every other field becomes a declared
//! property, normalized like any other in the prepare pass.

use serde_json::{Map, Value};
use trellis_core::{Error, Result};

use crate::element::widgets::{
    Browse, BrowseKind, Button, Checkbox, CloseButton, Column, Combo, Frame, HSeparator, Input,
    Listbox, Multiline, Orientation, Radio, SelectMode, Slider, Tab, TabGroup, Table, Text,
    VSeparator,
};
use crate::element::{Element, Layout};

/// Parse a JSON layout document.
pub fn layout_from_json(source: &str) -> Result<Layout> {
    let document: Value = serde_json::from_str(source)?;
    let layout = parse_layout(&document)?;
    if layout.is_empty() {
        return Err(Error::invalid_layout(document.to_string()));
    }
    Ok(layout)
}

fn parse_layout(value: &Value) -> Result<Layout> {
    let rows = value
        .as_array()
        .ok_or_else(|| Error::invalid_layout(value.to_string()))?;
    rows.iter()
        .map(|row| {
            row.as_array()
                .ok_or_else(|| Error::invalid_layout(row.to_string()))?
                .iter()
                .map(parse_element)
                .collect()
        })
        .collect()
}

struct Descriptor {
    fields: Map<String, Value>,
    source: String,
}

impl Descriptor {
    fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    fn text(&mut self, name: &str) -> String {
        match self.take(name) {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn flag(&mut self, name: &str) -> bool {
        self.take(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    fn number(&mut self, name: &str) -> Option<f64> {
        self.take(name).and_then(|v| v.as_f64())
    }

    fn strings(&mut self, name: &str) -> Vec<String> {
        match self.take(name) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn layout(&mut self) -> Result<Layout> {
        match self.take("layout") {
            Some(layout) => parse_layout(&layout),
            None => Ok(Vec::new()),
        }
    }

    fn invalid(&self) -> Error {
        Error::invalid_layout(self.source.clone())
    }
}

fn parse_element(value: &Value) -> Result<Box<dyn Element>> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::invalid_layout(value.to_string()))?;
    let mut d = Descriptor {
        fields: object.clone(),
        source: value.to_string(),
    };
    let element_type = match d.take("type") {
        Some(Value::String(element_type)) => element_type,
        _ => return Err(d.invalid()),
    };

    let mut element: Box<dyn Element> = match element_type.as_str() {
        "Text" | "Label" => {
            let enable = d.flag("enable_events");
            Box::new(Text::new(d.text("text")).enable_events(enable))
        }
        "Button" | "Submit" => Box::new(Button::new(d.text("text"))),
        "CloseButton" => Box::new(CloseButton::new(d.text("text"))),
        "Input" | "InputText" => {
            let enable = d.flag("enable_events");
            let readonly = d.flag("readonly");
            Box::new(
                Input::new(d.text("text"))
                    .enable_events(enable)
                    .readonly(readonly),
            )
        }
        "Multiline" | "Textarea" | "Output" => {
            let enable = d.flag("enable_events");
            let readonly = d.flag("readonly");
            Box::new(
                Multiline::new(d.text("text"))
                    .enable_events(enable)
                    .readonly(readonly),
            )
        }
        "Checkbox" => {
            let checked = d.flag("default");
            let enable = d.flag("enable_events");
            Box::new(
                Checkbox::new(d.text("text"))
                    .default(checked)
                    .enable_events(enable),
            )
        }
        "Radio" => {
            let selected = d.flag("default");
            let text = d.text("text");
            Box::new(Radio::new(text, d.text("group_id")).default(selected))
        }
        "Combo" => {
            let enable = d.flag("enable_events");
            let default_value = d.text("default_value");
            Box::new(
                Combo::new(d.strings("values"))
                    .default_value(default_value)
                    .enable_events(enable),
            )
        }
        "Listbox" => {
            let enable = d.flag("enable_events");
            let defaults = d.strings("default_values");
            let mut listbox = Listbox::new(d.strings("values"))
                .default_values(defaults)
                .enable_events(enable);
            if let Some(mode) = d.take("select_mode") {
                let mode: SelectMode =
                    serde_json::from_value(mode).map_err(|_| d.invalid())?;
                listbox = listbox.select_mode(mode);
            }
            Box::new(listbox)
        }
        "Slider" => {
            let range = d.take("range").and_then(|range| {
                let pair = range.as_array()?;
                Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
            });
            let (min, max) = range.unwrap_or((1.0, 10.0));
            let mut slider = Slider::new(min, max).enable_events(d.flag("enable_events"));
            if let Some(value) = d.number("default_value") {
                slider = slider.default_value(value);
            }
            if let Some(step) = d.number("resolution") {
                slider = slider.resolution(step);
            }
            if let Some(orientation) = d.take("orientation") {
                let orientation: Orientation =
                    serde_json::from_value(orientation).map_err(|_| d.invalid())?;
                slider = slider.orientation(orientation);
            }
            Box::new(slider)
        }
        "Table" => {
            let rows = match d.take("values") {
                Some(Value::Array(rows)) => rows
                    .into_iter()
                    .map(|row| match row {
                        Value::Array(cells) => cells,
                        cell => vec![cell],
                    })
                    .collect(),
                _ => Vec::new(),
            };
            let headings = d.strings("headings");
            let returns_values = d.flag("event_returns_values");
            let enable = d.flag("enable_events");
            Box::new(
                Table::new(rows)
                    .headings(headings)
                    .event_returns_values(returns_values)
                    .enable_events(enable),
            )
        }
        "Column" => Box::new(Column::new(d.layout()?)),
        "Frame" => {
            let title = d.text("title");
            Box::new(Frame::new(title, d.layout()?))
        }
        "Tab" => {
            let title = d.text("title");
            Box::new(Tab::new(title, d.layout()?))
        }
        "TabGroup" => Box::new(TabGroup::new(d.layout()?)),
        "HSeparator" => Box::new(HSeparator::new()),
        "VSeparator" => Box::new(VSeparator::new()),
        other => {
            let kind = match other {
                "FileBrowse" => BrowseKind::File,
                "FilesBrowse" => BrowseKind::Files,
                "FileSaveAsBrowse" | "FileSaveAs" => BrowseKind::SaveAs,
                "FolderBrowse" => BrowseKind::Folder,
                "ColorBrowse" => BrowseKind::Color,
                "ListBrowse" => BrowseKind::List,
                "MultilineBrowse" => BrowseKind::Multiline,
                "CalendarBrowse" | "CalendarButton" => BrowseKind::Calendar,
                _ => return Err(d.invalid()),
            };
            Box::new(parse_browse(kind, &mut d))
        }
    };

    if let Some(key) = d.take("key") {
        let key = serde_json::from_value::<trellis_core::Key>(key).map_err(|_| d.invalid())?;
        element.base_mut().set_key(key);
    }
    for (name, value) in std::mem::take(&mut d.fields) {
        element.base_mut().set_prop(&name, value);
    }
    Ok(element)
}

fn parse_browse(kind: BrowseKind, d: &mut Descriptor) -> Browse {
    let mut browse = if kind == BrowseKind::List {
        Browse::list(d.strings("values"))
    } else {
        Browse::new(kind)
    };
    if let Some(Value::String(text)) = d.take("text") {
        browse = browse.text(text);
    }
    if let Some(Value::String(target)) = d.take("target_key") {
        browse = browse.target(target);
    }
    if let Some(Value::String(title)) = d.take("title") {
        browse = browse.title(title);
    }
    if let Some(Value::String(message)) = d.take("message") {
        browse = browse.message(message);
    }
    if let Some(Value::String(format)) = d.take("date_format") {
        browse = browse.date_format(format);
    }
    if let Some(Value::String(folder)) = d.take("initial_folder") {
        browse = browse.initial_folder(folder);
    }
    browse.enable_events(d.flag("enable_events"))
}
