//! Declared-property normalization.
//!
//! Runs in the prepare pass, before any native object exists. Alias names
//! are folded into the names toolkits understand, geometry hints move out of
//! the widget properties into pack options, and `bind_events` moves into the
//! binding table.

use serde_json::Value;
use trellis_core::{BindingTable, EventMode, Props};

use crate::toolkit::Pad;

use super::{Align, PackOptions, VAlign};

/// Alias property names accepted on lookup.
pub(crate) const PROPERTY_ALIASES: [(&str, &str); 4] = [
    ("ButtonText", "text"),
    ("label", "text"),
    ("caption", "text"),
    ("justify", "text_align"),
];

/// Native properties readable through `Element::property`.
pub(crate) const NATIVE_PROPERTY_ALLOW_LIST: [&str; 10] = [
    "text", "width", "height", "state", "bg", "fg", "font", "relief", "title", "values",
];

/// Properties moved into a named style for styled widgets.
pub(crate) const STYLE_PROPERTIES: [&str; 4] = ["font", "fg", "bg", "readonlybackground"];

/// Resolve an alias property name.
pub(crate) fn canonical_name(name: &str) -> &str {
    PROPERTY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| canonical)
}

fn to_pad(value: &Value) -> Option<Pad> {
    serde_json::from_value(value.clone()).ok()
}

/// Everything the prepare pass pulls out of the declared properties.
#[derive(Debug, Default)]
pub(crate) struct Normalized {
    pub text_align: Option<Align>,
    pub vertical_alignment: Option<VAlign>,
    pub metadata: Option<Value>,
}

/// Normalize `props` in place.
pub(crate) fn normalize(
    props: &mut Props,
    pack: &mut PackOptions,
    bindings: &mut BindingTable,
) -> Normalized {
    let mut normalized = Normalized::default();

    for (alias, canonical) in PROPERTY_ALIASES {
        if canonical == "text" {
            if let Some(value) = props.remove(alias) {
                props.entry(canonical.to_string()).or_insert(value);
            }
        }
    }

    if let Some(size) = props.remove("size") {
        let pair = size
            .as_array()
            .filter(|dims| dims.len() == 2)
            .map(|dims| (dims[0].clone(), dims[1].clone()));
        match pair {
            Some((width, height)) => {
                props.insert("width".into(), width);
                props.insert("height".into(), height);
            }
            None => {
                props.insert("width".into(), size);
            }
        }
    }
    if let Some(bg) = props.remove("background_color") {
        props.insert("bg".into(), bg);
    }
    if let Some(fg) = props.remove("text_color") {
        props.insert("fg".into(), fg);
    }
    if let Some(fg) = props.remove("color") {
        props.insert("fg".into(), fg);
    }

    if let Some(expand) = props.remove("expand_x") {
        pack.expand_x = expand.as_bool().unwrap_or(false);
    }
    if let Some(expand) = props.remove("expand_y") {
        pack.expand_y = expand.as_bool().unwrap_or(false);
    }
    if let Some(pad) = props.remove("pad") {
        if let Some(pad) = to_pad(&pad) {
            pack.padx = Some(pad);
            pack.pady = Some(pad);
        }
    }
    if let Some(pad) = props.remove("padx") {
        pack.padx = to_pad(&pad);
    }
    if let Some(pad) = props.remove("pady") {
        pack.pady = to_pad(&pad);
    }
    if let Some(anchor) = props.remove("anchor") {
        pack.anchor = anchor.as_str().map(str::to_string);
    }

    if let Some(mode) = props.remove("select_mode") {
        props.insert("selectmode".into(), mode);
    }

    if let Some(events) = props.remove("bind_events") {
        let mode = props
            .remove("bind_mode")
            .and_then(|mode| serde_json::from_value(mode).ok())
            .unwrap_or(EventMode::User);
        if let Some(events) = events.as_object() {
            for (interaction, suffix) in events {
                if let Some(suffix) = suffix.as_str() {
                    bindings.bind(interaction.as_str(), suffix, true, mode);
                }
            }
        }
    }

    if let Some(disabled) = props.remove("disabled") {
        let state = if disabled.as_bool().unwrap_or(false) {
            "disabled"
        } else {
            "normal"
        };
        props.insert("state".into(), Value::from(state));
    }

    let align = props.remove("justify").or_else(|| props.remove("text_align"));
    normalized.text_align = align.and_then(|value| serde_json::from_value(value).ok());
    normalized.vertical_alignment = props
        .remove("vertical_alignment")
        .and_then(|value| serde_json::from_value(value).ok());
    normalized.metadata = props.remove("metadata");

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_renames_and_moves_geometry() {
        let mut p = props(json!({
            "size": [20, 3],
            "background_color": "white",
            "text_color": "black",
            "expand_x": true,
            "padx": [4, 8],
            "anchor": "w",
            "select_mode": "multiple",
            "disabled": true,
        }));
        let mut pack = PackOptions::default();
        let mut bindings = BindingTable::new();
        normalize(&mut p, &mut pack, &mut bindings);

        assert_eq!(
            p,
            props(json!({
                "width": 20,
                "height": 3,
                "bg": "white",
                "fg": "black",
                "selectmode": "multiple",
                "state": "disabled",
            }))
        );
        assert!(pack.expand_x);
        assert_eq!(pack.padx, Some(Pad::Pair(4, 8)));
        assert_eq!(pack.anchor.as_deref(), Some("w"));
    }

    #[test]
    fn test_color_wins_over_text_color() {
        let mut p = props(json!({"text_color": "red", "color": "blue"}));
        normalize(&mut p, &mut PackOptions::default(), &mut BindingTable::new());
        assert_eq!(p["fg"], json!("blue"));
    }

    #[test]
    fn test_bind_events_move_into_table() {
        let mut p = props(json!({
            "bind_events": {"<Button-3>": "-menu", "<Return>": "-enter"},
            "bind_mode": "system",
        }));
        let mut bindings = BindingTable::new();
        normalize(&mut p, &mut PackOptions::default(), &mut bindings);
        assert!(p.is_empty());
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("<Return>").unwrap().mode, EventMode::System);
    }

    #[test]
    fn test_aliases_fold_into_text_and_alignment() {
        let mut p = props(json!({"ButtonText": "Go", "justify": "right"}));
        let normalized = normalize(&mut p, &mut PackOptions::default(), &mut BindingTable::new());
        assert_eq!(p["text"], json!("Go"));
        assert_eq!(normalized.text_align, Some(Align::Right));
        assert_eq!(canonical_name("caption"), "text");
        assert_eq!(canonical_name("width"), "width");
    }
}
