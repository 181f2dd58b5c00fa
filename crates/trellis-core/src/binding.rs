//! Per-element event bindings.
//!
//! A binding maps a raw native interaction name (such as `<Button-3>` or
//! `<Return>`) to a logical event. In [`EventMode::User`] mode the event is
//! named `"{key}{suffix}"` and carries only the interaction context. In
//! [`EventMode::System`] mode the event is named after the element key, the
//! suffix travels as `event_type`, and the window folds a full value snapshot
//! into the payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::value::{Key, Value, Values};

/// How a fired binding is turned into an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Event `"{key}{suffix}"`, payload `{event}`.
    #[default]
    User,
    /// Event `key`, payload `{event, event_type}` plus all values.
    System,
}

/// A single binding rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    /// Logical handler suffix.
    pub handler_suffix: String,
    /// Whether the native interaction keeps propagating. Reserved for
    /// toolkits that support it; never affects queueing.
    pub propagate: bool,
    /// Dispatch mode.
    pub mode: EventMode,
}

/// The event produced by a fired binding.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredBinding {
    /// Event name to enqueue.
    pub name: String,
    /// Payload before any snapshot is folded in.
    pub payload: Values,
    /// Whether the window must fold the current values into the payload.
    pub needs_snapshot: bool,
}

/// Interaction name to binding rule.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: BTreeMap<String, BindingEntry>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `interaction`, replacing any previous rule for it.
    ///
    /// Returns `true` when the interaction was not bound before, meaning the
    /// native hook still has to be installed. Rebinding never installs a
    /// second native hook, so an interaction fires at most once.
    pub fn bind(
        &mut self,
        interaction: impl Into<String>,
        handler_suffix: impl Into<String>,
        propagate: bool,
        mode: EventMode,
    ) -> bool {
        let interaction = interaction.into();
        let entry = BindingEntry {
            handler_suffix: handler_suffix.into(),
            propagate,
            mode,
        };
        tracing::trace!(
            target: targets::BINDING,
            %interaction,
            suffix = %entry.handler_suffix,
            ?mode,
            "binding"
        );
        self.entries.insert(interaction, entry).is_none()
    }

    /// The rule for `interaction`, if bound.
    pub fn get(&self, interaction: &str) -> Option<&BindingEntry> {
        self.entries.get(interaction)
    }

    /// Iterate over bound interactions.
    pub fn interactions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of bound interactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a fired interaction into the event it produces.
    pub fn fire(&self, key: &Key, interaction: &str, context: Value) -> Option<FiredBinding> {
        let entry = self.entries.get(interaction)?;
        let fired = match entry.mode {
            EventMode::User => FiredBinding {
                name: format!("{key}{}", entry.handler_suffix),
                payload: Values::new().with("event", context),
                needs_snapshot: false,
            },
            EventMode::System => FiredBinding {
                name: key.to_string(),
                payload: Values::new()
                    .with("event", context)
                    .with("event_type", entry.handler_suffix.clone()),
                needs_snapshot: true,
            },
        };
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_mode_names_event_with_suffix() {
        let mut table = BindingTable::new();
        assert!(table.bind("<Button-3>", "-rclick", true, EventMode::User));
        let fired = table
            .fire(&Key::from("-btn-"), "<Button-3>", json!({"x": 4}))
            .unwrap();
        assert_eq!(fired.name, "-btn--rclick");
        assert_eq!(fired.payload, Values::new().with("event", json!({"x": 4})));
        assert!(!fired.needs_snapshot);
    }

    #[test]
    fn test_system_mode_names_event_with_key() {
        let mut table = BindingTable::new();
        table.bind("<Return>", "return", true, EventMode::System);
        let fired = table.fire(&Key::from("OK"), "<Return>", Value::Null).unwrap();
        assert_eq!(fired.name, "OK");
        assert_eq!(fired.payload.get_str("event_type"), Some("return"));
        assert!(fired.needs_snapshot);
    }

    #[test]
    fn test_rebinding_overwrites_without_new_native_hook() {
        let mut table = BindingTable::new();
        assert!(table.bind("<Return>", "first", true, EventMode::User));
        assert!(!table.bind("<Return>", "second", false, EventMode::User));
        assert_eq!(table.len(), 1);
        let entry = table.get("<Return>").unwrap();
        assert_eq!(entry.handler_suffix, "second");
        assert!(!entry.propagate);
    }

    #[test]
    fn test_unbound_interaction_does_not_fire() {
        let table = BindingTable::new();
        assert!(table.fire(&Key::from("k"), "<Button-1>", Value::Null).is_none());
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: EventMode = serde_json::from_value(json!("system")).unwrap();
        assert_eq!(mode, EventMode::System);
    }
}
