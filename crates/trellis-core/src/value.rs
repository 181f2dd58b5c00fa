//! Element keys and value snapshots.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// Declared element properties, keyed by property name.
pub type Props = BTreeMap<String, Value>;

/// The identifier used to address an element and to label its events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// A string key such as `-name-`.
    Name(String),
    /// An integer key.
    Index(i64),
}

impl Key {
    /// Returns `true` for the empty string key, which counts as "no key".
    pub fn is_empty(&self) -> bool {
        matches!(self, Key::Name(name) if name.is_empty())
    }

    /// The key as a string slice, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Index(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Index(i64::from(value))
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// A snapshot of element values, or an event payload.
///
/// Event payloads share this type: interaction context lives under `event`
/// and `event_type` next to the element values folded in by the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    entries: BTreeMap<Key, Value>,
}

impl Values {
    /// Create an empty values map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a value.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    /// Look up a string value.
    pub fn get_str(&self, key: impl Into<Key>) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Remove a value.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.remove(&key.into())
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Copy every entry of `other` into `self`, overwriting existing keys.
    pub fn merge(&mut self, other: &Values) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Iterate over keys in key order.
    pub fn keys(&self) -> btree_map::Keys<'_, Key, Value> {
        self.entries.keys()
    }
}

impl Index<&str> for Values {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key)
            .unwrap_or_else(|| panic!("no value for key `{key}`"))
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Values {
    type Item = (Key, Value);
    type IntoIter = btree_map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a Key, &'a Value);
    type IntoIter = btree_map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_display_and_emptiness() {
        assert_eq!(Key::from("-name-").to_string(), "-name-");
        assert_eq!(Key::from(7).to_string(), "7");
        assert!(Key::from("").is_empty());
        assert!(!Key::from(0).is_empty());
    }

    #[test]
    fn test_merge_overwrites() {
        let mut values = Values::new().with("a", 1).with("event", "ctx");
        values.merge(&Values::new().with("a", 2).with(3, true));
        assert_eq!(values["a"], json!(2));
        assert_eq!(values.get(3), Some(&json!(true)));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let values = Values::new().with("x", 1);
        assert_eq!(serde_json::to_value(&values).unwrap(), json!({"x": 1}));
    }
}
