//! The key index of a window.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::handle::ElementId;
use crate::value::Key;

/// Where an element's key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Given by the caller.
    Explicit,
    /// Defaulted from the element's text.
    Derived,
    /// Generated because a value-capable element had no key.
    Generated,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    key: Key,
    id: ElementId,
    has_value: bool,
}

/// Registration-ordered map from key to element.
///
/// Holds exactly the elements that are value-capable or explicitly keyed.
/// Registering a key twice is an error, never an overwrite.
#[derive(Debug, Default)]
pub struct KeyIndex {
    entries: Vec<IndexEntry>,
    lookup: HashMap<Key, usize>,
}

impl KeyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an element with this key origin and capability is indexed.
    pub fn admits(origin: KeyOrigin, has_value: bool) -> bool {
        has_value || origin == KeyOrigin::Explicit
    }

    /// Register an element.
    ///
    /// Returns `Ok(false)` when the element does not belong in the index and
    /// [`Error::DuplicateKey`] when the key is taken.
    pub fn register(
        &mut self,
        key: &Key,
        origin: KeyOrigin,
        has_value: bool,
        id: ElementId,
        element_type: &str,
    ) -> Result<bool> {
        if !Self::admits(origin, has_value) {
            return Ok(false);
        }
        if self.lookup.contains_key(key) {
            return Err(Error::DuplicateKey {
                key: key.clone(),
                element_type: element_type.to_string(),
            });
        }
        self.lookup.insert(key.clone(), self.entries.len());
        self.entries.push(IndexEntry {
            key: key.clone(),
            id,
            has_value,
        });
        Ok(true)
    }

    /// The element registered under `key`.
    pub fn get(&self, key: &Key) -> Option<ElementId> {
        self.lookup.get(key).map(|&index| self.entries[index].id)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &Key) -> bool {
        self.lookup.contains_key(key)
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, ElementId)> {
        self.entries.iter().map(|entry| (&entry.key, entry.id))
    }

    /// Value-capable entries in registration order.
    pub fn value_entries(&self) -> impl Iterator<Item = (&Key, ElementId)> {
        self.entries
            .iter()
            .filter(|entry| entry.has_value)
            .map(|entry| (&entry.key, entry.id))
    }

    /// Number of indexed elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
