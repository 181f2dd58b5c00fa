//! Radio group registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Selection value meaning "no member selected".
pub const RADIO_NONE_SELECTED: i64 = 0;

/// The selection variable shared by every member of one radio group.
#[derive(Debug, Clone)]
pub struct SelectionVar(Arc<AtomicI64>);

impl SelectionVar {
    fn new() -> Self {
        Self(Arc::new(AtomicI64::new(RADIO_NONE_SELECTED)))
    }

    /// Currently selected member value.
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Select the member with `value`.
    pub fn set(&self, value: i64) {
        self.0.store(value, Ordering::Relaxed);
    }

    /// Whether both handles refer to the same group variable.
    pub fn same_group(&self, other: &SelectionVar) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What a member receives when it joins a group.
#[derive(Debug, Clone)]
pub struct RadioMembership {
    /// The group's shared selection variable.
    pub selection: SelectionVar,
    /// The value that marks this member as selected.
    pub value: i64,
}

impl RadioMembership {
    /// Make this member the selected one.
    pub fn select(&self) {
        self.selection.set(self.value);
    }

    /// Whether this member is the selected one.
    pub fn is_selected(&self) -> bool {
        self.selection.get() == self.value
    }
}

#[derive(Debug)]
struct RadioGroup {
    selection: SelectionVar,
    next_value: i64,
}

/// Radio groups of one window, keyed by group id.
#[derive(Debug, Default)]
pub struct RadioGroupRegistry {
    groups: HashMap<String, RadioGroup>,
}

impl RadioGroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `group_id`, creating the group on first use.
    ///
    /// The first member gets value 1, each later member the next value.
    pub fn join(&mut self, group_id: &str) -> RadioMembership {
        let group = self
            .groups
            .entry(group_id.to_string())
            .or_insert_with(|| RadioGroup {
                selection: SelectionVar::new(),
                next_value: RADIO_NONE_SELECTED,
            });
        group.next_value += 1;
        RadioMembership {
            selection: group.selection.clone(),
            value: group.next_value,
        }
    }

    /// The shared variable of `group_id`, if the group exists.
    pub fn selection(&self, group_id: &str) -> Option<&SelectionVar> {
        self.groups.get(group_id).map(|group| &group.selection)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no group exists.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_share_variable_with_distinct_values() {
        let mut registry = RadioGroupRegistry::new();
        let a = registry.join("size");
        let b = registry.join("size");
        assert_eq!((a.value, b.value), (1, 2));
        assert!(a.selection.same_group(&b.selection));
        assert_eq!(a.selection.get(), RADIO_NONE_SELECTED);
    }

    #[test]
    fn test_exactly_one_member_selected() {
        let mut registry = RadioGroupRegistry::new();
        let a = registry.join("g");
        let b = registry.join("g");
        a.select();
        assert!(a.is_selected());
        assert!(!b.is_selected());
        b.select();
        assert!(!a.is_selected());
        assert_eq!(registry.selection("g").unwrap().get(), b.value);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut registry = RadioGroupRegistry::new();
        let a = registry.join("left");
        let b = registry.join("right");
        assert_eq!((a.value, b.value), (1, 1));
        a.select();
        assert!(!b.is_selected());
        assert_eq!(registry.len(), 2);
    }
}
