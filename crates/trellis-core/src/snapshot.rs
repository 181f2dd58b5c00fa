//! All-or-nothing value collection.

use crate::error::ToolkitError;
use crate::logging::targets;
use crate::value::{Key, Value, Values};

/// Result of one collection pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Every accessor succeeded.
    Fresh(Values),
    /// An accessor failed; these are the last values that were collected in
    /// full.
    Stale(Values),
}

impl Snapshot {
    /// The values, fresh or stale.
    pub fn into_values(self) -> Values {
        match self {
            Snapshot::Fresh(values) | Snapshot::Stale(values) => values,
        }
    }

    /// Borrow the values.
    pub fn values(&self) -> &Values {
        match self {
            Snapshot::Fresh(values) | Snapshot::Stale(values) => values,
        }
    }

    /// Whether this is a fallback to an older snapshot.
    pub fn is_stale(&self) -> bool {
        matches!(self, Snapshot::Stale(_))
    }
}

/// Collects element values and remembers the last complete snapshot.
#[derive(Debug, Default)]
pub struct ValueCollector {
    last: Values,
}

impl ValueCollector {
    /// Create a collector with an empty cached snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect one value per entry through `accessor`.
    ///
    /// The first failing accessor aborts the pass and the cached snapshot is
    /// returned unchanged. A complete pass replaces the cache.
    pub fn collect<'a, T, I, F>(&mut self, entries: I, mut accessor: F) -> Snapshot
    where
        I: IntoIterator<Item = (&'a Key, T)>,
        F: FnMut(T) -> Result<Value, ToolkitError>,
    {
        let mut values = Values::new();
        for (key, item) in entries {
            match accessor(item) {
                Ok(value) => {
                    values.insert(key.clone(), value);
                }
                Err(error) => {
                    tracing::warn!(
                        target: targets::SNAPSHOT,
                        %key,
                        %error,
                        "value accessor failed, keeping previous snapshot"
                    );
                    return Snapshot::Stale(self.last.clone());
                }
            }
        }
        self.last = values.clone();
        Snapshot::Fresh(values)
    }

    /// The last complete snapshot.
    pub fn last(&self) -> &Values {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_pass_replaces_cache() {
        let keys = [Key::from("a"), Key::from("b")];
        let mut collector = ValueCollector::new();
        let snapshot = collector.collect(keys.iter().map(|k| (k, 1)), |n| Ok(json!(n)));
        assert!(!snapshot.is_stale());
        assert_eq!(snapshot.values().len(), 2);
        assert_eq!(collector.last(), snapshot.values());
    }

    #[test]
    fn test_failure_returns_previous_snapshot_not_partial() {
        let keys = [Key::from("a"), Key::from("b")];
        let mut collector = ValueCollector::new();
        collector.collect(keys.iter().map(|k| (k, 1)), |n| Ok(json!(n)));

        let snapshot = collector.collect(keys.iter().enumerate().map(|(i, k)| (k, i)), |i| {
            if i == 1 {
                Err(ToolkitError::new("widget destroyed"))
            } else {
                Ok(json!(99))
            }
        });
        assert!(snapshot.is_stale());
        assert_eq!(snapshot.into_values(), Values::new().with("a", 1).with("b", 1));
    }

    #[test]
    fn test_repeated_failures_are_idempotent() {
        let keys = [Key::from("a")];
        let mut collector = ValueCollector::new();
        collector.collect(keys.iter().map(|k| (k, ())), |_| Ok(json!("x")));
        let fail = |_: ()| -> Result<Value, ToolkitError> { Err(ToolkitError::new("gone")) };
        let first = collector.collect(keys.iter().map(|k| (k, ())), fail);
        let second = collector.collect(keys.iter().map(|k| (k, ())), fail);
        assert_eq!(first, second);
    }
}
