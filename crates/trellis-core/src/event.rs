//! Event names and queued event entries.

use crate::value::Values;

/// Event returned when the window was closed by the user or by `close`.
pub const WINDOW_CLOSED: &str = "WINDOW_CLOSED";

/// Default event name returned when a read times out.
pub const TIMEOUT_KEY: &str = "-TIMEOUT-";

/// Event name for window-level key presses when key events are enabled.
pub const WINDOW_KEY_EVENT: &str = "-WINDOW_KEY_EVENT-";

/// Payload entry that replaces the event name when an element dispatches.
pub const EG_SWAP_EVENT_NAME: &str = "--swap_event_name--";

/// Events whose name ends with this marker never reach the caller.
pub const HIDDEN_EVENT_MARKER: &str = "/hide";

/// Suffix appended to an event name when a hook stops it.
pub const STOPPED_SUFFIX: &str = "-stopped";

/// One entry of a window's event queue.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEvent {
    /// The event name, usually an element key plus an optional handler suffix.
    pub name: String,
    /// Values captured when the event was enqueued.
    pub values: Values,
}

impl QueuedEvent {
    /// Create a queued event.
    pub fn new(name: impl Into<String>, values: Values) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Split into the `(name, values)` pair handed to callers.
    pub fn into_pair(self) -> (String, Values) {
        (self.name, self.values)
    }
}

/// Whether an event is consumed internally and never returned by `read`.
pub fn is_hidden_event(name: &str) -> bool {
    name.ends_with(HIDDEN_EVENT_MARKER)
}

/// The name an event takes after a hook stopped it.
pub fn stopped_event_name(name: &str) -> String {
    format!("{name}{STOPPED_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_marker_only_at_end() {
        assert!(is_hidden_event("Browse1--browse_action/hide"));
        assert!(!is_hidden_event("/hide-stopped"));
        assert!(!is_hidden_event("-name-"));
    }

    #[test]
    fn test_stopped_name() {
        assert_eq!(stopped_event_name("A"), "A-stopped");
    }
}
