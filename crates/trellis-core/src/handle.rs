//! Identifiers shared between the engine and the toolkit.

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// Identifier of an element inside a window's element arena.
    ///
    /// Element links (prev/next, key index entries) hold these instead of
    /// references, so a dropped element never leaves a dangling link.
    pub struct ElementId;
}

/// Opaque handle to a native object created by a toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub u64);

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Process-unique identifier of an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}
