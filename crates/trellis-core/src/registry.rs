//! Process-scoped registries: the open-window stack and identifier
//! generation.
//!
//! Neither is a global. An application owns one of each and hands them to
//! the windows it creates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::handle::{NativeHandle, WindowId};
use crate::logging::targets;

/// One open window on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    /// Engine-side identifier.
    pub id: WindowId,
    /// Native window handle.
    pub handle: NativeHandle,
}

/// Ordered stack of currently open windows.
///
/// The top entry is the active window, used as the parent of newly created
/// modal windows. When the stack empties the process may shut down.
#[derive(Debug, Default)]
pub struct WindowStack {
    entries: Vec<WindowEntry>,
}

impl WindowStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a newly opened window.
    pub fn push(&mut self, entry: WindowEntry) {
        tracing::debug!(target: targets::REGISTRY, id = %entry.id, "window pushed");
        self.entries.push(entry);
    }

    /// Remove a window wherever it sits in the stack.
    ///
    /// Returns `true` if it was present.
    pub fn pop(&mut self, id: WindowId) -> bool {
        let Some(position) = self.entries.iter().rposition(|entry| entry.id == id) else {
            return false;
        };
        self.entries.remove(position);
        tracing::debug!(target: targets::REGISTRY, %id, remaining = self.entries.len(), "window popped");
        true
    }

    /// Number of open windows.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no window is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently opened window that is still open.
    pub fn active(&self) -> Option<WindowEntry> {
        self.entries.last().copied()
    }

    /// Whether `id` is open.
    pub fn contains(&self, id: WindowId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }
}

/// Generates window ids, element keys and style names.
#[derive(Debug, Default)]
pub struct IdGenerator {
    windows: AtomicU64,
    elements: AtomicU64,
    styles: Mutex<HashMap<String, u64>>,
}

impl IdGenerator {
    /// Create a generator starting from zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh window id.
    pub fn window_id(&self) -> WindowId {
        WindowId(self.windows.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// A fresh key for a value-capable element declared without one.
    pub fn element_key(&self) -> String {
        let n = self.elements.fetch_add(1, Ordering::Relaxed) + 1;
        format!("-element{n}-")
    }

    /// A fresh name counted per element type, such as `Browse3`.
    pub fn style_key(&self, element_type: &str) -> String {
        let mut styles = self.styles.lock();
        let counter = styles.entry(element_type.to_string()).or_insert(0);
        *counter += 1;
        format!("{element_type}{counter}")
    }
}
