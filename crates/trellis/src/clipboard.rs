//! Clipboard collaborators.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::ToolkitError;

/// Text clipboard access.
pub trait Clipboard: Send {
    /// Current clipboard text.
    fn get_text(&mut self) -> Result<String, ToolkitError>;

    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str) -> Result<(), ToolkitError>;
}

/// A process-local clipboard. Clones share the same text.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<Mutex<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String, ToolkitError> {
        Ok(self.text.lock().clone())
    }

    fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        *self.text.lock() = text.to_string();
        Ok(())
    }
}

/// The operating system clipboard.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ToolkitError> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.get_text())
            .map_err(|e| ToolkitError::new(format!("clipboard read failed: {e}")))
    }

    fn set_text(&mut self, text: &str) -> Result<(), ToolkitError> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|e| ToolkitError::new(format!("clipboard write failed: {e}")))
    }
}
