//! The Application: process-scoped state shared by every window.
//!
//! An application owns the toolkit, the dialog and clipboard collaborators,
//! the stack of open windows and the generator for element keys and style
//! names. It is created explicitly and passed to each window, so several
//! independent applications can coexist (each test builds its own).

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use trellis_core::logging::targets;
use trellis_core::{IdGenerator, ToolkitError, WindowEntry, WindowId, WindowStack};

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::dialogs::{DialogRequest, DialogResponse, Dialogs, NoDialogs};
use crate::toolkit::{HeadlessToolkit, Toolkit, ToolkitRef};

/// Engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Longest a blocked read sleeps before re-checking its conditions.
    pub idle_tick: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            idle_tick: Duration::from_millis(10),
        }
    }
}

struct AppInner {
    toolkit: ToolkitRef,
    dialogs: Mutex<Box<dyn Dialogs>>,
    clipboard: Mutex<Box<dyn Clipboard>>,
    windows: Mutex<WindowStack>,
    ids: IdGenerator,
    settings: AppSettings,
}

/// Handle to the process-scoped state. Cheap to clone.
#[derive(Clone)]
pub struct Application {
    inner: Arc<AppInner>,
}

impl Application {
    /// Create an application over `toolkit` with default collaborators.
    pub fn new(toolkit: impl Toolkit + 'static) -> Self {
        Self::builder(toolkit).build()
    }

    /// Start configuring an application over `toolkit`.
    pub fn builder(toolkit: impl Toolkit + 'static) -> ApplicationBuilder {
        ApplicationBuilder {
            toolkit: Arc::new(Mutex::new(toolkit)),
            dialogs: Box::new(NoDialogs),
            clipboard: Box::new(MemoryClipboard::new()),
            settings: AppSettings::default(),
        }
    }

    /// An application over a fresh [`HeadlessToolkit`], plus a clone of the
    /// toolkit for driving it.
    pub fn headless() -> (Self, HeadlessToolkit) {
        let toolkit = HeadlessToolkit::new();
        (Self::new(toolkit.clone()), toolkit)
    }

    /// The shared toolkit.
    pub fn toolkit(&self) -> &ToolkitRef {
        &self.inner.toolkit
    }

    /// Engine settings.
    pub fn settings(&self) -> &AppSettings {
        &self.inner.settings
    }

    pub(crate) fn ids(&self) -> &IdGenerator {
        &self.inner.ids
    }

    /// Show a dialog and wait for the answer.
    ///
    /// Dialog failures are logged and reported as `None`.
    pub fn show_dialog(&self, request: &DialogRequest) -> Option<DialogResponse> {
        match self.inner.dialogs.lock().show(request) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(target: targets::DIALOGS, %error, ?request, "dialog failed");
                None
            }
        }
    }

    /// Current clipboard text.
    pub fn clipboard_text(&self) -> Result<String, ToolkitError> {
        self.inner.clipboard.lock().get_text()
    }

    /// Replace the clipboard text.
    pub fn set_clipboard_text(&self, text: &str) -> Result<(), ToolkitError> {
        self.inner.clipboard.lock().set_text(text)
    }

    // =========================================================================
    // Window stack
    // =========================================================================

    /// Number of open windows.
    pub fn window_count(&self) -> usize {
        self.inner.windows.lock().count()
    }

    /// The most recently opened window that is still open.
    pub fn active_window(&self) -> Option<WindowEntry> {
        self.inner.windows.lock().active()
    }

    pub(crate) fn push_window(&self, entry: WindowEntry) {
        self.inner.windows.lock().push(entry);
    }

    /// Remove a window from the stack and return how many remain.
    pub(crate) fn pop_window(&self, id: WindowId) -> usize {
        let mut windows = self.inner.windows.lock();
        windows.pop(id);
        windows.count()
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("windows", &self.window_count())
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Application`].
pub struct ApplicationBuilder {
    toolkit: ToolkitRef,
    dialogs: Box<dyn Dialogs>,
    clipboard: Box<dyn Clipboard>,
    settings: AppSettings,
}

impl ApplicationBuilder {
    /// Use `dialogs` for browse elements.
    pub fn with_dialogs(mut self, dialogs: impl Dialogs + 'static) -> Self {
        self.dialogs = Box::new(dialogs);
        self
    }

    /// Use `clipboard` for copy and paste.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Set the idle tick of read loops.
    pub fn with_idle_tick(mut self, tick: Duration) -> Self {
        self.settings.idle_tick = tick;
        self
    }

    /// Finish building.
    pub fn build(self) -> Application {
        Application {
            inner: Arc::new(AppInner {
                toolkit: self.toolkit,
                dialogs: Mutex::new(self.dialogs),
                clipboard: Mutex::new(self.clipboard),
                windows: Mutex::new(WindowStack::new()),
                ids: IdGenerator::new(),
                settings: self.settings,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::ScriptedDialogs;
    use trellis_core::NativeHandle;

    #[test]
    fn test_window_stack_tracks_active() {
        let (app, _toolkit) = Application::headless();
        assert!(app.active_window().is_none());
        let entry = WindowEntry {
            id: WindowId(1),
            handle: NativeHandle(1),
        };
        app.push_window(entry);
        assert_eq!(app.active_window(), Some(entry));
        assert_eq!(app.pop_window(WindowId(1)), 0);
    }

    #[test]
    fn test_dialog_failure_degrades_to_none() {
        let dialogs = ScriptedDialogs::new();
        dialogs.fail("no display");
        let app = Application::builder(HeadlessToolkit::new())
            .with_dialogs(dialogs.clone())
            .build();
        let request = DialogRequest::Folder {
            title: "Pick".into(),
            initial_folder: None,
        };
        assert_eq!(app.show_dialog(&request), None);
        assert_eq!(dialogs.requests(), vec![request]);
    }

    #[test]
    fn test_clipboard_roundtrip() {
        let (app, _toolkit) = Application::headless();
        app.set_clipboard_text("copied").unwrap();
        assert_eq!(app.clipboard_text().unwrap(), "copied");
    }
}
