//! Dialog collaborators.
//!
//! Browse elements ask a [`Dialogs`] implementation for a file, folder,
//! color, date or list choice and wait for the answer. Dialog failures never
//! propagate into the window: the application logs them and treats them as
//! "no result".

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use trellis_core::ToolkitError;

/// A dialog to show.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogRequest {
    /// Pick one or more existing files.
    OpenFile {
        /// Dialog title.
        title: String,
        /// Folder to start in.
        initial_folder: Option<PathBuf>,
        /// `(description, pattern)` filters.
        file_types: Vec<(String, String)>,
        /// Allow several files.
        multiple: bool,
    },
    /// Pick a file name to save to.
    SaveFile {
        /// Dialog title.
        title: String,
        /// Folder to start in.
        initial_folder: Option<PathBuf>,
        /// `(description, pattern)` filters.
        file_types: Vec<(String, String)>,
        /// Extension appended when the user types none.
        default_extension: Option<String>,
    },
    /// Pick a folder.
    Folder {
        /// Dialog title.
        title: String,
        /// Folder to start in.
        initial_folder: Option<PathBuf>,
    },
    /// Pick a color.
    Color {
        /// Dialog title.
        title: String,
        /// Preselected color, such as `#ff0000`.
        initial: Option<String>,
    },
    /// Pick one item of a list.
    List {
        /// Dialog title.
        title: String,
        /// Prompt shown above the list.
        message: String,
        /// Items to choose from.
        values: Vec<String>,
        /// Preselected item.
        default: Option<String>,
    },
    /// Edit a block of text.
    Text {
        /// Dialog title.
        title: String,
        /// Prompt shown above the text.
        message: String,
        /// Initial text.
        default: String,
    },
    /// Pick a date.
    Date {
        /// Dialog title.
        title: String,
        /// Preselected date.
        initial: Option<NaiveDate>,
    },
}

/// What the user chose.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResponse {
    /// Text, colors and list items.
    Text(String),
    /// Files and folders.
    Paths(Vec<PathBuf>),
    /// Dates.
    Date(NaiveDate),
}

/// Shows dialogs and waits for the answer.
pub trait Dialogs: Send {
    /// Show a dialog. `Ok(None)` means the user cancelled.
    fn show(&mut self, request: &DialogRequest) -> Result<Option<DialogResponse>, ToolkitError>;
}

/// Dialogs that are always cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDialogs;

impl Dialogs for NoDialogs {
    fn show(&mut self, _request: &DialogRequest) -> Result<Option<DialogResponse>, ToolkitError> {
        Ok(None)
    }
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<Result<Option<DialogResponse>, ToolkitError>>,
    requests: Vec<DialogRequest>,
}

/// Dialogs answered from a script, recording every request.
///
/// Clones share the script. Once the script runs out every dialog is
/// cancelled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    script: Arc<Mutex<Script>>,
}

impl ScriptedDialogs {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next dialog.
    pub fn answer(&self, response: DialogResponse) {
        self.script.lock().answers.push_back(Ok(Some(response)));
    }

    /// Queue a cancelled dialog.
    pub fn cancel(&self) {
        self.script.lock().answers.push_back(Ok(None));
    }

    /// Queue a failing dialog.
    pub fn fail(&self, message: &str) {
        self.script
            .lock()
            .answers
            .push_back(Err(ToolkitError::new(message)));
    }

    /// Every request shown so far.
    pub fn requests(&self) -> Vec<DialogRequest> {
        self.script.lock().requests.clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn show(&mut self, request: &DialogRequest) -> Result<Option<DialogResponse>, ToolkitError> {
        let mut script = self.script.lock();
        script.requests.push(request.clone());
        script.answers.pop_front().unwrap_or(Ok(None))
    }
}
