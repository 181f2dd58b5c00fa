//! Browse buttons.
//!
//! A browse button shows a dialog and writes the answer into a target
//! element: the element named by `target_key`, or the element declared just
//! before the button in its row. The click travels through the window as a
//! hidden event, so `read` never returns it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use trellis_core::logging::targets;
use trellis_core::{EventMode, HookOutcome, Key, NativeHandle, ToolkitError, Values};

use crate::dialogs::{DialogRequest, DialogResponse};
use crate::element::{CreateContext, Element, ElementBase, PrepareContext, log_update_failure};
use crate::toolkit::{WidgetKind, interactions};
use crate::window::Window;

/// Suffix of the hidden event a browse click produces.
pub const BROWSE_ACTION: &str = "--browse_action/hide";

/// Which dialog a browse button opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    /// One existing file.
    File,
    /// Several existing files, joined with `;`.
    Files,
    /// A file name to save to.
    SaveAs,
    /// A folder.
    Folder,
    /// A color.
    Color,
    /// One item of a list.
    List,
    /// A block of text.
    Multiline,
    /// A date.
    Calendar,
}

impl BrowseKind {
    /// Element type name of buttons of this kind.
    pub fn element_type(self) -> &'static str {
        match self {
            BrowseKind::File => "FileBrowse",
            BrowseKind::Files => "FilesBrowse",
            BrowseKind::SaveAs => "FileSaveAsBrowse",
            BrowseKind::Folder => "FolderBrowse",
            BrowseKind::Color => "ColorBrowse",
            BrowseKind::List => "ListBrowse",
            BrowseKind::Multiline => "MultilineBrowse",
            BrowseKind::Calendar => "CalendarBrowse",
        }
    }

    fn default_label(self) -> &'static str {
        match self {
            BrowseKind::SaveAs => "Save As...",
            BrowseKind::Color => "Color",
            BrowseKind::Calendar => "Calendar",
            _ => "Browse",
        }
    }
}

#[derive(Debug, Clone)]
struct BrowseOptions {
    kind: BrowseKind,
    target_key: Option<Key>,
    title: String,
    file_types: Vec<(String, String)>,
    default_extension: Option<String>,
    initial_folder: Option<PathBuf>,
    values: Vec<String>,
    message: String,
    date_format: String,
    enable_events: bool,
}

/// A button that fills a target element from a dialog.
#[derive(Debug)]
pub struct Browse {
    base: ElementBase,
    options: BrowseOptions,
}

impl Browse {
    /// Create a browse button of `kind` with its default label.
    pub fn new(kind: BrowseKind) -> Self {
        let mut base = ElementBase::new(kind.element_type()).with_style_class("TButton");
        base.set_prop("text", kind.default_label());
        let _ = base.bind_events(
            [
                (interactions::BUTTON_1, BROWSE_ACTION),
                (interactions::RETURN, BROWSE_ACTION),
            ],
            EventMode::User,
        );
        Self {
            base,
            options: BrowseOptions {
                kind,
                target_key: None,
                title: String::new(),
                file_types: Vec::new(),
                default_extension: None,
                initial_folder: None,
                values: Vec::new(),
                message: String::new(),
                date_format: "%Y-%m-%d".to_string(),
                enable_events: false,
            },
        }
    }

    /// A single-file browse button.
    pub fn file() -> Self {
        Self::new(BrowseKind::File)
    }

    /// A multi-file browse button.
    pub fn files() -> Self {
        Self::new(BrowseKind::Files)
    }

    /// A save-as button.
    pub fn save_as() -> Self {
        Self::new(BrowseKind::SaveAs)
    }

    /// A folder browse button.
    pub fn folder() -> Self {
        Self::new(BrowseKind::Folder)
    }

    /// A color chooser button.
    pub fn color() -> Self {
        Self::new(BrowseKind::Color)
    }

    /// A list chooser over `values`.
    pub fn list<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        let mut browse = Self::new(BrowseKind::List);
        browse.options.values = values.into_iter().map(Into::into).collect();
        browse
    }

    /// A text editor button.
    pub fn multiline() -> Self {
        Self::new(BrowseKind::Multiline)
    }

    /// A date chooser button.
    pub fn calendar() -> Self {
        Self::new(BrowseKind::Calendar)
    }

    /// Button label.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.base.set_prop("text", text.into());
        self
    }

    /// Element receiving the answer; defaults to the previous element.
    pub fn target(mut self, key: impl Into<Key>) -> Self {
        self.options.target_key = Some(key.into());
        self
    }

    /// Dialog title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Prompt for list and text dialogs.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.options.message = message.into();
        self
    }

    /// Add a `(description, pattern)` file filter.
    pub fn file_type(mut self, description: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.options
            .file_types
            .push((description.into(), pattern.into()));
        self
    }

    /// Extension appended by save dialogs.
    pub fn default_extension(mut self, extension: impl Into<String>) -> Self {
        self.options.default_extension = Some(extension.into());
        self
    }

    /// Folder to start in when the target is empty.
    pub fn initial_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.options.initial_folder = Some(folder.into());
        self
    }

    /// `strftime` format for calendar answers.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.options.date_format = format.into();
        self
    }

    /// Also report a `change` event after filling the target.
    pub fn enable_events(mut self, enable: bool) -> Self {
        self.options.enable_events = enable;
        self
    }

    /// The dialog kind.
    pub fn kind(&self) -> BrowseKind {
        self.options.kind
    }

    fn request(&self, current: &str) -> DialogRequest {
        let options = &self.options;
        let title = options.title.clone();
        let current = current.trim();
        let starting_folder = || {
            Path::new(current)
                .parent()
                .filter(|parent| !current.is_empty() && !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .or_else(|| options.initial_folder.clone())
        };
        let non_empty = || (!current.is_empty()).then(|| current.to_string());
        match options.kind {
            BrowseKind::File | BrowseKind::Files => DialogRequest::OpenFile {
                title,
                initial_folder: starting_folder(),
                file_types: options.file_types.clone(),
                multiple: options.kind == BrowseKind::Files,
            },
            BrowseKind::SaveAs => DialogRequest::SaveFile {
                title,
                initial_folder: starting_folder(),
                file_types: options.file_types.clone(),
                default_extension: options.default_extension.clone(),
            },
            BrowseKind::Folder => DialogRequest::Folder {
                title,
                initial_folder: non_empty()
                    .map(PathBuf::from)
                    .or_else(|| options.initial_folder.clone()),
            },
            BrowseKind::Color => DialogRequest::Color {
                title,
                initial: non_empty(),
            },
            BrowseKind::List => DialogRequest::List {
                title,
                message: options.message.clone(),
                values: options.values.clone(),
                default: non_empty(),
            },
            BrowseKind::Multiline => DialogRequest::Text {
                title,
                message: options.message.clone(),
                default: current.to_string(),
            },
            BrowseKind::Calendar => DialogRequest::Date {
                title,
                initial: NaiveDate::parse_from_str(current, &options.date_format).ok(),
            },
        }
    }

    fn format(&self, response: DialogResponse) -> Option<String> {
        match response {
            DialogResponse::Text(text) => Some(text),
            DialogResponse::Paths(paths) if paths.is_empty() => None,
            DialogResponse::Paths(paths) => Some(
                paths
                    .iter()
                    .map(|path| path.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(";"),
            ),
            DialogResponse::Date(date) => {
                Some(date.format(&self.options.date_format).to_string())
            }
        }
    }
}

impl Element for Browse {
    element_base!();

    fn prepare_create(&mut self, cx: &PrepareContext<'_>) {
        self.base.generate_key(cx.ids.style_key("Browse"));
        self.base.prepare(false, cx);
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        let handle = cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Button))?;
        if let Some(key) = self.base.key().cloned() {
            cx.register_hook(format!("{key}{BROWSE_ACTION}"), move |window, _, _| {
                run_browse(window, &key);
                HookOutcome::Continue
            });
        }
        Ok(handle)
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::from(self.base.prop_str("text").unwrap_or_default()))
    }
}

/// Show the dialog of the browse button `key` and fill its target.
fn run_browse(window: &mut Window, key: &Key) {
    let Some(browse_id) = window.find_element_id(key.clone()) else {
        return;
    };
    let Some(browse) = window
        .element_by_id(browse_id)
        .and_then(|element| element.downcast_ref::<Browse>())
    else {
        return;
    };
    let target = match &browse.options.target_key {
        Some(target_key) => window.find_element_id(target_key.clone()),
        None => browse.base.prev(),
    };
    let Some(target) = target else {
        tracing::warn!(target: targets::DIALOGS, %key, "browse button has no target element");
        return;
    };
    let current = window
        .element_by_id(target)
        .and_then(|element| element.get().ok())
        .map(|value| match value {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .unwrap_or_default();

    let request = browse.request(&current);
    let Some(response) = window.app().show_dialog(&request) else {
        return;
    };
    let enable_events = browse.options.enable_events;
    let Some(text) = browse.format(response) else {
        return;
    };

    if let Some(element) = window.element_by_id_mut(target) {
        if let Err(error) = element.set_value(Value::String(text.clone())) {
            log_update_failure(element.base(), &error);
        }
    }
    if enable_events {
        window.dispatch_event(
            key.to_string(),
            Values::new().with("event", text).with("event_type", "change"),
        );
    }
}
