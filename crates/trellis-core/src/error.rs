//! Error types for Trellis.

use crate::value::Key;

/// Result alias used by window construction and configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time errors.
///
/// Every variant fails the whole window construction; there is no partially
/// built window. Failures while the window is running never surface here:
/// value collection degrades to a stale snapshot, dialog failures degrade to
/// "no result", and teardown failures are logged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layout was not a non-empty two-dimensional sequence.
    #[error("invalid layout, expected a non-empty list of rows: {found}")]
    InvalidLayout {
        /// Rendering of the offending value.
        found: String,
    },

    /// Two elements in one window claimed the same key.
    #[error("duplicate element key `{key}` on {element_type}")]
    DuplicateKey {
        /// The contested key.
        key: Key,
        /// Type of the element that tried to register second.
        element_type: String,
    },

    /// The toolkit failed to create or configure an element.
    #[error("failed to create {element_type} (key={key}, props={props}): {source}")]
    ElementCreation {
        /// Element type name, e.g. `Input`.
        element_type: String,
        /// The element key, or `-` when it has none.
        key: String,
        /// Declared properties rendered as JSON.
        props: String,
        /// The underlying toolkit failure.
        source: ToolkitError,
    },

    /// A child of a container element failed to build.
    #[error("failed to build children of {element_type} (key={key}, props={props})")]
    ChildCreation {
        /// Container element type.
        element_type: String,
        /// Container key, or `-`.
        key: String,
        /// Declared properties of the container.
        props: String,
        /// The child failure.
        #[source]
        source: Box<Error>,
    },

    /// The native window itself could not be created.
    #[error("failed to create window `{title}`: {source}")]
    WindowCreation {
        /// Window title.
        title: String,
        /// The underlying toolkit failure.
        source: ToolkitError,
    },

    /// Window configuration could not be parsed.
    #[error("invalid window configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A serialized layout could not be parsed.
    #[error("invalid layout document: {0}")]
    LayoutFormat(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::InvalidLayout`] from anything printable.
    pub fn invalid_layout(found: impl Into<String>) -> Self {
        Self::InvalidLayout {
            found: found.into(),
        }
    }
}

/// Failure reported by an external collaborator (toolkit, dialogs, clipboard).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ToolkitError {
    message: String,
}

impl ToolkitError {
    /// Create a new collaborator error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Timer-related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is not registered.
    #[error("invalid timer ID")]
    InvalidTimerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_element_creation_message_names_element() {
        let err = Error::ElementCreation {
            element_type: "Input".into(),
            key: "-name-".into(),
            props: r#"{"width":20}"#.into(),
            source: ToolkitError::new("no such font"),
        };
        let text = err.to_string();
        assert!(text.contains("Input"));
        assert!(text.contains("-name-"));
        assert!(text.contains("width"));
        assert!(text.contains("no such font"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_child_creation_chains_source() {
        let inner = Error::invalid_layout("42");
        let err = Error::ChildCreation {
            element_type: "Frame".into(),
            key: "-".into(),
            props: "{}".into(),
            source: Box::new(inner),
        };
        let source = err.source().expect("chained");
        assert!(source.to_string().contains("42"));
    }
}
