//! Window configuration.

use serde::{Deserialize, Serialize};
use trellis_core::Result;

use crate::element::Font;
use crate::toolkit::WindowSpec;

/// Options for creating a window.
///
/// Built fluently or loaded from TOML:
///
/// ```
/// use trellis::window::WindowConfig;
///
/// let config = WindowConfig::from_toml_str(r#"
///     title = "Settings"
///     size = [640, 480]
///     enable_key_events = true
/// "#).unwrap();
/// assert_eq!(config.size, Some((640, 480)));
/// assert_eq!(config.row_padding, 2);
///
/// let built = WindowConfig::new("Settings").with_size(640, 480).with_key_events(true);
/// assert_eq!(built, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Size in pixels.
    pub size: Option<(u32, u32)>,
    /// Position in pixels.
    pub location: Option<(i32, i32)>,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Default font for elements that declare none.
    pub font: Option<Font>,
    /// Grab input from the active window.
    pub modal: bool,
    /// Keep above other windows.
    pub keep_on_top: bool,
    /// Hide the title bar.
    pub no_titlebar: bool,
    /// Opacity from 0.0 to 1.0.
    pub alpha_channel: f32,
    /// Report key presses as `-WINDOW_KEY_EVENT-`.
    pub enable_key_events: bool,
    /// Report key presses as events named after the key.
    pub return_keyboard_events: bool,
    /// Center on screen, or on the parent window.
    pub center_window: bool,
    /// Vertical padding between rows.
    pub row_padding: u32,
    /// Horizontal padding around the content.
    pub padding_x: u32,
    /// Vertical padding around the content.
    pub padding_y: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: None,
            location: None,
            resizable: false,
            font: None,
            modal: false,
            keep_on_top: false,
            no_titlebar: false,
            alpha_channel: 1.0,
            enable_key_events: false,
            return_keyboard_events: false,
            center_window: true,
            row_padding: 2,
            padding_x: 8,
            padding_y: 8,
        }
    }
}

impl WindowConfig {
    /// Default options with `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse options from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set the size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set the position in pixels.
    pub fn with_location(mut self, x: i32, y: i32) -> Self {
        self.location = Some((x, y));
        self
    }

    /// Allow resizing.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the default font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Make the window modal.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Keep the window above others.
    pub fn with_keep_on_top(mut self, keep_on_top: bool) -> Self {
        self.keep_on_top = keep_on_top;
        self
    }

    /// Hide the title bar.
    pub fn with_no_titlebar(mut self, no_titlebar: bool) -> Self {
        self.no_titlebar = no_titlebar;
        self
    }

    /// Set the opacity.
    pub fn with_alpha_channel(mut self, alpha: f32) -> Self {
        self.alpha_channel = alpha.clamp(0.0, 1.0);
        self
    }

    /// Report key presses as `-WINDOW_KEY_EVENT-`.
    pub fn with_key_events(mut self, enable: bool) -> Self {
        self.enable_key_events = enable;
        self
    }

    /// Report key presses as events named after the key.
    pub fn with_keyboard_events(mut self, enable: bool) -> Self {
        self.return_keyboard_events = enable;
        self
    }

    /// Center the window when shown.
    pub fn with_center_window(mut self, center: bool) -> Self {
        self.center_window = center;
        self
    }

    /// Set the padding between rows.
    pub fn with_row_padding(mut self, padding: u32) -> Self {
        self.row_padding = padding;
        self
    }

    /// Set the padding around the content.
    pub fn with_padding(mut self, x: u32, y: u32) -> Self {
        self.padding_x = x;
        self.padding_y = y;
        self
    }

    pub(crate) fn window_spec(&self) -> WindowSpec {
        WindowSpec {
            title: self.title.clone(),
            size: self.size,
            location: self.location,
            resizable: self.resizable,
            modal: self.modal,
            keep_on_top: self.keep_on_top || self.modal,
            no_titlebar: self.no_titlebar,
            alpha: (self.alpha_channel < 1.0).then_some(self.alpha_channel),
            center: self.center_window && self.location.is_none(),
            padding: (self.padding_x, self.padding_y),
            parent: None,
        }
    }
}
