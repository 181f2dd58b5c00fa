//! Trellis - declarative grid layouts driven by a blocking event-read loop.
//!
//! A window is declared as rows of elements. Building it creates every
//! native widget through a [`Toolkit`](toolkit::Toolkit), registers keys,
//! wires interactions to logical events and hands back a [`Window`]. The
//! caller then loops on [`Window::read`], getting one `(event, values)` pair
//! at a time.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use trellis::prelude::*;
//!
//! let (app, toolkit) = Application::headless();
//! let mut window = Window::new(
//!     &app,
//!     "Hello",
//!     trellis::layout![
//!         [Text::new("Name:"), Input::new("").key("-name-")],
//!         [Button::new("OK"), CloseButton::new("Cancel")],
//!     ],
//! )?;
//!
//! let name = window.element_handle("-name-").unwrap();
//! toolkit.type_text(name, "Ada");
//! toolkit.click(window.element_handle("OK").unwrap());
//!
//! loop {
//!     let (event, values) = window.read(Some(Duration::from_millis(200)));
//!     if event == WINDOW_CLOSED || event == TIMEOUT_KEY {
//!         break;
//!     }
//!     if event == "OK" {
//!         assert_eq!(values.get_str("-name-"), Some("Ada"));
//!         window.close();
//!     }
//! }
//! # Ok::<(), trellis::Error>(())
//! ```

pub use trellis_core::*;

pub mod application;
pub mod clipboard;
pub mod dialogs;
pub mod element;
pub mod layout;
pub mod prelude;
pub mod toolkit;
pub mod window;

pub use application::{AppSettings, Application, ApplicationBuilder};
pub use element::{Align, Element, ElementBase, ElementBuilder, Font, Layout, VAlign};
pub use layout::layout_from_json;
pub use window::{EventIter, Lifecycle, Window, WindowConfig};
