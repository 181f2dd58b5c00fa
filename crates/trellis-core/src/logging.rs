//! Logging facilities for Trellis.
//!
//! Trellis reports through the `tracing` crate and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis=debug,trellis_core=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// One blocking read call.
    pub const READ: &str = "trellis::read";
    /// Building a window's layout.
    pub const BUILD: &str = "trellis::build";
    /// Running the hook chain of one event.
    pub const HOOKS: &str = "trellis::hooks";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Event queue.
    pub const QUEUE: &str = "trellis_core::queue";
    /// Hook dispatch.
    pub const HOOKS: &str = "trellis_core::hooks";
    /// Event bindings.
    pub const BINDING: &str = "trellis_core::binding";
    /// Timers and the idle handle.
    pub const TIMER: &str = "trellis_core::timer";
    /// Value collection.
    pub const SNAPSHOT: &str = "trellis_core::snapshot";
    /// Window stack and identifiers.
    pub const REGISTRY: &str = "trellis_core::registry";
    /// Window lifecycle and the read loop.
    pub const WINDOW: &str = "trellis::window";
    /// Layout building.
    pub const LAYOUT: &str = "trellis::layout";
    /// Toolkit backends.
    pub const TOOLKIT: &str = "trellis::toolkit";
    /// Dialogs and other external collaborators.
    pub const DIALOGS: &str = "trellis::dialogs";
}
