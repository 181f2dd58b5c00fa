//! Core systems for Trellis.
//!
//! This crate holds the toolkit-independent parts of the Trellis window engine:
//!
//! - **Values**: element keys and the values snapshot handed back by `read`
//! - **Event Queue**: the per-window FIFO of `(event, values)` pairs
//! - **Hooks**: ordered interceptors that can stop and relabel an event
//! - **Bindings**: per-element mapping from native interactions to logical events
//! - **Radio Groups**: shared selection state for mutually exclusive elements
//! - **Snapshots**: all-or-nothing value collection with stale fallback
//! - **Timers**: the idle wake handle and repeating window timers
//! - **Registry**: the process-scoped window stack and generated identifiers
//!
//! # Queue Example
//!
//! ```
//! use trellis_core::{EventQueue, Values};
//!
//! let mut queue = EventQueue::new();
//! queue.push("A", Values::new().with("x", 1));
//! queue.push("B", Values::new().with("x", 2));
//!
//! assert_eq!(queue.pop().unwrap().name, "A");
//! assert_eq!(queue.pop().unwrap().name, "B");
//! assert!(queue.pop().is_none());
//! ```
//!
//! # Hook Example
//!
//! ```
//! use trellis_core::{HookOutcome, HookRegistry, Values};
//!
//! let mut hooks: HookRegistry<Vec<String>> = HookRegistry::new();
//! hooks.register("-save-", |log: &mut Vec<String>, name: &str, _: &Values| {
//!     log.push(name.to_string());
//!     HookOutcome::Stop
//! });
//!
//! let mut log = Vec::new();
//! assert!(hooks.dispatch(&mut log, "-save-", &Values::new()));
//! assert_eq!(log, ["-save-"]);
//! ```

mod binding;
mod error;
mod event;
mod focus;
mod handle;
mod hooks;
mod keys;
pub mod logging;
mod queue;
mod radio;
mod registry;
mod snapshot;
mod timer;
mod value;

pub use binding::{BindingEntry, BindingTable, EventMode, FiredBinding};
pub use error::{Error, Result, TimerError, ToolkitError};
pub use event::{
    EG_SWAP_EVENT_NAME, HIDDEN_EVENT_MARKER, QueuedEvent, STOPPED_SUFFIX, TIMEOUT_KEY,
    WINDOW_CLOSED, WINDOW_KEY_EVENT, is_hidden_event, stopped_event_name,
};
pub use focus::{DEFAULT_ACTION_KEYS, FocusTarget};
pub use handle::{ElementId, NativeHandle, WindowId};
pub use hooks::{Hook, HookOutcome, HookRegistry};
pub use keys::{KeyIndex, KeyOrigin};
pub use queue::{EventQueue, EventSender};
pub use radio::{RADIO_NONE_SELECTED, RadioGroupRegistry, RadioMembership, SelectionVar};
pub use registry::{IdGenerator, WindowEntry, WindowStack};
pub use snapshot::{Snapshot, ValueCollector};
pub use timer::{IdleTimer, TimerId, TimerKind, TimerManager};
pub use value::{Key, Props, Value, Values};
