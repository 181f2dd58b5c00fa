//! Windows and the blocking read loop.
//!
//! A [`Window`] owns everything built from its layout: the element arena,
//! the key index, radio groups, hooks, timers and the event queue. The
//! caller drives it with [`Window::read`], which blocks until an event is
//! available or the timeout elapses:
//!
//! ```
//! use std::time::Duration;
//! use trellis::prelude::*;
//!
//! let (app, toolkit) = Application::headless();
//! let mut window = Window::new(
//!     &app,
//!     "Greeter",
//!     trellis::layout![[Input::new("world").key("-name-"), Button::new("OK")]],
//! )
//! .unwrap();
//!
//! let ok = window.element_handle("OK").unwrap();
//! toolkit.click(ok);
//!
//! let (event, values) = window.read(Some(Duration::from_millis(500)));
//! assert_eq!(event, "OK");
//! assert_eq!(values.get_str("-name-"), Some("world"));
//! ```
//!
//! # Read cycle
//!
//! Each cycle reschedules the idle wake handle, pumps native interactions
//! into the queue, fires due timers, checks the timeout and pops at most one
//! event. Hooks run at dequeue time; a stopping hook renames the event to
//! `{event}-stopped` and replaces its values with a fresh snapshot. Events
//! whose name ends with `/hide` are consumed without being returned.
//!
//! # Closing
//!
//! A close request from the window manager marks the window as no longer
//! alive and enqueues [`WINDOW_CLOSED`]. [`Window::close`] destroys the
//! native window; it is also called on drop. Once a window is not alive and
//! its queue is drained, `read` returns `WINDOW_CLOSED` immediately.

mod config;

use std::collections::HashMap;
use std::mem;
use std::time::{Duration, Instant};

use slotmap::SlotMap;
use trellis_core::logging::targets;
use trellis_core::{
    EG_SWAP_EVENT_NAME, ElementId, Error, EventMode, EventQueue, EventSender, FocusTarget, Hook,
    HookOutcome, HookRegistry, IdleTimer, Key, KeyIndex, NativeHandle, RadioGroupRegistry,
    Result, Snapshot, TIMEOUT_KEY, TimerError, TimerId, TimerManager, ToolkitError, Value,
    ValueCollector, Values, WINDOW_CLOSED, WINDOW_KEY_EVENT, WindowEntry, WindowId,
    is_hidden_event, stopped_event_name,
};

use crate::application::Application;
use crate::element::{Element, Layout, Reaction};
use crate::layout::{BuiltLayout, LayoutBuilder, layout_from_json};
use crate::toolkit::{Fill, Interaction, Pad, PackProps, WidgetKind, WidgetSpec, interactions};

pub use config::WindowConfig;

/// Where a window is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Open and reading events.
    Alive,
    /// The user asked to close the window; [`Window::cancel_close`] can
    /// still revive it.
    CloseRequested,
    /// Destroyed.
    Closed,
}

/// A window built from a layout.
pub struct Window {
    app: Application,
    id: WindowId,
    handle: NativeHandle,
    config: WindowConfig,
    elements: SlotMap<ElementId, Box<dyn Element>>,
    order: Vec<ElementId>,
    rows: Vec<Vec<ElementId>>,
    by_handle: HashMap<NativeHandle, ElementId>,
    key_index: KeyIndex,
    radio_groups: RadioGroupRegistry,
    queue: EventQueue,
    hooks: HookRegistry<Window>,
    collector: ValueCollector,
    focus: FocusTarget<NativeHandle>,
    timers: TimerManager,
    idle: IdleTimer,
    user_timers: HashMap<TimerId, String>,
    lifecycle: Lifecycle,
    hidden: bool,
}

impl Window {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a window titled `title` with default options.
    pub fn new(app: &Application, title: impl Into<String>, layout: Layout) -> Result<Self> {
        Self::with_config(app, WindowConfig::new(title), layout)
    }

    /// Build a window from a JSON layout document.
    pub fn from_json(app: &Application, config: WindowConfig, source: &str) -> Result<Self> {
        let layout = layout_from_json(source)?;
        Self::with_config(app, config, layout)
    }

    /// Build a window.
    ///
    /// Fails without leaving a native window behind when the layout is
    /// empty, a key is used twice or any element cannot be created.
    pub fn with_config(app: &Application, config: WindowConfig, layout: Layout) -> Result<Self> {
        if layout.is_empty() {
            return Err(Error::invalid_layout("[]"));
        }
        let mut spec = config.window_spec();
        spec.parent = app.active_window().map(|entry| entry.handle);
        let handle = app
            .toolkit()
            .lock()
            .create_window(&spec)
            .map_err(|source| Error::WindowCreation {
                title: config.title.clone(),
                source,
            })?;

        let built = match Self::build_content(app, handle, &config, layout) {
            Ok(built) => built,
            Err(error) => {
                if let Err(teardown) = app.toolkit().lock().destroy(handle) {
                    tracing::error!(
                        target: targets::WINDOW,
                        %handle,
                        error = %teardown,
                        "cannot destroy partially built window"
                    );
                }
                return Err(error);
            }
        };

        let id = app.ids().window_id();
        app.push_window(WindowEntry { id, handle });

        let mut hooks = HookRegistry::new();
        for (event, hook) in built.hooks {
            hooks.register_boxed(event, hook);
        }
        tracing::debug!(
            target: targets::WINDOW,
            window = %id,
            %handle,
            title = %config.title,
            elements = built.order.len(),
            "window created"
        );

        Ok(Self {
            app: app.clone(),
            id,
            handle,
            config,
            elements: built.elements,
            order: built.order,
            rows: built.rows,
            by_handle: built.by_handle,
            key_index: built.key_index,
            radio_groups: built.radio_groups,
            queue: EventQueue::new(),
            hooks,
            collector: ValueCollector::new(),
            focus: built.focus,
            timers: TimerManager::new(),
            idle: IdleTimer::new(),
            user_timers: HashMap::new(),
            lifecycle: Lifecycle::Alive,
            hidden: false,
        })
    }

    fn build_content(
        app: &Application,
        handle: NativeHandle,
        config: &WindowConfig,
        layout: Layout,
    ) -> Result<BuiltLayout> {
        let content = {
            let mut toolkit = app.toolkit().lock();
            let window_error = |source: ToolkitError| Error::WindowCreation {
                title: config.title.clone(),
                source,
            };
            let content = toolkit
                .create(handle, &WidgetSpec::new(WidgetKind::Frame))
                .map_err(window_error)?;
            toolkit
                .pack(
                    content,
                    &PackProps {
                        fill: Fill::Both,
                        expand: true,
                        padx: Some(Pad::Uniform(config.padding_x)),
                        pady: Some(Pad::Uniform(config.padding_y)),
                        ..PackProps::default()
                    },
                )
                .map_err(window_error)?;
            if config.enable_key_events || config.return_keyboard_events {
                toolkit
                    .bind(handle, interactions::KEY_PRESS)
                    .map_err(window_error)?;
            }
            content
        };
        LayoutBuilder::new(app, handle, config.font.as_ref(), config.row_padding)
            .build(content, layout)
    }

    // =========================================================================
    // Reading events
    // =========================================================================

    /// Wait for the next event.
    ///
    /// With a timeout, returns `("-TIMEOUT-", {})` once more than `timeout`
    /// has elapsed without an event.
    pub fn read(&mut self, timeout: Option<Duration>) -> (String, Values) {
        self.read_with_timeout_key(timeout, TIMEOUT_KEY)
    }

    /// Wait for the next event, reporting a timeout as `timeout_key`.
    #[tracing::instrument(
        name = "trellis::window::read",
        skip(self),
        fields(window = %self.id),
        level = "trace"
    )]
    pub fn read_with_timeout_key(
        &mut self,
        timeout: Option<Duration>,
        timeout_key: &str,
    ) -> (String, Values) {
        let started = Instant::now();
        self.apply_initial_focus();
        let tick = self.app.settings().idle_tick;

        loop {
            if !self.is_alive() && self.queue.is_empty() {
                return (WINDOW_CLOSED.to_string(), Values::new());
            }
            self.idle.reschedule(&mut self.timers, tick);
            self.pump();
            self.fire_timers();

            if let Some(timeout) = timeout {
                if started.elapsed().as_millis() > timeout.as_millis() {
                    tracing::trace!(target: targets::WINDOW, window = %self.id, "read timed out");
                    return (timeout_key.to_string(), Values::new());
                }
            }

            let Some(event) = self.queue.pop() else {
                let mut wait = self.timers.time_until_next().unwrap_or(tick);
                if let Some(timeout) = timeout {
                    let remaining = timeout.saturating_sub(started.elapsed());
                    wait = wait.min(remaining + Duration::from_millis(1));
                }
                self.queue.wait(wait);
                continue;
            };

            let (mut name, mut values) = event.into_pair();
            if self.hooks.contains(&name) && self.dispatch_hooks(&name, &values) {
                name = stopped_event_name(&name);
                values = self.get_values();
            }
            if is_hidden_event(&name) {
                tracing::trace!(target: targets::WINDOW, %name, "hidden event consumed");
                continue;
            }
            return (name, values);
        }
    }

    /// Iterate over events until the window stops being alive.
    pub fn event_iter(&mut self, timeout: Option<Duration>) -> EventIter<'_> {
        EventIter {
            window: self,
            timeout,
            timeout_key: TIMEOUT_KEY.to_string(),
        }
    }

    fn apply_initial_focus(&mut self) {
        let Some(target) = self.focus.take() else {
            return;
        };
        if let Err(error) = self.app.toolkit().lock().focus(target) {
            tracing::warn!(target: targets::WINDOW, %target, %error, "cannot set initial focus");
        }
    }

    fn dispatch_hooks(&mut self, name: &str, values: &Values) -> bool {
        let mut hooks = mem::take(&mut self.hooks);
        let stopped = hooks.dispatch(self, name, values);
        let registered_during_dispatch = mem::replace(&mut self.hooks, hooks);
        self.hooks.absorb(registered_during_dispatch);
        stopped
    }

    fn fire_timers(&mut self) {
        for id in self.timers.process_expired() {
            if self.idle.is(id) {
                continue;
            }
            if let Some(key) = self.user_timers.get(&id).cloned() {
                self.dispatch_event(key, Values::new().with("event_type", "timer"));
            }
        }
    }

    // =========================================================================
    // Interaction routing
    // =========================================================================

    fn pump(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        let pending = self.app.toolkit().lock().pump(self.handle);
        for interaction in pending {
            self.route(interaction);
        }
    }

    fn route(&mut self, interaction: Interaction) {
        if interaction.target == self.handle {
            self.route_window_interaction(interaction);
            return;
        }
        let Some(&id) = self.by_handle.get(&interaction.target) else {
            tracing::trace!(
                target: targets::WINDOW,
                target_handle = %interaction.target,
                name = %interaction.name,
                "interaction on unknown widget"
            );
            return;
        };
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        let Some(key) = element.base().key().cloned() else {
            return;
        };

        if let Some(fired) =
            element
                .base()
                .bindings()
                .fire(&key, &interaction.name, interaction.context.clone())
        {
            if fired.needs_snapshot {
                self.dispatch_event(fired.name, fired.payload);
            } else {
                self.queue.push(fired.name, fired.payload);
            }
            return;
        }
        match element.react(&interaction.name, &interaction.context) {
            Reaction::Ignore => {}
            Reaction::Dispatch(values) => self.dispatch_event(key.to_string(), values),
        }
    }

    fn route_window_interaction(&mut self, interaction: Interaction) {
        match interaction.name.as_str() {
            interactions::CLOSE_REQUEST => self.handle_close_request(),
            interactions::KEY_PRESS => {
                let keysym = interaction
                    .context
                    .get("keysym")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                if self.config.return_keyboard_events {
                    let name = if keysym.chars().count() == 1 {
                        keysym
                    } else {
                        let keycode = interaction.context.get("keycode").cloned();
                        format!("{keysym}:{}", keycode.unwrap_or(Value::Null))
                    };
                    self.dispatch_event(name, Values::new());
                } else if self.config.enable_key_events {
                    let values = Values::new()
                        .with("event", interaction.context)
                        .with("key", keysym)
                        .with("event_type", "key");
                    self.dispatch_event(WINDOW_KEY_EVENT, values);
                }
            }
            other => {
                tracing::trace!(target: targets::WINDOW, name = other, "unhandled window interaction");
            }
        }
    }

    fn handle_close_request(&mut self) {
        if self.lifecycle != Lifecycle::Alive {
            return;
        }
        tracing::debug!(target: targets::WINDOW, window = %self.id, "close requested");
        self.lifecycle = Lifecycle::CloseRequested;
        self.idle.cancel(&mut self.timers);
        self.dispatch_event(WINDOW_CLOSED, Values::new());
    }

    // =========================================================================
    // Hooks and bindings
    // =========================================================================

    /// Append a hook for `event`.
    ///
    /// Hooks run in registration order when the event is dequeued; the first
    /// one returning [`HookOutcome::Stop`] ends the chain and the event is
    /// returned as `{event}-stopped` with fresh values. Hooks registered
    /// while a chain runs take effect from the next event.
    pub fn register_event_hook<F>(&mut self, event: impl Into<String>, hook: F)
    where
        F: FnMut(&mut Window, &str, &Values) -> HookOutcome + 'static,
    {
        self.hooks.register(event, hook);
    }

    /// Append several hooks per event.
    pub fn register_event_hooks<I, S>(&mut self, hooks: I)
    where
        I: IntoIterator<Item = (S, Vec<Hook<Window>>)>,
        S: Into<String>,
    {
        for (event, list) in hooks {
            let event = event.into();
            for hook in list {
                self.hooks.register_boxed(event.clone(), hook);
            }
        }
    }

    /// Bind a native interaction of the element `key` to a logical event.
    pub fn bind(
        &mut self,
        key: impl Into<Key>,
        interaction: &str,
        handler_suffix: &str,
        propagate: bool,
        mode: EventMode,
    ) -> std::result::Result<(), ToolkitError> {
        let key = key.into();
        let element = self
            .find_element_id(key.clone())
            .and_then(|id| self.elements.get_mut(id))
            .ok_or_else(|| ToolkitError::new(format!("no element with key `{key}`")))?;
        element
            .base_mut()
            .bind(interaction, handler_suffix, propagate, mode)
    }

    // =========================================================================
    // Values and events
    // =========================================================================

    /// Collect the value of every value-capable element.
    ///
    /// If any element cannot be read, the last complete snapshot is returned
    /// instead.
    pub fn get_values(&mut self) -> Values {
        self.get_snapshot().into_values()
    }

    /// Collect values, reporting whether the result is a stale fallback.
    pub fn get_snapshot(&mut self) -> Snapshot {
        let elements = &self.elements;
        self.collector
            .collect(self.key_index.value_entries(), |id| match elements.get(id) {
                Some(element) => element.get(),
                None => Err(ToolkitError::new("element is gone")),
            })
    }

    /// Enqueue an event with the current values folded into `values`.
    ///
    /// A `--swap_event_name--` entry is removed and used as the event name.
    pub fn dispatch_event(&mut self, name: impl Into<String>, mut values: Values) {
        let mut name = name.into();
        let snapshot = self.get_values();
        values.merge(&snapshot);
        if let Some(swap) = values.remove(EG_SWAP_EVENT_NAME) {
            name = match swap {
                Value::String(swap) => swap,
                other => other.to_string(),
            };
        }
        self.queue.push(name, values);
    }

    /// Enqueue an event exactly as given.
    pub fn write_event_value(&mut self, name: impl Into<String>, values: Values) {
        self.queue.push(name, values);
    }

    /// A handle for enqueueing events from other threads.
    pub fn event_sender(&self) -> EventSender {
        self.queue.sender()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Whether the window is open and no close was requested.
    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    /// Alias of [`Window::is_alive`].
    pub fn is_running(&self) -> bool {
        self.is_alive()
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Revive a window whose close was requested but not carried out.
    pub fn cancel_close(&mut self) {
        if self.lifecycle == Lifecycle::CloseRequested {
            self.lifecycle = Lifecycle::Alive;
        }
    }

    /// Close the window.
    ///
    /// The native window is destroyed and, if it was the last open window,
    /// the toolkit is told to quit. Teardown failures are logged, never
    /// returned. Closing twice does nothing.
    pub fn close(&mut self) {
        self.hide();
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.lifecycle = Lifecycle::Closed;
        self.idle.cancel(&mut self.timers);
        self.user_timers.clear();

        let remaining = self.app.pop_window(self.id);
        {
            let mut toolkit = self.app.toolkit().lock();
            if let Err(error) = toolkit.destroy(self.handle) {
                tracing::error!(
                    target: targets::WINDOW,
                    window = %self.id,
                    %error,
                    "window teardown failed"
                );
            }
            if remaining == 0 {
                toolkit.quit();
            }
        }
        for element in self.elements.values_mut() {
            element.base_mut().detach();
        }
        tracing::debug!(target: targets::WINDOW, window = %self.id, remaining, "window closed");
    }

    /// Change the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.configure_window("title", Value::String(title.clone()));
        self.config.title = title;
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Hide the window.
    pub fn hide(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.configure_window("state", Value::from("withdrawn"));
        self.hidden = true;
    }

    /// Show a hidden window again.
    pub fn un_hide(&mut self) {
        if !self.hidden || self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.configure_window("state", Value::from("normal"));
        self.hidden = false;
    }

    /// Whether the window is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn configure_window(&self, name: &str, value: Value) {
        let mut props = trellis_core::Props::new();
        props.insert(name.to_string(), value);
        if let Err(error) = self.app.toolkit().lock().configure(self.handle, &props) {
            tracing::warn!(target: targets::WINDOW, window = %self.id, name, %error, "cannot configure window");
        }
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// The indexed element registered under `key`.
    ///
    /// Only value-capable and explicitly keyed elements are indexed; use
    /// [`Window::find_element`] for elements whose key was derived from
    /// their text.
    pub fn element(&self, key: impl Into<Key>) -> Option<&dyn Element> {
        let id = self.key_index.get(&key.into())?;
        self.elements.get(id).map(|element| &**element)
    }

    /// Mutable access to an indexed element.
    pub fn element_mut(&mut self, key: impl Into<Key>) -> Option<&mut dyn Element> {
        let id = self.key_index.get(&key.into())?;
        Some(&mut **self.elements.get_mut(id)?)
    }

    /// Any element with `key`, indexed or not, in creation order.
    pub fn find_element(&self, key: impl Into<Key>) -> Option<&dyn Element> {
        let id = self.find_element_id(key)?;
        self.element_by_id(id)
    }

    /// Arena id of the element with `key`, indexed or not.
    pub fn find_element_id(&self, key: impl Into<Key>) -> Option<ElementId> {
        let key = key.into();
        self.key_index.get(&key).or_else(|| {
            self.order
                .iter()
                .copied()
                .find(|&id| self.elements[id].key() == Some(&key))
        })
    }

    /// Typed access to the element with `key`.
    pub fn element_as<T: Element>(&self, key: impl Into<Key>) -> Option<&T> {
        self.find_element(key)?.downcast_ref::<T>()
    }

    /// Typed mutable access to the element with `key`.
    pub fn element_as_mut<T: Element>(&mut self, key: impl Into<Key>) -> Option<&mut T> {
        let id = self.find_element_id(key)?;
        self.elements.get_mut(id)?.downcast_mut::<T>()
    }

    /// The element stored under an arena id.
    pub fn element_by_id(&self, id: ElementId) -> Option<&dyn Element> {
        self.elements.get(id).map(|element| &**element)
    }

    /// Mutable access by arena id.
    pub fn element_by_id_mut(&mut self, id: ElementId) -> Option<&mut dyn Element> {
        Some(&mut **self.elements.get_mut(id)?)
    }

    /// Native handle of the element with `key`.
    pub fn element_handle(&self, key: impl Into<Key>) -> Option<NativeHandle> {
        self.find_element(key)?.handle()
    }

    /// Every element of `element_type`, in creation order.
    pub fn elements_by_type(&self, element_type: &str) -> Vec<&dyn Element> {
        self.order
            .iter()
            .map(|&id| &*self.elements[id])
            .filter(|element| element.element_type() == element_type)
            .collect()
    }

    /// Arena ids of the top-level layout, row by row in traversal order.
    pub fn rows(&self) -> &[Vec<ElementId>] {
        &self.rows
    }

    /// The key index.
    pub fn key_index(&self) -> &KeyIndex {
        &self.key_index
    }

    /// Number of radio groups.
    pub fn radio_group_count(&self) -> usize {
        self.radio_groups.len()
    }

    /// The widget that will receive focus on the first read, if any.
    pub fn focus_target(&self) -> Option<NativeHandle> {
        self.focus.peek().copied()
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Enqueue `(key, {event_type: "timer", ...values})` every `interval`.
    pub fn start_timer(&mut self, key: impl Into<String>, interval: Duration) -> TimerId {
        let id = self.timers.start_repeating(interval);
        self.user_timers.insert(id, key.into());
        id
    }

    /// Stop a timer started with [`Window::start_timer`].
    pub fn stop_timer(&mut self, id: TimerId) -> std::result::Result<(), TimerError> {
        if self.user_timers.remove(&id).is_none() {
            return Err(TimerError::InvalidTimerId);
        }
        self.timers.stop(id)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Window id inside its application.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Native window handle.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// The owning application.
    pub fn app(&self) -> &Application {
        &self.app
    }

    /// The options the window was built with.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("title", &self.config.title)
            .field("lifecycle", &self.lifecycle)
            .field("elements", &self.order.len())
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

/// Events of a window until it stops being alive.
///
/// Created by [`Window::event_iter`].
pub struct EventIter<'a> {
    window: &'a mut Window,
    timeout: Option<Duration>,
    timeout_key: String,
}

impl EventIter<'_> {
    /// Report timeouts as `key` instead of `-TIMEOUT-`.
    pub fn with_timeout_key(mut self, key: impl Into<String>) -> Self {
        self.timeout_key = key.into();
        self
    }
}

impl Iterator for EventIter<'_> {
    type Item = (String, Values);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.window.is_alive() {
            return None;
        }
        Some(
            self.window
                .read_with_timeout_key(self.timeout, &self.timeout_key),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBuilder;
    use crate::element::widgets::{Button, Input, Text};

    fn window(layout: Layout) -> (Window, crate::toolkit::HeadlessToolkit) {
        let (app, toolkit) = Application::headless();
        (Window::new(&app, "test", layout).unwrap(), toolkit)
    }

    #[test]
    fn test_dispatch_event_folds_snapshot_and_swaps_name() {
        let (mut window, _toolkit) = window(crate::layout![[Input::new("v").key("-in-")]]);
        window.dispatch_event(
            "orig",
            Values::new()
                .with("extra", 1)
                .with(EG_SWAP_EVENT_NAME, "renamed"),
        );
        let (event, values) = window.read(None);
        assert_eq!(event, "renamed");
        assert_eq!(values.get("extra"), Some(&Value::from(1)));
        assert_eq!(values.get_str("-in-"), Some("v"));
        assert!(!values.contains_key(EG_SWAP_EVENT_NAME));
    }

    #[test]
    fn test_write_event_value_is_not_enriched() {
        let (mut window, _toolkit) = window(crate::layout![[Input::new("v").key("-in-")]]);
        window.write_event_value("raw", Values::new().with("x", 1));
        let (event, values) = window.read(None);
        assert_eq!(event, "raw");
        assert_eq!(values, Values::new().with("x", 1));
    }

    #[test]
    fn test_hooks_registered_during_dispatch_wait_for_next_event() {
        let (mut window, _toolkit) = window(crate::layout![[Text::new("t")]]);
        window.register_event_hook("A", |window: &mut Window, _: &str, _: &Values| {
            window.register_event_hook("A", |_: &mut Window, _: &str, _: &Values| HookOutcome::Stop);
            HookOutcome::Continue
        });
        window.write_event_value("A", Values::new());
        window.write_event_value("A", Values::new());
        assert_eq!(window.read(None).0, "A");
        assert_eq!(window.read(None).0, "A-stopped");
    }

    #[test]
    fn test_cancel_close_revives_requested_close_only() {
        let (mut window, toolkit) = window(crate::layout![[Button::new("OK")]]);
        toolkit.request_close(window.handle());
        assert_eq!(window.read(None).0, WINDOW_CLOSED);
        assert_eq!(window.lifecycle(), Lifecycle::CloseRequested);
        window.cancel_close();
        assert!(window.is_alive());

        window.close();
        window.cancel_close();
        assert_eq!(window.lifecycle(), Lifecycle::Closed);
        assert_eq!(window.read(None).0, WINDOW_CLOSED);
    }

    #[test]
    fn test_timers_dispatch_with_event_type() {
        let (mut window, _toolkit) = window(crate::layout![[Text::new("t")]]);
        let id = window.start_timer("-tick-", Duration::from_millis(5));
        let (event, values) = window.read(Some(Duration::from_millis(500)));
        assert_eq!(event, "-tick-");
        assert_eq!(values.get_str("event_type"), Some("timer"));
        window.stop_timer(id).unwrap();
        assert_eq!(window.stop_timer(id), Err(TimerError::InvalidTimerId));
    }

    #[test]
    fn test_keyboard_events() {
        let (app, toolkit) = Application::headless();
        let config = WindowConfig::new("keys").with_keyboard_events(true);
        let mut window = Window::with_config(&app, config, crate::layout![[Text::new("t")]]).unwrap();
        toolkit.press_key(window.handle(), "a", 38);
        toolkit.press_key(window.handle(), "Return", 36);
        assert_eq!(window.read(Some(Duration::from_secs(1))).0, "a");
        assert_eq!(window.read(Some(Duration::from_secs(1))).0, "Return:36");

        let config = WindowConfig::new("keys").with_key_events(true);
        let mut window = Window::with_config(&app, config, crate::layout![[Text::new("t")]]).unwrap();
        toolkit.press_key(window.handle(), "x", 53);
        let (event, values) = window.read(Some(Duration::from_secs(1)));
        assert_eq!(event, WINDOW_KEY_EVENT);
        assert_eq!(values.get_str("key"), Some("x"));
        assert_eq!(values.get_str("event_type"), Some("key"));
    }
}
