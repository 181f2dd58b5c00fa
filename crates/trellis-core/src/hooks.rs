//! Event hooks.
//!
//! Hooks intercept an event after it leaves the queue and before `read`
//! returns it. They run strictly in registration order; the first hook that
//! returns [`HookOutcome::Stop`] ends the chain for that dispatch.
//!
//! The registry is generic over the context handed to each hook so the window
//! can pass itself. A window dispatches by taking its registry out with
//! `std::mem::take`, running it, then [`HookRegistry::absorb`]ing whatever was
//! registered on the now-empty registry during the run. Hooks added while a
//! dispatch is in flight therefore only see the next event with that name.

use std::collections::HashMap;

use crate::logging::targets;
use crate::value::Values;

/// What a hook wants done with the event it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// Let the remaining hooks run and return the event unchanged.
    #[default]
    Continue,
    /// Skip the remaining hooks, rename the event to `{name}-stopped` and
    /// recollect its values.
    Stop,
}

impl HookOutcome {
    /// Whether this outcome stops the chain.
    pub fn is_stop(self) -> bool {
        self == HookOutcome::Stop
    }
}

impl From<bool> for HookOutcome {
    fn from(stop: bool) -> Self {
        if stop {
            HookOutcome::Stop
        } else {
            HookOutcome::Continue
        }
    }
}

impl From<()> for HookOutcome {
    fn from(_: ()) -> Self {
        HookOutcome::Continue
    }
}

/// A boxed hook handler.
pub type Hook<C> = Box<dyn FnMut(&mut C, &str, &Values) -> HookOutcome>;

/// Ordered hook lists keyed by event name.
pub struct HookRegistry<C> {
    hooks: HashMap<String, Vec<Hook<C>>>,
}

impl<C> HookRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Append a hook for `event`.
    pub fn register<F>(&mut self, event: impl Into<String>, hook: F)
    where
        F: FnMut(&mut C, &str, &Values) -> HookOutcome + 'static,
    {
        self.register_boxed(event, Box::new(hook));
    }

    /// Append an already boxed hook for `event`.
    pub fn register_boxed(&mut self, event: impl Into<String>, hook: Hook<C>) {
        let event = event.into();
        tracing::trace!(target: targets::HOOKS, %event, "hook registered");
        self.hooks.entry(event).or_default().push(hook);
    }

    /// Whether any hook is registered for `event`.
    pub fn contains(&self, event: &str) -> bool {
        self.hooks.get(event).is_some_and(|hooks| !hooks.is_empty())
    }

    /// Number of hooks registered for `event`.
    pub fn count(&self, event: &str) -> usize {
        self.hooks.get(event).map_or(0, Vec::len)
    }

    /// Run the hooks for `event` in order.
    ///
    /// Returns `true` if a hook stopped the event.
    pub fn dispatch(&mut self, cx: &mut C, event: &str, values: &Values) -> bool {
        let Some(hooks) = self.hooks.get_mut(event) else {
            return false;
        };
        for (index, hook) in hooks.iter_mut().enumerate() {
            if hook(cx, event, values).is_stop() {
                tracing::debug!(target: targets::HOOKS, %event, index, "hook stopped event");
                return true;
            }
        }
        false
    }

    /// Append every hook of `other` after the existing ones.
    pub fn absorb(&mut self, other: HookRegistry<C>) {
        for (event, hooks) in other.hooks {
            self.hooks.entry(event).or_default().extend(hooks);
        }
    }

    /// Returns `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }
}

impl<C> Default for HookRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for HookRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("HookRegistry").field("events", &names).finish()
    }
}
