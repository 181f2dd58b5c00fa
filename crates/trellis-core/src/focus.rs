//! Initial focus tracking.

/// Decides which widget receives focus when a window is first shown.
///
/// The first element in traversal order that is either value-capable or a
/// conventional default action (`OK`, `Yes`) wins. The target is one-shot:
/// [`FocusTarget::take`] hands it out once and clears it.
#[derive(Debug, Clone)]
pub struct FocusTarget<H> {
    target: Option<H>,
}

/// Keys treated as default actions for initial focus.
pub const DEFAULT_ACTION_KEYS: [&str; 2] = ["OK", "Yes"];

impl<H> FocusTarget<H> {
    /// Create an empty focus target.
    pub fn new() -> Self {
        Self { target: None }
    }

    /// Offer a value-capable element.
    pub fn offer_value(&mut self, handle: H) {
        if self.target.is_none() {
            self.target = Some(handle);
        }
    }

    /// Offer an element whose key may be a default action.
    pub fn offer_action(&mut self, key: &str, handle: H) {
        if self.target.is_none() && DEFAULT_ACTION_KEYS.contains(&key) {
            self.target = Some(handle);
        }
    }

    /// The pending target, if any.
    pub fn peek(&self) -> Option<&H> {
        self.target.as_ref()
    }

    /// Consume the pending target.
    pub fn take(&mut self) -> Option<H> {
        self.target.take()
    }
}

impl<H> Default for FocusTarget<H> {
    fn default() -> Self {
        Self::new()
    }
}
