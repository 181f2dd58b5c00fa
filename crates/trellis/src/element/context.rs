//! Contexts handed to elements during the prepare and create passes.

use trellis_core::{
    Hook, HookOutcome, IdGenerator, NativeHandle, RadioGroupRegistry, RadioMembership,
    ToolkitError, Values,
};

use crate::application::Application;
use crate::toolkit::WidgetSpec;
use crate::window::Window;

use super::{ElementBase, Font};

/// Window-level defaults applied in the prepare pass.
pub struct PrepareContext<'a> {
    /// Font applied to elements that accept one and declare none.
    pub(crate) font: Option<&'a Font>,
    /// Generator for keys and style names.
    pub(crate) ids: &'a IdGenerator,
}

/// Access to the toolkit and window registries while creating an element.
pub struct CreateContext<'a> {
    pub(crate) app: &'a Application,
    pub(crate) radio_groups: &'a mut RadioGroupRegistry,
    pub(crate) hooks: &'a mut Vec<(String, Hook<Window>)>,
    pub(crate) window: NativeHandle,
}

impl CreateContext<'_> {
    /// The owning application.
    pub fn app(&self) -> &Application {
        self.app
    }

    /// Native handle of the window being built.
    pub fn window(&self) -> NativeHandle {
        self.window
    }

    /// Create a native widget for `base`, applying its named style first.
    pub fn create_widget(
        &self,
        parent: NativeHandle,
        base: &ElementBase,
        spec: WidgetSpec,
    ) -> Result<NativeHandle, ToolkitError> {
        let mut toolkit = self.app.toolkit().lock();
        if let Some(style) = base.style() {
            toolkit.apply_style(style)?;
        }
        toolkit.create(parent, &spec)
    }

    /// Join a radio group of this window.
    pub fn join_radio_group(&mut self, group_id: &str) -> RadioMembership {
        self.radio_groups.join(group_id)
    }

    /// Register a window hook for `event`, active once the window is built.
    pub fn register_hook<F>(&mut self, event: impl Into<String>, hook: F)
    where
        F: FnMut(&mut Window, &str, &Values) -> HookOutcome + 'static,
    {
        self.hooks.push((event.into(), Box::new(hook)));
    }
}
