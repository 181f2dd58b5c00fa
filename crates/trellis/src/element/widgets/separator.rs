use trellis_core::{NativeHandle, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase};
use crate::toolkit::WidgetKind;

/// A horizontal rule spanning its row.
#[derive(Debug)]
pub struct HSeparator {
    base: ElementBase,
}

impl HSeparator {
    /// Create a horizontal separator.
    pub fn new() -> Self {
        let mut base = ElementBase::new("HSeparator").without_font();
        base.set_prop("orient", "horizontal");
        base.pack_options_mut().expand_x = true;
        Self { base }
    }
}

impl Default for HSeparator {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for HSeparator {
    element_base!();

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Separator))
    }
}

/// A vertical rule.
#[derive(Debug)]
pub struct VSeparator {
    base: ElementBase,
}

impl VSeparator {
    /// Create a vertical separator.
    pub fn new() -> Self {
        let mut base = ElementBase::new("VSeparator").without_font();
        base.set_prop("orient", "vertical");
        base.pack_options_mut().expand_y = true;
        Self { base }
    }
}

impl Default for VSeparator {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for VSeparator {
    element_base!();

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Separator))
    }
}
