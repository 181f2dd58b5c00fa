use serde_json::Value;
use trellis_core::{NativeHandle, ToolkitError};

use crate::element::{CreateContext, Element, ElementBase, Layout};
use crate::toolkit::WidgetKind;

/// An invisible container laying out its own rows.
#[derive(Debug)]
pub struct Column {
    base: ElementBase,
    layout: Option<Layout>,
}

impl Column {
    /// Wrap `layout`.
    pub fn new(layout: Layout) -> Self {
        Self {
            base: ElementBase::new("Column").without_font(),
            layout: Some(layout),
        }
    }
}

impl Element for Column {
    element_base!();

    fn take_layout(&mut self) -> Option<Layout> {
        self.layout.take()
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Frame))
    }
}

/// A titled, bordered container.
#[derive(Debug)]
pub struct Frame {
    base: ElementBase,
    layout: Option<Layout>,
}

impl Frame {
    /// Wrap `layout` under `title`.
    pub fn new(title: impl Into<String>, layout: Layout) -> Self {
        let mut base = ElementBase::new("Frame");
        base.set_prop("text", title.into());
        Self {
            base,
            layout: Some(layout),
        }
    }

    /// The frame title.
    pub fn title(&self) -> &str {
        self.base.prop_str("text").unwrap_or_default()
    }
}

impl Element for Frame {
    element_base!();

    fn take_layout(&mut self) -> Option<Layout> {
        self.layout.take()
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(
            parent,
            &self.base,
            self.base.widget_spec(WidgetKind::LabelFrame),
        )
    }
}

/// One page of a [`TabGroup`].
#[derive(Debug)]
pub struct Tab {
    base: ElementBase,
    title: String,
    layout: Option<Layout>,
}

impl Tab {
    /// Wrap `layout` in a page titled `title`.
    pub fn new(title: impl Into<String>, layout: Layout) -> Self {
        Self {
            base: ElementBase::new("Tab").without_font(),
            title: title.into(),
            layout: Some(layout),
        }
    }
}

impl Element for Tab {
    element_base!();

    fn take_layout(&mut self) -> Option<Layout> {
        self.layout.take()
    }

    fn tab_title(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(parent, &self.base, self.base.widget_spec(WidgetKind::Frame))
    }

    fn get(&self) -> Result<Value, ToolkitError> {
        Ok(Value::from(self.title.clone()))
    }
}

/// A notebook whose layout holds only [`Tab`]s.
#[derive(Debug)]
pub struct TabGroup {
    base: ElementBase,
    layout: Option<Layout>,
}

impl TabGroup {
    /// Wrap rows of tabs.
    pub fn new(layout: Layout) -> Self {
        Self {
            base: ElementBase::new("TabGroup").without_font(),
            layout: Some(layout),
        }
    }
}

impl Element for TabGroup {
    element_base!();

    fn take_layout(&mut self) -> Option<Layout> {
        self.layout.take()
    }

    fn hosts_tabs(&self) -> bool {
        true
    }

    fn create(
        &mut self,
        cx: &mut CreateContext<'_>,
        parent: NativeHandle,
    ) -> Result<NativeHandle, ToolkitError> {
        cx.create_widget(
            parent,
            &self.base,
            self.base.widget_spec(WidgetKind::Notebook),
        )
    }
}
