//! Concrete element kinds.

macro_rules! element_base {
    () => {
        fn base(&self) -> &$crate::element::ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::element::ElementBase {
            &mut self.base
        }
    };
}

mod browse;
mod button;
mod choice;
mod container;
mod input;
mod separator;
mod slider;
mod table;
mod text;
mod toggle;

pub use browse::{BROWSE_ACTION, Browse, BrowseKind};
pub use button::{Button, CloseButton, Submit};
pub use choice::{Combo, Listbox, SelectMode};
pub use container::{Column, Frame, Tab, TabGroup};
pub use input::{Input, InputText, Multiline, Output, Textarea};
pub use separator::{HSeparator, VSeparator};
pub use slider::{Orientation, Slider};
pub use table::Table;
pub use text::{Label, Text};
pub use toggle::{Checkbox, Radio};
