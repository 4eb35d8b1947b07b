//! Rendering of categories into selection widgets.

pub mod html;
pub mod initializer;
pub mod memory;
pub mod renderer;
pub mod target;

pub use html::{HtmlButtonGroup, HtmlSelect};
pub use initializer::{CategoryWidgets, WidgetConfig, WidgetId};
pub use memory::{MemoryButtonGroup, MemorySelect};
pub use renderer::{
    populate_select, populate_select_from, render_buttons, render_buttons_from, ButtonGroupConfig,
    SelectConfig,
};
pub use target::{ButtonTarget, CategoryButton, CategoryChangeHandler, SelectOption, SelectTarget};
