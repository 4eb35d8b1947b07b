//! Capabilities a widget must offer to receive rendered categories.

use serde::Serialize;
use std::sync::Arc;

/// Callback fired with the slug of an activated category button
pub type CategoryChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// One `<option>` of a category dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One button of a category button group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    /// Exposed to the page as `data-category`
    pub slug: String,
    pub label: String,
    pub icon: Option<String>,
    pub active: bool,
    /// Full class list, including the active marker when `active`
    pub class: String,
}

/// Dropdown-like widget: a clearable list of options with one selection
pub trait SelectTarget {
    fn clear(&mut self);

    fn append_option(&mut self, option: SelectOption);

    fn has_option(&self, value: &str) -> bool;

    /// Marks the option with `value` as selected; unknown values are ignored
    fn select(&mut self, value: &str);

    /// Value the widget currently shows, if it has any options
    fn selected_value(&self) -> Option<&str>;

    /// True when a selection was made explicitly rather than shown by default
    fn has_explicit_selection(&self) -> bool;
}

/// Container of category buttons
pub trait ButtonTarget {
    fn clear(&mut self);

    fn append_button(&mut self, button: CategoryButton, on_activate: CategoryChangeHandler);
}

impl<T: SelectTarget + ?Sized> SelectTarget for Box<T> {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn append_option(&mut self, option: SelectOption) {
        (**self).append_option(option)
    }

    fn has_option(&self, value: &str) -> bool {
        (**self).has_option(value)
    }

    fn select(&mut self, value: &str) {
        (**self).select(value)
    }

    fn selected_value(&self) -> Option<&str> {
        (**self).selected_value()
    }

    fn has_explicit_selection(&self) -> bool {
        (**self).has_explicit_selection()
    }
}

impl<T: ButtonTarget + ?Sized> ButtonTarget for Box<T> {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn append_button(&mut self, button: CategoryButton, on_activate: CategoryChangeHandler) {
        (**self).append_button(button, on_activate)
    }
}
