use std::fmt;

use crate::features::categories::selection::target::{
    ButtonTarget, CategoryButton, CategoryChangeHandler, SelectOption, SelectTarget,
};

/// In-memory dropdown.
///
/// Without an explicit selection the first option counts as selected, the way a
/// browser `<select>` behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySelect {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl MemorySelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

impl SelectTarget for MemorySelect {
    fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    fn append_option(&mut self, option: SelectOption) {
        self.options.push(option);
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    fn select(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|o| o.value == value) {
            self.selected = Some(index);
        }
    }

    fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .or_else(|| self.options.first())
            .map(|o| o.value.as_str())
    }

    fn has_explicit_selection(&self) -> bool {
        self.selected.is_some()
    }
}

/// In-memory button group whose buttons can be "clicked"
#[derive(Default)]
pub struct MemoryButtonGroup {
    buttons: Vec<(CategoryButton, CategoryChangeHandler)>,
}

impl MemoryButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> Vec<&CategoryButton> {
        self.buttons.iter().map(|(button, _)| button).collect()
    }

    pub fn active_slug(&self) -> Option<&str> {
        self.buttons
            .iter()
            .find(|(button, _)| button.active)
            .map(|(button, _)| button.slug.as_str())
    }

    /// Activates the button carrying `slug`; false when there is none
    pub fn click(&self, slug: &str) -> bool {
        match self.buttons.iter().find(|(button, _)| button.slug == slug) {
            Some((button, on_activate)) => {
                on_activate(&button.slug);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MemoryButtonGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryButtonGroup")
            .field("buttons", &self.buttons())
            .finish()
    }
}

impl ButtonTarget for MemoryButtonGroup {
    fn clear(&mut self) {
        self.buttons.clear();
    }

    fn append_button(&mut self, button: CategoryButton, on_activate: CategoryChangeHandler) {
        self.buttons.push((button, on_activate));
    }
}
