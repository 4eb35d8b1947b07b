//! Markup targets rendered through autoescaping minijinja templates.
//!
//! The fragments are meant to be swapped into a page as the children of an existing
//! `<select>` or button container. Button activation is wired by the page from the
//! `data-category` attribute, so handlers handed to [`HtmlButtonGroup`] are dropped.

use minijinja::{context, Environment};
use std::sync::OnceLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::selection::memory::MemorySelect;
use crate::features::categories::selection::target::{
    ButtonTarget, CategoryButton, CategoryChangeHandler, SelectOption, SelectTarget,
};

const SELECT_TEMPLATE: &str = "category_options.html";
const BUTTONS_TEMPLATE: &str = "category_buttons.html";

const SELECT_SOURCE: &str = r#"{% for option in options %}<option value="{{ option.value }}"{% if option.value == selected %} selected{% endif %}>{{ option.label }}</option>
{% endfor %}"#;

const BUTTONS_SOURCE: &str = r#"{% for button in buttons %}<button type="button" class="{{ button.class }}" data-category="{{ button.slug }}">{% if button.icon %}<span class="category-icon">{{ button.icon }}</span>{% endif %}<span class="category-label">{{ button.label }}</span></button>
{% endfor %}"#;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in [(SELECT_TEMPLATE, SELECT_SOURCE), (BUTTONS_TEMPLATE, BUTTONS_SOURCE)] {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }
    env
}

fn render(template_name: &str, ctx: minijinja::Value) -> Result<String> {
    TEMPLATE_ENV
        .get_or_init(init_environment)
        .get_template(template_name)
        .and_then(|template| template.render(ctx))
        .map_err(|e| AppError::Internal(format!("Failed to render {}: {}", template_name, e)))
}

/// `<option>` list for a category dropdown
#[derive(Debug, Clone, Default)]
pub struct HtmlSelect {
    inner: MemorySelect,
}

impl HtmlSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[SelectOption] {
        self.inner.options()
    }

    /// Options as markup; only an explicit selection is marked `selected`
    pub fn to_html(&self) -> Result<String> {
        let selected = if self.inner.has_explicit_selection() {
            self.inner.selected_value()
        } else {
            None
        };
        render(
            SELECT_TEMPLATE,
            context! { options => self.inner.options(), selected => selected },
        )
    }
}

impl SelectTarget for HtmlSelect {
    fn clear(&mut self) {
        self.inner.clear()
    }

    fn append_option(&mut self, option: SelectOption) {
        self.inner.append_option(option)
    }

    fn has_option(&self, value: &str) -> bool {
        self.inner.has_option(value)
    }

    fn select(&mut self, value: &str) {
        self.inner.select(value)
    }

    fn selected_value(&self) -> Option<&str> {
        self.inner.selected_value()
    }

    fn has_explicit_selection(&self) -> bool {
        self.inner.has_explicit_selection()
    }
}

/// `<button>` list for a category filter bar
#[derive(Debug, Clone, Default)]
pub struct HtmlButtonGroup {
    buttons: Vec<CategoryButton>,
}

impl HtmlButtonGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> &[CategoryButton] {
        &self.buttons
    }

    pub fn to_html(&self) -> Result<String> {
        render(BUTTONS_TEMPLATE, context! { buttons => &self.buttons })
    }
}

impl ButtonTarget for HtmlButtonGroup {
    fn clear(&mut self) {
        self.buttons.clear();
    }

    fn append_button(&mut self, button: CategoryButton, _on_activate: CategoryChangeHandler) {
        self.buttons.push(button);
    }
}
