use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::features::categories::models::Category;
use crate::features::categories::selection::target::{
    ButtonTarget, CategoryButton, CategoryChangeHandler, SelectOption, SelectTarget,
};
use crate::features::categories::services::CategoryCache;
use crate::shared::constants::{
    ALL_CATEGORIES_ICON, ALL_CATEGORIES_LABEL, ALL_CATEGORIES_SHORT_LABEL, ALL_CATEGORIES_SLUG,
    CATEGORY_BUTTON_ACTIVE_CLASS, CATEGORY_BUTTON_CLASS,
};

/// Options for dropdown population
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct SelectConfig {
    /// Lead with the "every category" option (default: true)
    pub include_all: bool,
    /// Label of the "every category" option
    pub all_label: String,
    /// Glyph of the "every category" option
    pub all_icon: String,
    /// Value to select after population, if such an option exists
    pub selected_value: Option<String>,
    /// Prefix labels with category icons (default: true)
    pub show_icons: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            include_all: true,
            all_label: ALL_CATEGORIES_LABEL.to_string(),
            all_icon: ALL_CATEGORIES_ICON.to_string(),
            selected_value: None,
            show_icons: true,
        }
    }
}

/// Options for button-group rendering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ButtonGroupConfig {
    /// Lead with the "every category" button (default: true)
    pub include_all: bool,
    /// Label of the "every category" button
    pub all_label: String,
    /// Glyph of the "every category" button
    pub all_icon: String,
    /// Slug of the button rendered as active (default: "all")
    pub active_category: String,
    /// Class of every button
    pub button_class: String,
    /// Extra class of the active button
    pub active_class: String,
}

impl Default for ButtonGroupConfig {
    fn default() -> Self {
        Self {
            include_all: true,
            all_label: ALL_CATEGORIES_SHORT_LABEL.to_string(),
            all_icon: ALL_CATEGORIES_ICON.to_string(),
            active_category: ALL_CATEGORIES_SLUG.to_string(),
            button_class: CATEGORY_BUTTON_CLASS.to_string(),
            active_class: CATEGORY_BUTTON_ACTIVE_CLASS.to_string(),
        }
    }
}

fn option_label(name: &str, icon: Option<&str>, show_icons: bool) -> String {
    match icon.filter(|i| show_icons && !i.is_empty()) {
        Some(icon) => format!("{} {}", icon, name),
        None => name.to_string(),
    }
}

/// Replaces the options of `target` with `categories`
pub fn populate_select_from<T>(target: &mut T, categories: &[Category], config: &SelectConfig)
where
    T: SelectTarget + ?Sized,
{
    target.clear();

    if config.include_all {
        target.append_option(SelectOption {
            value: ALL_CATEGORIES_SLUG.to_string(),
            label: option_label(&config.all_label, Some(&config.all_icon), config.show_icons),
        });
    }

    for category in categories {
        target.append_option(SelectOption {
            value: category.slug.clone(),
            label: option_label(&category.name, category.icon_glyph(), config.show_icons),
        });
    }

    if let Some(selected) = config.selected_value.as_deref().filter(|v| !v.is_empty()) {
        if target.has_option(selected) {
            target.select(selected);
        }
    }
}

/// Populates `target` from the cache. A missing target is a no-op.
pub async fn populate_select<T>(target: Option<&mut T>, cache: &CategoryCache, config: &SelectConfig)
where
    T: SelectTarget + ?Sized,
{
    let Some(target) = target else {
        return;
    };

    let listing = cache.list().await;
    populate_select_from(target, listing.categories(), config);
    tracing::debug!(
        "Populated select with {} categories",
        listing.categories().len()
    );
}

fn button_for(
    slug: &str,
    label: &str,
    icon: Option<&str>,
    config: &ButtonGroupConfig,
) -> CategoryButton {
    let active = config.active_category == slug;
    let class = if active {
        format!("{} {}", config.button_class, config.active_class)
    } else {
        config.button_class.clone()
    };

    CategoryButton {
        slug: slug.to_string(),
        label: label.to_string(),
        icon: icon.filter(|i| !i.is_empty()).map(str::to_string),
        active,
        class,
    }
}

/// Replaces the buttons of `target` with `categories`
pub fn render_buttons_from<T>(
    target: &mut T,
    categories: &[Category],
    config: &ButtonGroupConfig,
    on_change: &CategoryChangeHandler,
) where
    T: ButtonTarget + ?Sized,
{
    target.clear();

    if config.include_all {
        let button = button_for(
            ALL_CATEGORIES_SLUG,
            &config.all_label,
            Some(&config.all_icon),
            config,
        );
        target.append_button(button, Arc::clone(on_change));
    }

    for category in categories {
        let button = button_for(&category.slug, &category.name, category.icon_glyph(), config);
        target.append_button(button, Arc::clone(on_change));
    }
}

/// Renders the button group from the cache. A missing target is a no-op.
pub async fn render_buttons<T>(
    target: Option<&mut T>,
    cache: &CategoryCache,
    config: &ButtonGroupConfig,
    on_change: CategoryChangeHandler,
) where
    T: ButtonTarget + ?Sized,
{
    let Some(target) = target else {
        return;
    };

    let listing = cache.list().await;
    render_buttons_from(target, listing.categories(), config, &on_change);
    tracing::debug!(
        "Rendered {} category buttons",
        listing.categories().len()
    );
}
