use crate::features::categories::models::Category;
use crate::features::categories::selection::renderer::{populate_select_from, SelectConfig};
use crate::features::categories::selection::target::SelectTarget;
use crate::features::categories::services::CategoryCache;

/// Per-widget settings supplied at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub include_all: bool,
    pub show_icons: bool,
    /// Preselected value when the widget has no current value
    pub default_value: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            include_all: true,
            show_icons: true,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// Category dropdowns of one page, populated together
#[derive(Debug)]
pub struct CategoryWidgets<T> {
    widgets: Vec<(T, WidgetConfig)>,
}

impl<T> Default for CategoryWidgets<T> {
    fn default() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }
}

impl<T: SelectTarget> CategoryWidgets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: T, config: WidgetConfig) -> WidgetId {
        self.widgets.push((target, config));
        WidgetId(self.widgets.len() - 1)
    }

    pub fn get(&self, id: WidgetId) -> Option<&T> {
        self.widgets.get(id.0).map(|(target, _)| target)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widgets.get_mut(id.0).map(|(target, _)| target)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Repopulates every registered widget with one cache read; returns the widget count
    pub async fn initialize(&mut self, cache: &CategoryCache) -> usize {
        if self.widgets.is_empty() {
            return 0;
        }

        let listing = cache.list().await;
        self.initialize_from(listing.categories());
        tracing::info!("Initialized {} category selects", self.widgets.len());
        self.widgets.len()
    }

    pub fn initialize_from(&mut self, categories: &[Category]) {
        for (target, widget) in &mut self.widgets {
            // A value the widget explicitly holds wins over the configured default
            let selected_value = target
                .has_explicit_selection()
                .then(|| target.selected_value())
                .flatten()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .or_else(|| widget.default_value.clone());

            let config = SelectConfig {
                include_all: widget.include_all,
                show_icons: widget.show_icons,
                selected_value,
                ..Default::default()
            };
            populate_select_from(target, categories, &config);
        }
    }
}
