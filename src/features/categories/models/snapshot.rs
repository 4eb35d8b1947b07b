use std::collections::HashMap;

use crate::features::categories::models::Category;
use crate::shared::constants::{ALL_CATEGORIES_ICON, ALL_CATEGORIES_LABEL, ALL_CATEGORIES_SLUG};

/// Ordered category list together with its slug index.
///
/// Both are built from the same fetch, so readers never see one without the other.
#[derive(Debug, Clone, Default)]
pub struct CategorySnapshot {
    categories: Vec<Category>,
    by_slug: HashMap<String, usize>,
}

impl CategorySnapshot {
    pub fn new(categories: Vec<Category>) -> Self {
        // Later duplicates win, matching a plain map insert over the list
        let by_slug = categories
            .iter()
            .enumerate()
            .map(|(index, category)| (category.slug.clone(), index))
            .collect();

        Self {
            categories,
            by_slug,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&index| &self.categories[index])
    }

    /// Slug -> category view of the snapshot
    pub fn by_slug(&self) -> HashMap<&str, &Category> {
        self.by_slug
            .iter()
            .map(|(slug, &index)| (slug.as_str(), &self.categories[index]))
            .collect()
    }

    /// Display name for a slug; unknown slugs are echoed back
    pub fn name_for(&self, slug: &str) -> String {
        if slug == ALL_CATEGORIES_SLUG {
            return ALL_CATEGORIES_LABEL.to_string();
        }
        self.get(slug)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| slug.to_string())
    }

    /// Icon for a slug; empty when unknown or iconless
    pub fn icon_for(&self, slug: &str) -> String {
        if slug == ALL_CATEGORIES_SLUG {
            return ALL_CATEGORIES_ICON.to_string();
        }
        self.get(slug)
            .and_then(|c| c.icon_glyph())
            .unwrap_or_default()
            .to_string()
    }
}
