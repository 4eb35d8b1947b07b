use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryLabelDto, CategoryOptionDto, CategoryResponseDto, UpsertCategoryDto,
};
use crate::features::categories::services::{CategoryCache, CategoryListing};
use crate::features::categories::sources::CategorySource;

/// Service for category operations
///
/// Reads go through the cache and degrade to the built-in list; admin operations
/// talk to the source directly and surface its errors.
pub struct CategoryService {
    cache: Arc<CategoryCache>,
    source: Arc<dyn CategorySource>,
}

impl CategoryService {
    pub fn new(cache: Arc<CategoryCache>, source: Arc<dyn CategorySource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<CategoryCache> {
        &self.cache
    }

    /// Active categories plus the listing they came from
    pub async fn list(&self) -> (Vec<CategoryResponseDto>, CategoryListing) {
        let listing = self.cache.list().await;
        let categories = listing
            .categories()
            .iter()
            .cloned()
            .map(CategoryResponseDto::from)
            .collect();
        (categories, listing)
    }

    /// Picker entries, optionally led by the "every category" entry
    pub async fn options(&self, include_all: bool) -> Vec<CategoryOptionDto> {
        let listing = self.cache.list().await;
        include_all
            .then(CategoryOptionDto::all)
            .into_iter()
            .chain(listing.categories().iter().map(CategoryOptionDto::from))
            .collect()
    }

    /// Cached category by slug
    pub async fn get_cached(&self, slug: &str) -> Result<CategoryResponseDto> {
        self.cache
            .lookup(slug)
            .await
            .map(CategoryResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Name and icon for a slug, answering for unknown slugs too
    pub async fn label(&self, slug: &str) -> CategoryLabelDto {
        CategoryLabelDto {
            slug: slug.to_string(),
            name: self.cache.name_for(slug).await,
            icon: self.cache.icon_for(slug).await,
        }
    }

    /// Authoritative read that skips the cache
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        self.source
            .get_by_slug(slug)
            .await?
            .map(CategoryResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Creates or updates a category, then evicts the cached list
    pub async fn upsert(&self, dto: UpsertCategoryDto) -> Result<CategoryResponseDto> {
        let stored = self.source.upsert(&dto.into()).await?;
        self.cache.invalidate().await;
        Ok(stored.into())
    }

    /// Forces a backend read and returns its outcome
    pub async fn refresh(&self) -> (Vec<CategoryResponseDto>, CategoryListing) {
        let listing = self.cache.force_refresh().await;
        let categories = listing
            .categories()
            .iter()
            .cloned()
            .map(CategoryResponseDto::from)
            .collect();
        (categories, listing)
    }
}
