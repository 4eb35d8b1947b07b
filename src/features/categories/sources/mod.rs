//! Backends able to serve the `categories` table.

mod postgres;
mod supabase;

pub use postgres::PgCategorySource;
pub use supabase::SupabaseCategorySource;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;

/// Remote store of categories.
///
/// A missing row is `Ok(None)` from `get_by_slug`; every other failure is an `AppError`.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Active categories, ascending by `display_order`
    async fn list_active(&self) -> Result<Vec<Category>>;

    /// Single active category by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Insert or update keyed on `slug`, returning the stored row
    async fn upsert(&self, category: &Category) -> Result<Category>;
}
