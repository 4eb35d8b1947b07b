use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::core::config::DatabaseConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::sources::CategorySource;

/// Category source talking to Postgres directly
pub struct PgCategorySource {
    pool: PgPool,
}

impl PgCategorySource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CategorySource for PgCategorySource {
    async fn list_active(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT slug, name, icon, is_active, display_order
            FROM categories
            WHERE is_active = TRUE
            ORDER BY display_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT slug, name, icon, is_active, display_order
            FROM categories
            WHERE slug = $1 AND is_active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn upsert(&self, category: &Category) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, name, icon, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                icon = EXCLUDED.icon,
                is_active = EXCLUDED.is_active,
                display_order = EXCLUDED.display_order
            RETURNING slug, name, icon, is_active, display_order
            "#,
        )
        .bind(&category.slug)
        .bind(&category.name)
        .bind(&category.icon)
        .bind(category.is_active)
        .bind(category.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert category '{}': {:?}", category.slug, e);
            AppError::Database(e)
        })
    }
}
