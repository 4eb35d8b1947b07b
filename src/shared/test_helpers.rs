use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::config::AdminConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::services::{CategoryCache, CategoryService};
use crate::features::categories::sources::CategorySource;

/// In-memory category table with a switchable outage
#[derive(Default)]
pub struct InMemoryCategorySource {
    rows: Mutex<Vec<Category>>,
    failing: AtomicBool,
    list_calls: AtomicUsize,
}

impl InMemoryCategorySource {
    pub fn new(rows: Vec<Category>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn set_categories(&self, rows: Vec<Category>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "backend unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CategorySource for InMemoryCategorySource {
    async fn list_active(&self) -> Result<Vec<Category>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Suspend like a network round trip would
        tokio::task::yield_now().await;
        self.check_available()?;

        let mut rows: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.display_order);
        Ok(rows)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug && c.is_active)
            .cloned())
    }

    async fn upsert(&self, category: &Category) -> Result<Category> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.slug == category.slug) {
            Some(existing) => *existing = category.clone(),
            None => rows.push(category.clone()),
        }
        Ok(category.clone())
    }
}

/// Service over an in-memory source with the default TTL
pub fn category_service(rows: Vec<Category>) -> (Arc<CategoryService>, Arc<InMemoryCategorySource>) {
    let source = Arc::new(InMemoryCategorySource::new(rows));
    let cache = Arc::new(CategoryCache::new(
        Arc::clone(&source) as Arc<dyn CategorySource>,
        Duration::from_secs(300),
    ));
    let service = Arc::new(CategoryService::new(
        cache,
        Arc::clone(&source) as Arc<dyn CategorySource>,
    ));
    (service, source)
}

/// Admin settings accepting `token` as the bearer credential
pub fn admin_config(token: &str) -> Arc<AdminConfig> {
    Arc::new(AdminConfig {
        api_token: Some(token.to_string()),
    })
}
