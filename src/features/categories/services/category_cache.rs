use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::features::categories::models::{fallback_categories, Category, CategorySnapshot};
use crate::features::categories::sources::CategorySource;
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::constants::{ALL_CATEGORIES_ICON, ALL_CATEGORIES_LABEL, ALL_CATEGORIES_SLUG};

/// Where the categories of a listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrigin {
    /// Served from the cache without contacting the backend
    Cached,
    /// Freshly read from the backend and now cached
    Fetched,
    /// Backend read failed; built-in categories served instead
    Degraded,
}

/// Result of a cache read
#[derive(Debug, Clone)]
pub struct CategoryListing {
    snapshot: Arc<CategorySnapshot>,
    origin: ListingOrigin,
}

impl CategoryListing {
    fn degraded() -> Self {
        Self {
            snapshot: Arc::new(CategorySnapshot::new(fallback_categories())),
            origin: ListingOrigin::Degraded,
        }
    }

    pub fn origin(&self) -> ListingOrigin {
        self.origin
    }

    pub fn is_degraded(&self) -> bool {
        self.origin == ListingOrigin::Degraded
    }

    pub fn snapshot(&self) -> &CategorySnapshot {
        &self.snapshot
    }

    pub fn categories(&self) -> &[Category] {
        self.snapshot.categories()
    }

}

struct CacheEntry {
    snapshot: Arc<CategorySnapshot>,
    fetched_at: Instant,
}

/// Time-boxed cache of active categories.
///
/// Reads younger than the TTL are served from memory. Backend failures never
/// propagate: the caller gets the built-in list tagged as degraded, and that list
/// is not cached. Backend reads are serialized, so a slow response can never
/// overwrite the result of a later one.
pub struct CategoryCache {
    source: Arc<dyn CategorySource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
    refresh_gate: Mutex<()>,
}

impl CategoryCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new(source: Arc<dyn CategorySource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn CategorySource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            ttl,
            entry: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Active categories in display order
    pub async fn list(&self) -> CategoryListing {
        if let Some(snapshot) = self.fresh_snapshot().await {
            tracing::debug!("Serving {} cached categories", snapshot.len());
            return CategoryListing {
                snapshot,
                origin: ListingOrigin::Cached,
            };
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while this one waited for the gate
        if let Some(snapshot) = self.fresh_snapshot().await {
            return CategoryListing {
                snapshot,
                origin: ListingOrigin::Cached,
            };
        }

        self.fetch().await
    }

    /// Drops the cached copy and reads the backend immediately
    pub async fn force_refresh(&self) -> CategoryListing {
        let _gate = self.refresh_gate.lock().await;
        self.entry.write().await.take();
        tracing::info!("Category cache refresh forced");
        self.fetch().await
    }

    /// Drops the cached copy; the next read goes to the backend.
    ///
    /// Waits for an in-flight backend read so its rows cannot land after the eviction.
    pub async fn invalidate(&self) {
        let _gate = self.refresh_gate.lock().await;
        if self.entry.write().await.take().is_some() {
            tracing::debug!("Category cache invalidated");
        }
    }

    /// Category for `slug` from the current list
    pub async fn lookup(&self, slug: &str) -> Option<Category> {
        self.list().await.snapshot().get(slug).cloned()
    }

    /// Display name for `slug`, never failing
    pub async fn name_for(&self, slug: &str) -> String {
        if slug == ALL_CATEGORIES_SLUG {
            return ALL_CATEGORIES_LABEL.to_string();
        }
        self.list().await.snapshot().name_for(slug)
    }

    /// Icon for `slug`, empty when unknown
    pub async fn icon_for(&self, slug: &str) -> String {
        if slug == ALL_CATEGORIES_SLUG {
            return ALL_CATEGORIES_ICON.to_string();
        }
        self.list().await.snapshot().icon_for(slug)
    }

    async fn fresh_snapshot(&self) -> Option<Arc<CategorySnapshot>> {
        let now = self.clock.now();
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.ttl)
            .map(|e| Arc::clone(&e.snapshot))
    }

    /// Reads the backend; caller must hold `refresh_gate`
    async fn fetch(&self) -> CategoryListing {
        let requested_at = self.clock.now();

        match self.source.list_active().await {
            Ok(categories) => {
                let snapshot = Arc::new(CategorySnapshot::new(categories));
                *self.entry.write().await = Some(CacheEntry {
                    snapshot: Arc::clone(&snapshot),
                    fetched_at: requested_at,
                });
                tracing::info!("Loaded {} categories from backend", snapshot.len());
                CategoryListing {
                    snapshot,
                    origin: ListingOrigin::Fetched,
                }
            }
            Err(e) => {
                tracing::error!("Failed to load categories, serving built-in list: {}", e);
                CategoryListing::degraded()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::shared::clock::ManualClock;
    use crate::shared::test_helpers::InMemoryCategorySource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    fn agricole() -> Category {
        Category::new("agricole", "Agricole", Some("🌾"), 1)
    }

    fn cache_over(source: &Arc<InMemoryCategorySource>) -> (CategoryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = CategoryCache::with_clock(
            Arc::clone(source) as Arc<dyn CategorySource>,
            CategoryCache::DEFAULT_TTL,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (cache, clock)
    }

    #[tokio::test]
    async fn test_list_within_ttl_reads_backend_once() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, clock) = cache_over(&source);

        let first = cache.list().await;
        assert_eq!(first.origin(), ListingOrigin::Fetched);

        clock.advance(Duration::from_secs(299));
        let second = cache.list().await;
        assert_eq!(second.origin(), ListingOrigin::Cached);
        assert_eq!(second.categories(), first.categories());
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_after_ttl_reads_backend_again() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, clock) = cache_over(&source);

        cache.list().await;
        clock.advance(Duration::from_secs(300));
        let listing = cache.list().await;

        assert_eq!(listing.origin(), ListingOrigin::Fetched);
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_ttl() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        cache.list().await;
        source.set_categories(vec![
            agricole(),
            Category::new("quete", "Quêtes", Some("✨"), 2),
        ]);

        let refreshed = cache.force_refresh().await;
        assert_eq!(refreshed.origin(), ListingOrigin::Fetched);
        assert_eq!(refreshed.categories().len(), 2);
        assert_eq!(source.list_calls(), 2);

        // The refreshed copy is what later reads see
        let listing = cache.list().await;
        assert_eq!(listing.origin(), ListingOrigin::Cached);
        assert_eq!(listing.categories().len(), 2);
    }

    #[tokio::test]
    async fn test_list_after_invalidate_reads_backend() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        cache.list().await;
        cache.invalidate().await;
        let listing = cache.list().await;

        assert_eq!(listing.origin(), ListingOrigin::Fetched);
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_serves_fallback() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        source.set_failing(true);
        let (cache, _clock) = cache_over(&source);

        let listing = cache.list().await;
        assert!(listing.is_degraded());

        let slugs: Vec<&str> = listing.categories().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["agricole", "consommable", "equipement", "materiau", "quete"]
        );
        for category in listing.categories() {
            assert!(!category.slug.is_empty());
            assert!(!category.name.is_empty());
            assert!(category.icon_glyph().is_some());
        }
    }

    #[tokio::test]
    async fn test_fallback_is_not_cached() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        source.set_failing(true);
        let (cache, _clock) = cache_over(&source);

        assert!(cache.list().await.is_degraded());
        assert!(cache.list().await.is_degraded());
        assert_eq!(source.list_calls(), 2);

        source.set_failing(false);
        let listing = cache.list().await;
        assert_eq!(listing.origin(), ListingOrigin::Fetched);
        assert_eq!(listing.categories(), &[agricole()]);
    }

    #[tokio::test]
    async fn test_stale_cache_with_failing_backend_serves_fallback() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, clock) = cache_over(&source);

        cache.list().await;
        source.set_failing(true);
        clock.advance(Duration::from_secs(600));

        let listing = cache.list().await;
        assert!(listing.is_degraded());
        assert_eq!(listing.categories().len(), 5);
    }

    #[tokio::test]
    async fn test_single_remote_category_scenario() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        let listing = cache.list().await;
        assert_eq!(listing.categories(), &[agricole()]);
    }

    #[tokio::test]
    async fn test_lookup() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        assert_eq!(cache.lookup("agricole").await, Some(agricole()));
        assert_eq!(cache.lookup("unknown").await, None);
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_during_outage_uses_fallback() {
        let source = Arc::new(InMemoryCategorySource::new(vec![]));
        source.set_failing(true);
        let (cache, _clock) = cache_over(&source);

        let quete = cache.lookup("quete").await.unwrap();
        assert_eq!(quete.name, "Quêtes");
    }

    #[tokio::test]
    async fn test_name_and_icon_for_all_skip_the_cache() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        source.set_failing(true);
        let (cache, _clock) = cache_over(&source);

        assert_eq!(cache.name_for("all").await, "Toutes catégories");
        assert_eq!(cache.icon_for("all").await, "📦");
        assert_eq!(source.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_name_and_icon_for_known_and_unknown_slugs() {
        let source = Arc::new(InMemoryCategorySource::new(vec![
            agricole(),
            Category::new("divers", "Divers", None, 2),
        ]));
        let (cache, _clock) = cache_over(&source);

        assert_eq!(cache.name_for("agricole").await, "Agricole");
        assert_eq!(cache.icon_for("agricole").await, "🌾");
        assert_eq!(cache.icon_for("divers").await, "");
        assert_eq!(cache.name_for("xyz").await, "xyz");
        assert_eq!(cache.icon_for("xyz").await, "");
    }

    #[tokio::test]
    async fn test_concurrent_cold_reads_share_one_fetch() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        let (a, b, c) = tokio::join!(cache.list(), cache.list(), cache.list());

        assert_eq!(source.list_calls(), 1);
        assert_eq!(a.categories(), b.categories());
        assert_eq!(b.categories(), c.categories());
        let fetched = [a.origin(), b.origin(), c.origin()]
            .iter()
            .filter(|o| **o == ListingOrigin::Fetched)
            .count();
        assert_eq!(fetched, 1);
    }

    #[tokio::test]
    async fn test_refresh_racing_a_read_keeps_latest_data() {
        let source = Arc::new(InMemoryCategorySource::new(vec![agricole()]));
        let (cache, _clock) = cache_over(&source);

        let read = cache.list();
        let refresh = async {
            source.set_categories(vec![Category::new("quete", "Quêtes", Some("✨"), 1)]);
            cache.force_refresh().await
        };
        let (_, refreshed) = tokio::join!(read, refresh);

        // Whatever order the reads ran in, the cache ends on the newest backend state
        assert_eq!(refreshed.categories()[0].slug, "quete");
        let listing = cache.list().await;
        assert_eq!(listing.categories()[0].slug, "quete");
    }

    /// Source that snapshots its rows, then holds the first read until released
    struct HeldSource {
        rows: std::sync::Mutex<Vec<Category>>,
        hold_first_read: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    impl HeldSource {
        fn new(rows: Vec<Category>) -> Self {
            Self {
                rows: std::sync::Mutex::new(rows),
                hold_first_read: AtomicBool::new(true),
                entered: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl CategorySource for HeldSource {
        async fn list_active(&self) -> Result<Vec<Category>> {
            let rows = self.rows.lock().unwrap().clone();
            if self.hold_first_read.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(rows)
        }

        async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
            Ok(self.rows.lock().unwrap().iter().find(|c| c.slug == slug).cloned())
        }

        async fn upsert(&self, category: &Category) -> Result<Category> {
            self.rows.lock().unwrap().push(category.clone());
            Ok(category.clone())
        }
    }

    #[tokio::test]
    async fn test_invalidate_during_inflight_read_exposes_the_write() {
        let source = Arc::new(HeldSource::new(vec![agricole()]));
        let cache = Arc::new(CategoryCache::new(
            Arc::clone(&source) as Arc<dyn CategorySource>,
            CategoryCache::DEFAULT_TTL,
        ));

        let reader = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.list().await }
        });
        // The read has captured the pre-write rows and is suspended
        source.entered.notified().await;

        source
            .upsert(&Category::new("reliques", "Reliques", Some("🏺"), 2))
            .await
            .unwrap();
        let invalidation = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.invalidate().await }
        });
        tokio::task::yield_now().await;
        source.release.notify_one();

        let stale = reader.await.unwrap();
        assert_eq!(stale.categories().len(), 1);
        invalidation.await.unwrap();

        let listing = cache.list().await;
        assert_eq!(listing.origin(), ListingOrigin::Fetched);
        let slugs: Vec<&str> = listing.categories().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["agricole", "reliques"]);
    }
}
