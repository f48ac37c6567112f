//! Catalog loader - builds token sets and keeps a TTL snapshot of the catalog

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};

use crate::config::MAX_CACHE_TTL_SECS;
use crate::domain::{CatalogSnapshot, CategoryEntry, CategoryRepository, DomainError};

/// Default lifetime of a catalog snapshot
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(5 * 60);

/// The catalog is cached as a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SnapshotKey;

/// Loads the active catalog and reuses it until it expires
///
/// A reload replaces the whole snapshot. Concurrent callers that miss at the
/// same time each fetch from the repository and the last insert wins.
pub struct CatalogLoader {
    repository: Arc<dyn CategoryRepository>,
    cache: Cache<SnapshotKey, Arc<CatalogSnapshot>>,
    ttl: Duration,
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("ttl", &self.ttl)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl CatalogLoader {
    /// Create a loader; TTLs beyond [`MAX_CACHE_TTL_SECS`] are clamped
    pub fn new(repository: Arc<dyn CategoryRepository>, ttl: Duration) -> Self {
        let ttl = ttl.min(Duration::from_secs(MAX_CACHE_TTL_SECS));
        let cache = Cache::builder().time_to_live(ttl).max_capacity(1).build();

        Self {
            repository,
            cache,
            ttl,
        }
    }

    pub fn with_default_ttl(repository: Arc<dyn CategoryRepository>) -> Self {
        Self::new(repository, DEFAULT_CATALOG_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the current snapshot, reloading it when missing, empty or expired
    ///
    /// Repository errors are returned unchanged and leave the cache untouched.
    pub async fn load_categories(&self) -> Result<Arc<CatalogSnapshot>, DomainError> {
        if let Some(snapshot) = self.cache.get(&SnapshotKey).await {
            if snapshot.is_reusable() {
                debug!(entries = snapshot.len(), "Catalog cache hit");
                return Ok(snapshot);
            }

            self.cache.invalidate(&SnapshotKey).await;
        }

        debug!("Catalog cache miss, fetching active categories");

        let records = self.repository.list_active().await?;
        let entries: Vec<CategoryEntry> = records.iter().map(CategoryEntry::from_record).collect();

        let snapshot = Arc::new(CatalogSnapshot::new(entries, self.snapshot_ttl()));
        self.cache.insert(SnapshotKey, Arc::clone(&snapshot)).await;

        info!(
            entries = snapshot.len(),
            ttl_secs = self.ttl.as_secs(),
            "Category catalog loaded"
        );

        Ok(snapshot)
    }

    /// Drop the snapshot so the next load goes to the repository
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        debug!("Catalog cache invalidated");
    }

    fn snapshot_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX)
    }
}
