//! Keyed entity store using moka
//!
//! Stores are unbounded and have no TTL: an entity lives until the process
//! exits. Two resolutions missing on the same key at the same time both
//! populate it and the later insert wins; since conversion is deterministic
//! both values are identical.

use moka::future::Cache;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Snapshot of a store's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl StoreStats {
    /// Hit rate as percentage (0.0 - 100.0)
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Concurrent id → entity map
///
/// Uses `Arc<str>` keys so lookups by `&str` need no allocation.
#[derive(Clone)]
pub struct Store<V> {
    name: &'static str,
    cache: Cache<Arc<str>, Arc<V>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl<V> fmt::Debug for Store<V>
where
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<V> Store<V>
where
    V: Send + Sync + 'static,
{
    /// Create an empty, unbounded store
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cache: Cache::builder().name(name).build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Look up an entity without populating
    ///
    /// Does not touch the hit/miss counters.
    pub async fn get(&self, id: &str) -> Option<Arc<V>> {
        self.cache.get(id).await
    }

    /// Return the stored entity, or run `populate` and store its result
    ///
    /// Errors from `populate` are returned as-is and nothing is stored.
    pub async fn get_or_populate<F, Fut, E>(&self, id: &str, populate: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.get(id).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(store = self.name, id, "Cache hit");
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(store = self.name, id, "Cache miss");

        let value = Arc::new(populate().await?);
        self.cache.insert(Arc::from(id), Arc::clone(&value)).await;
        Ok(value)
    }

    /// Insert `value` unless `id` is already stored
    ///
    /// Returns the stored entity: the existing one if present, otherwise
    /// `value`. An existing entity is never replaced.
    pub async fn insert_if_absent(&self, id: &str, value: V) -> Arc<V> {
        self.cache
            .entry(Arc::from(id))
            .or_insert(Arc::new(value))
            .await
            .into_value()
    }

    /// Number of stored entities
    ///
    /// Eventually consistent; call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first for an exact figure.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Apply pending internal bookkeeping (used before reading counts)
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.cache.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
