//! Time-windowed read cache.
//!
//! Memoizes the result of read queries under a [`CacheKey`] for a fixed
//! TTL. Expiry is checked lazily on lookup: a stale entry stays in the map
//! until the next fetch for its key overwrites it or [`ReadCache::clear`]
//! drops everything.
//!
//! There is no single-flight coalescing. The map lock is released before
//! the fetcher runs, so concurrent misses on one key each call their
//! fetcher and the last insert wins.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::models::{CacheConfig, CacheKey};
use crate::domain::ports::{Clock, SystemClock};

use super::cache_stats::CacheStats;

/// Default freshness window (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

type SharedValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    value: SharedValue,
    stored_at: Instant,
}

/// Explicit cache object; services receive it by `Arc` instead of reaching
/// for process-wide state.
pub struct ReadCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    stats: Arc<CacheStats>,
}

impl ReadCache {
    /// Cache with the default TTL and the system clock.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Cache driven by an injected clock (tests use [`crate::domain::ports::ManualClock`]).
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            stats: Arc::new(CacheStats::new()),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_ttl(Duration::from_secs(config.ttl_secs))
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now().saturating_duration_since(entry.stored_at) < self.ttl
    }

    /// Return the fresh value stored under `key`, if any.
    ///
    /// A value stored with a different type is reported as absent.
    pub async fn get<T>(&self, key: &CacheKey) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if !self.is_fresh(entry) {
            return None;
        }
        Arc::clone(&entry.value).downcast::<T>().ok()
    }

    /// Store `value` under `key` with a fresh timestamp, replacing any
    /// previous entry.
    pub async fn set<T>(&self, key: CacheKey, value: Arc<T>)
    where
        T: Send + Sync + 'static,
    {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Return the cached value for `key`, or run `fetcher` once and cache
    /// its result.
    ///
    /// A failing fetcher's error is returned unchanged and nothing is
    /// stored, so the next call fetches again.
    pub async fn cached_fetch<T, E, F, Fut>(
        &self,
        key: impl Into<CacheKey>,
        fetcher: F,
    ) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = key.into();

        if let Some(value) = self.get::<T>(&key).await {
            self.stats.record_hit();
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        self.stats.record_miss();
        debug!(key = %key, "cache miss, fetching");

        match fetcher().await {
            Ok(value) => {
                let value = Arc::new(value);
                self.set(key, Arc::clone(&value)).await;
                Ok(value)
            }
            Err(err) => {
                self.stats.record_fetch_failure();
                debug!(key = %key, "fetch failed, nothing cached");
                Err(err)
            }
        }
    }

    /// Drop every entry regardless of age.
    pub async fn clear(&self) {
        let dropped = {
            let mut entries = self.entries.write().await;
            let n = entries.len();
            entries.clear();
            n
        };
        self.stats.record_clear();
        info!(entries = dropped, "read cache cleared");
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for ReadCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadCache")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
