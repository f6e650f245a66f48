//! Moka-based [`CacheProvider`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;

use crudhub_app::ports::{CacheKey, CacheProvider, CachedValue};

/// Default maximum number of cached results per provider.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Sizing and expiry of a [`MokaCacheProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MokaCacheConfig {
    /// Maximum number of cached results.
    pub capacity: u64,
    /// How long a result stays cached after insertion; forever when `None`.
    pub time_to_live: Option<Duration>,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            time_to_live: None,
        }
    }
}

/// Hit and miss counters of a provider since its creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Local in-memory cache provider backed by [`moka::sync::Cache`].
pub struct MokaCacheProvider {
    cache: Cache<CacheKey, CachedValue>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new(MokaCacheConfig::default())
    }
}

impl MokaCacheProvider {
    #[must_use]
    pub fn new(config: MokaCacheConfig) -> Self {
        tracing::debug!(
            capacity = config.capacity,
            ttl = ?config.time_to_live,
            "initializing moka cache"
        );
        let mut builder = Cache::builder().max_capacity(config.capacity);
        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Provider holding at most `capacity` results, without expiry.
    #[must_use]
    pub fn with_capacity(capacity: u64) -> Self {
        Self::new(MokaCacheConfig {
            capacity,
            ..MokaCacheConfig::default()
        })
    }

    /// Number of cached results, after applying pending evictions.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl CacheProvider for MokaCacheProvider {
    fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let value = self.cache.get(key);
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    fn put(&self, key: CacheKey, value: CachedValue) {
        self.cache.insert(key, value);
    }

    fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn name(&self) -> &'static str {
        "moka"
    }
}
