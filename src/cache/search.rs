//! TTL + capacity bounded cache of search responses.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::SearchKey;
use crate::telemetry;
use crate::types::SharedSummary;

/// Default maximum number of cached searches.
const DEFAULT_CAPACITY: usize = 50;

/// Default entry lifetime: 30 minutes.
const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Configuration for the search-result cache.
///
/// ```rust
/// # use recipewrangler::SearchCacheConfig;
/// # use std::time::Duration;
/// let config = SearchCacheConfig::new()
///     .capacity(100)
///     .ttl(Duration::from_secs(10 * 60));
/// ```
#[derive(Debug, Clone)]
pub struct SearchCacheConfig {
    /// Maximum number of cached searches. Default: 50.
    pub capacity: usize,
    /// Time-to-live for cached entries. Default: 30 minutes.
    pub ttl: Duration,
}

impl Default for SearchCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: DEFAULT_TTL,
        }
    }
}

impl SearchCacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached searches.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// One cached search response. Replace-on-write only; never mutated after
/// insertion (the stubs it shares may still have images filled in place by
/// hydration, which is the shared-handle contract, not an entry mutation).
struct CacheEntry {
    query: String,
    allergens: Vec<String>,
    results: Vec<SharedSummary>,
    inserted_at: Instant,
}

/// In-memory cache of search responses with TTL expiry and FIFO eviction.
///
/// Expiry is lazy: an expired entry is removed by the `get` that finds it
/// (or by [`clear_expired`](Self::clear_expired)). Capacity eviction always
/// removes the oldest-inserted entry — lookups never promote, so access
/// patterns cannot change which entry is evicted.
///
/// Timestamps come from [`tokio::time::Instant`], so tests can drive TTL
/// expiry with a paused clock instead of real sleeps.
pub struct SearchResultCache {
    inner: Mutex<Inner>,
    config: SearchCacheConfig,
}

struct Inner {
    entries: HashMap<SearchKey, CacheEntry>,
    /// Insertion order, oldest first. Re-insertion under an existing key
    /// keeps the original slot.
    order: VecDeque<SearchKey>,
}

impl Inner {
    fn remove(&mut self, key: &SearchKey) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        if let Some(position) = self.order.iter().position(|k| k == key) {
            self.order.remove(position);
        }
        Some(entry)
    }
}

impl SearchResultCache {
    /// Create a cache from the given configuration.
    pub fn new(config: &SearchCacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            config: config.clone(),
        }
    }

    /// Look up the cached stubs for a key.
    ///
    /// Returns `None` on miss. An entry older than the TTL counts as a
    /// miss and is removed on the spot. Hits return a shallow copy — the
    /// stubs themselves are shared with the entry (see
    /// [`SharedSummary`]).
    pub fn get(&self, key: &SearchKey) -> Option<Vec<SharedSummary>> {
        let mut inner = self.inner.lock().unwrap();

        let expired = match inner.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() > self.config.ttl,
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "search").increment(1);
                return None;
            }
        };

        if expired {
            if let Some(entry) = inner.remove(key) {
                debug!(query = %entry.query, "expired search cache entry");
                metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL,
                    "cache" => "search", "reason" => "ttl")
                .increment(1);
            }
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "search").increment(1);
            return None;
        }

        metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "search").increment(1);
        inner.entries.get(key).map(|entry| entry.results.clone())
    }

    /// Insert a search response, replacing any previous entry under the
    /// same key and evicting the oldest-inserted entry past capacity.
    pub fn put(
        &self,
        key: SearchKey,
        query: &str,
        allergens: &[String],
        results: Vec<SharedSummary>,
    ) {
        let mut inner = self.inner.lock().unwrap();

        let entry = CacheEntry {
            query: query.trim().to_lowercase(),
            allergens: allergens.to_vec(),
            results,
            inserted_at: Instant::now(),
        };
        if inner.entries.insert(key.clone(), entry).is_none() {
            inner.order.push_back(key);
        }

        while inner.entries.len() > self.config.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if let Some(evicted) = inner.entries.remove(&oldest) {
                debug!(
                    query = %evicted.query,
                    allergens = evicted.allergens.len(),
                    "evicted oldest search cache entry"
                );
                metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL,
                    "cache" => "search", "reason" => "capacity")
                .increment(1);
            }
        }
    }

    /// Remove every entry. Explicit user action (logout, manual reset)
    /// only; TTL expiry on lookup is the sole automatic trigger.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Remove every expired entry. Periodic maintenance aid; lazy expiry
    /// on `get` keeps the cache correct without it.
    pub fn clear_expired(&self) {
        let mut inner = self.inner.lock().unwrap();
        let ttl = self.config.ttl;
        let expired: Vec<SearchKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.inserted_at.elapsed() > ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            inner.remove(key);
            metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL,
                "cache" => "search", "reason" => "ttl")
            .increment(1);
        }
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
