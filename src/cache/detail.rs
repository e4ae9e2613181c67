//! Capacity-bounded cache of full recipe detail.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::telemetry;
use crate::types::RecipeDetail;

/// Default maximum number of cached recipes.
const DEFAULT_CAPACITY: usize = 50;

/// Configuration for the recipe detail cache.
#[derive(Debug, Clone)]
pub struct DetailCacheConfig {
    /// Maximum number of cached recipes. Default: 50.
    pub capacity: usize,
}

impl Default for DetailCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DetailCacheConfig {
    /// Create a new config with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached recipes.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }
}

/// In-memory store of full recipe detail, keyed on recipe id.
///
/// No TTL — detail data changes rarely relative to session length.
/// Eviction is capacity-only and strictly oldest-inserted-first, the same
/// policy as [`SearchResultCache`](crate::cache::SearchResultCache).
pub struct RecipeDetailCache {
    inner: Mutex<Inner>,
    config: DetailCacheConfig,
}

struct Inner {
    entries: HashMap<String, RecipeDetail>,
    order: VecDeque<String>,
}

impl RecipeDetailCache {
    /// Create a cache from the given configuration.
    pub fn new(config: &DetailCacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            config: config.clone(),
        }
    }

    /// Look up cached detail for a recipe.
    ///
    /// Returns `None` on cache miss.
    pub fn get(&self, recipe_id: &str) -> Option<RecipeDetail> {
        let inner = self.inner.lock().unwrap();
        match inner.entries.get(recipe_id) {
            Some(detail) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "detail").increment(1);
                Some(detail.clone())
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "detail").increment(1);
                None
            }
        }
    }

    /// Insert (or overwrite) detail, keyed on `detail.recipe_id`.
    pub fn put(&self, detail: RecipeDetail) {
        let mut inner = self.inner.lock().unwrap();

        let recipe_id = detail.recipe_id.clone();
        if inner.entries.insert(recipe_id.clone(), detail).is_none() {
            inner.order.push_back(recipe_id);
        }

        while inner.entries.len() > self.config.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL,
                "cache" => "detail", "reason" => "capacity")
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

    /// Evict all entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
    }
}
