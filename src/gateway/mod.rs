//! The gateway that ties service, caches, and hydration together.

mod builder;

pub use builder::RecipeWranglerBuilder;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::cache::{RecipeDetailCache, SearchKey, SearchResultCache};
use crate::hydrate::{HydrationHandle, ImageHydrator};
use crate::traits::RecipeService;
use crate::types::{RecipeDetail, SearchFilters, SearchRequest, SharedSummary};
use crate::Result;

/// Result of one gateway search.
pub struct SearchOutcome {
    /// The stub list. Shared with the cache entry holding the same search
    /// response, so hydrated images show up in later cache hits too.
    pub results: Vec<SharedSummary>,
    /// Whether the stubs came from the cache (no network call was made).
    pub from_cache: bool,
    /// Handle to the background hydration batch. Present on cache misses
    /// only; hits were hydrated (or not) when first fetched. Dropping it
    /// is fine — hydration is fire-and-forget unless awaited.
    pub hydration: Option<HydrationHandle>,
}

/// Client-side gateway for the RecipeWrangler service.
///
/// Layers a TTL search cache, a detail cache, and background image
/// hydration over a [`RecipeService`]. One gateway per session; both
/// caches live inside it and reset with it.
///
/// ```rust,no_run
/// use recipewrangler::RecipeWrangler;
///
/// # async fn run() -> recipewrangler::Result<()> {
/// let wrangler = RecipeWrangler::builder()
///     .base_url("https://api.wisefood.example")
///     .bearer_token("session-token")
///     .build()?;
///
/// let outcome = wrangler.search("chickpea recipes", &[]).await?;
/// for stub in &outcome.results {
///     println!("{}", stub.snapshot().title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RecipeWrangler {
    service: Arc<dyn RecipeService>,
    search_cache: SearchResultCache,
    details: Arc<RecipeDetailCache>,
    hydrator: ImageHydrator,
}

impl RecipeWrangler {
    /// Create a new builder for configuring a gateway.
    pub fn builder() -> RecipeWranglerBuilder {
        RecipeWranglerBuilder::new()
    }

    pub(crate) fn new(
        service: Arc<dyn RecipeService>,
        search_cache: SearchResultCache,
        details: Arc<RecipeDetailCache>,
        hydrator: ImageHydrator,
    ) -> Self {
        Self {
            service,
            search_cache,
            details,
            hydrator,
        }
    }

    /// Free-text search with cache consultation.
    ///
    /// On a cache hit the stored stubs come back immediately, with no
    /// network call and no new hydration. On a miss the remote search
    /// runs, its results are cached, and a hydration batch is spawned for
    /// stubs lacking an image. A failed search propagates and caches
    /// nothing.
    pub async fn search(
        &self,
        query: &str,
        exclude_allergens: &[String],
    ) -> Result<SearchOutcome> {
        let key = SearchKey::free_text(query, exclude_allergens);
        if let Some(results) = self.search_cache.get(&key) {
            debug!(query, "search served from cache");
            return Ok(SearchOutcome {
                results,
                from_cache: true,
                hydration: None,
            });
        }

        let request = SearchRequest::new(query).exclude_allergens(exclude_allergens.to_vec());
        let fetched = self.service.search(&request).await?;
        debug!(query, results = fetched.len(), "search served from service");

        let results: Vec<SharedSummary> =
            fetched.into_iter().map(SharedSummary::new).collect();
        self.search_cache
            .put(key, query, exclude_allergens, results.clone());

        let hydration = self.hydrator.spawn(&results);
        Ok(SearchOutcome {
            results,
            from_cache: false,
            hydration: Some(hydration),
        })
    }

    /// Parameterized search, same cache-then-network flow as
    /// [`search`](Self::search) under a filter-derived key.
    pub async fn search_filtered(&self, filters: &SearchFilters) -> Result<SearchOutcome> {
        let key = SearchKey::filtered(filters);
        if let Some(results) = self.search_cache.get(&key) {
            debug!("filtered search served from cache");
            return Ok(SearchOutcome {
                results,
                from_cache: true,
                hydration: None,
            });
        }

        let fetched = self.service.search_filtered(filters).await?;
        debug!(results = fetched.len(), "filtered search served from service");

        let results: Vec<SharedSummary> =
            fetched.into_iter().map(SharedSummary::new).collect();
        self.search_cache
            .put(key, "", &filters.exclude_allergens, results.clone());

        let hydration = self.hydrator.spawn(&results);
        Ok(SearchOutcome {
            results,
            from_cache: false,
            hydration: Some(hydration),
        })
    }

    /// Search within a category (e.g. "pasta", "salad", "soup").
    pub async fn search_by_category(
        &self,
        category: &str,
        exclude_allergens: &[String],
    ) -> Result<SearchOutcome> {
        self.search(&format!("{category} recipes"), exclude_allergens)
            .await
    }

    /// Search by main ingredient.
    pub async fn search_with_ingredient(
        &self,
        ingredient: &str,
        exclude_allergens: &[String],
    ) -> Result<SearchOutcome> {
        self.search(&format!("recipes with {ingredient}"), exclude_allergens)
            .await
    }

    /// Quick recipes under the given duration in minutes.
    pub async fn quick_recipes(
        &self,
        max_duration: u32,
        exclude_allergens: &[String],
    ) -> Result<SearchOutcome> {
        self.search(
            &format!("quick recipes under {max_duration} minutes"),
            exclude_allergens,
        )
        .await
    }

    /// Fetch full detail for one recipe, memoized through the detail cache.
    pub async fn recipe(&self, recipe_id: &str) -> Result<RecipeDetail> {
        if let Some(detail) = self.details.get(recipe_id) {
            debug!(recipe_id, "recipe detail served from cache");
            return Ok(detail);
        }

        let detail = self.service.fetch_recipe(recipe_id).await?;
        self.details.put(detail.clone());
        Ok(detail)
    }

    /// Generation counter bumped after each completed hydration batch.
    ///
    /// See [`ImageHydrator::changes()`].
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.hydrator.changes()
    }

    /// Empty both caches. Explicit user action (logout, manual reset).
    pub fn clear_caches(&self) {
        self.search_cache.clear();
        self.details.clear();
    }

    /// Drop expired search cache entries. Periodic maintenance aid.
    pub fn clear_expired(&self) {
        self.search_cache.clear_expired();
    }

    /// Number of cached searches.
    pub fn cached_searches(&self) -> usize {
        self.search_cache.len()
    }

    /// Number of cached recipe details.
    pub fn cached_recipes(&self) -> usize {
        self.details.len()
    }
}
