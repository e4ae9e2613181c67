//! Core RecipeService trait

use async_trait::async_trait;

use crate::types::{RecipeDetail, RecipeSummary, SearchFilters, SearchRequest};
use crate::Result;

/// The remote recipe service, seen from the client side.
///
/// Implemented by the HTTP client and by the retry decorator that wraps
/// it; test code supplies fakes. Callers interact with the service through
/// [`RecipeWrangler`](crate::RecipeWrangler), which layers the caches and
/// hydration on top.
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Free-text search returning lightweight result stubs.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RecipeSummary>>;

    /// Parameterized search over a structured filter bundle; same stub
    /// list shape as [`search`](Self::search).
    async fn search_filtered(&self, filters: &SearchFilters) -> Result<Vec<RecipeSummary>>;

    /// Fetch the full detail record for one recipe.
    async fn fetch_recipe(&self, recipe_id: &str) -> Result<RecipeDetail>;
}
