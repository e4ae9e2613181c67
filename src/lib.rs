//! Recipewrangler - client-side search gateway for the RecipeWrangler API
//!
//! This crate wraps the RecipeWrangler recipe/nutrition REST service with
//! an in-process search-result cache (TTL + FIFO eviction), a recipe
//! detail cache, and bounded-concurrency background hydration of missing
//! preview images. Repeated searches within the cache window cost nothing;
//! fresh searches return as soon as the service answers, with images
//! filled in behind the caller's back.
//!
//! # Search Example
//!
//! ```rust,no_run
//! use recipewrangler::RecipeWrangler;
//!
//! #[tokio::main]
//! async fn main() -> recipewrangler::Result<()> {
//!     let wrangler = RecipeWrangler::builder()
//!         .base_url("https://api.wisefood.example")
//!         .bearer_token("session-token")
//!         .build()?;
//!
//!     let allergens = vec!["peanuts".to_string()];
//!     let outcome = wrangler.search("chickpea recipes", &allergens).await?;
//!     for stub in &outcome.results {
//!         println!("{}", stub.snapshot().title);
//!     }
//!
//!     // Same search again: served from the cache, no network call.
//!     let cached = wrangler.search("chickpea recipes", &allergens).await?;
//!     assert!(cached.from_cache);
//!     Ok(())
//! }
//! ```
//!
//! # Hydration
//!
//! A cache-miss search spawns a background batch that backfills missing
//! preview images from recipe detail (at most 20 stubs per batch, at most
//! 4 fetches in flight). The batch is fire-and-forget; await the handle
//! when completion matters:
//!
//! ```rust,no_run
//! # async fn run(wrangler: recipewrangler::RecipeWrangler) -> recipewrangler::Result<()> {
//! let outcome = wrangler.search("pasta", &[]).await?;
//! if let Some(hydration) = outcome.hydration {
//!     let report = hydration.wait().await;
//!     println!("{} images filled", report.hydrated + report.from_cache);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod gateway;
pub mod hydrate;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use error::{Result, WranglerError};
pub use gateway::{RecipeWrangler, RecipeWranglerBuilder, SearchOutcome};
pub use traits::RecipeService;

// Re-export cache and hydration surfaces
pub use cache::{
    DetailCacheConfig, RecipeDetailCache, SearchCacheConfig, SearchKey, SearchResultCache,
};
pub use client::{RecipeApiClient, RetryConfig, RetryingRecipeService};
pub use hydrate::{HydrationHandle, HydrationReport, HydratorConfig, ImageHydrator};

// Re-export all types
pub use types::{
    ApiEnvelope, ApiPayload, NutritionFacts, RecipeDetail, RecipeIngredient, RecipeSummary,
    SearchFilters, SearchPayload, SearchRequest, SharedSummary,
};
