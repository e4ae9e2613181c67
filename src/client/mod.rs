//! Service client implementations.
//!
//! [`RecipeApiClient`] talks to the RecipeWrangler REST API over HTTP;
//! [`RetryingRecipeService`] wraps any [`RecipeService`](crate::RecipeService)
//! with retry on transient errors. The gateway builder stacks the two by
//! default.

mod http;
mod retry;

pub use http::RecipeApiClient;
pub use retry::{RetryConfig, RetryingRecipeService};
