//! Retry configuration, delay calculation, and the retrying decorator.
//!
//! [`RetryConfig`] controls retry behaviour; [`RetryingRecipeService`]
//! wraps a [`RecipeService`] with automatic retry on transient errors.
//! All retried methods delegate to the shared `with_retry()` helper,
//! keeping retry logic in a single place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::telemetry;
use crate::traits::RecipeService;
use crate::types::{RecipeDetail, RecipeSummary, SearchFilters, SearchRequest};
use crate::{Result, WranglerError};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff and respects server `retry_after` hints.
///
/// ```rust
/// # use recipewrangler::client::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `initial_delay * 2^attempt`, capped at
    /// `max_delay`. See [`effective_delay()`](Self::effective_delay) for
    /// the full calculation including server hints.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the effective delay, respecting server `retry_after` hints.
    ///
    /// If a `retry_after` duration is provided (from a `RateLimited`
    /// error), it takes precedence over the calculated backoff.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

/// Execute an async operation with retry logic.
///
/// Retries on transient errors (as classified by
/// [`WranglerError::is_transient()`]) up to `config.max_attempts`, using
/// exponential backoff and respecting `retry_after` hints from
/// `RateLimited` errors. Permanent errors are returned immediately.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    endpoint: &'static str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..config.max_attempts {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                metrics::counter!(telemetry::RETRIES_TOTAL, "endpoint" => endpoint).increment(1);
                if attempt + 1 < config.max_attempts {
                    let delay = config.effective_delay(attempt, e.retry_after());
                    warn!(
                        endpoint,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e), // permanent error, no retry
        }
    }
    Err(last_err.unwrap_or_else(|| WranglerError::Configuration("zero retry attempts".into())))
}

/// Decorator that wraps a [`RecipeService`] with retry logic.
///
/// On transient errors (rate limits, timeouts, transport failures, 5xx),
/// retries with exponential backoff up to `config.max_attempts`.
/// Non-transient errors are returned immediately.
pub struct RetryingRecipeService {
    inner: Arc<dyn RecipeService>,
    config: RetryConfig,
}

impl RetryingRecipeService {
    /// Wrap a recipe service with retry logic.
    pub fn new(inner: Arc<dyn RecipeService>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl RecipeService for RetryingRecipeService {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RecipeSummary>> {
        with_retry(&self.config, "search", || self.inner.search(request)).await
    }

    async fn search_filtered(&self, filters: &SearchFilters) -> Result<Vec<RecipeSummary>> {
        with_retry(&self.config, "search_filtered", || {
            self.inner.search_filtered(filters)
        })
        .await
    }

    async fn fetch_recipe(&self, recipe_id: &str) -> Result<RecipeDetail> {
        with_retry(&self.config, "detail", || self.inner.fetch_recipe(recipe_id)).await
    }
}
