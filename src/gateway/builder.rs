//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{DetailCacheConfig, RecipeDetailCache, SearchCacheConfig, SearchResultCache};
use crate::client::{RecipeApiClient, RetryConfig, RetryingRecipeService};
use crate::hydrate::{HydratorConfig, ImageHydrator};
use crate::traits::RecipeService;
use crate::{RecipeWrangler, Result, WranglerError};

/// Builder for configuring gateway instances.
///
/// ```rust,no_run
/// # use recipewrangler::{RecipeWrangler, SearchCacheConfig};
/// # use std::time::Duration;
/// # fn build() -> recipewrangler::Result<RecipeWrangler> {
/// RecipeWrangler::builder()
///     .base_url("https://api.wisefood.example")
///     .bearer_token("session-token")
///     .search_cache(SearchCacheConfig::new().ttl(Duration::from_secs(600)))
///     .build()
/// # }
/// ```
pub struct RecipeWranglerBuilder {
    base_url: Option<String>,
    bearer_token: Option<String>,
    detail_timeout: Option<Duration>,
    search_timeout: Option<Duration>,
    search_cache: SearchCacheConfig,
    detail_cache: DetailCacheConfig,
    hydration: HydratorConfig,
    retry: RetryConfig,
    service: Option<Arc<dyn RecipeService>>,
}

impl RecipeWranglerBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            detail_timeout: None,
            search_timeout: None,
            search_cache: SearchCacheConfig::default(),
            detail_cache: DetailCacheConfig::default(),
            hydration: HydratorConfig::default(),
            retry: RetryConfig::default(),
            service: None,
        }
    }

    /// Set the API host (scheme + authority). Required unless a custom
    /// service is supplied via [`service()`](Self::service).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Send `Authorization: Bearer …` with every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the timeout for detail requests (default: 30 s).
    pub fn detail_timeout(mut self, timeout: Duration) -> Self {
        self.detail_timeout = Some(timeout);
        self
    }

    /// Set the timeout for search requests (default: 60 s).
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    /// Configure the search-result cache (capacity, TTL).
    pub fn search_cache(mut self, config: SearchCacheConfig) -> Self {
        self.search_cache = config;
        self
    }

    /// Configure the recipe detail cache (capacity).
    pub fn detail_cache(mut self, config: DetailCacheConfig) -> Self {
        self.detail_cache = config;
        self
    }

    /// Configure image hydration (batch cap, concurrency bound).
    pub fn hydration(mut self, config: HydratorConfig) -> Self {
        self.hydration = config;
        self
    }

    /// Configure retry behaviour for remote calls.
    /// Use [`RetryConfig::disabled()`] to turn retries off.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Replace the HTTP client with a custom [`RecipeService`]
    /// implementation (a different transport, or a fake in tests). The
    /// retry layer still wraps it unless retries are disabled.
    pub fn service(mut self, service: Arc<dyn RecipeService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Build the gateway.
    ///
    /// Fails with [`WranglerError::Configuration`] if neither a base URL
    /// nor a custom service was supplied.
    pub fn build(self) -> Result<RecipeWrangler> {
        let service: Arc<dyn RecipeService> = match self.service {
            Some(service) => service,
            None => {
                let base_url = self.base_url.ok_or_else(|| {
                    WranglerError::Configuration(
                        "base_url is required without a custom service".to_string(),
                    )
                })?;
                let mut client = RecipeApiClient::new(base_url);
                if let Some(token) = self.bearer_token {
                    client = client.bearer_token(token);
                }
                if let Some(timeout) = self.detail_timeout {
                    client = client.detail_timeout(timeout);
                }
                if let Some(timeout) = self.search_timeout {
                    client = client.search_timeout(timeout);
                }
                Arc::new(client)
            }
        };

        let service: Arc<dyn RecipeService> = if self.retry.max_attempts > 1 {
            Arc::new(RetryingRecipeService::new(service, self.retry))
        } else {
            service
        };

        let details = Arc::new(RecipeDetailCache::new(&self.detail_cache));
        let hydrator = ImageHydrator::new(
            Arc::clone(&service),
            Arc::clone(&details),
            self.hydration,
        );

        Ok(RecipeWrangler::new(
            service,
            SearchResultCache::new(&self.search_cache),
            details,
            hydrator,
        ))
    }
}

impl Default for RecipeWranglerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
