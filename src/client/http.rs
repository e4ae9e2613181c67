//! HTTP client for the RecipeWrangler REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::telemetry;
use crate::traits::RecipeService;
use crate::types::{
    ApiPayload, RecipeDetail, RecipeSummary, SearchFilters, SearchPayload, SearchRequest,
};
use crate::{Result, WranglerError};

/// Path prefix of the RecipeWrangler service on the shared API host.
const BASE_PATH: &str = "/recipewrangler";

/// Default timeout for detail requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for search requests. Search runs through the service's
/// language pipeline and can be slow.
const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the RecipeWrangler REST API.
///
/// Responses may arrive bare or wrapped in a `{ help, success, result }`
/// envelope; unwrapping happens here, at the boundary, so nothing above
/// this layer sees the envelope (see [`ApiPayload`]).
///
/// ```rust,no_run
/// # use recipewrangler::client::RecipeApiClient;
/// let client = RecipeApiClient::new("https://api.wisefood.example")
///     .bearer_token("session-token");
/// ```
#[derive(Clone)]
pub struct RecipeApiClient {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
    detail_timeout: Duration,
    search_timeout: Duration,
}

impl RecipeApiClient {
    /// Create a client for the given API host (scheme + authority, no
    /// trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
            detail_timeout: DEFAULT_TIMEOUT,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    /// Send `Authorization: Bearer …` with every request.
    ///
    /// Token lifecycle (refresh, logout) belongs to the identity-provider
    /// client; this client only attaches whatever it was given.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the timeout for detail requests (default: 30 s).
    pub fn detail_timeout(mut self, timeout: Duration) -> Self {
        self.detail_timeout = timeout;
        self
    }

    /// Set the timeout for search requests (default: 60 s).
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, BASE_PATH, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn map_transport_error(&self, error: reqwest::Error, timeout: Duration) -> WranglerError {
        if error.is_timeout() {
            WranglerError::Timeout { after: timeout }
        } else {
            WranglerError::Http(error.to_string())
        }
    }

    fn handle_response_errors(
        &self,
        response: &reqwest::Response,
        recipe_id: Option<&str>,
        timeout: Duration,
    ) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(WranglerError::AuthenticationFailed),
            404 => match recipe_id {
                Some(id) => Err(WranglerError::RecipeNotFound(id.to_string())),
                None => Err(WranglerError::Api {
                    status: 404,
                    message: "RecipeWrangler endpoint not found".to_string(),
                }),
            },
            408 => Err(WranglerError::Timeout { after: timeout }),
            429 => {
                // Try to parse retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(WranglerError::RateLimited { retry_after })
            }
            code => Err(WranglerError::Api {
                status: code,
                message: format!("RecipeWrangler API error: {status}"),
            }),
        }
    }

    async fn post_search<B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Vec<RecipeSummary>> {
        let started = std::time::Instant::now();
        let result = self.post_search_inner(path, body).await;
        record_request(endpoint, started, result.is_ok());
        result
    }

    async fn post_search_inner<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<RecipeSummary>> {
        let request = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .timeout(self.search_timeout);

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, self.search_timeout))?;

        self.handle_response_errors(&response, None, self.search_timeout)?;

        let payload: ApiPayload<SearchPayload> = response
            .json()
            .await
            .map_err(|e| WranglerError::Http(e.to_string()))?;

        Ok(payload.into_inner().into_results())
    }

    async fn fetch_recipe_inner(&self, recipe_id: &str) -> Result<RecipeDetail> {
        if recipe_id.trim().is_empty() {
            return Err(WranglerError::InvalidInput(
                "recipe id must not be empty".to_string(),
            ));
        }

        let request = self
            .authorize(self.http.get(self.url(&format!("/recipes/{recipe_id}"))))
            .timeout(self.detail_timeout);

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, self.detail_timeout))?;

        self.handle_response_errors(&response, Some(recipe_id), self.detail_timeout)?;

        let payload: ApiPayload<RecipeDetail> = response
            .json()
            .await
            .map_err(|e| WranglerError::Http(e.to_string()))?;

        Ok(payload.into_inner())
    }
}

#[async_trait]
impl RecipeService for RecipeApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RecipeSummary>> {
        self.post_search("search", "/recipes/search", request).await
    }

    async fn search_filtered(&self, filters: &SearchFilters) -> Result<Vec<RecipeSummary>> {
        self.post_search("search_filtered", "/recipes/search/filtered", filters)
            .await
    }

    async fn fetch_recipe(&self, recipe_id: &str) -> Result<RecipeDetail> {
        let started = std::time::Instant::now();
        let result = self.fetch_recipe_inner(recipe_id).await;
        record_request("detail", started, result.is_ok());
        result
    }
}

fn record_request(endpoint: &'static str, started: std::time::Instant, ok: bool) {
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "endpoint" => endpoint,
        "status" => if ok { "ok" } else { "error" },
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
        .record(started.elapsed().as_secs_f64());
}
