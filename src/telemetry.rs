//! Telemetry metric name constants.
//!
//! Centralised metric names for recipewrangler operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `recipewrangler_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint` — remote endpoint invoked ("search", "search_filtered", "detail")
//! - `status` — outcome: "ok" or "error"
//! - `cache` — which cache ("search" | "detail")
//! - `reason` — eviction cause ("ttl" | "capacity")
//! - `outcome` — per-stub hydration result ("fetched" | "cached" | "no_image" | "failed")

/// Total requests dispatched to the remote service.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "recipewrangler_requests_total";

/// Request duration in seconds.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "recipewrangler_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `endpoint`.
pub const RETRIES_TOTAL: &str = "recipewrangler_retries_total";

/// Total cache hits.
///
/// Labels: `cache`.
pub const CACHE_HITS_TOTAL: &str = "recipewrangler_cache_hits_total";

/// Total cache misses.
///
/// Labels: `cache`.
pub const CACHE_MISSES_TOTAL: &str = "recipewrangler_cache_misses_total";

/// Total entries evicted from a cache.
///
/// Labels: `cache`, `reason` ("ttl" | "capacity").
pub const CACHE_EVICTIONS_TOTAL: &str = "recipewrangler_cache_evictions_total";

/// Total hydration batches run to completion.
pub const HYDRATION_BATCHES_TOTAL: &str = "recipewrangler_hydration_batches_total";

/// Total stubs processed by the hydrator.
///
/// Labels: `outcome` ("fetched" | "cached" | "no_image" | "failed").
pub const HYDRATION_STUBS_TOTAL: &str = "recipewrangler_hydration_stubs_total";
