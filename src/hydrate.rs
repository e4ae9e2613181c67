//! Background image hydration for search results.
//!
//! Search returns lightweight stubs whose preview image is often absent;
//! [`ImageHydrator`] backfills it from full recipe detail after the search
//! has already been returned to the caller.
//!
//! # Worker model
//!
//! One batch runs as a single spawned task driving `min(max_concurrent, n)`
//! worker futures over a shared atomic cursor — a pull-based work queue, so
//! fast fetches claim more items than slow ones. All workers live inside
//! the one task and are joined there, which gives three properties:
//!
//! - in-flight detail fetches never exceed the worker count,
//! - the change signal fires only after every worker has settled, and
//! - aborting the [`HydrationHandle`] cancels every in-flight fetch.
//!
//! # Failure semantics
//!
//! Hydration is best-effort. A failed detail fetch is debug-logged and
//! counted; the stub keeps its placeholder image and the batch carries on.
//! Nothing is retried within a batch and nothing propagates to the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::RecipeDetailCache;
use crate::telemetry;
use crate::traits::RecipeService;
use crate::types::SharedSummary;

/// Default maximum stubs hydrated per batch.
const DEFAULT_MAX_PER_BATCH: usize = 20;

/// Default maximum detail fetches in flight.
///
/// 4 keeps a post-search hydration burst from saturating the backend or
/// the host's connection pool.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for image hydration.
#[derive(Debug, Clone)]
pub struct HydratorConfig {
    /// Maximum stubs hydrated per batch. Default: 20.
    pub max_per_batch: usize,
    /// Maximum detail fetches in flight. Default: 4.
    pub max_concurrent: usize,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            max_per_batch: DEFAULT_MAX_PER_BATCH,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl HydratorConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum stubs hydrated per batch.
    pub fn max_per_batch(mut self, n: usize) -> Self {
        self.max_per_batch = n;
        self
    }

    /// Set the maximum detail fetches in flight.
    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

/// Outcome of one hydration batch.
///
/// `selected - hydrated - from_cache - failed` stubs fetched successfully
/// but had no image upstream either; they keep their placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Stubs selected for hydration (missing an image, within the batch cap).
    pub selected: usize,
    /// Images filled from a fresh detail fetch.
    pub hydrated: usize,
    /// Images filled from the detail cache without a network call.
    pub from_cache: usize,
    /// Detail fetches that failed; the stub keeps its placeholder.
    pub failed: usize,
}

/// Handle to one in-flight hydration batch.
///
/// Dropping the handle detaches the batch (fire-and-forget, the default
/// flow); awaiting it makes completion deterministic for tests and
/// snapshotting; aborting it cancels every in-flight detail fetch, for
/// teardown paths that should not keep the connection pool busy.
pub struct HydrationHandle {
    task: JoinHandle<HydrationReport>,
}

impl HydrationHandle {
    /// Wait for the batch to settle and return its report.
    ///
    /// An aborted batch reports nothing done.
    pub async fn wait(self) -> HydrationReport {
        self.task.await.unwrap_or_default()
    }

    /// Cancel the batch, including any in-flight detail fetches.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Whether the batch has settled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Fills missing preview images on search result stubs, in the background.
pub struct ImageHydrator {
    service: Arc<dyn RecipeService>,
    details: Arc<RecipeDetailCache>,
    changed: watch::Sender<u64>,
    config: HydratorConfig,
}

impl ImageHydrator {
    /// Create a hydrator backed by the given service and detail cache.
    pub fn new(
        service: Arc<dyn RecipeService>,
        details: Arc<RecipeDetailCache>,
        config: HydratorConfig,
    ) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            service,
            details,
            changed,
            config,
        }
    }

    /// Generation counter bumped after each completed batch.
    ///
    /// Stubs are mutated in place through shared handles, so observers
    /// holding a result list by reference watch this channel to learn the
    /// list's contents changed underneath them.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    /// Spawn a hydration batch for the given result list.
    ///
    /// Selects up to `max_per_batch` stubs lacking an image, preserving
    /// original order, and processes them with at most `max_concurrent`
    /// detail fetches in flight. Returns immediately; see
    /// [`HydrationHandle`] for await/abort semantics. An empty selection
    /// is a no-op (no change signal).
    pub fn spawn(&self, results: &[SharedSummary]) -> HydrationHandle {
        self.spawn_limited(results, self.config.max_per_batch)
    }

    /// Same as [`spawn`](Self::spawn) with an explicit per-batch cap
    /// overriding the configured `max_per_batch`.
    pub fn spawn_limited(
        &self,
        results: &[SharedSummary],
        max_to_hydrate: usize,
    ) -> HydrationHandle {
        let batch: Vec<SharedSummary> = results
            .iter()
            .filter(|stub| !stub.has_image())
            .take(max_to_hydrate)
            .cloned()
            .collect();

        let service = Arc::clone(&self.service);
        let details = Arc::clone(&self.details);
        let changed = self.changed.clone();
        let worker_count = self.config.max_concurrent.min(batch.len());

        let task = tokio::spawn(async move {
            if batch.is_empty() {
                return HydrationReport::default();
            }

            let report = run_batch(service.as_ref(), &details, &batch, worker_count).await;
            debug!(
                selected = report.selected,
                hydrated = report.hydrated,
                from_cache = report.from_cache,
                failed = report.failed,
                "hydration batch settled"
            );
            metrics::counter!(telemetry::HYDRATION_BATCHES_TOTAL).increment(1);
            // Workers mutated the stubs in place; tell observers the list
            // they hold by reference has new contents.
            changed.send_modify(|generation| *generation += 1);
            report
        });

        HydrationHandle { task }
    }
}

/// Per-stub hydration result.
enum HydrationOutcome {
    /// Image filled from a fresh detail fetch.
    Fetched,
    /// Image filled from the detail cache, no network call.
    FromCache,
    /// Detail fetched fine but carries no image.
    NoImage,
    /// Detail fetch failed; swallowed.
    Failed,
}

async fn run_batch(
    service: &dyn RecipeService,
    details: &RecipeDetailCache,
    batch: &[SharedSummary],
    worker_count: usize,
) -> HydrationReport {
    let cursor = AtomicUsize::new(0);
    let hydrated = AtomicUsize::new(0);
    let from_cache = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let workers = (0..worker_count).map(|_| {
        let cursor = &cursor;
        let hydrated = &hydrated;
        let from_cache = &from_cache;
        let failed = &failed;
        async move {
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(stub) = batch.get(index) else { break };
                let outcome = hydrate_one(service, details, stub).await;
                let label = match outcome {
                    HydrationOutcome::Fetched => {
                        hydrated.fetch_add(1, Ordering::Relaxed);
                        "fetched"
                    }
                    HydrationOutcome::FromCache => {
                        from_cache.fetch_add(1, Ordering::Relaxed);
                        "cached"
                    }
                    HydrationOutcome::NoImage => "no_image",
                    HydrationOutcome::Failed => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        "failed"
                    }
                };
                metrics::counter!(telemetry::HYDRATION_STUBS_TOTAL, "outcome" => label)
                    .increment(1);
            }
        }
    });
    join_all(workers).await;

    HydrationReport {
        selected: batch.len(),
        hydrated: hydrated.load(Ordering::Relaxed),
        from_cache: from_cache.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    }
}

async fn hydrate_one(
    service: &dyn RecipeService,
    details: &RecipeDetailCache,
    stub: &SharedSummary,
) -> HydrationOutcome {
    let recipe_id = stub.recipe_id();

    // A cached detail only settles the stub if its image is confirmed;
    // a cached detail without one goes back to the network.
    if let Some(detail) = details.get(&recipe_id)
        && let Some(image) = detail.image_url
    {
        stub.set_image_url(image);
        return HydrationOutcome::FromCache;
    }

    match service.fetch_recipe(&recipe_id).await {
        Ok(detail) => {
            let image = detail.image_url.clone();
            details.put(detail);
            match image {
                Some(url) => {
                    stub.set_image_url(url);
                    HydrationOutcome::Fetched
                }
                None => HydrationOutcome::NoImage,
            }
        }
        Err(error) => {
            debug!(recipe_id = %recipe_id, error = %error, "hydration fetch failed");
            HydrationOutcome::Failed
        }
    }
}
