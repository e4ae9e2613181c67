//! Search result stubs and the shared handles hydration mutates.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// A lightweight search result record.
///
/// Everything except `image_url` is immutable after creation; the image is
/// nullable until hydration backfills it from the recipe's full detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Preparation time in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub serves: Option<u32>,
    #[serde(default)]
    pub nutri_score: Option<f32>,
}

impl RecipeSummary {
    /// Wrap the summary in a shared handle.
    pub fn shared(self) -> SharedSummary {
        SharedSummary::new(self)
    }
}

/// Shared handle to one search result stub.
///
/// The live result list and any search-cache entry holding the same search
/// response share clones of the same handle, so an image filled by the
/// hydrator is visible through every copy. Lookups hand out shallow copies
/// (new `Vec`s of handle clones), never deep copies — stubs are treated as
/// append-only after creation, which is the contract that makes the shallow
/// copy safe.
#[derive(Debug, Clone)]
pub struct SharedSummary(Arc<Mutex<RecipeSummary>>);

impl SharedSummary {
    pub fn new(summary: RecipeSummary) -> Self {
        Self(Arc::new(Mutex::new(summary)))
    }

    /// Owned copy of the stub's current state.
    pub fn snapshot(&self) -> RecipeSummary {
        self.0.lock().unwrap().clone()
    }

    pub fn recipe_id(&self) -> String {
        self.0.lock().unwrap().recipe_id.clone()
    }

    pub fn image_url(&self) -> Option<String> {
        self.0.lock().unwrap().image_url.clone()
    }

    pub fn has_image(&self) -> bool {
        self.0.lock().unwrap().image_url.is_some()
    }

    /// Fill the image field in place. Hydration only; external code never
    /// mutates stubs directly.
    pub(crate) fn set_image_url(&self, url: String) {
        self.0.lock().unwrap().image_url = Some(url);
    }
}

impl From<RecipeSummary> for SharedSummary {
    fn from(summary: RecipeSummary) -> Self {
        Self::new(summary)
    }
}
