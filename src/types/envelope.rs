//! Response envelope unwrapping.
//!
//! The RecipeWrangler service answers either with a bare payload or with a
//! `{ help, success, result }` envelope, and search payloads may be a bare
//! array or a `{ results: [...] }` object. Rather than scattering
//! has-field checks through cache and gateway logic, both shapes are
//! modeled here as untagged enums with one explicit unwrapping step at the
//! service boundary.

use serde::Deserialize;

use super::RecipeSummary;

/// The `{ help, success, result }` wrapper some deployments emit.
///
/// `success` mirrors the HTTP status and is parsed but not consulted; the
/// service signals failure via status codes.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    pub result: T,
}

/// A response body that may or may not be enveloped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiPayload<T> {
    Enveloped(ApiEnvelope<T>),
    Bare(T),
}

impl<T> ApiPayload<T> {
    /// Unwrap to the inner payload, discarding the envelope if present.
    pub fn into_inner(self) -> T {
        match self {
            ApiPayload::Enveloped(envelope) => envelope.result,
            ApiPayload::Bare(inner) => inner,
        }
    }
}

/// A search payload: either a bare stub array or `{ results: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchPayload {
    Wrapped {
        #[serde(default)]
        results: Vec<RecipeSummary>,
    },
    Bare(Vec<RecipeSummary>),
}

impl SearchPayload {
    /// Unwrap to the stub list.
    pub fn into_results(self) -> Vec<RecipeSummary> {
        match self {
            SearchPayload::Wrapped { results } => results,
            SearchPayload::Bare(results) => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_decodes() {
        let json = r#"[{"recipe_id": "r1", "title": "Soup", "image_url": null}]"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        let results = payload.into_inner().into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe_id, "r1");
    }

    #[test]
    fn results_object_decodes() {
        let json = r#"{"results": [{"recipe_id": "r1", "title": "Soup"}]}"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_inner().into_results().len(), 1);
    }

    #[test]
    fn full_envelope_decodes() {
        let json = r#"{
            "help": "https://example.test/docs",
            "success": true,
            "result": {"results": [{"recipe_id": "r1", "title": "Soup"}]}
        }"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_inner().into_results().len(), 1);
    }

    #[test]
    fn enveloped_bare_array_decodes() {
        let json = r#"{"success": true, "result": [{"recipe_id": "r1", "title": "Soup"}]}"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_inner().into_results().len(), 1);
    }

    #[test]
    fn empty_results_object_decodes() {
        let json = r#"{"results": []}"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        assert!(payload.into_inner().into_results().is_empty());
    }

    #[test]
    fn optional_stub_fields_default() {
        let json = r#"[{"recipe_id": "r1", "title": "Soup"}]"#;
        let payload: ApiPayload<SearchPayload> = serde_json::from_str(json).unwrap();
        let results = payload.into_inner().into_results();
        assert!(results[0].image_url.is_none());
        assert!(results[0].duration.is_none());
        assert!(results[0].serves.is_none());
        assert!(results[0].nutri_score.is_none());
    }
}
