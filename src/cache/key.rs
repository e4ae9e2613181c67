//! Search cache key construction.
//!
//! A [`SearchKey`] is a canonical string derived from the search inputs, so
//! that logically-equivalent searches (query casing or outer whitespace,
//! allergen order or duplicates) land on the same cache entry. Construction
//! is a pure function of its inputs.
//!
//! Keys are built by serializing a tagged shape rather than joining parts
//! with a delimiter: `query="a,b"` with no allergens and `query="a"` with
//! allergens `["b"]` must not collide, and free-text keys must never
//! collide with filtered-search keys.

use serde::Serialize;

use crate::types::SearchFilters;

/// Canonical cache key for one search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey(String);

/// Serialized key shape. The `kind` tag keeps free-text and filtered
/// key spaces disjoint.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum KeyParts {
    Text {
        query: String,
        allergens: Vec<String>,
    },
    Filtered {
        include: Vec<String>,
        exclude: Vec<String>,
        diets: Vec<String>,
        allergens: Vec<String>,
        max_duration: Option<u32>,
        limit: Option<u32>,
    },
}

impl SearchKey {
    /// Key for a free-text search.
    ///
    /// Query is lower-cased and trimmed; internal whitespace is preserved,
    /// so queries differing only in internal spacing map to distinct keys.
    pub fn free_text(query: &str, exclude_allergens: &[String]) -> Self {
        Self::from_parts(&KeyParts::Text {
            query: query.trim().to_lowercase(),
            allergens: normalize_set(exclude_allergens),
        })
    }

    /// Key for a parameterized search.
    pub fn filtered(filters: &SearchFilters) -> Self {
        Self::from_parts(&KeyParts::Filtered {
            include: normalize_set(&filters.include_ingredients),
            exclude: normalize_set(&filters.exclude_ingredients),
            diets: normalize_set(&filters.diet_tags),
            allergens: normalize_set(&filters.exclude_allergens),
            max_duration: filters.max_duration,
            limit: filters.limit,
        })
    }

    fn from_parts(parts: &KeyParts) -> Self {
        let key = serde_json::to_string(parts).expect("key shape serializes infallibly");
        SearchKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim labels, drop empties, sort ascending, drop duplicates.
fn normalize_set(labels: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = labels
        .iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}
