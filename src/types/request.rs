//! Search request bodies.

use serde::Serialize;

/// Free-text search request.
///
/// ```rust
/// # use recipewrangler::SearchRequest;
/// let request = SearchRequest::new("chickpea recipes")
///     .exclude_allergens(["peanuts"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Natural language query, passed through verbatim.
    pub question: String,
    /// Allergen labels to exclude from results.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_allergens: Vec<String>,
}

impl SearchRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            exclude_allergens: Vec::new(),
        }
    }

    /// Set the allergen labels to exclude.
    pub fn exclude_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_allergens = allergens.into_iter().map(Into::into).collect();
        self
    }
}

/// Structured filter bundle for parameterized search.
///
/// Serialized as the request body of the filtered-search endpoint; the
/// same bundle feeds cache-key construction, where every set-valued field
/// is normalized (trimmed, sorted, deduplicated) first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    /// Ingredients results must contain.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_ingredients: Vec<String>,
    /// Ingredients results must not contain.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_ingredients: Vec<String>,
    /// Diet tags (e.g. "vegetarian", "vegan").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diet_tags: Vec<String>,
    /// Allergen labels to exclude.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_allergens: Vec<String>,
    /// Maximum preparation time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
    /// Maximum number of results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn diet_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diet_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_duration(mut self, minutes: u32) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
