//! Full recipe detail records.

use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub measurement: String,
}

/// Per-serving nutrition breakdown.
///
/// Flattened into the detail record on the wire; individual fields may be
/// absent upstream and default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub total_kcal_per_serving: f32,
    #[serde(default)]
    pub total_protein_g_per_serving: f32,
    #[serde(default)]
    pub total_carbs_g_per_serving: f32,
    #[serde(default)]
    pub total_fat_g_per_serving: f32,
    #[serde(default)]
    pub total_fiber_g_per_serving: f32,
    #[serde(default)]
    pub total_sugar_g_per_serving: f32,
    #[serde(default)]
    pub total_sodium_mg_per_serving: f32,
    #[serde(default)]
    pub total_cholesterol_mg_per_serving: f32,
}

/// Full recipe record, including the confirmed image reference the
/// hydrator backfills search stubs from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub recipe_id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Preparation time in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub serves: Option<u32>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    #[serde(default)]
    pub nutri_score: Option<f32>,
}
