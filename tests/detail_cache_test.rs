//! Tests for [`RecipeDetailCache`] — capacity-only FIFO detail cache.

use recipewrangler::{DetailCacheConfig, NutritionFacts, RecipeDetail, RecipeDetailCache};

fn make_detail(id: &str, image: Option<&str>) -> RecipeDetail {
    RecipeDetail {
        recipe_id: id.to_string(),
        title: format!("Recipe {id}"),
        image_url: image.map(|url| url.to_string()),
        ingredients: Vec::new(),
        instructions: Vec::new(),
        duration: Some(30),
        serves: Some(4),
        nutrition: NutritionFacts::default(),
        nutri_score: Some(2.0),
    }
}

// =========================================================================
// Config
// =========================================================================

#[test]
fn config_defaults() {
    let config = DetailCacheConfig::default();
    assert_eq!(config.capacity, 50);
}

#[test]
fn config_builder() {
    let config = DetailCacheConfig::new().capacity(10);
    assert_eq!(config.capacity, 10);
}

// =========================================================================
// get/put
// =========================================================================

#[test]
fn put_then_get_round_trip() {
    let cache = RecipeDetailCache::new(&DetailCacheConfig::default());

    assert!(cache.get("r1").is_none());

    cache.put(make_detail("r1", Some("https://img.example/r1.jpg")));

    let detail = cache.get("r1").expect("detail should be present");
    assert_eq!(detail.title, "Recipe r1");
    assert_eq!(
        detail.image_url.as_deref(),
        Some("https://img.example/r1.jpg")
    );
}

#[test]
fn put_keys_by_the_details_own_id() {
    let cache = RecipeDetailCache::new(&DetailCacheConfig::default());

    cache.put(make_detail("r1", None));
    cache.put(make_detail("r2", None));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("r1").is_some());
    assert!(cache.get("r2").is_some());
}

#[test]
fn reinsert_replaces_without_growing() {
    let cache = RecipeDetailCache::new(&DetailCacheConfig::default());

    cache.put(make_detail("r1", None));
    cache.put(make_detail("r1", Some("https://img.example/r1.jpg")));

    assert_eq!(cache.len(), 1);
    assert!(cache.get("r1").unwrap().image_url.is_some());
}

// =========================================================================
// FIFO capacity eviction
// =========================================================================

#[test]
fn insert_past_capacity_evicts_oldest() {
    let config = DetailCacheConfig::new().capacity(3);
    let cache = RecipeDetailCache::new(&config);

    cache.put(make_detail("r1", None));
    cache.put(make_detail("r2", None));
    cache.put(make_detail("r3", None));
    cache.put(make_detail("r4", None));

    assert_eq!(cache.len(), 3);
    assert!(cache.get("r1").is_none(), "oldest entry evicted");
    assert!(cache.get("r2").is_some());
    assert!(cache.get("r4").is_some());
}

#[test]
fn access_does_not_promote() {
    let config = DetailCacheConfig::new().capacity(2);
    let cache = RecipeDetailCache::new(&config);

    cache.put(make_detail("r1", None));
    cache.put(make_detail("r2", None));
    for _ in 0..5 {
        assert!(cache.get("r1").is_some());
    }

    cache.put(make_detail("r3", None));

    assert!(cache.get("r1").is_none(), "no LRU promotion");
    assert!(cache.get("r2").is_some());
}

#[test]
fn fifty_first_insert_evicts_first_inserted() {
    let cache = RecipeDetailCache::new(&DetailCacheConfig::default());

    for i in 0..51 {
        cache.put(make_detail(&format!("r{i}"), None));
    }

    assert_eq!(cache.len(), 50);
    assert!(cache.get("r0").is_none());
    assert!(cache.get("r1").is_some());
    assert!(cache.get("r50").is_some());
}

// =========================================================================
// clear
// =========================================================================

#[test]
fn clear_empties_everything() {
    let cache = RecipeDetailCache::new(&DetailCacheConfig::default());

    cache.put(make_detail("r1", None));
    assert!(!cache.is_empty());

    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.get("r1").is_none());
}
