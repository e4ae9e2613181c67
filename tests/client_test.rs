//! Wiremock integration tests for [`RecipeApiClient`].
//!
//! These tests verify correct HTTP interaction, envelope unwrapping, and
//! error mapping using mocked responses.

use std::time::Duration;

use recipewrangler::client::RecipeApiClient;
use recipewrangler::{RecipeService, SearchFilters, SearchRequest, WranglerError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stub_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "recipe_id": id,
        "title": format!("Recipe {id}"),
        "image_url": null,
        "duration": 25,
        "serves": 2
    })
}

// ============================================================================
// Search payload shapes
// ============================================================================

#[tokio::test]
async fn search_decodes_bare_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([stub_json("r1")])),
        )
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let results = client
        .search(&SearchRequest::new("soup"))
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipe_id, "r1");
    assert_eq!(results[0].duration, Some(25));
}

#[tokio::test]
async fn search_decodes_results_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [stub_json("r1"), stub_json("r2")]
        })))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let results = client.search(&SearchRequest::new("soup")).await.unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn search_decodes_full_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "help": "https://api.wisefood.example/docs",
            "success": true,
            "result": { "results": [stub_json("r1")] }
        })))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let results = client.search(&SearchRequest::new("soup")).await.unwrap();

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn search_sends_question_and_allergens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .and(body_json(serde_json::json!({
            "question": "chickpea recipes",
            "exclude_allergens": ["peanuts"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let request = SearchRequest::new("chickpea recipes").exclude_allergens(["peanuts"]);
    client.search(&request).await.unwrap();
}

#[tokio::test]
async fn empty_allergen_list_is_omitted_from_the_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .and(body_json(serde_json::json!({ "question": "soup" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    client.search(&SearchRequest::new("soup")).await.unwrap();
}

// ============================================================================
// Filtered search
// ============================================================================

#[tokio::test]
async fn filtered_search_posts_the_filter_bundle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search/filtered"))
        .and(body_json(serde_json::json!({
            "include_ingredients": ["chickpeas"],
            "diet_tags": ["vegan"],
            "max_duration": 30
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [stub_json("r1")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let filters = SearchFilters::new()
        .include_ingredients(["chickpeas"])
        .diet_tags(["vegan"])
        .max_duration(30);
    let results = client.search_filtered(&filters).await.unwrap();

    assert_eq!(results.len(), 1);
}

// ============================================================================
// Detail fetch
// ============================================================================

#[tokio::test]
async fn detail_decodes_flattened_nutrition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipewrangler/recipes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "result": {
                "recipe_id": "r1",
                "title": "Chickpea Curry",
                "image_url": "https://img.example/r1.jpg",
                "ingredients": [
                    { "name": "chickpeas", "measurement": "400g" }
                ],
                "instructions": ["Simmer everything."],
                "duration": 35,
                "serves": 4,
                "total_kcal_per_serving": 420.0,
                "total_protein_g_per_serving": 18.5,
                "total_carbs_g_per_serving": 55.0,
                "total_fat_g_per_serving": 12.0,
                "nutri_score": 2.0
            }
        })))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let detail = client.fetch_recipe("r1").await.expect("detail should decode");

    assert_eq!(detail.title, "Chickpea Curry");
    assert_eq!(detail.image_url.as_deref(), Some("https://img.example/r1.jpg"));
    assert_eq!(detail.ingredients.len(), 1);
    assert!((detail.nutrition.total_kcal_per_serving - 420.0).abs() < f32::EPSILON);
    assert!((detail.nutrition.total_protein_g_per_serving - 18.5).abs() < f32::EPSILON);
    // Absent nutrition fields default to zero.
    assert_eq!(detail.nutrition.total_sodium_mg_per_serving, 0.0);
}

#[tokio::test]
async fn empty_recipe_id_is_rejected_before_the_network() {
    let mock_server = MockServer::start().await;

    let client = RecipeApiClient::new(mock_server.uri());
    let result = client.fetch_recipe("  ").await;

    assert!(matches!(result, Err(WranglerError::InvalidInput(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipewrangler/recipes/r1"))
        .and(header("Authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "recipe_id": "r1",
            "title": "Recipe r1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri()).bearer_token("session-token");
    client.fetch_recipe("r1").await.unwrap();
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let result = client.search(&SearchRequest::new("soup")).await;

    assert!(matches!(result, Err(WranglerError::AuthenticationFailed)));
}

#[tokio::test]
async fn missing_recipe_maps_to_recipe_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipewrangler/recipes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let result = client.fetch_recipe("missing").await;

    match result {
        Err(WranglerError::RecipeNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected RecipeNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_parses_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let result = client.search(&SearchRequest::new("soup")).await;

    match result {
        Err(WranglerError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(2)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_map_to_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = RecipeApiClient::new(mock_server.uri());
    let result = client.search(&SearchRequest::new("soup")).await;

    match result {
        Err(err @ WranglerError::Api { status: 503, .. }) => assert!(err.is_transient()),
        other => panic!("expected Api 503, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_search_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recipewrangler/recipes/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client =
        RecipeApiClient::new(mock_server.uri()).search_timeout(Duration::from_millis(100));
    let result = client.search(&SearchRequest::new("soup")).await;

    assert!(matches!(result, Err(WranglerError::Timeout { .. })));
}
