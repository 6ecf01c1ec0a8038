//! Integration tests for web search, brand search and image generation.

use axum::http::StatusCode;
use serde_json::json;

use seatwise_client::{MockLlmProvider, MockSearchProvider};

use crate::common::{TestHarness, body_text, json_body, sse_content};

const PRODUCTS: &str = r#"Here you go:
[{"brand": "Cybex", "model": "Sirona T i-Size", "heightRange": "45-105cm",
  "installation": "ISOFIX + support leg", "sideImpact": "L.S.P."}]"#;

#[tokio::test]
async fn test_search_replays_markdown() {
    let harness = TestHarness::new();
    let response = harness
        .post("/api/search", json!({"query": "i-Size booster width"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = sse_content(&body_text(response).await);
    assert!(text.starts_with("# Search results: i-Size booster width"));
    assert!(text.contains("[Cybex Sirona T i-Size review](https://reviews.example.com/cybex-sirona)"));
    assert_eq!(harness.search.queries(), vec!["i-Size booster width".to_string()]);
}

#[tokio::test]
async fn test_search_requires_query() {
    let harness = TestHarness::new();
    let response = harness.post("/api/search", json!({"query": "  "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_failure_is_bad_gateway() {
    let harness = TestHarness::new().search(MockSearchProvider::failing("quota exceeded"));
    let response = harness.post("/api/search", json!({"query": "isofix"})).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_brand_search_tags_and_extracts() {
    let harness = TestHarness::with_responses(vec![PRODUCTS]);
    let body = json_body(
        harness
            .post("/api/brand-search", json!({"heightRange": "40-105cm"}))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["searchResults"][0]["brand"], "Cybex");
    assert_eq!(body["searchResults"][1]["brand"], "shop.example.com");
    assert_eq!(body["structuredProducts"][0]["model"], "Sirona T i-Size");
    assert_eq!(body["structuredProducts"][0]["priceRange"], "");

    let query = &harness.search.queries()[0];
    assert!(query.contains("40-105cm"));
    assert!(query.contains("ECE R129"));
    assert!(query.contains(" OR "));
}

#[tokio::test]
async fn test_brand_search_weight_uses_fmvss_query() {
    let harness = TestHarness::with_responses(vec!["[]"]);
    let response = harness
        .post("/api/brand-search", json!({"weightRange": "9-18kg"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(harness.search.queries()[0].contains("FMVSS 213"));
}

#[tokio::test]
async fn test_brand_search_malformed_extraction_is_empty() {
    let harness = TestHarness::with_responses(vec!["I could not find any products."]);
    let body = json_body(
        harness
            .post("/api/brand-search", json!({"heightRange": "40-105cm"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["structuredProducts"], json!([]));
    assert_eq!(body["totalCount"], 2);
}

#[tokio::test]
async fn test_brand_search_keeps_hits_when_extraction_fails() {
    let harness = TestHarness::with_llm(MockLlmProvider::failing("503"));
    let body = json_body(
        harness
            .post("/api/brand-search", json!({"heightRange": "40-105cm"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["searchResults"][0]["brand"], "Cybex");
    assert_eq!(body["structuredProducts"], json!([]));
    assert_eq!(harness.llm.call_count(), 1);
}

#[tokio::test]
async fn test_brand_search_without_hits_skips_model() {
    let harness = TestHarness::new().search(MockSearchProvider::new(Vec::new()));
    let body = json_body(
        harness
            .post("/api/brand-search", json!({"heightRange": "40-105cm"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["totalCount"], 0);
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn test_brand_search_requires_a_range() {
    let harness = TestHarness::new();
    let response = harness.post("/api/brand-search", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_image_default_style() {
    let harness = TestHarness::new();
    let body = json_body(
        harness
            .post("/api/generate-image", json!({"prompt": "rear-facing shell"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["imageUrl"], "https://img.example.com/seat.png");
    assert_eq!(body["model"], "mock-image");

    let prompt = harness.image.last_prompt().unwrap();
    assert!(prompt.ends_with("rear-facing shell"));
    assert_ne!(prompt, "rear-facing shell", "a style prefix is applied");
}

#[tokio::test]
async fn test_generate_image_styles_differ() {
    let harness = TestHarness::new();
    let mut prompts = Vec::new();
    for style in ["simple", "detailed", "cartoon"] {
        let response = harness
            .post(
                "/api/generate-image",
                json!({"prompt": "booster", "style": style}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        prompts.push(harness.image.last_prompt().unwrap());
    }
    prompts.dedup();
    assert_eq!(prompts.len(), 3);
}

#[tokio::test]
async fn test_generate_image_rejects_unknown_style() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/generate-image",
            json!({"prompt": "booster", "style": "watercolour"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(harness.image.last_prompt().is_none());
}
