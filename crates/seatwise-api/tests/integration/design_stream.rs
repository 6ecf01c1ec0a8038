//! Integration tests for the two-phase comprehensive design stream.

use axum::http::StatusCode;
use serde_json::json;

use seatwise_client::{MockLlmProvider, MockSearchProvider};

use crate::common::{TestHarness, body_text, sse_events, sse_payloads};

fn design_body() -> serde_json::Value {
    json!({"minHeight": 95, "maxHeight": 105, "standard": "ECE_R129"})
}

#[tokio::test]
async fn test_comparison_precedes_design() {
    let harness = TestHarness::with_responses(vec!["Cybex leads on side impact.", "Shell design notes"]);
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert_eq!(sse_payloads(&body).last().unwrap(), "[DONE]");

    let events = sse_events(&body);
    assert_eq!(events[0]["type"], "comparison");
    assert_eq!(events[0]["content"], "Cybex leads on side impact.");
    assert!(events[0]["brands"].as_array().unwrap().len() >= 1);

    let design: String = events[1..]
        .iter()
        .inspect(|e| assert_eq!(e["type"], "design"))
        .map(|e| e["content"].as_str().unwrap())
        .collect();
    assert_eq!(design, "Shell design notes");
}

#[tokio::test]
async fn test_searches_each_comparison_brand() {
    let harness = TestHarness::new();
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    let _ = body_text(response).await;

    let queries = harness.search.queries();
    assert_eq!(queries.len(), 5);
    assert!(queries.iter().any(|q| q.contains("Cybex")));
    assert!(queries.iter().any(|q| q.contains("Maxi-Cosi")));
}

#[tokio::test]
async fn test_design_request_carries_range_and_standard() {
    let harness = TestHarness::with_responses(vec!["comparison", "design"]);
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    let _ = body_text(response).await;

    let requests = harness.llm.requests();
    assert_eq!(requests.len(), 2, "one comparison call then one design call");
    let design_prompt = &requests[1].messages[0].content;
    assert!(design_prompt.contains("95"));
    assert!(design_prompt.contains("105"));
}

#[tokio::test]
async fn test_no_comparison_when_search_fails() {
    let harness = TestHarness::with_responses(vec!["Design only"])
        .search(MockSearchProvider::failing("search offline"));
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let events = sse_events(&body_text(response).await);
    assert!(events.iter().all(|e| e["type"] == "design"));
    assert_eq!(harness.llm.call_count(), 1, "comparison is skipped");
}

#[tokio::test]
async fn test_no_comparison_when_search_is_empty() {
    let harness = TestHarness::with_responses(vec!["Design only"])
        .search(MockSearchProvider::new(Vec::new()));
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    let events = sse_events(&body_text(response).await);
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e["type"] == "design"));
}

#[tokio::test]
async fn test_comparison_stream_failure_is_bad_gateway() {
    let harness = TestHarness::with_llm(
        MockLlmProvider::with_response("alpha beta gamma").with_stream_failure_after(1),
    );
    let response = harness.post("/api/comprehensive-design", design_body()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY, "the comparison drain fails first");
}

#[tokio::test]
async fn test_weight_range_with_fmvss() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/comprehensive-design",
            json!({"minWeight": 10, "maxWeight": 18, "standard": "FMVSS213"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejects_missing_ranges() {
    let harness = TestHarness::new();
    let response = harness
        .post("/api/comprehensive-design", json!({"standard": "ECE_R129"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn test_rejects_unknown_standard() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/comprehensive-design",
            json!({"minHeight": 95, "maxHeight": 105, "standard": "GB27887"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejects_reversed_range() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/comprehensive-design",
            json!({"minHeight": 120, "maxHeight": 95, "standard": "ECE_R129"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
