//! Integration tests for health, raw tables and dimension estimates.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{TestHarness, json_body, shipped_data_dir};

#[tokio::test]
async fn test_health_reports_version() {
    let harness = TestHarness::new();
    let body = json_body(harness.get("/health").await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let harness = TestHarness::new();
    let response = harness.get("/health").await;
    let id = response.headers().get("x-request-id");
    assert!(id.is_some(), "every response carries a request id");
}

#[tokio::test]
async fn test_get_design_table_raw() {
    let harness = TestHarness::new();
    let body = json_body(
        harness.get("/api/data/design-requirements").await,
        StatusCode::OK,
    )
    .await;
    assert!(body["standards"]["ECE_R129"]["groups"].is_array());
    assert!(body["standards"]["FMVSS_213"]["groups"].is_array());
}

#[tokio::test]
async fn test_served_table_matches_file_contents() {
    let harness = TestHarness::new();
    let response = harness.get("/api/data/brand-catalog").await;
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = json_body(response, StatusCode::OK).await;

    let stored = std::fs::read(shipped_data_dir().join("brand-catalog.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_slice(&stored).unwrap();
    assert_eq!(body, stored);
}

#[tokio::test]
async fn test_get_table_accepts_json_suffix() {
    let harness = TestHarness::new();
    let body = json_body(harness.get("/api/data/dummies.json").await, StatusCode::OK).await;
    assert!(!body["dummies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_table_is_bad_request() {
    let harness = TestHarness::new();
    let body = json_body(
        harness.get("/api/data/secrets").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("secrets"));
}

#[tokio::test]
async fn test_missing_data_dir_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let harness = TestHarness::new().data_dir(dir.path());
    let body = json_body(
        harness.get("/api/data/anthropometry").await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_eq!(body["success"], false);
    assert!(body["details"].as_str().unwrap().contains("anthropometry.json"));
}

#[tokio::test]
async fn test_dimensions_booster_range() {
    let harness = TestHarness::new();
    let body = json_body(
        harness
            .post("/api/dimensions", json!({"minHeight": 100, "maxHeight": 150}))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["orientation"], "booster");
    assert_eq!(body["heightRange"]["min"], 100.0);
    let dummies: Vec<&str> = body["dummies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert!(dummies.contains(&"Q6"));
    assert!(dummies.contains(&"Q10"));
    assert!(!dummies.contains(&"Q1"));
}

#[tokio::test]
async fn test_dimensions_accepts_numeric_strings() {
    let harness = TestHarness::new();
    let body = json_body(
        harness
            .post("/api/dimensions", json!({"minHeight": "40", "maxHeight": "83"}))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["orientation"], "rear-facing");
    assert!(body["internalWidth"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_dimensions_rejects_reversed_range() {
    let harness = TestHarness::new();
    let body = json_body(
        harness
            .post("/api/dimensions", json!({"minHeight": 120, "maxHeight": 90}))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let harness = TestHarness::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/dimensions")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = crate::common::send(harness.state(), request).await;
    let body = json_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Invalid JSON request body");
}
