//! Integration tests for offline advice from the reference tables.

use axum::http::StatusCode;
use serde_json::json;

use seatwise_api::handlers::local_advice::render_local_advice;
use seatwise_api::validation::LocalAdviceRequest;
use seatwise_core::DataDir;

use crate::common::{TestHarness, body_text, shipped_data_dir, sse_content, sse_payloads};

#[tokio::test]
async fn test_r129_range_matches_q3_group() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/local-advice",
            json!({"standard": "ECE_R129", "heightRange": "95-100cm"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert_eq!(sse_payloads(&body).last().unwrap(), "[DONE]");
    let text = sse_content(&body);
    assert!(text.contains("Q3"));
    assert!(text.contains("ISO/R2 (Class D)"));
    assert!(text.contains("Q3 rear-facing extended 95-105cm"));
    assert!(text.contains("ECE R129 (i-Size) reference"));
    assert!(text.contains("Anthropometry"));
}

fn applicable_groups(text: &str) -> Vec<&str> {
    let Some((_, rest)) = text.split_once("## Applicable groups\n\n") else {
        return Vec::new();
    };
    rest.lines()
        .take_while(|line| line.starts_with("- "))
        .map(|line| &line[2..])
        .collect()
}

#[tokio::test]
async fn test_applicable_groups_follow_range_centre() {
    let data = DataDir::new(shipped_data_dir());
    let render = |range: &str| {
        let query = LocalAdviceRequest {
            standard: Some("ECE_R129".to_string()),
            height_range: Some(range.to_string()),
            weight_range: None,
        }
        .validate()
        .unwrap();
        let data = data.clone();
        async move { render_local_advice(&data, &query).await.unwrap() }
    };

    let infant = render("40-50cm").await;
    assert_eq!(applicable_groups(&infant), vec!["i-Size infant carrier 40-83cm"]);

    let toddler = render("95-100cm").await;
    assert_eq!(
        applicable_groups(&toddler),
        vec![
            "Q3 rear-facing extended 95-105cm",
            "i-Size rear-facing convertible 61-105cm",
            "i-Size forward-facing harness 76-105cm",
        ]
    );

    let unparsable = render("tall enough").await;
    assert!(unparsable.contains("## Key requirements"));
    assert!(applicable_groups(&unparsable).is_empty());
}

#[tokio::test]
async fn test_advice_arrives_in_fixed_size_chunks() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/local-advice",
            json!({"standard": "ECE_R129", "heightRange": "40-83cm"}),
        )
        .await;
    let body = body_text(response).await;
    let events = crate::common::sse_events(&body);
    assert!(events.len() > 1);
    for event in &events[..events.len() - 1] {
        assert_eq!(event["content"].as_str().unwrap().chars().count(), 20);
    }
}

#[tokio::test]
async fn test_fmvss_out_of_table_uses_default_advice() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/local-advice",
            json!({"standard": "FMVSS213", "weightRange": "60-70kg"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = sse_content(&body_text(response).await);
    assert!(text.contains("general guidance"));
    assert!(!text.contains("Anthropometry"), "weight queries carry no stature rows");
}

#[tokio::test]
async fn test_unparsable_range_falls_back_to_default() {
    let data = DataDir::new(shipped_data_dir());
    let query = LocalAdviceRequest {
        standard: Some("ECE_R129".to_string()),
        height_range: Some("tall enough".to_string()),
        weight_range: None,
    }
    .validate()
    .unwrap();
    assert!(query.interval.is_none());

    let text = render_local_advice(&data, &query).await.unwrap();
    assert!(text.contains("general guidance"));
}

#[tokio::test]
async fn test_r44_weight_group() {
    let data = DataDir::new(shipped_data_dir());
    let query = LocalAdviceRequest {
        standard: Some("R44".to_string()),
        height_range: None,
        weight_range: Some("15-20kg".to_string()),
    }
    .validate()
    .unwrap();

    let text = render_local_advice(&data, &query).await.unwrap();
    assert!(text.contains("Group I 9-18kg"), "first overlapping group wins");
}

#[tokio::test]
async fn test_missing_knowledge_base_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        shipped_data_dir().join("design-requirements.json"),
        dir.path().join("design-requirements.json"),
    )
    .unwrap();

    let harness = TestHarness::new().data_dir(dir.path());
    let response = harness
        .post(
            "/api/local-advice",
            json!({"standard": "ECE_R129", "heightRange": "95-100cm"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_standard_missing_from_knowledge_base_drops_background() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        shipped_data_dir().join("design-requirements.json"),
        dir.path().join("design-requirements.json"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("local-knowledge-base.json"),
        r#"{"version": "test", "standards": {}}"#,
    )
    .unwrap();

    let query = LocalAdviceRequest {
        standard: Some("ECE_R129".to_string()),
        height_range: Some("95-100cm".to_string()),
        weight_range: None,
    }
    .validate()
    .unwrap();
    let text = render_local_advice(&DataDir::new(dir.path()), &query)
        .await
        .unwrap();
    assert!(text.contains("ISO/R2 (Class D)"));
    assert!(!text.contains("## Key requirements"));
}

#[tokio::test]
async fn test_range_basis_must_match_standard() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/local-advice",
            json!({"standard": "FMVSS213", "heightRange": "95-100cm"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
