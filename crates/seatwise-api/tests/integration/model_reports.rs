//! Integration tests for the audit and data-validation endpoints.

use axum::http::StatusCode;
use serde_json::json;

use seatwise_client::MockLlmProvider;

use crate::common::{TestHarness, json_body};

const AUDIT_REPLY: &str = r#"```json
{"audit_passed": true, "audit_score": 88,
 "issues": [{"type": "data", "severity": "low",
             "description": "HIC limit for Q3 not stated",
             "suggestion": "Add HIC15 <= 800"}],
 "summary": "Broadly consistent with ECE R129.",
 "recommendations": ["State the Q3 HIC limit"]}
```"#;

#[tokio::test]
async fn test_audit_parses_fenced_json() {
    let harness = TestHarness::with_responses(vec![AUDIT_REPLY]);
    let body = json_body(
        harness
            .post(
                "/api/audit-report",
                json!({"report": "# Design report\nQ3 group...", "standard": "ECE_R129"}),
            )
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["audit"]["audit_passed"], true);
    assert_eq!(body["audit"]["audit_score"], 88);
    assert_eq!(body["audit"]["issues"].as_array().unwrap().len(), 1);
    assert_eq!(body["rawResponse"], AUDIT_REPLY);

    let request = &harness.llm.requests()[0];
    assert_eq!(request.model.as_deref(), Some(harness.config.llm.audit_model.as_str()));
    assert!(request.messages[0].content.contains("Q3 group"));
}

#[tokio::test]
async fn test_audit_accepts_report_object() {
    let harness = TestHarness::with_responses(vec![AUDIT_REPLY]);
    let body = json_body(
        harness
            .post(
                "/api/audit-report",
                json!({
                    "report": {"title": "Q3 seat", "dummies": ["Q3"]},
                    "standard": "ECE_R129"
                }),
            )
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["audit"]["audit_score"], 88);

    let prompt = &harness.llm.requests()[0].messages[0].content;
    assert!(prompt.contains("against ECE_R129"));
    assert!(prompt.contains("\"title\": \"Q3 seat\""));
    assert!(prompt.contains("\"Q3\""));
}

#[tokio::test]
async fn test_audit_falls_back_on_prose() {
    let harness = TestHarness::with_responses(vec!["The report looks fine to me."]);
    let body = json_body(
        harness
            .post("/api/audit-report", json!({"report": "short report"}))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["audit"]["audit_passed"], false);
    assert_eq!(body["audit"]["audit_score"], 0);
    assert_eq!(body["rawResponse"], "The report looks fine to me.");
}

#[tokio::test]
async fn test_audit_requires_report() {
    let harness = TestHarness::new();
    for report in [json!(""), json!(null)] {
        let response = harness.post("/api/audit-report", json!({"report": report})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn test_audit_upstream_failure() {
    let harness = TestHarness::with_llm(MockLlmProvider::failing("503"));
    let response = harness
        .post("/api/audit-report", json!({"report": "r"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_validate_data_parses_reply() {
    let harness = TestHarness::with_responses(vec![
        r#"{"validationScore": 92, "validationReport": "Values match the regulation.",
            "issues": [{"type": "info", "category": "dummies", "description": "Q1.5 listed",
                        "suggestion": "none"}]}"#,
    ]);
    let body = json_body(
        harness
            .post(
                "/api/validate-data",
                json!({
                    "standard": "ECE_R129",
                    "heightRange": "95-105cm",
                    "localData": {"dummies": ["Q3"], "isofix": "ISO/R2"}
                }),
            )
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["validationScore"], 92);
    assert_eq!(body["issues"][0]["type"], "info");

    let prompt = &harness.llm.requests()[0].messages[0].content;
    assert!(prompt.contains("ISO/R2"));
    assert!(prompt.contains("95-105cm"));
}

#[tokio::test]
async fn test_validate_data_keeps_loose_reply() {
    let harness = TestHarness::with_responses(vec![
        r#"{"validationScore": 85.0, "validationReport": "HIC limit missing.",
            "issues": [{"type": "critical", "category": "injury criteria",
                        "description": "HIC15 limit absent", "suggestion": "Add it"}]}"#,
    ]);
    let body = json_body(
        harness
            .post(
                "/api/validate-data",
                json!({"standard": "ECE_R129", "localData": {"dummies": ["Q3"]}}),
            )
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["validationScore"], 85);
    assert_eq!(body["validationReport"], "HIC limit missing.");
    assert_eq!(body["issues"][0]["description"], "HIC15 limit absent");
}

#[tokio::test]
async fn test_validate_data_malformed_reply_scores_seventy() {
    let harness = TestHarness::with_responses(vec!["{ not really json"]);
    let body = json_body(
        harness
            .post(
                "/api/validate-data",
                json!({"standard": "FMVSS213", "localData": {"groups": []}}),
            )
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["validationScore"], 70);
    assert_eq!(body["issues"][0]["type"], "warning");
}

#[tokio::test]
async fn test_validate_data_requires_local_data() {
    let harness = TestHarness::new();
    let response = harness
        .post(
            "/api/validate-data",
            json!({"standard": "ECE_R129", "localData": null}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
