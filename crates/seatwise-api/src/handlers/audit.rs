//! Regulatory audit of a design report.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use seatwise_client::{CompletionRequest, Message};
use seatwise_core::{AuditResult, extract_json};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts;
use crate::state::AppState;
use crate::validation::AuditRequest;

const AUDIT_TEMPERATURE: f32 = 0.3;

/// Response of `POST /api/audit-report`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    /// Always true; failures use the error shape.
    pub success: bool,
    /// Parsed verdict, or the fallback when the reply was unusable.
    pub audit: AuditResult,
    /// The model's reply as received.
    pub raw_response: String,
}

/// `POST /api/audit-report`
pub async fn audit_report(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AuditRequest>,
) -> ApiResult<Json<AuditResponse>> {
    let (report, standard) = body.validate()?;

    let request = CompletionRequest::new(vec![Message::user(prompts::audit_request(
        report, standard,
    ))])
    .with_system_prompt(prompts::AUDIT)
    .with_model(state.config.llm.audit_model.clone())
    .with_temperature(AUDIT_TEMPERATURE);

    let reply = state.llm.complete(request).await?;
    let audit = extract_json::<AuditResult>(&reply.content).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Audit reply was not usable JSON; using fallback");
        AuditResult::fallback()
    });
    tracing::info!(
        passed = audit.audit_passed,
        score = audit.audit_score,
        issues = audit.issues.len(),
        tokens = reply.tokens_used.total(),
        "Audit finished"
    );

    Ok(Json(AuditResponse {
        success: true,
        audit,
        raw_response: reply.content,
    }))
}
