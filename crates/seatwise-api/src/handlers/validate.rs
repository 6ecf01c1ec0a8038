//! Cross-checks local reference data with the validation model.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use seatwise_client::{CompletionRequest, Message};
use seatwise_core::{DataValidationResult, extract_json};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts;
use crate::state::AppState;
use crate::validation::{ValidateDataRequest, text_field};

const VALIDATION_TEMPERATURE: f32 = 0.2;

/// Response of `POST /api/validate-data`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    /// Always true; failures use the error shape.
    pub success: bool,
    /// Score, report and issues.
    #[serde(flatten)]
    pub result: DataValidationResult,
}

/// `POST /api/validate-data`
pub async fn validate_data(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ValidateDataRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let local_data = body.validate()?;
    let standard = text_field(body.standard.as_deref()).unwrap_or("unspecified");

    let prompt = prompts::validation_request(
        standard,
        text_field(body.height_range.as_deref()),
        text_field(body.weight_range.as_deref()),
        local_data,
    );
    let request = CompletionRequest::new(vec![Message::user(prompt)])
        .with_system_prompt(prompts::VALIDATION)
        .with_temperature(VALIDATION_TEMPERATURE);

    let reply = state.llm.complete(request).await?;
    let result = extract_json::<DataValidationResult>(&reply.content).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Validation reply was not usable JSON; using fallback");
        DataValidationResult::fallback()
    });
    tracing::info!(standard = %standard, score = result.validation_score, issues = result.issues.len(), "Data validation finished");

    Ok(Json(ValidateResponse {
        success: true,
        result,
    }))
}
