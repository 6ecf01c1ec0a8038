//! Streaming stature consultation.

use axum::extract::State;
use axum::response::Response;

use seatwise_client::{CompletionRequest, Message};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts;
use crate::relay;
use crate::state::AppState;
use crate::validation::ConsultRequest;

/// `POST /api/r129-consultant`: streams a markdown report as `{content}` events.
pub async fn consult(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ConsultRequest>,
) -> ApiResult<Response> {
    let input = body.validate()?;
    tracing::info!(height = input.height, standard = %input.standard, "Consultation requested");

    let request = CompletionRequest::new(vec![Message::user(prompts::consultant_request(
        input.height,
        input.standard,
    ))])
    .with_system_prompt(prompts::consultant_prompt(input.standard))
    .with_temperature(state.config.llm.temperature);

    let tokens = state.llm.stream(request).await?;
    Ok(relay::relay_tokens(tokens))
}
