//! Multi-turn product design chat.

use axum::extract::State;
use axum::response::Response;

use seatwise_client::CompletionRequest;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts;
use crate::relay;
use crate::state::AppState;
use crate::validation::AssistantRequest;

const MAX_TOKENS: u32 = 2000;

/// `POST /api/design-assistant`
pub async fn design_assistant(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AssistantRequest>,
) -> ApiResult<Response> {
    let (product, messages) = body.validate()?;
    tracing::info!(product = %product, turns = messages.len(), "Design assistant turn");

    let request = CompletionRequest::new(messages.to_vec())
        .with_system_prompt(format!("{}\n\nProduct category: {product}", prompts::ASSISTANT))
        .with_temperature(state.config.llm.temperature)
        .with_max_tokens(MAX_TOKENS);

    let tokens = state.llm.stream(request).await?;
    Ok(relay::relay_tokens(tokens))
}
