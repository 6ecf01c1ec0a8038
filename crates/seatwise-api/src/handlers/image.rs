//! Image generation proxy.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use crate::validation::ImageRequest;

/// `POST /api/generate-image`
pub async fn generate_image(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ImageRequest>,
) -> ApiResult<Json<Value>> {
    let prompt = body.validate()?;
    let image = state.image.generate(&prompt).await?;
    tracing::info!(model = %image.model, "Image generated");
    Ok(Json(json!({
        "success": true,
        "imageUrl": image.url,
        "model": image.model,
        "created": image.created,
    })))
}
