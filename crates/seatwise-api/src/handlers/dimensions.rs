//! Internal dimension estimates.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use seatwise_core::dimensions::{DimensionEstimate, estimate};
use seatwise_core::tables::DummySpec;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;
use crate::validation::DimensionsRequest;

/// Response of `POST /api/dimensions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsResponse {
    /// Estimated internal dimensions.
    #[serde(flatten)]
    pub estimate: DimensionEstimate,
    /// Test dummies whose stature falls inside the range.
    pub dummies: Vec<DummySpec>,
}

/// `POST /api/dimensions`
pub async fn dimensions(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DimensionsRequest>,
) -> ApiResult<Json<DimensionsResponse>> {
    let range = body.validate()?;
    let anthropometry = state.data.anthropometry().await?;
    let row = anthropometry.nearest_at_or_below(range.max);
    let dummies = state.data.dummies().await?;
    tracing::debug!(range = %range, stature = row.map(|r| r.stature), "Estimating dimensions");

    Ok(Json(DimensionsResponse {
        estimate: estimate(&range, row),
        dummies: dummies.covering(&range).into_iter().cloned().collect(),
    }))
}
