//! Raw reference tables.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;

use seatwise_core::TableName;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /api/data/{table}`: the table's JSON content.
///
/// The file is parsed and re-serialized, so object keys come back in sorted
/// order rather than file order.
pub async fn get_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> ApiResult<Json<Value>> {
    let table: TableName = table.parse()?;
    tracing::debug!(table = %table, "Serving reference table");
    Ok(Json(state.data.read_raw(table).await?))
}
