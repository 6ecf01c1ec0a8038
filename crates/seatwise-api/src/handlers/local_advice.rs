//! Offline advice from the reference tables, replayed in chunks.

use axum::extract::State;
use axum::response::Response;

use seatwise_core::{
    DataDir, KnowledgeContext, RangeBasis, Result, default_advice, format_advice,
    format_knowledge, groups_at_midpoint, match_group,
};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::relay;
use crate::state::AppState;
use crate::validation::{LocalAdviceRequest, RangeQuery};

/// `POST /api/local-advice`
pub async fn local_advice(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LocalAdviceRequest>,
) -> ApiResult<Response> {
    let query = body.validate()?;
    let text = render_local_advice(&state.data, &query).await?;
    let relay_config = &state.config.relay;
    Ok(relay::sse_response(relay::terminate(relay::chunked(
        text,
        relay_config.chunk_size,
        relay_config.chunk_delay(),
    ))))
}

/// Matched-group advice followed by the standard's regulatory background.
///
/// Falls back to the generic template when the range is unusable or no
/// group overlaps it. A standard missing from the knowledge base only drops
/// the background section.
pub async fn render_local_advice(data: &DataDir, query: &RangeQuery) -> Result<String> {
    let table = data.design_table(query.standard).await?;
    let matched = query
        .interval
        .as_ref()
        .and_then(|range| match_group(&table.groups, range));

    let mut text = match matched {
        Some(group) => {
            tracing::info!(standard = %query.standard, range = %query.text, group = %group.label, "Matched design group");
            format_advice(group, query.standard, &table.version)
        }
        None => {
            tracing::info!(standard = %query.standard, range = %query.text, "No design group matched; using default advice");
            default_advice(query.standard, &table.version)
        }
    };

    let kb = data.knowledge_base().await?;
    let Some(profile) = kb.standards.get(query.standard.table_key()) else {
        tracing::warn!(standard = %query.standard, "Standard missing from knowledge base");
        return Ok(text);
    };

    let anthropometry = match (query.standard.basis(), query.interval.as_ref()) {
        (RangeBasis::Height, Some(range)) => data.anthropometry().await?.within(range),
        _ => Vec::new(),
    };
    let applicable_groups: Vec<String> = query
        .interval
        .as_ref()
        .map(|range| groups_at_midpoint(&table.groups, range))
        .unwrap_or_default()
        .into_iter()
        .map(|g| g.label.clone())
        .collect();

    let ctx = KnowledgeContext {
        profile,
        version: &kb.version,
        applicable_groups: &applicable_groups,
        anthropometry: &anthropometry,
        common_features: &kb.common_features,
        design_tips: &kb.design_tips,
    };
    text.push_str("\n\n");
    text.push_str(&format_knowledge(&ctx));
    Ok(text)
}
