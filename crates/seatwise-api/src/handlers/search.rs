//! Web search rendered as markdown and replayed in chunks.

use std::fmt::Write;

use axum::extract::State;
use axum::response::Response;

use seatwise_client::SearchResponse;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::relay;
use crate::state::AppState;
use crate::validation::SearchRequest;

const RESULT_COUNT: usize = 10;

/// `POST /api/search`
pub async fn search(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SearchRequest>,
) -> ApiResult<Response> {
    let query = body.validate()?;
    let response = state.search.search(query, RESULT_COUNT).await?;
    tracing::info!(query = %query, results = response.web_items.len(), "Search finished");

    let relay_config = &state.config.relay;
    Ok(relay::sse_response(relay::terminate(relay::chunked(
        render_results(query, &response),
        relay_config.chunk_size,
        relay_config.chunk_delay(),
    ))))
}

/// Renders search results as markdown.
pub fn render_results(query: &str, response: &SearchResponse) -> String {
    let mut out = format!("# Search results: {query}\n\n");
    if !response.summary.trim().is_empty() {
        let _ = writeln!(out, "{}\n", response.summary.trim());
    }
    if response.web_items.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }
    out.push_str("## Sources\n\n");
    for (i, item) in response.web_items.iter().enumerate() {
        let _ = write!(out, "{}. [{}]({})", i + 1, item.title, item.url);
        if let Some(site) = &item.site_name {
            let _ = write!(out, " ({site})");
        }
        out.push('\n');
        if !item.snippet.is_empty() {
            let _ = writeln!(out, "   {}", item.snippet);
        }
    }
    out
}
