//! Two-phase market comparison and design report.

use axum::extract::State;
use axum::response::Response;
use serde_json::Value;

use seatwise_client::{CompletionRequest, Message};

use super::drain;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts::{self, BrandFindings, BrandHit, DesignBrief};
use crate::relay::{self, EventKind, StreamEvent};
use crate::state::AppState;
use crate::validation::DesignRequest;

/// Results requested per brand.
const HITS_PER_BRAND: usize = 3;

/// `POST /api/comprehensive-design`
///
/// Searches each comparison brand in turn, buffers a comparison of what
/// was found, and then streams the design report. The comparison event is
/// omitted when no brand returned results.
pub async fn comprehensive_design(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DesignRequest>,
) -> ApiResult<Response> {
    let (standard, brief) = body.validate()?;
    tracing::info!(standard = %standard, height = ?brief.height, weight = ?brief.weight, "Comprehensive design requested");

    let findings = search_brands(&state).await?;
    let comparison = if findings.is_empty() {
        None
    } else {
        compare(&state, &brief, &findings).await?
    };

    let llm = state.llm.clone();
    let design = CompletionRequest::new(vec![Message::user(brief.design_request())])
        .with_system_prompt(prompts::DESIGN)
        .with_temperature(state.config.llm.temperature);

    let events = relay::two_phase(async move { Ok(comparison) }, async move {
        llm.stream(design).await
    });
    Ok(relay::sse_response(relay::terminate(events)))
}

async fn comparison_brands(state: &AppState) -> seatwise_core::Result<Vec<String>> {
    if !state.config.search.brands.is_empty() {
        return Ok(state.config.search.brands.clone());
    }
    let catalog = state.data.brand_catalog().await?;
    Ok(catalog
        .comparison_brands()
        .into_iter()
        .map(str::to_string)
        .collect())
}

async fn search_brands(state: &AppState) -> seatwise_core::Result<Vec<BrandFindings>> {
    let mut findings = Vec::new();
    for brand in comparison_brands(state).await? {
        let response = match state
            .search
            .search(&prompts::brand_query(&brand), HITS_PER_BRAND)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(brand = %brand, error = %err, "Brand search failed; skipping");
                continue;
            }
        };
        if response.web_items.is_empty() {
            continue;
        }
        findings.push(BrandFindings {
            brand,
            products: response
                .web_items
                .into_iter()
                .map(|item| BrandHit {
                    title: item.title,
                    snippet: item.snippet,
                    url: item.url,
                })
                .collect(),
        });
    }
    tracing::debug!(brands = findings.len(), "Brand search finished");
    Ok(findings)
}

async fn compare(
    state: &AppState,
    brief: &DesignBrief,
    findings: &[BrandFindings],
) -> seatwise_core::Result<Option<StreamEvent>> {
    let request = CompletionRequest::new(vec![Message::user(brief.comparison_request(findings))])
        .with_system_prompt(prompts::COMPARISON)
        .with_temperature(state.config.llm.temperature);
    let text = drain(state.llm.as_ref(), request).await?;
    if text.is_empty() {
        return Ok(None);
    }
    let brands: Value = serde_json::to_value(findings)?;
    Ok(Some(
        StreamEvent::of_kind(EventKind::Comparison, text).with_field("brands", brands),
    ))
}
