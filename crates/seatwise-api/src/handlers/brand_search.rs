//! Market search with structured product extraction.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use seatwise_client::{CompletionRequest, Message, SearchItem};
use seatwise_core::tables::BrandCatalog;
use seatwise_core::{ProductSpec, RangeBasis, extract_json_array};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::prompts;
use crate::state::AppState;
use crate::validation::{BrandSearchInput, BrandSearchRequest};

const RESULT_COUNT: usize = 10;
const EXTRACTION_TEMPERATURE: f32 = 0.3;

/// One search hit tagged with the brand it mentions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedResult {
    /// Catalog brand, publishing site or "Unknown".
    pub brand: String,
    /// Page title.
    pub title: String,
    /// Excerpt.
    pub snippet: String,
    /// Page URL.
    pub url: String,
    /// Publishing site.
    pub site_name: Option<String>,
}

/// Response of `POST /api/brand-search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSearchResponse {
    /// Always true; failures use the error shape.
    pub success: bool,
    /// Search engine summary.
    pub summary: String,
    /// Tagged hits.
    pub search_results: Vec<TaggedResult>,
    /// Products extracted by the model; empty when extraction failed.
    pub structured_products: Vec<ProductSpec>,
    /// Number of hits.
    pub total_count: usize,
}

/// `POST /api/brand-search`
pub async fn brand_search(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<BrandSearchRequest>,
) -> ApiResult<Json<BrandSearchResponse>> {
    let input = body.validate()?;
    let catalog = state.data.brand_catalog().await?;

    let query = search_query(&input, &catalog);
    tracing::info!(query = %query, "Brand search");
    let response = state.search.search(&query, RESULT_COUNT).await?;

    let search_results: Vec<TaggedResult> = response
        .web_items
        .into_iter()
        .map(|item| tag(&catalog, item))
        .collect();

    let structured_products = if search_results.is_empty() {
        Vec::new()
    } else {
        extract_products(&state, &input, &search_results).await
    };

    Ok(Json(BrandSearchResponse {
        success: true,
        summary: response.summary,
        total_count: search_results.len(),
        search_results,
        structured_products,
    }))
}

/// Query text for `input`, restricted to the catalog's brands.
pub fn search_query(input: &BrandSearchInput, catalog: &BrandCatalog) -> String {
    let base = match input.standard.basis() {
        RangeBasis::Height => format!(
            "child car seat {} ECE R129 i-Size specifications review",
            input.range
        ),
        RangeBasis::Weight => format!(
            "child car seat {} FMVSS 213 ECE R44 specifications review",
            input.range
        ),
    };
    let brands = catalog.brand_names();
    if brands.is_empty() {
        base
    } else {
        format!("{base} ({})", brands.join(" OR "))
    }
}

fn tag(catalog: &BrandCatalog, item: SearchItem) -> TaggedResult {
    let site = item.site_name.as_deref().unwrap_or_default();
    let brand = catalog
        .identify_brand(&[item.title.as_str(), item.snippet.as_str(), site])
        .map(str::to_string)
        .or_else(|| item.site_name.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "Unknown".to_string());
    TaggedResult {
        brand,
        title: item.title,
        snippet: item.snippet,
        url: item.url,
        site_name: item.site_name,
    }
}

/// Asks the model for structured products.
///
/// A failed call or an unusable reply yields no products; the search hits
/// are still returned.
async fn extract_products(
    state: &AppState,
    input: &BrandSearchInput,
    results: &[TaggedResult],
) -> Vec<ProductSpec> {
    let listing = results
        .iter()
        .map(|r| {
            format!(
                "Brand: {}\nTitle: {}\nSummary: {}\nURL: {}",
                r.brand, r.title, r.snippet, r.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    let prompt = format!(
        "Standard: {}\nRange: {}\n\nSearch results:\n\n{listing}",
        input.standard.display_name(),
        input.range
    );
    let request = CompletionRequest::new(vec![Message::user(prompt)])
        .with_system_prompt(prompts::BRAND_EXTRACTION)
        .with_temperature(EXTRACTION_TEMPERATURE);

    let reply = match state.llm.complete(request).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, "Product extraction call failed");
            return Vec::new();
        }
    };
    tracing::debug!(tokens = reply.tokens_used.total(), "Product extraction finished");
    extract_json_array::<Vec<ProductSpec>>(&reply.content).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Product extraction returned malformed JSON");
        Vec::new()
    })
}
