//! Route handlers, one module per endpoint family.

pub mod assistant;
pub mod audit;
pub mod brand_search;
pub mod consult;
pub mod data;
pub mod design;
pub mod dimensions;
pub mod health;
pub mod image;
pub mod local_advice;
pub mod search;
pub mod validate;

use futures::StreamExt;
use seatwise_client::{CompletionRequest, LlmProvider};

/// Collects a whole streamed completion into one string.
pub(crate) async fn drain(
    llm: &dyn LlmProvider,
    request: CompletionRequest,
) -> seatwise_client::Result<String> {
    let mut tokens = llm.stream(request).await?;
    let mut text = String::new();
    while let Some(token) = tokens.next().await {
        text.push_str(&token?);
    }
    Ok(text)
}
