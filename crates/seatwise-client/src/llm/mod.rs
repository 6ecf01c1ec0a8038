//! Chat-completion providers.
//!
//! [`LlmProvider`] is the seam between request handlers and the model
//! backend. Handlers hold an `Arc<dyn LlmProvider>` and never know whether
//! they are talking to an OpenAI-compatible endpoint, a retry wrapper or a
//! scripted mock.

mod chat;
mod mock;
mod retry;
mod sse;
mod types;

pub use chat::{ChatProvider, ChatProviderConfig};
pub use mock::MockLlmProvider;
pub use retry::RetryWrapper;
pub use sse::{SseDecoder, SseFrame, sse_tokens};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, TokenUsage};

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::Result;

/// Incremental text deltas from a streaming completion.
///
/// Dropping the stream abandons the upstream request.
pub type TokenStream = BoxStream<'static, Result<String>>;

/// A chat-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Runs a completion to the end and returns the whole text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Starts a completion and returns its text deltas as they arrive.
    async fn stream(&self, request: CompletionRequest) -> Result<TokenStream>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
