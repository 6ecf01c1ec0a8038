//! Exponential-backoff retries around another provider.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;

use super::types::{CompletionRequest, CompletionResponse};
use super::{LlmProvider, TokenStream};
use crate::{Error, Result};

/// Retries transient failures of the wrapped provider.
///
/// Only the opening of a stream is retried. Once deltas have reached the
/// caller a broken stream is reported, not replayed.
pub struct RetryWrapper {
    inner: Arc<dyn LlmProvider>,
    backoff: ExponentialBuilder,
}

impl RetryWrapper {
    /// Wraps `inner` with three retries starting at 500ms.
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self::with_max_retries(inner, 3)
    }

    /// Wraps `inner` with `max_retries` retries.
    pub fn with_max_retries(inner: Arc<dyn LlmProvider>, max_retries: usize) -> Self {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(8))
            .with_max_times(max_retries)
            .with_jitter();
        Self { inner, backoff }
    }

    fn log_retry(&self, err: &Error, delay: Duration) {
        tracing::warn!(
            provider = self.inner.name(),
            error = %err,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Retrying LLM call"
        );
    }
}

#[async_trait]
impl LlmProvider for RetryWrapper {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        (|| self.inner.complete(request.clone()))
            .retry(self.backoff)
            .when(Error::is_retryable)
            .notify(|err, delay| self.log_retry(err, delay))
            .await
    }

    async fn stream(&self, request: CompletionRequest) -> Result<TokenStream> {
        (|| self.inner.stream(request.clone()))
            .retry(self.backoff)
            .when(Error::is_retryable)
            .notify(|err, delay| self.log_retry(err, delay))
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
