//! Scripted provider for tests and offline runs.

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{CompletionRequest, CompletionResponse, TokenUsage};
use super::{LlmProvider, TokenStream};
use crate::{Error, Result};

/// Returns canned responses in order, repeating the last one.
///
/// Streams split the response after each whitespace run so callers see
/// several deltas per response.
#[derive(Debug)]
pub struct MockLlmProvider {
    responses: Vec<String>,
    next: AtomicUsize,
    fail_with: Option<String>,
    stream_fail_after: Option<usize>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmProvider {
    /// Creates a mock answering with `responses` in order.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            next: AtomicUsize::new(0),
            fail_with: None,
            stream_fail_after: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always answers `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Creates a mock whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let mut mock = Self::new(Vec::new());
        mock.fail_with = Some(message.into());
        mock
    }

    /// Makes streams break with an error after `tokens` deltas.
    pub fn with_stream_failure_after(mut self, tokens: usize) -> Self {
        self.stream_fail_after = Some(tokens);
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests().len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn next_response(&self, request: CompletionRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        if let Some(message) = &self.fail_with {
            return Err(Error::Mock(message.clone()));
        }
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .ok_or_else(|| Error::Mock("no responses configured".to_string()))
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let content = self.next_response(request)?;
        let output = u32::try_from(content.split_whitespace().count()).unwrap_or(u32::MAX);
        Ok(CompletionResponse {
            content,
            tokens_used: TokenUsage { input: 0, output },
            model: "mock".to_string(),
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<TokenStream> {
        let content = self.next_response(request)?;
        let mut items: Vec<Result<String>> = split_tokens(&content).into_iter().map(Ok).collect();
        if let Some(n) = self.stream_fail_after {
            items.truncate(n);
            items.push(Err(Error::Stream("mock stream interrupted".to_string())));
        }
        Ok(futures::stream::iter(items).boxed())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_space = false;
    for c in text.chars() {
        if !c.is_whitespace() && in_space {
            tokens.push(std::mem::take(&mut current));
        }
        in_space = c.is_whitespace();
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
