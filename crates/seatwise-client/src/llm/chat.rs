//! OpenAI-compatible `/chat/completions` provider.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use super::sse::sse_tokens;
use super::types::{CompletionRequest, CompletionResponse, Message, TokenUsage};
use super::{LlmProvider, TokenStream};
use crate::error::status_error;
use crate::{Error, Result};

const SERVICE: &str = "llm";

/// Connection settings for a chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatProviderConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Default model.
    pub model: String,
    /// Default sampling temperature.
    pub temperature: f32,
    /// Per-call deadline. For streams it bounds the gap between chunks.
    pub timeout: Duration,
}

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
#[derive(Debug, Clone)]
pub struct ChatProvider {
    http: reqwest::Client,
    config: ChatProviderConfig,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

impl ChatProvider {
    /// Builds a provider with its own connection pool.
    pub fn new(config: ChatProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .read_timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> ChatBody<'a> {
        ChatBody {
            model: request.model.as_deref().unwrap_or(&self.config.model),
            messages: request.full_messages(),
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens,
            stream,
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<reqwest::Response> {
        let mut builder = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&self.body(request, stream));
        if !stream {
            builder = builder.timeout(self.config.timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, self.config.timeout, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let response = self.send(&request, false).await?;
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, self.config.timeout, e))?;

        let content = value
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| Error::decode(SERVICE, "missing choices[0].message.content"))?
            .to_string();

        let usage_field = |name: &str| {
            value
                .pointer(&format!("/usage/{name}"))
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0)
        };
        let tokens_used = TokenUsage {
            input: usage_field("prompt_tokens"),
            output: usage_field("completion_tokens"),
        };
        let model = value
            .get("model")
            .and_then(|m| m.as_str())
            .unwrap_or(&self.config.model)
            .to_string();

        tracing::debug!(model = %model, tokens = tokens_used.total(), "Completion finished");
        Ok(CompletionResponse {
            content,
            tokens_used,
            model,
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<TokenStream> {
        let response = self.send(&request, true).await?;
        tracing::debug!(model = %self.body(&request, true).model, "Completion stream opened");
        Ok(sse_tokens(response.bytes_stream()))
    }

    fn name(&self) -> &str {
        "chat"
    }
}
