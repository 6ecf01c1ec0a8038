//! Image generation collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::status_error;
use crate::{Error, Result};

const SERVICE: &str = "image";

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    /// Where the image can be downloaded.
    pub url: String,
    /// Model that produced it.
    pub model: String,
    /// Unix timestamp of generation.
    pub created: i64,
}

/// An image generation backend.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates one image for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// Connection settings for the image endpoint.
#[derive(Debug, Clone)]
pub struct HttpImageConfig {
    /// Base URL; requests go to `{base_url}/images/generations`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Output size, e.g. "2K".
    pub size: String,
    /// Per-call deadline.
    pub timeout: Duration,
}

/// Client for an OpenAI-style image generation endpoint.
#[derive(Debug, Clone)]
pub struct HttpImageProvider {
    http: reqwest::Client,
    config: HttpImageConfig,
}

#[derive(Serialize)]
struct ImageBody<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    watermark: bool,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

impl HttpImageProvider {
    /// Builds a client.
    pub fn new(config: HttpImageConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl ImageProvider for HttpImageProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let url = format!(
            "{}/images/generations",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&ImageBody {
                model: &self.config.model,
                prompt,
                size: &self.config.size,
                watermark: false,
                response_format: "url",
            })
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, self.config.timeout, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let reply: ImageReply = response
            .json()
            .await
            .map_err(|e| Error::decode(SERVICE, e.to_string()))?;
        let url = reply
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| Error::decode(SERVICE, "no image URL returned"))?;

        Ok(GeneratedImage {
            url,
            model: reply.model.unwrap_or_else(|| self.config.model.clone()),
            created: reply.created,
        })
    }
}

/// Returns a fixed image and remembers the last prompt.
#[derive(Debug, Default)]
pub struct MockImageProvider {
    url: Option<String>,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl MockImageProvider {
    /// Creates a mock answering with `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Creates a mock that returns no image.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        *self
            .last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(prompt.to_string());
        let url = self
            .url
            .clone()
            .ok_or_else(|| Error::decode(SERVICE, "no image URL returned"))?;
        Ok(GeneratedImage {
            url,
            model: "mock-image".to_string(),
            created: 0,
        })
    }
}
