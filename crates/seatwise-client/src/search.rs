//! Web search collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::status_error;
use crate::{Error, Result};

const SERVICE: &str = "search";

/// One web result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Page title.
    #[serde(default)]
    pub title: String,
    /// Page URL.
    #[serde(default)]
    pub url: String,
    /// Text excerpt.
    #[serde(default)]
    pub snippet: String,
    /// Publishing site, if known.
    #[serde(default)]
    pub site_name: Option<String>,
}

/// Results of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Search engine summary of the results.
    #[serde(default)]
    pub summary: String,
    /// Ranked results.
    #[serde(default, alias = "items")]
    pub web_items: Vec<SearchItem>,
}

/// A web search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs `query`, returning at most `count` results.
    async fn search(&self, query: &str, count: usize) -> Result<SearchResponse>;
}

/// Connection settings for the search endpoint.
#[derive(Debug, Clone)]
pub struct HttpSearchConfig {
    /// Base URL; queries are posted to `{base_url}/search`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Per-query deadline.
    pub timeout: Duration,
}

/// JSON-over-HTTP search client.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    http: reqwest::Client,
    config: HttpSearchConfig,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    query: &'a str,
    count: usize,
    with_summary: bool,
}

impl HttpSearchProvider {
    /// Builds a client.
    pub fn new(config: HttpSearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str, count: usize) -> Result<SearchResponse> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&SearchBody {
                query,
                count,
                with_summary: true,
            })
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, self.config.timeout, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let mut body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::decode(SERVICE, e.to_string()))?;
        body.web_items.truncate(count);
        tracing::debug!(query, results = body.web_items.len(), "Search finished");
        Ok(body)
    }
}

/// Returns the same canned results for every query and records queries.
#[derive(Debug, Default)]
pub struct MockSearchProvider {
    response: SearchResponse,
    fail_with: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    /// Creates a mock answering with `items`.
    pub fn new(items: Vec<SearchItem>) -> Self {
        Self {
            response: SearchResponse {
                summary: String::new(),
                web_items: items,
            },
            ..Self::default()
        }
    }

    /// Creates a mock whose every query fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, count: usize) -> Result<SearchResponse> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query.to_string());
        if let Some(message) = &self.fail_with {
            return Err(Error::Mock(message.clone()));
        }
        let mut response = self.response.clone();
        response.web_items.truncate(count);
        Ok(response)
    }
}
