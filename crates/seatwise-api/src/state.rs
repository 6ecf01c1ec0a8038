//! Shared, read-only handler state.

use std::sync::Arc;

use seatwise_client::{
    ChatProvider, ChatProviderConfig, HttpImageConfig, HttpImageProvider, HttpSearchConfig,
    HttpSearchProvider, ImageProvider, LlmProvider, MockImageProvider, MockLlmProvider,
    MockSearchProvider, RetryWrapper, SearchItem, SearchProvider,
};
use seatwise_core::{DataDir, Result};

use crate::config::SeatwiseConfig;

/// Everything a handler needs. Cloned per request; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration.
    pub config: Arc<SeatwiseConfig>,
    /// Reference tables.
    pub data: DataDir,
    /// Chat-completion backend.
    pub llm: Arc<dyn LlmProvider>,
    /// Web search backend.
    pub search: Arc<dyn SearchProvider>,
    /// Image generation backend.
    pub image: Arc<dyn ImageProvider>,
}

impl AppState {
    /// Assembles state from explicit collaborators.
    pub fn new(
        config: SeatwiseConfig,
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchProvider>,
        image: Arc<dyn ImageProvider>,
    ) -> Self {
        Self {
            data: DataDir::new(config.data.dir.clone()),
            config: Arc::new(config),
            llm,
            search,
            image,
        }
    }

    /// Builds real or mock collaborators as `config` asks.
    pub fn from_config(config: SeatwiseConfig) -> Result<Self> {
        if config.mock_upstream {
            tracing::info!("Using mock upstream collaborators");
            return Ok(Self::new(
                config,
                Arc::new(MockLlmProvider::with_response(MOCK_REPLY)),
                Arc::new(MockSearchProvider::new(mock_search_items())),
                Arc::new(MockImageProvider::new(MOCK_IMAGE_URL)),
            ));
        }

        let chat = ChatProvider::new(ChatProviderConfig {
            base_url: config.llm.base_url.clone(),
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            timeout: config.llm.timeout(),
        })?;
        let llm: Arc<dyn LlmProvider> = Arc::new(RetryWrapper::with_max_retries(
            Arc::new(chat),
            config.llm.max_retries,
        ));

        let search = HttpSearchProvider::new(HttpSearchConfig {
            base_url: config.search.base_url.clone(),
            api_key: config.search.api_key.clone(),
            timeout: config.search.timeout(),
        })?;

        let image = HttpImageProvider::new(HttpImageConfig {
            base_url: config.image.base_url.clone(),
            api_key: config.image.api_key.clone(),
            model: config.image.model.clone(),
            size: config.image.size.clone(),
            timeout: config.image.timeout(),
        })?;

        tracing::info!(model = %config.llm.model, base_url = %config.llm.base_url, "Using live upstream collaborators");
        Ok(Self::new(config, llm, Arc::new(search), Arc::new(image)))
    }
}

const MOCK_REPLY: &str = "This is a mock response. Set mock_upstream = false and configure \
                          llm.api_key to talk to a real model.";

const MOCK_IMAGE_URL: &str = "https://example.com/seatwise-mock.png";

fn mock_search_items() -> Vec<SearchItem> {
    vec![SearchItem {
        title: "Mock result: i-Size car seat specifications".to_string(),
        url: "https://example.com/mock-result".to_string(),
        snippet: "Placeholder search result returned in mock mode.".to_string(),
        site_name: Some("example.com".to_string()),
    }]
}
