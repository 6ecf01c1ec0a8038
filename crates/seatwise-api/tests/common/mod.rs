//! Shared test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower::ServiceExt;

use seatwise_api::{AppState, SeatwiseConfig, build_router};
use seatwise_client::{
    CompletionRequest, CompletionResponse, ImageProvider, LlmProvider, MockImageProvider,
    MockLlmProvider, MockSearchProvider, SearchItem, SearchProvider, TokenStream,
};

/// The tables shipped with the repository.
pub fn shipped_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Test configuration: shipped tables, no delay between relay chunks.
pub fn test_config() -> SeatwiseConfig {
    let mut config = SeatwiseConfig::default();
    config.data.dir = shipped_data_dir();
    config.relay.chunk_delay_ms = 0;
    config.relay.chunk_size = 20;
    config
}

/// Test harness holding the mocks so tests can inspect them afterwards.
pub struct TestHarness {
    pub llm: Arc<MockLlmProvider>,
    pub search: Arc<MockSearchProvider>,
    pub image: Arc<MockImageProvider>,
    pub config: SeatwiseConfig,
}

impl TestHarness {
    /// Harness whose model always answers "Mock reply."
    pub fn new() -> Self {
        Self::with_llm(MockLlmProvider::with_response("Mock reply."))
    }

    /// Harness with canned model responses, served in order.
    pub fn with_responses(responses: Vec<&str>) -> Self {
        Self::with_llm(MockLlmProvider::new(
            responses.into_iter().map(str::to_string).collect(),
        ))
    }

    /// Harness with a specific model mock.
    pub fn with_llm(llm: MockLlmProvider) -> Self {
        Self {
            llm: Arc::new(llm),
            search: Arc::new(MockSearchProvider::new(search_items())),
            image: Arc::new(MockImageProvider::new("https://img.example.com/seat.png")),
            config: test_config(),
        }
    }

    /// Replaces the search mock.
    pub fn search(mut self, search: MockSearchProvider) -> Self {
        self.search = Arc::new(search);
        self
    }

    /// Points the harness at another data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data.dir = dir.into();
        self
    }

    /// Application state over the harness mocks.
    pub fn state(&self) -> AppState {
        AppState::new(
            self.config.clone(),
            self.llm.clone(),
            self.search.clone(),
            self.image.clone(),
        )
    }

    /// Sends a POST with a JSON body through a fresh router.
    pub async fn post(&self, path: &str, body: Value) -> Response {
        send(self.state(), post_request(path, body)).await
    }

    /// Sends a GET through a fresh router.
    pub async fn get(&self, path: &str) -> Response {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        send(self.state(), request).await
    }
}

/// Routes one request through the full router.
pub async fn send(state: AppState, request: Request<Body>) -> Response {
    build_router(state).oneshot(request).await.unwrap()
}

/// A JSON POST request.
pub fn post_request(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Reads the whole body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads the whole body as JSON, asserting the status first.
pub async fn json_body(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Splits an SSE body into its `data:` payloads.
pub fn sse_payloads(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter(|frame| !frame.is_empty())
        .map(|frame| {
            frame
                .strip_prefix("data: ")
                .expect("every frame is a data line")
                .to_string()
        })
        .collect()
}

/// Parses every payload except the final `[DONE]`.
pub fn sse_events(body: &str) -> Vec<Value> {
    sse_payloads(body)
        .into_iter()
        .filter(|p| p != "[DONE]")
        .map(|p| serde_json::from_str(&p).unwrap())
        .collect()
}

/// Concatenated `content` of every event.
pub fn sse_content(body: &str) -> String {
    sse_events(body)
        .iter()
        .filter_map(|e| e["content"].as_str().map(str::to_string))
        .collect()
}

/// Two results mentioning catalog brands.
pub fn search_items() -> Vec<SearchItem> {
    vec![
        SearchItem {
            title: "Cybex Sirona T i-Size review".to_string(),
            url: "https://reviews.example.com/cybex-sirona".to_string(),
            snippet: "Rear-facing 45-105 cm, ISOFIX with support leg.".to_string(),
            site_name: Some("reviews.example.com".to_string()),
        },
        SearchItem {
            title: "Best toddler seats of the year".to_string(),
            url: "https://shop.example.com/toddler".to_string(),
            snippet: "Our pick for extended rear-facing.".to_string(),
            site_name: Some("shop.example.com".to_string()),
        },
    ]
}

// ============================================================================
// Cancellation probe
// ============================================================================

/// Sets its flag when dropped.
pub struct DropFlag(pub Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// A model whose stream never yields and reports when it is dropped.
pub struct HangingLlm {
    pub dropped: Arc<AtomicBool>,
}

impl HangingLlm {
    pub fn new() -> Self {
        Self {
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl LlmProvider for HangingLlm {
    async fn complete(&self, _request: CompletionRequest) -> seatwise_client::Result<CompletionResponse> {
        Err(seatwise_client::Error::Mock("complete is not scripted".to_string()))
    }

    async fn stream(&self, _request: CompletionRequest) -> seatwise_client::Result<TokenStream> {
        use futures::StreamExt;
        let guard = DropFlag(self.dropped.clone());
        let stream = futures::stream::once(async move {
            let _guard = guard;
            futures::future::pending::<seatwise_client::Result<String>>().await
        });
        Ok(stream.boxed())
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

/// State whose model hangs, with default search and image mocks.
pub fn hanging_state(llm: Arc<HangingLlm>) -> AppState {
    let search: Arc<dyn SearchProvider> = Arc::new(MockSearchProvider::new(Vec::new()));
    let image: Arc<dyn ImageProvider> = Arc::new(MockImageProvider::empty());
    AppState::new(test_config(), llm, search, image)
}
