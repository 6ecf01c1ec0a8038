#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Seatwise upstream clients
//!
//! Chat-completion, web-search and image-generation collaborators, each
//! behind a trait with an HTTP implementation and a scripted mock.

pub mod error;
pub mod image;
pub mod llm;
pub mod search;

pub use error::{Error, Result};
pub use image::{GeneratedImage, HttpImageConfig, HttpImageProvider, ImageProvider, MockImageProvider};
pub use llm::{
    ChatProvider, ChatProviderConfig, CompletionRequest, CompletionResponse, LlmProvider, Message,
    MockLlmProvider, RetryWrapper, Role, TokenStream,
};
pub use search::{
    HttpSearchConfig, HttpSearchProvider, MockSearchProvider, SearchItem, SearchProvider,
    SearchResponse,
};
