#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Seatwise HTTP service
//!
//! Axum routes over the reference tables and the upstream LLM, search and
//! image collaborators.

pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod relay;
pub mod server;
pub mod state;
pub mod validation;

pub use config::{ConfigManager, SeatwiseConfig};
pub use error::{ApiError, ApiResult};
pub use server::{build_router, serve};
pub use state::AppState;
