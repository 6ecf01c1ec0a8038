#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Seatwise Core Library
//!
//! Reference tables, range matching, advice rendering and dimension
//! estimates for child restraint design.

pub mod advice;
pub mod dimensions;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod tables;
pub mod types;

// Re-exports for convenience
pub use advice::{KnowledgeContext, default_advice, format_advice, format_knowledge};
pub use error::{Error, Result};
pub use extract::{ExtractError, extract_json, extract_json_array};
pub use matcher::{groups_at_midpoint, match_group, match_range_str};
pub use tables::{DataDir, TableName};
pub use types::{
    AuditResult, DataValidationResult, Interval, ProductSpec, RangeBasis, RangeGroup, RequestId,
    StandardId, parse_range,
};
