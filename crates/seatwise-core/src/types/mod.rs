//! Core types for Seatwise.

mod group;
mod ids;
mod proptests;
mod range;
mod reports;
mod standard;

pub use group::{CrashTest, GroupError, RangeGroup, RawGroup, Requirements};
pub use ids::RequestId;
pub use range::{Interval, RangeParseError, parse_range};
pub use reports::{
    AuditIssue, AuditResult, DataValidationResult, FALLBACK_VALIDATION_SCORE, IssueLevel,
    ProductSpec, ValidationIssue,
};
pub use standard::{RangeBasis, StandardId};
