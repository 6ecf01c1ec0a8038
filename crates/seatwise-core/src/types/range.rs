//! Closed numeric intervals and human-readable range strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed interval `[min, max]` of centimetres or kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

/// Why a range string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RangeParseError {
    /// No `-` separator between the two bounds.
    #[error("range '{0}' has no '-' separator")]
    MissingSeparator(String),
    /// One of the bounds is not a finite number.
    #[error("range '{0}' has a non-numeric bound")]
    InvalidNumber(String),
    /// Lower bound exceeds upper bound.
    #[error("range '{0}' is reversed")]
    Reversed(String),
}

impl Interval {
    /// Creates an interval, rejecting NaN/infinite bounds and `min > max`.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// Returns `true` if the two closed intervals share at least one point.
    ///
    /// Touching endpoints count: `[40, 95]` overlaps `[95, 105]`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.max < other.min || self.min > other.max)
    }

    /// Returns `true` if `value` lies within the interval (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Centre point of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for Interval {
    type Err = RangeParseError;

    /// Parses strings like `"40-105cm"`, `"9.5-11kg"` or `"40 cm - 105 cm"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| RangeParseError::MissingSeparator(s.to_string()))?;

        let min = parse_bound(lo).ok_or_else(|| RangeParseError::InvalidNumber(s.to_string()))?;
        let max = parse_bound(hi).ok_or_else(|| RangeParseError::InvalidNumber(s.to_string()))?;

        Interval::new(min, max).ok_or_else(|| RangeParseError::Reversed(s.to_string()))
    }
}

/// Parses a range string, returning `None` when it is not a usable range.
///
/// Callers treat `None` as "no match".
pub fn parse_range(s: &str) -> Option<Interval> {
    s.parse().ok()
}

fn parse_bound(token: &str) -> Option<f64> {
    let number = token
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic())
        .trim();
    let value: f64 = number.parse().ok()?;
    value.is_finite().then_some(value)
}
