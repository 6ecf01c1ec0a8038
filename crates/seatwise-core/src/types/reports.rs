//! Structured results returned by the audit and data-validation models.
//!
//! Both carry a fixed fallback used when the model's output cannot be
//! parsed, so a malformed reply never reaches the client as an error.

use serde::{Deserialize, Deserializer, Serialize};

/// Score reported when the validation model's reply is unusable.
pub const FALLBACK_VALIDATION_SCORE: u8 = 70;

/// Reads a 0-100 score sent as an integer or a float.
///
/// Fractions are rounded and out-of-range values clamped.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// One problem found by the regulatory audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    /// Issue category, e.g. "citation error" or "missing disclaimer".
    #[serde(rename = "type", default)]
    pub kind: String,
    /// "high", "medium" or "low".
    #[serde(default)]
    pub severity: String,
    /// What is wrong.
    #[serde(default)]
    pub description: String,
    /// How to fix it.
    #[serde(default)]
    pub suggestion: String,
}

/// Outcome of auditing a design report against a standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Whether the report may be used as-is.
    pub audit_passed: bool,
    /// 0-100.
    #[serde(deserialize_with = "lenient_score")]
    pub audit_score: u8,
    /// Problems found.
    #[serde(default)]
    pub issues: Vec<AuditIssue>,
    /// Overall verdict.
    #[serde(default)]
    pub summary: String,
    /// Follow-up actions.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AuditResult {
    /// Result substituted when the audit reply contains no usable JSON.
    pub fn fallback() -> Self {
        Self {
            audit_passed: false,
            audit_score: 0,
            issues: vec![AuditIssue {
                kind: "system error".to_string(),
                severity: "high".to_string(),
                description: "The audit result could not be parsed".to_string(),
                suggestion: "Check the audit model's output format".to_string(),
            }],
            summary: "Audit failed: no audit result could be read".to_string(),
            recommendations: vec![
                "Retry the audit".to_string(),
                "Contact technical support".to_string(),
            ],
        }
    }
}

/// Severity of a data-validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// The data is wrong.
    Error,
    /// The data is questionable or incomplete.
    Warning,
    /// Informational note.
    Info,
    /// Any level the model invents, e.g. "critical".
    #[serde(other)]
    Other,
}

/// One finding from validating local reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity.
    #[serde(rename = "type")]
    pub level: IssueLevel,
    /// Data category, e.g. "injury criteria" or "test dummies".
    #[serde(default)]
    pub category: String,
    /// What is wrong.
    #[serde(default)]
    pub description: String,
    /// How to fix it.
    #[serde(default)]
    pub suggestion: String,
}

/// Outcome of cross-checking local data against a standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidationResult {
    /// 0-100, 100 meaning fully accurate.
    #[serde(deserialize_with = "lenient_score")]
    pub validation_score: u8,
    /// Overall assessment.
    #[serde(default)]
    pub validation_report: String,
    /// Findings.
    #[serde(default)]
    pub issues: Vec<ValidationIssue>,
}

impl DataValidationResult {
    /// Result substituted when the validation reply contains no usable JSON.
    pub fn fallback() -> Self {
        Self {
            validation_score: FALLBACK_VALIDATION_SCORE,
            validation_report:
                "The automated validation result could not be parsed; review the local data manually."
                    .to_string(),
            issues: vec![ValidationIssue {
                level: IssueLevel::Warning,
                category: "validation system".to_string(),
                description: "Automated validation failed; data accuracy was not verified"
                    .to_string(),
                suggestion: "Manually check the data sources and values".to_string(),
            }],
        }
    }
}

/// Product parameters extracted from brand search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSpec {
    /// Brand name.
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Stature range.
    pub height_range: String,
    /// Mass range.
    pub weight_range: String,
    /// Seat mass.
    pub seat_weight: String,
    /// ISOFIX / LATCH / belt.
    pub installation: String,
    /// Side impact protection.
    pub side_impact: String,
    /// Rear, forward or both.
    pub orientation: String,
    /// Recline support.
    pub recline: String,
    /// ADAC rating.
    pub adac_rating: String,
    /// Consumer Reports rating.
    pub cr_rating: String,
    /// Price range.
    pub price_range: String,
}
