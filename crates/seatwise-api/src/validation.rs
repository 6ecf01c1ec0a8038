//! Request bodies and the checks run on them before any upstream work.
//!
//! Bodies deserialize leniently (numbers may arrive as strings, fields may be
//! missing) and are then turned into validated inputs. Every rule violation
//! is an [`Error::Validation`] naming the offending field.

use serde::Deserialize;
use serde_json::Value;

use seatwise_client::{Message, Role};
use seatwise_core::{Error, Interval, RangeBasis, Result, StandardId, parse_range};

use crate::prompts::DesignBrief;

/// Heights accepted by the consultant, in cm.
pub const CONSULT_HEIGHT_LIMITS: (f64, f64) = (0.0, 200.0);

const DEFAULT_HEIGHT: (f64, f64) = (40.0, 150.0);
const DEFAULT_WEIGHT: (f64, f64) = (0.0, 50.0);

// ============================================================================
// Field helpers
// ============================================================================

/// Reads a number sent either as a JSON number or a numeric string.
///
/// `null`, a missing field and a blank string all count as absent.
pub fn number_field(value: Option<&Value>, field: &str) -> Result<Option<f64>> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::validation_field(field, format!("{field} must be a number"))),
    }
}

/// A trimmed, non-blank string or `None`.
pub fn text_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn required_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    text_field(value).ok_or_else(|| Error::validation_field(field, format!("{field} is required")))
}

fn optional_standard(value: Option<&str>) -> Result<Option<StandardId>> {
    text_field(value).map(str::parse::<StandardId>).transpose()
}

// ============================================================================
// Consultant
// ============================================================================

/// Body of `POST /api/r129-consultant`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultRequest {
    /// Child stature in cm.
    #[serde(default)]
    pub height: Option<Value>,
    /// Standard; defaults to R129.
    #[serde(default)]
    pub standard: Option<String>,
}

/// Validated consultant input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsultInput {
    /// Stature in cm.
    pub height: f64,
    /// Standard whose prompt to use.
    pub standard: StandardId,
}

impl ConsultRequest {
    /// Checks the height is present and plausible.
    pub fn validate(&self) -> Result<ConsultInput> {
        let height = number_field(self.height.as_ref(), "height")?
            .ok_or_else(|| Error::validation_field("height", "height is required"))?;
        let (lo, hi) = CONSULT_HEIGHT_LIMITS;
        if !(lo..=hi).contains(&height) {
            return Err(Error::validation_field(
                "height",
                format!("height must be between {lo} and {hi} cm"),
            ));
        }
        let standard = optional_standard(self.standard.as_deref())?.unwrap_or(StandardId::EceR129);
        Ok(ConsultInput { height, standard })
    }
}

// ============================================================================
// Comprehensive design
// ============================================================================

/// Body of `POST /api/comprehensive-design`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    /// Minimum stature, cm.
    #[serde(default)]
    pub min_height: Option<Value>,
    /// Maximum stature, cm.
    #[serde(default)]
    pub max_height: Option<Value>,
    /// Minimum mass, kg.
    #[serde(default)]
    pub min_weight: Option<Value>,
    /// Maximum mass, kg.
    #[serde(default)]
    pub max_weight: Option<Value>,
    /// Target standard.
    #[serde(default)]
    pub standard: Option<String>,
}

impl DesignRequest {
    /// Requires a complete height or weight range plus a standard, then fills
    /// the other range with defaults.
    pub fn validate(&self) -> Result<(StandardId, DesignBrief)> {
        let min_h = number_field(self.min_height.as_ref(), "minHeight")?;
        let max_h = number_field(self.max_height.as_ref(), "maxHeight")?;
        let min_w = number_field(self.min_weight.as_ref(), "minWeight")?;
        let max_w = number_field(self.max_weight.as_ref(), "maxWeight")?;

        let height_given = min_h.is_some() && max_h.is_some();
        let weight_given = min_w.is_some() && max_w.is_some();
        if !height_given && !weight_given {
            return Err(Error::validation(
                "a height range (minHeight, maxHeight) or a weight range (minWeight, maxWeight) is required",
            ));
        }

        let named = required_text(self.standard.as_deref(), "standard")?;
        let standard: StandardId = named.parse()?;

        let height = (min_h.unwrap_or(DEFAULT_HEIGHT.0), max_h.unwrap_or(DEFAULT_HEIGHT.1));
        let weight = (min_w.unwrap_or(DEFAULT_WEIGHT.0), max_w.unwrap_or(DEFAULT_WEIGHT.1));
        for (field, (lo, hi)) in [("height", height), ("weight", weight)] {
            if lo > hi {
                return Err(Error::validation_field(
                    field,
                    format!("{field} range minimum exceeds maximum"),
                ));
            }
        }

        Ok((
            standard,
            DesignBrief {
                height,
                weight,
                standard: named.to_string(),
                height_given,
                weight_given,
            },
        ))
    }
}

// ============================================================================
// Design assistant
// ============================================================================

/// Body of `POST /api/design-assistant`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    /// Conversation so far.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Product category being designed.
    #[serde(default)]
    pub product_id: Option<String>,
}

impl AssistantRequest {
    /// Requires a category and a conversation without system turns.
    pub fn validate(&self) -> Result<(&str, &[Message])> {
        let product = required_text(self.product_id.as_deref(), "productId")?;
        if self.messages.is_empty() {
            return Err(Error::validation_field("messages", "messages must not be empty"));
        }
        if self.messages.iter().any(|m| m.role == Role::System) {
            return Err(Error::validation_field(
                "messages",
                "messages may only contain user and assistant turns",
            ));
        }
        Ok((product, &self.messages))
    }
}

// ============================================================================
// Local advice, brand search, data validation
// ============================================================================

/// A standard plus the range string that matches its basis.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    /// Standard to look up.
    pub standard: StandardId,
    /// Range as sent, e.g. "95-100cm".
    pub text: String,
    /// Parsed range; `None` when the text is not a usable range.
    pub interval: Option<Interval>,
}

/// Body of `POST /api/local-advice`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAdviceRequest {
    /// Standard to look up.
    #[serde(default)]
    pub standard: Option<String>,
    /// Stature range, for R129.
    #[serde(default)]
    pub height_range: Option<String>,
    /// Mass range, for FMVSS 213 and R44.
    #[serde(default)]
    pub weight_range: Option<String>,
}

impl LocalAdviceRequest {
    /// Requires the range matching the standard's basis.
    ///
    /// An unparsable range is accepted and later falls through to the
    /// default advice.
    pub fn validate(&self) -> Result<RangeQuery> {
        let standard: StandardId = required_text(self.standard.as_deref(), "standard")?.parse()?;
        let (field, text) = match standard.basis() {
            RangeBasis::Height => ("heightRange", self.height_range.as_deref()),
            RangeBasis::Weight => ("weightRange", self.weight_range.as_deref()),
        };
        let text = text_field(text).ok_or_else(|| {
            Error::validation_field(
                field,
                format!("{} is keyed on {}; {field} is required", standard, standard.basis()),
            )
        })?;
        Ok(RangeQuery {
            standard,
            text: text.to_string(),
            interval: parse_range(text),
        })
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchRequest {
    /// Requires a non-blank query.
    pub fn validate(&self) -> Result<&str> {
        required_text(self.query.as_deref(), "query")
    }
}

/// Body of `POST /api/brand-search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSearchRequest {
    /// Stature range.
    #[serde(default)]
    pub height_range: Option<String>,
    /// Mass range.
    #[serde(default)]
    pub weight_range: Option<String>,
    /// Standard.
    #[serde(default)]
    pub standard: Option<String>,
}

/// Validated brand search input.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandSearchInput {
    /// Standard; R129 when unspecified and a height range is given.
    pub standard: StandardId,
    /// Range text placed in the query.
    pub range: String,
}

impl BrandSearchRequest {
    /// Picks the basis from the standard, or from whichever range was sent.
    pub fn validate(&self) -> Result<BrandSearchInput> {
        let height = text_field(self.height_range.as_deref());
        let weight = text_field(self.weight_range.as_deref());
        let standard = match optional_standard(self.standard.as_deref())? {
            Some(s) => s,
            None if height.is_some() && weight.is_none() => StandardId::EceR129,
            None if weight.is_some() => StandardId::Fmvss213,
            None => {
                return Err(Error::validation(
                    "heightRange or weightRange is required",
                ));
            }
        };
        let range = match standard.basis() {
            RangeBasis::Height => height.or(weight),
            RangeBasis::Weight => weight.or(height),
        }
        .ok_or_else(|| Error::validation("heightRange or weightRange is required"))?;
        Ok(BrandSearchInput {
            standard,
            range: range.to_string(),
        })
    }
}

/// Body of `POST /api/audit-report`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditRequest {
    /// Design report to audit: markdown text or a structured report object.
    #[serde(default)]
    pub report: Option<Value>,
    /// Standard the report targets.
    #[serde(default)]
    pub standard: Option<String>,
}

impl AuditRequest {
    /// Requires a report that is neither `null` nor a blank string.
    pub fn validate(&self) -> Result<(&Value, Option<&str>)> {
        match &self.report {
            None | Some(Value::Null) => {
                Err(Error::validation_field("report", "report is required"))
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(Error::validation_field("report", "report is required"))
            }
            Some(report) => Ok((report, text_field(self.standard.as_deref()))),
        }
    }
}

/// Body of `POST /api/validate-data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDataRequest {
    /// Standard the data claims to follow.
    #[serde(default)]
    pub standard: Option<String>,
    /// Stature range the data covers.
    #[serde(default)]
    pub height_range: Option<String>,
    /// Mass range the data covers.
    #[serde(default)]
    pub weight_range: Option<String>,
    /// Data to check.
    #[serde(default)]
    pub local_data: Option<Value>,
}

impl ValidateDataRequest {
    /// Requires non-null local data.
    pub fn validate(&self) -> Result<&Value> {
        match &self.local_data {
            None | Some(Value::Null) => {
                Err(Error::validation_field("localData", "localData is required"))
            }
            Some(data) => Ok(data),
        }
    }
}

// ============================================================================
// Image generation
// ============================================================================

/// Drawing style for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageStyle {
    /// Black-and-white line sketch.
    #[default]
    Simple,
    /// Technical illustration.
    Detailed,
    /// Friendly cartoon.
    Cartoon,
}

impl ImageStyle {
    /// Text prepended to the user's prompt.
    pub fn prefix(&self) -> &'static str {
        match self {
            ImageStyle::Simple => "Simple line drawing, sketch style, black and white, minimalist, ",
            ImageStyle::Detailed => "Detailed technical drawing, professional illustration, ",
            ImageStyle::Cartoon => "Cute cartoon style, colorful, friendly design, ",
        }
    }
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRequest {
    /// What to draw.
    #[serde(default)]
    pub prompt: Option<String>,
    /// `simple` (default), `detailed` or `cartoon`.
    #[serde(default)]
    pub style: Option<String>,
}

impl ImageRequest {
    /// Returns the styled prompt.
    pub fn validate(&self) -> Result<String> {
        let prompt = required_text(self.prompt.as_deref(), "prompt")?;
        let style = match text_field(self.style.as_deref()) {
            None => ImageStyle::default(),
            Some("simple") => ImageStyle::Simple,
            Some("detailed") => ImageStyle::Detailed,
            Some("cartoon") => ImageStyle::Cartoon,
            Some(other) => {
                return Err(Error::validation_field(
                    "style",
                    format!("style must be simple, detailed or cartoon, not '{other}'"),
                ));
            }
        };
        Ok(format!("{}{prompt}", style.prefix()))
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Body of `POST /api/dimensions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsRequest {
    /// Minimum stature, cm.
    #[serde(default)]
    pub min_height: Option<Value>,
    /// Maximum stature, cm.
    #[serde(default)]
    pub max_height: Option<Value>,
}

impl DimensionsRequest {
    /// Requires both bounds inside the supported stature range.
    pub fn validate(&self) -> Result<Interval> {
        let min = number_field(self.min_height.as_ref(), "minHeight")?
            .ok_or_else(|| Error::validation_field("minHeight", "minHeight is required"))?;
        let max = number_field(self.max_height.as_ref(), "maxHeight")?
            .ok_or_else(|| Error::validation_field("maxHeight", "maxHeight is required"))?;
        seatwise_core::dimensions::validate_height_range(min, max)
    }
}
