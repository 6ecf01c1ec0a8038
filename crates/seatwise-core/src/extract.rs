//! Best-effort recovery of JSON from free-form model output.
//!
//! Models wrap JSON in markdown fences or surround it with prose. These
//! helpers strip fences, try the whole text, then fall back to the widest
//! `{...}` or `[...]` span. Failure is an [`ExtractError`], never a panic.

use serde::de::DeserializeOwned;

/// Why no JSON could be recovered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The text has no opening/closing delimiter pair.
    #[error("no JSON {0} found in model output")]
    NotFound(&'static str),
    /// A candidate span was found but did not deserialize.
    #[error("model output is not valid JSON: {0}")]
    Invalid(String),
}

/// Removes markdown code fences (```` ``` ```` and ```` ```json ````).
pub fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// Extracts a JSON object and deserializes it into `T`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    extract_delimited(text, '{', '}', "object")
}

/// Extracts a JSON array and deserializes it into `T`.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    extract_delimited(text, '[', ']', "array")
}

fn extract_delimited<T: DeserializeOwned>(
    text: &str,
    open: char,
    close: char,
    kind: &'static str,
) -> Result<T, ExtractError> {
    let cleaned = strip_fences(text);
    let trimmed = cleaned.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) else {
        return Err(ExtractError::NotFound(kind));
    };
    if end < start {
        return Err(ExtractError::NotFound(kind));
    }

    serde_json::from_str(&trimmed[start..=end]).map_err(|e| ExtractError::Invalid(e.to_string()))
}
