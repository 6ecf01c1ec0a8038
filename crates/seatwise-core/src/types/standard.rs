//! Child restraint standards and the measurement each one is keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Measurement a standard uses to classify restraint groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBasis {
    /// Child stature, in centimetres.
    Height,
    /// Child mass, in kilograms.
    Weight,
}

impl RangeBasis {
    /// Unit suffix used in range strings for this basis.
    pub fn unit(&self) -> &'static str {
        match self {
            RangeBasis::Height => "cm",
            RangeBasis::Weight => "kg",
        }
    }
}

impl fmt::Display for RangeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBasis::Height => write!(f, "height"),
            RangeBasis::Weight => write!(f, "weight"),
        }
    }
}

/// Supported child restraint approval standards.
///
/// Accepts the short (`R129`), table (`ECE_R129`) and spaced (`ECE R129`)
/// spellings when parsed or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardId {
    /// ECE R129 / i-Size, keyed on stature.
    #[serde(rename = "ECE_R129", alias = "R129", alias = "ECE R129", alias = "i-Size")]
    EceR129,
    /// US FMVSS 213, keyed on mass.
    #[serde(
        rename = "FMVSS_213",
        alias = "FMVSS213",
        alias = "FMVSS 213",
        alias = "FMVSS"
    )]
    Fmvss213,
    /// Legacy ECE R44/04, keyed on mass.
    #[serde(rename = "ECE_R44", alias = "R44", alias = "ECE R44")]
    EceR44,
}

impl StandardId {
    /// All tabulated standards, in display order.
    pub const ALL: [StandardId; 3] = [StandardId::EceR129, StandardId::Fmvss213, StandardId::EceR44];

    /// Key used for this standard in the JSON reference tables.
    pub fn table_key(&self) -> &'static str {
        match self {
            StandardId::EceR129 => "ECE_R129",
            StandardId::Fmvss213 => "FMVSS_213",
            StandardId::EceR44 => "ECE_R44",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardId::EceR129 => "ECE R129 (i-Size)",
            StandardId::Fmvss213 => "FMVSS 213",
            StandardId::EceR44 => "ECE R44/04",
        }
    }

    /// The measurement this standard's groups are keyed on.
    pub fn basis(&self) -> RangeBasis {
        match self {
            StandardId::EceR129 => RangeBasis::Height,
            StandardId::Fmvss213 | StandardId::EceR44 => RangeBasis::Weight,
        }
    }

    /// One-line regulatory status shown in advice overviews.
    pub fn status_note(&self) -> &'static str {
        match self {
            StandardId::EceR129 => "Current recommended regulation for new approvals in the EU",
            StandardId::Fmvss213 => {
                "US federal standard; FMVSS 213a adds dynamic side-impact testing"
            }
            StandardId::EceR44 => "Being phased out; new designs should target ECE R129",
        }
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for StandardId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "R129" | "ECER129" | "ISIZE" => Ok(StandardId::EceR129),
            "FMVSS213" | "FMVSS" | "FMVSS213A" => Ok(StandardId::Fmvss213),
            "R44" | "ECER44" | "R4404" | "ECER4404" => Ok(StandardId::EceR44),
            _ => Err(Error::UnknownStandard { id: s.to_string() }),
        }
    }
}
