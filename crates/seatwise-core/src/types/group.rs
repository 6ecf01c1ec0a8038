//! Design-requirement rows keyed on a height or weight interval.

use serde::{Deserialize, Serialize};

use super::range::{Interval, RangeParseError};
use super::standard::RangeBasis;

/// The six structural dimensions every design row specifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// Internal headrest height adjustment range.
    #[serde(alias = "headrest_height")]
    pub headrest_height: String,
    /// Harness strap spacing.
    #[serde(alias = "harness_width")]
    pub harness_width: String,
    /// Backrest recline angle.
    #[serde(alias = "seat_angle")]
    pub seat_angle: String,
    /// Internal shoulder width.
    #[serde(alias = "shoulder_width")]
    pub shoulder_width: String,
    /// Internal hip width.
    #[serde(alias = "hip_width")]
    pub hip_width: String,
    /// Internal seat length.
    #[serde(alias = "internal_length")]
    pub internal_length: String,
}

impl Requirements {
    /// Labelled fields in their fixed display order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Headrest height", &self.headrest_height),
            ("Harness width", &self.harness_width),
            ("Seat angle", &self.seat_angle),
            ("Shoulder width", &self.shoulder_width),
            ("Hip width", &self.hip_width),
            ("Internal length", &self.internal_length),
        ]
    }
}

/// One dynamic test a restraint group must pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashTest {
    /// Test configuration, e.g. "Frontal impact" or "Side impact".
    #[serde(alias = "test_type")]
    pub test_type: String,
    /// Dummies used in this test.
    #[serde(default)]
    pub dummies: Vec<String>,
    /// Impact speed, e.g. "50 km/h".
    pub speed: String,
    /// Injury thresholds assessed.
    #[serde(default, alias = "injury_criteria")]
    pub injury_criteria: Vec<String>,
}

impl CrashTest {
    /// Returns `true` for frontal or side impact configurations.
    pub fn is_frontal_or_side(&self) -> bool {
        const MARKERS: [&str; 4] = ["Frontal", "Side", "正面", "侧面"];
        MARKERS.iter().any(|m| self.test_type.contains(m))
    }
}

/// A tabulated restraint group, ready for matching.
///
/// `basis` is fixed when the table is loaded, so callers never have to
/// sniff which range key the source row used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeGroup {
    /// Which measurement `bounds` is expressed in.
    pub basis: RangeBasis,
    /// Display label, e.g. "i-Size rear-facing 40-105cm".
    pub label: String,
    /// Inclusive bounds in cm or kg.
    pub bounds: Interval,
    /// Structural requirements.
    pub requirements: Requirements,
    /// ISOFIX size class.
    pub isofix_class: String,
    /// Dummies covering this group.
    pub dummies: Vec<String>,
    /// Approximate age range.
    pub age_range: String,
    /// Required dynamic tests.
    pub test_matrix: Vec<CrashTest>,
}

/// A group row as it appears in the JSON tables.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Stature range, e.g. "40-105cm".
    #[serde(default)]
    pub height_range: Option<String>,
    /// Mass range, e.g. "9-18kg".
    #[serde(default)]
    pub weight_range: Option<String>,
    /// Structural requirements.
    pub requirements: Requirements,
    /// ISOFIX size class.
    pub isofix_class: String,
    /// Dummies covering this group.
    #[serde(default)]
    pub dummies: Vec<String>,
    /// Approximate age range.
    #[serde(default)]
    pub age_range: String,
    /// Required dynamic tests.
    #[serde(default)]
    pub test_matrix: Vec<CrashTest>,
}

/// Why a raw row could not become a [`RangeGroup`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GroupError {
    /// Neither `height_range` nor `weight_range` is present.
    #[error("group has neither height_range nor weight_range")]
    MissingRange,
    /// Both range keys are present.
    #[error("group has both height_range and weight_range")]
    AmbiguousRange,
    /// The range string did not parse.
    #[error(transparent)]
    BadRange(#[from] RangeParseError),
}

impl TryFrom<RawGroup> for RangeGroup {
    type Error = GroupError;

    fn try_from(raw: RawGroup) -> std::result::Result<Self, Self::Error> {
        let (basis, range) = match (raw.height_range, raw.weight_range) {
            (Some(h), None) => (RangeBasis::Height, h),
            (None, Some(w)) => (RangeBasis::Weight, w),
            (Some(_), Some(_)) => return Err(GroupError::AmbiguousRange),
            (None, None) => return Err(GroupError::MissingRange),
        };
        let bounds: Interval = range.parse()?;

        Ok(RangeGroup {
            basis,
            label: raw.label.unwrap_or_else(|| range.clone()),
            bounds,
            requirements: raw.requirements,
            isofix_class: raw.isofix_class,
            dummies: raw.dummies,
            age_range: raw.age_range,
            test_matrix: raw.test_matrix,
        })
    }
}
