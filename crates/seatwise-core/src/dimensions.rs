//! First-cut internal dimensions of a car seat for a stature range.
//!
//! Linear rules of thumb only. The numbers seed a design review; they do
//! not replace measurement against the regulation's fixtures.

use serde::Serialize;

use crate::tables::AnthropometryRow;
use crate::types::Interval;
use crate::{Error, Result};

/// Smallest stature the calculator accepts, in cm.
pub const MIN_STATURE_CM: f64 = 40.0;
/// Largest stature the calculator accepts, in cm.
pub const MAX_STATURE_CM: f64 = 150.0;

const SITTING_HEIGHT_RATIO: f64 = 0.52;
const HEAD_CLEARANCE_MM: f64 = 200.0;
const THIGH_RATIO: f64 = 0.245;
const WIDTH_LIMITS_MM: (f64, f64) = (380.0, 450.0);
const HARNESS_SLOT_LIMITS_MM: (f64, f64) = (200.0, 400.0);
const REAR_FACING_MAX_CM: f64 = 105.0;
const BOOSTER_MIN_CM: f64 = 100.0;

/// A millimetre (or degree) range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl Span {
    fn rounded(min: f64, max: f64) -> Self {
        Self {
            min: min.round(),
            max: max.round(),
        }
    }
}

/// How the child faces in the seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Rear-facing shell.
    RearFacing,
    /// Forward-facing with integral harness.
    ForwardFacing,
    /// High-back booster using the vehicle belt.
    Booster,
}

impl Orientation {
    /// Orientation implied by a stature range.
    pub fn for_range(range: &Interval) -> Self {
        if range.max <= REAR_FACING_MAX_CM {
            Orientation::RearFacing
        } else if range.min >= BOOSTER_MIN_CM {
            Orientation::Booster
        } else {
            Orientation::ForwardFacing
        }
    }

    /// Nominal backrest angle from vertical and its tolerance, in degrees.
    pub fn backrest_angle(&self) -> (f64, f64) {
        match self {
            Orientation::RearFacing => (45.0, 5.0),
            Orientation::ForwardFacing => (20.0, 5.0),
            Orientation::Booster => (85.0, 5.0),
        }
    }
}

/// Estimated internal dimensions, in millimetres unless noted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionEstimate {
    /// Input stature range, cm.
    pub height_range: Interval,
    /// Orientation assumed for the estimate.
    pub orientation: Orientation,
    /// Backrest internal height.
    pub backrest_height: f64,
    /// Headrest adjustment travel.
    pub headrest_adjustment: Span,
    /// Internal shoulder width.
    pub internal_width: f64,
    /// Seat cushion depth.
    pub seat_depth: Span,
    /// Backrest angle, degrees.
    pub backrest_angle: Span,
    /// Harness slot heights; absent for boosters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harness_slots: Option<Span>,
}

/// Rejects ranges outside the calculator's stature limits.
pub fn validate_height_range(min: f64, max: f64) -> Result<Interval> {
    if !(min.is_finite() && max.is_finite()) || min >= max {
        return Err(Error::validation_field(
            "heightRange",
            "minHeight must be less than maxHeight",
        ));
    }
    if min < MIN_STATURE_CM || max > MAX_STATURE_CM {
        return Err(Error::validation_field(
            "heightRange",
            format!("height range must lie within {MIN_STATURE_CM}-{MAX_STATURE_CM}cm"),
        ));
    }
    Interval::new(min, max)
        .ok_or_else(|| Error::validation_field("heightRange", "invalid height range"))
}

/// Estimates internal dimensions for children within `range`.
///
/// `shoulder_row` is the anthropometry row used for the internal width; the
/// widest permitted width is used when none is available.
pub fn estimate(range: &Interval, shoulder_row: Option<&AnthropometryRow>) -> DimensionEstimate {
    let orientation = Orientation::for_range(range);
    let (angle, tolerance) = orientation.backrest_angle();

    let backrest_height = (range.max * 10.0 * SITTING_HEIGHT_RATIO + HEAD_CLEARANCE_MM).round();

    let internal_width = shoulder_row
        .map(|row| row.shoulder_breadth * 10.0)
        .unwrap_or(WIDTH_LIMITS_MM.1)
        .clamp(WIDTH_LIMITS_MM.0, WIDTH_LIMITS_MM.1)
        .round();

    let thigh_mm = range.max * 10.0 * THIGH_RATIO;

    let harness_slots = (orientation != Orientation::Booster).then(|| {
        Span::rounded(harness_slot(range.min), harness_slot(range.max))
    });

    DimensionEstimate {
        height_range: *range,
        orientation,
        backrest_height,
        headrest_adjustment: Span::rounded(120.0, 180.0),
        internal_width,
        seat_depth: Span::rounded(thigh_mm + 50.0, thigh_mm + 80.0),
        backrest_angle: Span::rounded(angle - tolerance, angle + tolerance),
        harness_slots,
    }
}

fn harness_slot(stature: f64) -> f64 {
    let (lo, hi) = HARNESS_SLOT_LIMITS_MM;
    let t = (stature - MIN_STATURE_CM) / (MAX_STATURE_CM - MIN_STATURE_CM);
    lo + t.clamp(0.0, 1.0) * (hi - lo)
}
