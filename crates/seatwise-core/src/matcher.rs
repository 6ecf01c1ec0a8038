//! Maps a requested height or weight interval onto a tabulated group.
//!
//! Any overlap counts as a match, and the first overlapping group in table
//! order wins. Tables routinely share boundary points between adjacent
//! groups, so a boundary input can overlap two rows; the earlier row is
//! returned and no containment or centre-distance scoring is applied.

use crate::types::{Interval, RangeGroup, parse_range};

/// Returns the first group in `groups` whose bounds overlap `input`.
pub fn match_group<'a>(groups: &'a [RangeGroup], input: &Interval) -> Option<&'a RangeGroup> {
    let matched = groups.iter().find(|group| group.bounds.overlaps(input));

    match matched {
        Some(group) => tracing::debug!(
            input = %input,
            group = %group.label,
            "Range matched tabulated group"
        ),
        None => tracing::debug!(input = %input, "No tabulated group overlaps range"),
    }

    matched
}

/// Every group whose bounds contain the centre of `input`, in table order.
pub fn groups_at_midpoint<'a>(groups: &'a [RangeGroup], input: &Interval) -> Vec<&'a RangeGroup> {
    let centre = input.midpoint();
    groups.iter().filter(|group| group.bounds.contains(centre)).collect()
}

/// Parses `range` (e.g. `"95-100cm"`) and matches it against `groups`.
///
/// An unparsable range is treated the same as a range that matches nothing.
pub fn match_range_str<'a>(groups: &'a [RangeGroup], range: &str) -> Option<&'a RangeGroup> {
    let input = parse_range(range)?;
    match_group(groups, &input)
}
