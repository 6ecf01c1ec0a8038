//! Markdown rendering of design advice.
//!
//! Everything here is a pure function of its inputs: no I/O, no clocks, no
//! randomness. Rendering the same group twice yields byte-identical text.

use std::fmt::Write as _;

use crate::tables::{AnthropometryRow, CommonFeature, StandardProfile};
use crate::types::{RangeGroup, StandardId};

/// Separator placed between entries of the rendered test list.
pub const TEST_SEPARATOR: &str = " | ";

/// Confidence reported for advice built from local tables only.
pub const LOCAL_CONFIDENCE: f32 = 0.85;

/// Renders a matched design row as markdown.
///
/// Sections, in order: overview, the six technical requirements, dummy
/// coverage, frontal/side injury criteria, the test list and a provenance
/// footer naming `data_version`.
pub fn format_advice(group: &RangeGroup, standard: StandardId, data_version: &str) -> String {
    let mut out = String::new();
    let unit = group.basis.unit();

    let _ = writeln!(out, "# {} design advice: {}\n", standard.display_name(), group.label);

    out.push_str("## 1. Standard overview\n\n");
    let _ = writeln!(out, "- **Standard**: {}", standard.display_name());
    let _ = writeln!(out, "- **Status**: {}", standard.status_note());
    let _ = writeln!(
        out,
        "- **Applicable {}**: {}{unit}",
        group.basis, group.bounds
    );
    if !group.age_range.is_empty() {
        let _ = writeln!(out, "- **Approximate age**: {}", group.age_range);
    }
    let _ = writeln!(out, "- **ISOFIX size class**: {}\n", group.isofix_class);

    out.push_str("## 2. Technical requirements\n\n");
    for (label, value) in group.requirements.fields() {
        let _ = writeln!(out, "- **{label}**: {value}");
    }
    out.push('\n');

    out.push_str("## 3. Dummy coverage\n\n");
    let _ = writeln!(out, "Test dummies required: {}\n", group.dummies.len());
    for (i, dummy) in group.dummies.iter().enumerate() {
        let _ = writeln!(out, "{}. {dummy}", i + 1);
    }
    out.push('\n');

    out.push_str("## 4. Injury criteria\n\n");
    let criteria = injury_criteria(group);
    if criteria.is_empty() {
        out.push_str("- No frontal or side impact criteria tabulated for this group.\n");
    }
    for criterion in criteria {
        let _ = writeln!(out, "- {criterion}");
    }
    out.push('\n');

    out.push_str("## 5. Dynamic tests\n\n");
    let tests: Vec<String> = group
        .test_matrix
        .iter()
        .map(|t| format!("{} ({})", t.test_type, t.speed))
        .collect();
    if tests.is_empty() {
        out.push_str("No dynamic tests tabulated.\n\n");
    } else {
        let _ = writeln!(out, "{}\n", tests.join(TEST_SEPARATOR));
    }

    push_footer(&mut out, data_version);
    out
}

/// Fixed advice used when no tabulated group overlaps the request.
pub fn default_advice(standard: StandardId, data_version: &str) -> String {
    let mut out = String::new();
    let basis = standard.basis();

    let _ = writeln!(out, "# {} design advice: general guidance\n", standard.display_name());
    let _ = writeln!(
        out,
        "The requested {basis} range does not overlap any tabulated {} group. \
         The guidance below applies to all child restraints.\n",
        standard.display_name()
    );
    out.push_str("## General requirements\n\n");
    out.push_str("- Fit the harness so that no more than one finger fits under the straps at the collarbone.\n");
    out.push_str("- Position the shoulder straps at or just above the shoulders when forward-facing, at or just below when rear-facing.\n");
    out.push_str("- Keep the child rear-facing for as long as the seat's limits allow.\n");
    out.push_str("- Provide side-impact protection around the head and torso.\n");
    out.push_str("- Prefer ISOFIX installation with an anti-rotation device (top tether or support leg).\n");
    out.push_str("- Use energy-absorbing materials in the head and shell contact zones.\n\n");
    out.push_str("## Next steps\n\n");
    let _ = writeln!(
        out,
        "- Check the {basis} range against the regulation's group boundaries.\n\
         - Consult the full regulation text or an accredited test house for this configuration.\n"
    );

    push_footer(&mut out, data_version);
    out
}

fn push_footer(out: &mut String, data_version: &str) {
    let _ = writeln!(
        out,
        "---\n*Source: Seatwise reference tables v{data_version}. \
         Verify against the current regulation text before approval.*"
    );
}

/// Injury criteria of the group's frontal and side tests, deduplicated in
/// first-seen order.
pub fn injury_criteria(group: &RangeGroup) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for test in group.test_matrix.iter().filter(|t| t.is_frontal_or_side()) {
        for criterion in &test.injury_criteria {
            if !seen.contains(&criterion.as_str()) {
                seen.push(criterion);
            }
        }
    }
    seen
}

/// Regulatory background rendered after the group advice.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeContext<'a> {
    /// Profile of the requested standard.
    pub profile: &'a StandardProfile,
    /// Knowledge base version.
    pub version: &'a str,
    /// Labels of the groups containing the centre of the requested range.
    pub applicable_groups: &'a [String],
    /// Anthropometry rows inside the requested stature range.
    pub anthropometry: &'a [AnthropometryRow],
    /// Features recommended for every product.
    pub common_features: &'a [CommonFeature],
    /// General design tips.
    pub design_tips: &'a [String],
}

/// Renders the regulatory background of a standard as markdown.
pub fn format_knowledge(ctx: &KnowledgeContext<'_>) -> String {
    let mut out = String::new();
    let profile = ctx.profile;

    let _ = writeln!(out, "# {} reference\n", profile.name);
    let _ = writeln!(out, "{}\n", profile.description);
    let _ = writeln!(out, "- **Effective date**: {}\n", profile.effective_date);

    if !profile.key_requirements.is_empty() {
        out.push_str("## Key requirements\n\n");
        for item in &profile.key_requirements {
            let _ = writeln!(out, "- **{}**: {}", item.name, item.value);
        }
        out.push('\n');
    }

    if !ctx.applicable_groups.is_empty() {
        out.push_str("## Applicable groups\n\n");
        for label in ctx.applicable_groups {
            let _ = writeln!(out, "- {label}");
        }
        out.push('\n');
    }

    if !profile.injury_criteria.is_empty() {
        out.push_str("## Injury criteria limits\n\n");
        for item in &profile.injury_criteria {
            let _ = writeln!(out, "- **{}**: {}", item.name, item.value);
        }
        out.push('\n');
    }

    if !profile.safety_recommendations.is_empty() {
        out.push_str("## Safety recommendations\n\n");
        for rec in &profile.safety_recommendations {
            let _ = writeln!(out, "- {rec}");
        }
        out.push('\n');
    }

    if !ctx.anthropometry.is_empty() {
        out.push_str("## Anthropometry (cm)\n\n");
        out.push_str("| Stature | Sitting height | Shoulder breadth | Hip breadth | Min shoulder height |\n");
        out.push_str("|---|---|---|---|---|\n");
        for row in ctx.anthropometry {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                row.stature,
                row.sitting_height,
                row.shoulder_breadth,
                row.hip_breadth,
                row.shoulder_height_min
            );
        }
        out.push('\n');
    }

    if !ctx.common_features.is_empty() {
        out.push_str("## Common features\n\n");
        for feature in ctx.common_features {
            let _ = writeln!(
                out,
                "- **{}**: {} ({})",
                feature.name, feature.description, feature.technical_specs
            );
        }
        out.push('\n');
    }

    if !ctx.design_tips.is_empty() {
        out.push_str("## Design tips\n\n");
        for tip in ctx.design_tips {
            let _ = writeln!(out, "- {tip}");
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "---\n*Knowledge base v{}. Confidence {:.0}%. Local reference data only; \
         confirm with an accredited test house.*",
        ctx.version,
        LOCAL_CONFIDENCE * 100.0
    );
    out
}
