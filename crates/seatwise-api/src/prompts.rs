//! System prompts and user-prompt builders for the LLM-backed endpoints.

use seatwise_core::StandardId;

/// Height consultation under ECE R129.
pub const R129_CONSULTANT: &str = "\
You are a child restraint system (CRS) design assistant working strictly to ECE R129 (i-Size).

The user gives a child's stature in centimetres. Produce a structured report with these five \
markdown sections:

### 1. Stature group
Pick the best matching i-Size stature group (for example 40-83 cm carrier, 40-105 cm rear-facing, \
100-150 cm booster). If the value sits on a boundary say which groups apply. Outside 40-150 cm, \
say the value is outside the regulation and advise consulting the manufacturer.

### 2. ISOFIX size class
Give the ISOFIX envelope code and what it means, with envelope dimensions when known.

### 3. Test dummies
List the Q-series dummies (Q0, Q1, Q1.5, Q3, Q6, Q10) used for type approval of that group.

### 4. Dynamic tests and injury criteria
Frontal 50 km/h, rear 30 km/h for rear-facing seats, side 24 km/h. Quote HIC, chest resultant \
acceleration and neck limits where they apply.

### 5. Design recommendations
Orientation, harness, head support and installation guidance for this stature.

Write concise professional English. Never invent regulatory values; say when a value should be \
checked against the current regulation text.";

/// Height consultation under FMVSS 213.
pub const FMVSS213_CONSULTANT: &str = "\
You are a child restraint system (CRS) design assistant working strictly to US FMVSS 213 \
(including FMVSS 213a side impact).

The user gives a child's stature in centimetres. Produce a structured report with these five \
markdown sections:

### 1. Applicable mass and stature range
Map the stature to typical mass and the FMVSS 213 restraint type (rear-facing, forward-facing \
harness, belt-positioning booster).

### 2. Installation
LATCH lower anchors, top tether and seat belt requirements, including the FMVSS 225 anchor limit.

### 3. Test dummies
Hybrid III and CRABI dummies (12-month, 3-year, 6-year, 10-year) used for compliance.

### 4. Dynamic tests and injury criteria
The 48 km/h (30 mph) sled pulse, HIC36 <= 1000, chest acceleration <= 60 g, head and knee \
excursion limits of 720 mm and 915 mm, and the FMVSS 213a side test.

### 5. Design recommendations
Orientation, harness, head support and labelling guidance for this stature.

Write concise professional English. Never invent regulatory values.";

/// Full design report for the comprehensive design flow.
pub const DESIGN: &str = "\
You are a comprehensive child restraint design assistant.

The user gives a stature range, a mass range and a target standard. Produce a complete design \
report with these five markdown sections:

### 1. Dummy matrix
The Q-series dummies the range requires (Q0 40-50 cm, Q1.5 65-75 cm, Q3 95-100 cm, \
Q6 115-125 cm, Q10 135-145 cm) as a table with stature and mass.

### 2. ISOFIX size class
The envelope class implied by the largest dummy, with width, length and height.

### 3. Crash test matrix
Frontal 50 km/h, rear 30 km/h (rear-facing only), side impact, the dummy for each test and the \
key limits (HIC <= 1000, chest 3 ms <= 55 g, neck loads).

### 4. Internal dimensions
- Backrest internal height: largest dummy stature plus 200 mm head clearance.
- Headrest adjustment: 120-180 mm.
- Internal width: 380-450 mm from dummy shoulder breadth.
- Seat depth: dummy thigh length plus 50-80 mm.
- Backrest angle: rear-facing 45 +/- 5 deg, forward-facing 20 +/- 5 deg, booster 80-90 deg.
- Harness slot height: 200-400 mm, adjustable.

### 5. Design recommendations
Head support, side wings and harness guidance, noting differences between the chosen standard \
and its alternatives.

Use markdown headings, tables and lists with concrete values.";

/// Market comparison produced before the design report.
pub const COMPARISON: &str = "\
You are a market analyst for child car seats.

Using the brand search results and the user's design parameters, write a structured comparison:

### 1. Market overview
Three to five representative products with model, key specifications and usage range.

### 2. Dimensions and specifications
Envelope dimensions, stature and mass ranges, ISOFIX size classes.

### 3. Features
Installation (ISOFIX, belt, support leg), adjustment (headrest, recline, side wings) and safety \
features (side impact protection, anti-rebound).

### 4. Innovation
Notable designs and industry direction.

### 5. Recommendations
Improvements for the user's design and differentiation opportunities.

Be objective. Use tables and lists. Relate everything back to the user's design.";

/// Multi-turn product design assistant.
pub const ASSISTANT: &str = "\
You are a children's product designer and safety expert with more than ten years of experience. \
You know GB 14748, GB 28007, EN 1888, ASTM F833, ECE R129 and the other major safety \
regulations for strollers, high chairs, cribs and car seats. Safety comes first, then \
compliance, ergonomics and practicality.

Work in this order:
1. Welcome the user and confirm the product category.
2. Collect the key inputs before designing: child age, mass range, stature range, use cases and \
preferences. Ask politely for anything missing.
3. Once you have enough information, produce a design reference with: positioning and \
applicable standards, core specifications, a safety feature checklist, materials, ergonomics \
and a compliance testing plan.

Use clear markdown suited to reading on a phone. Never invent regulatory values. Remind the \
user that final products must be certified by an accredited laboratory.";

/// Extracts product parameters from brand search results.
pub const BRAND_EXTRACTION: &str = "\
You extract child car seat product data from web search results.

Return ONLY a JSON array. Each element has these string fields: brand, model, heightRange, \
weightRange, seatWeight, installation, sideImpact, orientation, recline, adacRating, crRating, \
priceRange. Use an empty string when a field is unknown. Do not add commentary.";

/// Regulatory audit of a generated design report.
pub const AUDIT: &str = "\
You are a regulatory auditor for child restraint systems, expert in ECE R129 (i-Size), \
FMVSS 213 and ECE R44.

Audit the design report for:
1. Citation accuracy: regulations and injury criteria (HIC, HIC15, HIC36) are quoted correctly.
2. Technical parameters: seat angles, headrest adjustment, ISOFIX and load requirements.
3. Safety advice: certification, crash testing and safety reminders are present.
4. Truthfulness: no invented data, no exaggerated performance, no misleading advice.
5. Disclaimer: the report says it is for reference only and that products must be certified.

Respond with JSON only:
```json
{
  \"audit_passed\": true,
  \"audit_score\": 0,
  \"issues\": [
    {\"type\": \"\", \"severity\": \"high|medium|low\", \"description\": \"\", \"suggestion\": \"\"}
  ],
  \"summary\": \"\",
  \"recommendations\": [\"\"]
}
```
Score 90-100 when fully compliant, 70-89 for minor issues, 50-69 for significant issues and \
below 50 for serious errors. The report passes only when the score is 70 or more and there is \
no high severity issue.";

/// Cross-checks locally tabulated data against a standard.
pub const VALIDATION: &str = "\
You are a standards verification expert for child car seats (ECE R129, FMVSS 213, ECE R44).

Check the supplied local data for standard compliance, numeric accuracy (HIC, accelerations, \
speeds), completeness and internal consistency.

Respond with JSON only:
{
  \"validationScore\": 0,
  \"validationReport\": \"\",
  \"issues\": [
    {\"type\": \"error|warning|info\", \"category\": \"\", \"description\": \"\", \"suggestion\": \"\"}
  ]
}
A score of 100 means fully accurate.";

/// Consultant system prompt for `standard`.
pub fn consultant_prompt(standard: StandardId) -> &'static str {
    match standard {
        StandardId::Fmvss213 => FMVSS213_CONSULTANT,
        StandardId::EceR129 | StandardId::EceR44 => R129_CONSULTANT,
    }
}

/// Consultant user turn.
pub fn consultant_request(height: f64, standard: StandardId) -> String {
    let name = match standard {
        StandardId::Fmvss213 => StandardId::Fmvss213.display_name(),
        _ => StandardId::EceR129.display_name(),
    };
    format!("Produce the full report for a child stature of {height} cm under {name}.")
}

/// Design parameters shared by the comparison and design prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignBrief {
    /// Stature range in cm.
    pub height: (f64, f64),
    /// Mass range in kg.
    pub weight: (f64, f64),
    /// Standard as the user named it.
    pub standard: String,
    /// Whether the user supplied the stature range.
    pub height_given: bool,
    /// Whether the user supplied the mass range.
    pub weight_given: bool,
}

impl DesignBrief {
    fn parameters(&self) -> String {
        format!(
            "- Stature range: {} cm - {} cm\n- Mass range: {} kg - {} kg\n- Standard: {}",
            self.height.0, self.height.1, self.weight.0, self.weight.1, self.standard
        )
    }

    /// User turn for the design report.
    pub fn design_request(&self) -> String {
        let mut out = format!(
            "Generate the complete design report for:\n{}\n",
            self.parameters()
        );
        if self.height_given {
            out.push_str("\nThe stature range is the primary design input.");
        }
        if self.weight_given {
            out.push_str("\nThe mass range is the primary design input.");
        }
        out.push_str(
            "\n\nInclude the dummy matrix, ISOFIX size class, crash test matrix, \
             internal dimensions and design recommendations.",
        );
        out
    }

    /// User turn for the market comparison.
    pub fn comparison_request(&self, brands: &[BrandFindings]) -> String {
        let mut out = format!("User design parameters:\n{}\n\nBrand search results:\n", self.parameters());
        for found in brands {
            out.push_str(&format!("\nBrand: {}\nProducts:\n", found.brand));
            for product in &found.products {
                out.push_str(&format!("- {}: {}\n", product.title, product.snippet));
            }
        }
        out.push_str("\nWrite the comparison based on the information above.");
        out
    }
}

/// Search hits for one brand.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BrandFindings {
    /// Brand searched for.
    pub brand: String,
    /// Hits, in search order.
    pub products: Vec<BrandHit>,
}

/// One search hit for a brand.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BrandHit {
    /// Page title.
    pub title: String,
    /// Excerpt.
    pub snippet: String,
    /// Page URL.
    pub url: String,
}

/// Query sent for one brand in the comparison fan-out.
pub fn brand_query(brand: &str) -> String {
    format!("{brand} child car seat product specifications dimensions R129 i-Size stature mass range")
}

/// User turn for the audit.
///
/// String reports are embedded verbatim; any other JSON is pretty-printed.
pub fn audit_request(report: &serde_json::Value, standard: Option<&str>) -> String {
    let report = match report {
        serde_json::Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    format!(
        "Audit the following design report{}:\n\n{report}",
        standard
            .map(|s| format!(" against {s}"))
            .unwrap_or_default()
    )
}

/// User turn for data validation.
pub fn validation_request(
    standard: &str,
    height_range: Option<&str>,
    weight_range: Option<&str>,
    local_data: &serde_json::Value,
) -> String {
    let data = serde_json::to_string_pretty(local_data).unwrap_or_else(|_| local_data.to_string());
    format!(
        "## Input\n- Standard: {standard}\n- Stature range: {}\n- Mass range: {}\n\n\
         ## Local data\n```json\n{data}\n```\n\n\
         Check compliance with {standard}, numeric accuracy, completeness and consistency.",
        height_range.unwrap_or("not specified"),
        weight_range.unwrap_or("not specified"),
    )
}
