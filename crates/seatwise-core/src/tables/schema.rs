//! Typed shapes of the static JSON reference tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Interval, RangeGroup, RawGroup};

/// `design-requirements.json`: per-standard group rows.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignRequirementsFile {
    /// Data source version.
    pub version: String,
    /// Rows keyed by [`StandardId::table_key`](crate::StandardId::table_key).
    pub standards: BTreeMap<String, RawStandardGroups>,
}

/// Group rows for one standard, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStandardGroups {
    /// Rows in table order.
    pub groups: Vec<RawGroup>,
}

/// Validated group rows for one standard, in table order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTable {
    /// Data source version.
    pub version: String,
    /// Rows in table order; order is significant for matching.
    pub groups: Vec<RangeGroup>,
}

/// `local-knowledge-base.json`: regulatory profiles and general design guidance.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    /// Data source version.
    pub version: String,
    /// Profiles keyed by table key.
    pub standards: BTreeMap<String, StandardProfile>,
    /// Features recommended regardless of standard.
    #[serde(default)]
    pub common_features: Vec<CommonFeature>,
    /// General design tips.
    #[serde(default)]
    pub design_tips: Vec<String>,
}

/// Regulatory summary of one standard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StandardProfile {
    /// Official name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Date the regulation took effect.
    pub effective_date: String,
    /// Headline requirements, in display order.
    #[serde(default)]
    pub key_requirements: Vec<NamedValue>,
    /// Injury thresholds, in display order.
    #[serde(default)]
    pub injury_criteria: Vec<NamedValue>,
    /// Safety advice.
    #[serde(default)]
    pub safety_recommendations: Vec<String>,
}

/// A labelled requirement or threshold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedValue {
    /// Label.
    pub name: String,
    /// Value.
    pub value: String,
}

/// A recommended product feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommonFeature {
    /// Feature name.
    pub name: String,
    /// What it does.
    pub description: String,
    /// Engineering specification.
    pub technical_specs: String,
}

/// `anthropometry.json`: child body dimensions by stature.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropometryFile {
    /// Data source version.
    pub version: String,
    /// Rows sorted by ascending stature.
    pub rows: Vec<AnthropometryRow>,
}

/// Body dimensions for one stature, all in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AnthropometryRow {
    /// Standing height.
    pub stature: f64,
    /// Seated height.
    pub sitting_height: f64,
    /// Shoulder breadth.
    pub shoulder_breadth: f64,
    /// Hip breadth.
    pub hip_breadth: f64,
    /// Minimum shoulder height when seated.
    pub shoulder_height_min: f64,
}

impl AnthropometryFile {
    /// Rows whose stature lies within `range`.
    pub fn within(&self, range: &Interval) -> Vec<AnthropometryRow> {
        self.rows
            .iter()
            .filter(|row| range.contains(row.stature))
            .copied()
            .collect()
    }

    /// The row with the greatest stature not exceeding `stature`, or the
    /// smallest row when `stature` is below the table.
    pub fn nearest_at_or_below(&self, stature: f64) -> Option<&AnthropometryRow> {
        self.rows
            .iter()
            .filter(|row| row.stature <= stature)
            .max_by(|a, b| a.stature.total_cmp(&b.stature))
            .or_else(|| {
                self.rows
                    .iter()
                    .min_by(|a, b| a.stature.total_cmp(&b.stature))
            })
    }
}

/// `dummies.json`: anthropomorphic test devices and ISOFIX envelopes.
#[derive(Debug, Clone, Deserialize)]
pub struct DummyFile {
    /// Data source version.
    pub version: String,
    /// Q-series and Hybrid III dummies.
    pub dummies: Vec<DummySpec>,
    /// ISOFIX envelope size classes.
    #[serde(default)]
    pub isofix_size_classes: Vec<IsofixSizeClass>,
}

/// One crash test dummy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DummySpec {
    /// Designation, e.g. "Q3".
    pub name: String,
    /// Represented age.
    pub age: String,
    /// Stature in cm.
    pub stature_cm: f64,
    /// Mass in kg.
    pub mass_kg: f64,
}

/// An ISOFIX envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IsofixSizeClass {
    /// Class letter, e.g. "D".
    pub class: String,
    /// Fixture code, e.g. "ISO/R2".
    pub fixture: String,
    /// What the envelope fits.
    pub description: String,
}

impl DummyFile {
    /// Dummies whose stature falls inside `range`.
    pub fn covering(&self, range: &Interval) -> Vec<&DummySpec> {
        self.dummies
            .iter()
            .filter(|d| range.contains(d.stature_cm))
            .collect()
    }
}

/// `brand-catalog.json`: known brands and representative products.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandCatalog {
    /// Data source version.
    pub version: String,
    /// Brands in display order.
    pub brands: Vec<Brand>,
}

/// One manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Brand {
    /// Brand name as searched.
    pub name: String,
    /// Country of origin.
    #[serde(default)]
    pub country: String,
    /// Whether the brand takes part in design comparisons.
    #[serde(default)]
    pub compare: bool,
    /// Representative products.
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// A catalogued product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogProduct {
    /// Model name.
    pub model: String,
    /// Approval standard.
    pub standard: String,
    /// Usage range as printed by the manufacturer.
    pub usage_range: String,
    /// ISOFIX size class, if any.
    #[serde(default)]
    pub isofix_class: String,
}

impl BrandCatalog {
    /// Brand names that take part in design comparisons, in catalog order.
    pub fn comparison_brands(&self) -> Vec<&str> {
        self.brands
            .iter()
            .filter(|b| b.compare)
            .map(|b| b.name.as_str())
            .collect()
    }

    /// All brand names, in catalog order.
    pub fn brand_names(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.name.as_str()).collect()
    }

    /// First catalogued brand mentioned (case-insensitively) in any of `texts`.
    pub fn identify_brand(&self, texts: &[&str]) -> Option<&str> {
        let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
        self.brands
            .iter()
            .find(|b| {
                let name = b.name.to_lowercase();
                lowered.iter().any(|t| t.contains(&name))
            })
            .map(|b| b.name.as_str())
    }
}
