//! Read-only access to the static JSON reference tables.
//!
//! Tables are read from disk on every call. Nothing is cached between
//! requests, so a table edited on disk is visible to the next request and
//! a failed read never leaves partial state behind.
//!
//! # Usage
//!
//! ```rust,no_run
//! use seatwise_core::{DataDir, StandardId};
//!
//! # async fn demo() -> seatwise_core::Result<()> {
//! let data = DataDir::new("data");
//! let table = data.design_table(StandardId::EceR129).await?;
//! println!("{} groups (v{})", table.groups.len(), table.version);
//! # Ok(())
//! # }
//! ```

mod schema;

pub use schema::{
    AnthropometryFile, AnthropometryRow, Brand, BrandCatalog, CatalogProduct, CommonFeature,
    DesignRequirementsFile, DesignTable, DummyFile, DummySpec, IsofixSizeClass, KnowledgeBase,
    NamedValue, RawStandardGroups, StandardProfile,
};

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::types::{RangeGroup, StandardId};
use crate::{Error, Result};

/// The reference tables shipped with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    /// Per-standard design requirement rows.
    DesignRequirements,
    /// Regulatory profiles and general guidance.
    LocalKnowledge,
    /// Child body dimensions by stature.
    Anthropometry,
    /// Crash test dummies and ISOFIX envelopes.
    Dummies,
    /// Brands and representative products.
    BrandCatalog,
    /// High chair reference data.
    HighChair,
    /// Stroller reference data.
    Stroller,
}

impl TableName {
    /// Every table, in listing order.
    pub const ALL: [TableName; 7] = [
        TableName::DesignRequirements,
        TableName::LocalKnowledge,
        TableName::Anthropometry,
        TableName::Dummies,
        TableName::BrandCatalog,
        TableName::HighChair,
        TableName::Stroller,
    ];

    /// URL slug, also the file stem.
    pub fn slug(&self) -> &'static str {
        match self {
            TableName::DesignRequirements => "design-requirements",
            TableName::LocalKnowledge => "local-knowledge-base",
            TableName::Anthropometry => "anthropometry",
            TableName::Dummies => "dummies",
            TableName::BrandCatalog => "brand-catalog",
            TableName::HighChair => "high-chair-data",
            TableName::Stroller => "stroller-data",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let slug = s.strip_suffix(".json").unwrap_or(s);
        TableName::ALL
            .into_iter()
            .find(|t| t.slug() == slug)
            .ok_or_else(|| Error::validation_field("table", format!("unknown data table '{s}'")))
    }
}

/// Handle on a directory of reference tables.
///
/// Cheap to clone; holds only the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Creates a handle rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory containing the tables.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute or relative path of `table`.
    pub fn path_of(&self, table: TableName) -> PathBuf {
        self.root.join(table.file_name())
    }

    /// Reads `table` as untyped JSON.
    pub async fn read_raw(&self, table: TableName) -> Result<serde_json::Value> {
        self.load(table).await
    }

    /// Reads and deserializes `table`.
    pub async fn load<T: DeserializeOwned>(&self, table: TableName) -> Result<T> {
        let path = self.path_of(table);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::data_load(&path, e.to_string()))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::data_load(&path, format!("invalid JSON: {e}")))?;
        tracing::debug!(table = %table, path = %path.display(), "Loaded data table");
        Ok(value)
    }

    /// Loads and validates the design rows for `standard`.
    ///
    /// Rows with a missing, ambiguous or unparsable range, or whose basis
    /// does not match the standard, are skipped with a warning; they can
    /// never match anything anyway.
    pub async fn design_table(&self, standard: StandardId) -> Result<DesignTable> {
        let file: DesignRequirementsFile = self.load(TableName::DesignRequirements).await?;
        design_table_from(file, standard)
            .map_err(|message| Error::data_load(self.path_of(TableName::DesignRequirements), message))
    }

    /// Loads the regulatory knowledge base.
    pub async fn knowledge_base(&self) -> Result<KnowledgeBase> {
        self.load(TableName::LocalKnowledge).await
    }

    /// Loads the anthropometry table.
    pub async fn anthropometry(&self) -> Result<AnthropometryFile> {
        self.load(TableName::Anthropometry).await
    }

    /// Loads the dummy specifications.
    pub async fn dummies(&self) -> Result<DummyFile> {
        self.load(TableName::Dummies).await
    }

    /// Loads the brand catalog.
    pub async fn brand_catalog(&self) -> Result<BrandCatalog> {
        self.load(TableName::BrandCatalog).await
    }
}

fn design_table_from(
    mut file: DesignRequirementsFile,
    standard: StandardId,
) -> std::result::Result<DesignTable, String> {
    let raw = file
        .standards
        .remove(standard.table_key())
        .ok_or_else(|| format!("no design rows for {}", standard.table_key()))?;

    let expected = standard.basis();
    let mut groups = Vec::with_capacity(raw.groups.len());
    for (index, row) in raw.groups.into_iter().enumerate() {
        match RangeGroup::try_from(row) {
            Ok(group) if group.basis == expected => groups.push(group),
            Ok(group) => tracing::warn!(
                standard = standard.table_key(),
                index,
                basis = %group.basis,
                "Skipping group keyed on the wrong measurement"
            ),
            Err(e) => tracing::warn!(
                standard = standard.table_key(),
                index,
                error = %e,
                "Skipping malformed group"
            ),
        }
    }

    Ok(DesignTable {
        version: file.version,
        groups,
    })
}
