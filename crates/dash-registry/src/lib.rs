//! # dash-registry
//!
//! Immutable named tables of observations for gamedash.
//!
//! A [`Registry`] is built once from a dataset file (TOML, see [`loader`])
//! and never mutated afterwards. The builtin dataset ships inside the
//! binary and is parsed at most once per process.
//!
//! Tables:
//! - `quarterly`: 2025 quarterly revenue, operating profit and margins
//! - `annual`: 2024 annual OP and EBITDA margins
//! - `ip_breakdown`: revenue per IP within one company
//! - `productivity`: 2024 headcount and operating profit per employee

pub mod loader;

mod error;

pub use error::RegistryError;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use dash_core::{
    AnnualMetricRow, Catalog, CoreError, IpBreakdownRow, Observation, ProductivityRow, Record,
    to_record,
};

use crate::loader::DatasetFile;

const BUILTIN_DATASET: &str = include_str!("../data/dashboard.toml");

static BUILTIN: OnceLock<Registry> = OnceLock::new();

// ── Table names ────────────────────────────────────────────────────

/// Names of the tables a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Quarterly,
    Annual,
    IpBreakdown,
    Productivity,
}

impl TableName {
    pub const ALL: [Self; 4] = [
        Self::Quarterly,
        Self::Annual,
        Self::IpBreakdown,
        Self::Productivity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
            Self::IpBreakdown => "ip_breakdown",
            Self::Productivity => "productivity",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::unknown("table", s))
    }
}

// ── Table references ───────────────────────────────────────────────

/// A borrowed view of one registry table.
#[derive(Debug, Clone, Copy)]
pub enum TableRef<'a> {
    Quarterly(&'a [Observation]),
    Annual(&'a [AnnualMetricRow]),
    IpBreakdown(&'a [IpBreakdownRow]),
    Productivity(&'a [ProductivityRow]),
}

impl TableRef<'_> {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Quarterly(rows) => rows.len(),
            Self::Annual(rows) => rows.len(),
            Self::IpBreakdown(rows) => rows.len(),
            Self::Productivity(rows) => rows.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every row as a plain record, in table order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        match self {
            Self::Quarterly(rows) => rows.iter().map(to_record).collect(),
            Self::Annual(rows) => rows.iter().map(to_record).collect(),
            Self::IpBreakdown(rows) => rows.iter().map(to_record).collect(),
            Self::Productivity(rows) => rows.iter().map(to_record).collect(),
        }
    }
}

// ── Registry ───────────────────────────────────────────────────────

/// Immutable set of named tables plus the entity catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    catalog: Catalog,
    quarterly: Vec<Observation>,
    annual: Vec<AnnualMetricRow>,
    ip_breakdown: Vec<IpBreakdownRow>,
    productivity: Vec<ProductivityRow>,
}

impl Registry {
    /// The builtin dataset, parsed on first use and cached for the process
    /// lifetime.
    pub fn builtin() -> Result<&'static Self, RegistryError> {
        if let Some(registry) = BUILTIN.get() {
            return Ok(registry);
        }
        let registry = Self::from_toml_str(BUILTIN_DATASET)?;
        Ok(BUILTIN.get_or_init(|| registry))
    }

    /// Build a registry from dataset TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let file = DatasetFile::parse(text)?;
        Ok(Self::from_dataset(file))
    }

    /// Build a registry from a dataset TOML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "registry: loading dataset file");
        Self::from_toml_str(&text)
    }

    /// Build a registry from an already-validated dataset.
    #[must_use]
    pub fn from_dataset(file: DatasetFile) -> Self {
        for name in file.uncatalogued_entities() {
            tracing::warn!(entity = %name, "registry: entity is not in the catalog; it will sort last");
        }

        let registry = Self {
            catalog: Catalog::new(file.entities),
            quarterly: file.quarterly,
            annual: file.annual,
            ip_breakdown: file.ip_breakdown,
            productivity: file.productivity,
        };

        tracing::debug!(
            entities = registry.catalog.entities().len(),
            quarterly = registry.quarterly.len(),
            annual = registry.annual.len(),
            ip_breakdown = registry.ip_breakdown.len(),
            productivity = registry.productivity.len(),
            "registry: tables built"
        );

        registry
    }

    /// Look up a table by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] for an unknown table name.
    pub fn get_table(&self, name: &str) -> Result<TableRef<'_>, CoreError> {
        let name: TableName = name.parse()?;
        Ok(self.table(name))
    }

    #[must_use]
    pub fn table(&self, name: TableName) -> TableRef<'_> {
        match name {
            TableName::Quarterly => TableRef::Quarterly(&self.quarterly),
            TableName::Annual => TableRef::Annual(&self.annual),
            TableName::IpBreakdown => TableRef::IpBreakdown(&self.ip_breakdown),
            TableName::Productivity => TableRef::Productivity(&self.productivity),
        }
    }

    #[must_use]
    pub fn table_names(&self) -> &'static [TableName] {
        &TableName::ALL
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn quarterly(&self) -> &[Observation] {
        &self.quarterly
    }

    #[must_use]
    pub fn annual(&self) -> &[AnnualMetricRow] {
        &self.annual
    }

    #[must_use]
    pub fn ip_breakdown(&self) -> &[IpBreakdownRow] {
        &self.ip_breakdown
    }

    #[must_use]
    pub fn productivity(&self) -> &[ProductivityRow] {
        &self.productivity
    }
}
