//! TOML dataset loader.
//!
//! A dataset file holds one array of tables per registry table plus the
//! entity catalog:
//!
//! ```toml
//! [[entity]]
//! name = "Shift Up"
//! color = "#FF4B4B"
//!
//! [[quarterly]]
//! entity = "Shift Up"
//! period = "3Q25"
//! Revenue = 755
//! EBITDA_Margin = "n/a"
//! ```
//!
//! Every key of a `[[quarterly]]` entry other than `entity` and `period` is
//! a metric. An omitted metric is absent from the row; `"n/a"` marks it as
//! present but not applicable.

use std::collections::HashSet;

use dash_core::{AnnualMetricRow, EntityInfo, IpBreakdownRow, Observation, ProductivityRow};
use serde::Deserialize;

use crate::error::RegistryError;

/// Raw contents of a dataset file, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetFile {
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityInfo>,
    #[serde(default)]
    pub quarterly: Vec<Observation>,
    #[serde(default)]
    pub annual: Vec<AnnualMetricRow>,
    #[serde(default)]
    pub ip_breakdown: Vec<IpBreakdownRow>,
    #[serde(default)]
    pub productivity: Vec<ProductivityRow>,
}

impl DatasetFile {
    /// Parse a dataset from TOML text.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        let file: Self = toml::from_str(text)?;
        file.validate()?;
        Ok(file)
    }

    /// Enforce the per-table uniqueness keys.
    pub fn validate(&self) -> Result<(), RegistryError> {
        ensure_unique("entity", self.entities.iter().map(|e| e.name.clone()))?;
        ensure_unique(
            "quarterly",
            self.quarterly
                .iter()
                .map(|row| format!("{} {}", row.entity, row.period)),
        )?;
        ensure_unique(
            "annual",
            self.annual
                .iter()
                .map(|row| format!("{} {}", row.entity, row.metric)),
        )?;
        ensure_unique(
            "ip_breakdown",
            self.ip_breakdown
                .iter()
                .map(|row| format!("{} {} {}", row.entity, row.period, row.ip)),
        )?;
        ensure_unique(
            "productivity",
            self.productivity.iter().map(|row| row.entity.clone()),
        )?;
        Ok(())
    }

    /// Entity names used by any table but missing from the catalog.
    #[must_use]
    pub fn uncatalogued_entities(&self) -> Vec<String> {
        let known: HashSet<&str> = self.entities.iter().map(|e| e.name.as_str()).collect();
        let mut missing = Vec::new();
        let used = self
            .quarterly
            .iter()
            .map(|r| r.entity.as_str())
            .chain(self.annual.iter().map(|r| r.entity.as_str()))
            .chain(self.ip_breakdown.iter().map(|r| r.entity.as_str()))
            .chain(self.productivity.iter().map(|r| r.entity.as_str()));
        for name in used {
            if !known.contains(name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        missing
    }
}

fn ensure_unique<I>(table: &'static str, keys: I) -> Result<(), RegistryError>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(RegistryError::Duplicate { table, key });
        }
    }
    Ok(())
}
