//! Canonical entity catalog: display order and colours.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One company known to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub name: String,
    /// Display colour as a `#rrggbb` hex string.
    pub color: String,
}

/// The fixed, ordered set of companies.
///
/// Order is the canonical display order, not discovery order and not
/// alphabetical. Names absent from the catalog rank after every listed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entities: Vec<EntityInfo>,
}

impl Catalog {
    #[must_use]
    pub const fn new(entities: Vec<EntityInfo>) -> Self {
        Self { entities }
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityInfo] {
        &self.entities
    }

    /// Entity names in canonical order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.name.clone()).collect()
    }

    /// Position in canonical order; unknown names get `len()`.
    #[must_use]
    pub fn rank(&self, name: &str) -> usize {
        self.entities
            .iter()
            .position(|e| e.name == name)
            .unwrap_or(self.entities.len())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.iter().any(|e| e.name == name)
    }

    #[must_use]
    pub fn color(&self, name: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.color.as_str())
    }

    /// Colour map restricted to the given names.
    #[must_use]
    pub fn colors_for<'a, I>(&self, names: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.color(name).map(|c| (name.to_string(), c.to_string())))
            .collect()
    }
}
