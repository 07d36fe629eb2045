//! Cross-cutting error types for gamedash.
//!
//! This module defines errors that can originate from any crate in the system.
//! Loader errors (`RegistryError`) and configuration errors (`ConfigError`) are
//! defined in their respective crates. Errors converge into `anyhow` in
//! `dash-cli`.

use thiserror::Error;

/// Errors that can be raised by any gamedash crate.
///
/// None of these are recoverable at runtime: they describe a caller bug
/// (unknown table or view name) or a mismatch between a view and the row
/// shape it was handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Unknown table or view name.
    #[error("Configuration error: unknown {kind} '{name}'")]
    Configuration { kind: &'static str, name: String },

    /// A view requires a field the supplied rows do not carry.
    #[error("Schema error: view '{view}' requires field '{field}' which is absent from the rows")]
    Schema { view: String, field: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for an unknown-name configuration error.
    #[must_use]
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Configuration {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a missing-field schema error.
    #[must_use]
    pub fn missing_field(view: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Schema {
            view: view.into(),
            field: field.into(),
        }
    }
}
