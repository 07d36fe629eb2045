//! Dataset loading error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid TOML or does not match the row shapes.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two rows share the key that must be unique within their table.
    #[error("duplicate row in table '{table}': {key}")]
    Duplicate { table: &'static str, key: String },
}
