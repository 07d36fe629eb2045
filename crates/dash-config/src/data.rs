//! Dataset source configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataConfig {
    /// Path to a dataset TOML file. Empty means the builtin dataset.
    #[serde(default)]
    pub path: String,
}

impl DataConfig {
    /// Returns `true` if an external dataset file is configured.
    #[must_use]
    pub fn is_external(&self) -> bool {
        !self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtin_dataset() {
        assert!(!DataConfig::default().is_external());
    }
}
