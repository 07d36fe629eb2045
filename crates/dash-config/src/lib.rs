//! # dash-config
//!
//! Layered configuration loading for gamedash using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GAMEDASH_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`, if any
//! 3. Project-level `.gamedash/config.toml`
//! 4. User-level `~/.config/gamedash/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GAMEDASH_GENERAL__SNAPSHOT_PERIOD` -> `general.snapshot_period`,
//! `GAMEDASH_DATA__PATH` -> `data.path`, etc. Lists are written in TOML
//! syntax: `GAMEDASH_GENERAL__COMPANIES='["Shift Up", "Krafton"]'`.
//!
//! # Usage
//!
//! ```no_run
//! use dash_config::DashConfig;
//!
//! let config = DashConfig::load_with_dotenv(None).expect("config");
//! println!("snapshot quarter: {}", config.general.snapshot_period);
//! ```

mod data;
mod error;
mod general;

pub use data::DataConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl DashConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment(None))
    }

    /// Load configuration with an extra TOML file layered above the
    /// project-level file and below the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::extract(Self::figment(Some(path)))
    }

    /// Load configuration with `.env` file support, layering `explicit`
    /// (if given) as [`Self::load_from`] does.
    ///
    /// Variables already set in the process win over the `.env` file.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::extract(Self::figment(explicit))
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".gamedash/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("GAMEDASH_").split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.general.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gamedash").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = DashConfig::default();
        assert!(!config.data.is_external());
        assert_eq!(config.general.snapshot_period, "3Q25");
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = DashConfig::figment(None);
        let config: DashConfig = figment.extract().expect("should extract defaults");
        assert!(!config.data.is_external());
        assert_eq!(config.general.companies.len(), 6);
        assert!(config.general.periods.is_none());
    }
}
