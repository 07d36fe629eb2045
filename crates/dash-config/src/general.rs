//! Default selection and view parameters.

use dash_core::Period;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Companies selected when the user does not pick any.
fn default_companies() -> Vec<String> {
    [
        "Shift Up",
        "Krafton",
        "Netmarble",
        "Nexon",
        "Pearl Abyss",
        "NCSoft",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_snapshot_period() -> String {
    "3Q25".to_string()
}

fn default_focus_company() -> String {
    "Shift Up".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Companies in the default selection. An empty list selects nothing.
    #[serde(default = "default_companies")]
    pub companies: Vec<String>,

    /// Quarters in the default selection. Absent means every quarter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<String>>,

    /// Quarter shown by the snapshot views and KPI widgets.
    #[serde(default = "default_snapshot_period")]
    pub snapshot_period: String,

    /// Company shown by the deep-dive view and KPI widgets.
    #[serde(default = "default_focus_company")]
    pub focus_company: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            companies: default_companies(),
            periods: None,
            snapshot_period: default_snapshot_period(),
            focus_company: default_focus_company(),
        }
    }
}

impl GeneralConfig {
    /// Check that every period tag is well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snapshot_period
            .parse::<Period>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "general.snapshot_period".into(),
                reason: e.to_string(),
            })?;

        for tag in self.periods.iter().flatten() {
            tag.parse::<Period>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "general.periods".into(),
                    reason: e.to_string(),
                })?;
        }

        if self.focus_company.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.focus_company".into(),
                reason: "must not be empty".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.companies.len(), 6);
        assert_eq!(config.companies[0], "Shift Up");
        assert!(config.periods.is_none());
        assert_eq!(config.snapshot_period, "3Q25");
        assert_eq!(config.focus_company, "Shift Up");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_period_is_rejected() {
        let config = GeneralConfig {
            periods: Some(vec!["1Q25".into(), "Q3".into()]),
            ..GeneralConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.periods"));
    }
}
