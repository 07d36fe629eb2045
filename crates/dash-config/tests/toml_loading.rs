//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use dash_config::DashConfig;

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
companies = ["Shift Up", "Krafton"]
periods = ["2Q25", "3Q25"]
snapshot_period = "2Q25"
focus_company = "Krafton"
"#,
        )?;

        let config: DashConfig = Figment::from(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.companies, vec!["Shift Up", "Krafton"]);
        assert_eq!(
            config.general.periods,
            Some(vec!["2Q25".to_string(), "3Q25".to_string()])
        );
        assert_eq!(config.general.snapshot_period, "2Q25");
        assert_eq!(config.general.focus_company, "Krafton");
        Ok(())
    });
}

#[test]
fn loads_data_path_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[data]
path = "fixtures/dashboard.toml"
"#,
        )?;

        let config: DashConfig = Figment::from(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.data.is_external());
        assert_eq!(config.data.path, "fixtures/dashboard.toml");
        Ok(())
    });
}

#[test]
fn empty_company_list_is_kept_empty() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
companies = []
"#,
        )?;

        let config: DashConfig = Figment::from(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.general.companies.is_empty());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
snapshot_period = "1Q25"
"#,
        )?;
        jail.set_env("GAMEDASH_GENERAL__SNAPSHOT_PERIOD", "2Q25");

        let config: DashConfig = Figment::from(Serialized::defaults(DashConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("GAMEDASH_").split("__"))
            .extract()?;

        assert_eq!(config.general.snapshot_period, "2Q25");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gamedash")?;
        jail.create_file(
            ".gamedash/config.toml",
            r#"
[general]
focus_company = "Krafton"
"#,
        )?;

        let config = DashConfig::load().expect("config loads");
        assert_eq!(config.general.focus_company, "Krafton");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gamedash")?;
        jail.create_file(
            ".gamedash/config.toml",
            r#"
[general]
snapshot_period = "1Q25"
"#,
        )?;
        jail.create_file(
            "override.toml",
            r#"
[general]
snapshot_period = "2Q25"
"#,
        )?;

        let config =
            DashConfig::load_from(std::path::Path::new("override.toml")).expect("config loads");
        assert_eq!(config.general.snapshot_period, "2Q25");
        Ok(())
    });
}

#[test]
fn invalid_snapshot_period_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("GAMEDASH_GENERAL__SNAPSHOT_PERIOD", "Q3-2025");

        let result = DashConfig::load();
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("general.snapshot_period"), "{message}");
        Ok(())
    });
}

#[test]
fn dotenv_loader_layers_the_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "override.toml",
            r#"
[general]
focus_company = "NCSoft"
"#,
        )?;

        let config = DashConfig::load_with_dotenv(Some(std::path::Path::new("override.toml")))
            .expect("config loads");
        assert_eq!(config.general.focus_company, "NCSoft");

        let defaults = DashConfig::load_with_dotenv(None).expect("config loads");
        assert_eq!(defaults.general.focus_company, "Shift Up");
        Ok(())
    });
}
