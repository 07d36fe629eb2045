use anyhow::Context;
use dash_config::DashConfig;
use dash_core::Period;
use dash_core::rows::fields;
use dash_view::{PeriodFilter, Selection, ViewParams};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewParamArgs;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DashConfig> {
    let config = DashConfig::load_with_dotenv(flags.config.as_deref());
    match &flags.config {
        Some(path) => {
            config.with_context(|| format!("failed to load config file {}", path.display()))
        }
        None => config.context("failed to load configuration"),
    }
}

/// Selection from `--companies`/`--periods`, falling back to the configured
/// defaults.
pub fn selection(flags: &GlobalFlags, config: &DashConfig) -> anyhow::Result<Selection> {
    let companies = flags
        .companies
        .as_ref()
        .unwrap_or(&config.general.companies)
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty());
    let selection = Selection::entities(companies);

    let Some(periods) = flags.periods.as_ref().or(config.general.periods.as_ref()) else {
        return Ok(selection);
    };

    let mut tags = Vec::with_capacity(periods.len());
    for tag in periods {
        let period: Period = tag
            .trim()
            .parse()
            .with_context(|| format!("invalid quarter '{tag}' in period selection"))?;
        tags.push(period.to_string());
    }
    Ok(selection.with_periods(PeriodFilter::only(tags)))
}

/// View parameters: command-line overrides over the configured defaults.
pub fn view_params(args: &ViewParamArgs, config: &DashConfig) -> ViewParams {
    ViewParams {
        period: args
            .period
            .clone()
            .unwrap_or_else(|| config.general.snapshot_period.clone()),
        value_field: args
            .field
            .clone()
            .unwrap_or_else(|| fields::REVENUE.to_string()),
        entity: args
            .entity
            .clone()
            .unwrap_or_else(|| config.general.focus_company.clone()),
    }
}
