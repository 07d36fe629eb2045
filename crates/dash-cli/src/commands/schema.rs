use anyhow::bail;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Schema names accepted by `gamedash schema`.
const SCHEMA_NAMES: [&str; 2] = ["chart_spec", "kpi"];

/// Handle `gamedash schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_value(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_value(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        "chart_spec" => schema_for!(Vec<dash_core::ChartSpec>),
        "kpi" => schema_for!(Vec<dash_core::Kpi>),
        other => bail!(
            "unknown schema '{other}' (valid: {})",
            SCHEMA_NAMES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}
