use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TableSummary {
    name: &'static str,
    rows: usize,
}

/// Handle `gamedash tables`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summaries = ctx
        .registry
        .table_names()
        .iter()
        .map(|name| TableSummary {
            name: name.as_str(),
            rows: ctx.registry.table(*name).len(),
        })
        .collect::<Vec<_>>();

    output(&summaries, flags.format)
}
