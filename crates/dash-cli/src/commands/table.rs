use anyhow::Context;
use dash_view::filter_table;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArgs;
use crate::context::AppContext;
use crate::output::output_records;

/// Handle `gamedash table <name>`.
pub fn handle(args: &TableArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = ctx
        .registry
        .get_table(&args.name)
        .context("valid tables: quarterly, annual, ip_breakdown, productivity")?;

    let records = filter_table(table, &ctx.selection);
    tracing::debug!(table = %args.name, rows = records.len(), "table: selection applied");
    output_records(&records, flags.format)
}
