use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::context::AppContext;

pub mod dashboard;
pub mod kpi;
pub mod schema;
pub mod table;
pub mod tables;
pub mod view;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Tables => tables::handle(ctx, flags),
        Commands::Table(args) => table::handle(args, ctx, flags),
        Commands::View(args) => view::handle(args, ctx, flags),
        Commands::Dashboard(args) => dashboard::handle(args, ctx, flags),
        Commands::Kpi(args) => kpi::handle(args, ctx, flags),
        Commands::Schema(args) => schema::handle(args, flags),
    }
}
