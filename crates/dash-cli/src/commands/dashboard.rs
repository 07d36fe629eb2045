use anyhow::Context;
use dash_view::Dashboard;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewParamArgs;
use crate::context::AppContext;
use crate::output::output_specs;

/// Handle `gamedash dashboard`.
pub fn handle(args: &ViewParamArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let params = bootstrap::view_params(args, &ctx.config);
    let specs = Dashboard::new(&ctx.registry)
        .render_all(&ctx.selection, &params)
        .context("failed to render dashboard")?;

    output_specs(&specs, flags.format)
}
