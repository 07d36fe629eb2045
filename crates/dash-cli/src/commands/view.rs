use anyhow::Context;
use dash_view::{Dashboard, ViewKind};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewArgs;
use crate::context::AppContext;
use crate::output::output_specs;

/// Handle `gamedash view <kind>`.
pub fn handle(args: &ViewArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind: ViewKind = args.kind.parse().with_context(|| {
        let names = ViewKind::ALL.map(ViewKind::as_str).join(", ");
        format!("valid views: {names}")
    })?;
    let params = bootstrap::view_params(&args.params, &ctx.config);

    let specs = Dashboard::new(&ctx.registry)
        .render(kind, &ctx.selection, &params)
        .with_context(|| format!("failed to render view {kind}"))?;

    output_specs(&specs, flags.format)
}
