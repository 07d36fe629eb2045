use anyhow::Context;
use dash_view::Dashboard;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewParamArgs;
use crate::context::AppContext;
use crate::output::output_kpis;

/// Handle `gamedash kpi`.
pub fn handle(args: &ViewParamArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let params = bootstrap::view_params(args, &ctx.config);
    let kpis = Dashboard::new(&ctx.registry)
        .kpis(&params)
        .with_context(|| format!("failed to compute KPIs for {} {}", params.entity, params.period))?;

    if kpis.is_empty() {
        tracing::warn!(entity = %params.entity, period = %params.period, "no quarterly row for KPI widgets");
    }
    output_kpis(&kpis, flags.format)
}
