use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the registry tables with their row counts.
    Tables,
    /// Print the selected rows of one table.
    Table(TableArgs),
    /// Render one view as chart specs.
    View(ViewArgs),
    /// Render every view.
    Dashboard(ViewParamArgs),
    /// Headline KPIs for one company and quarter.
    Kpi(ViewParamArgs),
    /// Print the JSON Schema of a renderer type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TableArgs {
    /// Table name: quarterly, annual, ip_breakdown, productivity
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct ViewArgs {
    /// View name, e.g. margin_trend, period_snapshot, deep_dive
    pub kind: String,

    #[command(flatten)]
    pub params: ViewParamArgs,
}

/// Per-view overrides of the configured defaults.
#[derive(Clone, Debug, Default, Args)]
pub struct ViewParamArgs {
    /// Quarter for snapshot views and KPIs, e.g. 3Q25
    #[arg(long)]
    pub period: Option<String>,

    /// Value ranked by the snapshot view (Revenue or OP)
    #[arg(long)]
    pub field: Option<String>,

    /// Company for the deep dive, IP breakdown and KPIs
    #[arg(long)]
    pub entity: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name: chart_spec, kpi
    #[arg(default_value = "chart_spec")]
    pub type_name: String,
}
