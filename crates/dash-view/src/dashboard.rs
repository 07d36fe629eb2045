//! View dispatch: `(selection, view) -> ChartSpec`.
//!
//! The host (CLI, UI event loop) calls [`Dashboard::render`] whenever the
//! selection changes; nothing here keeps state between calls.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use dash_core::rows::fields;
use dash_core::{ChartSpec, CoreError, Kpi, Period};
use dash_registry::Registry;
use serde::{Deserialize, Serialize};

use crate::filter::{Selection, filter};
use crate::kpi;
use crate::projector::Projector;

// ---------------------------------------------------------------------------
// ViewKind
// ---------------------------------------------------------------------------

/// Every view the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    MarginTrend,
    PeriodSnapshot,
    EbitdaComparison,
    ProductivityRanking,
    AnnualComparison,
    IpBreakdown,
    DeepDive,
    RawTable,
}

impl ViewKind {
    pub const ALL: [Self; 8] = [
        Self::MarginTrend,
        Self::PeriodSnapshot,
        Self::EbitdaComparison,
        Self::ProductivityRanking,
        Self::AnnualComparison,
        Self::IpBreakdown,
        Self::DeepDive,
        Self::RawTable,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarginTrend => "margin_trend",
            Self::PeriodSnapshot => "period_snapshot",
            Self::EbitdaComparison => "ebitda_comparison",
            Self::ProductivityRanking => "productivity_ranking",
            Self::AnnualComparison => "annual_comparison",
            Self::IpBreakdown => "ip_breakdown",
            Self::DeepDive => "deep_dive",
            Self::RawTable => "raw_table",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::unknown("view", s))
    }
}

// ---------------------------------------------------------------------------
// ViewParams
// ---------------------------------------------------------------------------

/// View parameters beyond the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Quarter for the snapshot view and KPI widgets.
    pub period: String,
    /// Value ranked by the snapshot view (`Revenue` or `OP`).
    pub value_field: String,
    /// Company for the deep-dive, IP breakdown and KPI widgets.
    pub entity: String,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            period: "3Q25".to_string(),
            value_field: fields::REVENUE.to_string(),
            entity: "Shift Up".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Registry → filter → projector, as one pure call.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    registry: &'a Registry,
}

impl<'a> Dashboard<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Render one view for a selection.
    ///
    /// Most views yield one spec. The productivity view yields the positive
    /// ranking followed by the raw table, both from one filtered set.
    ///
    /// The deep-dive view follows `params.entity` rather than the entity
    /// selection; only the selection's period restriction applies to it.
    /// The IP breakdown shows `params.entity` only, and only while that
    /// company is selected.
    pub fn render(
        &self,
        kind: ViewKind,
        selection: &Selection,
        params: &ViewParams,
    ) -> Result<Vec<ChartSpec>, CoreError> {
        tracing::debug!(view = %kind, entities = selection.entities.len(), "dashboard: rendering view");

        let projector = Projector::new(self.registry.catalog());
        let specs = match kind {
            ViewKind::MarginTrend => {
                vec![projector.margin_trend(&filter(self.registry.quarterly(), selection))?]
            }
            ViewKind::PeriodSnapshot => vec![projector.period_snapshot(
                &filter(self.registry.quarterly(), selection),
                &params.period,
                &params.value_field,
            )?],
            ViewKind::EbitdaComparison => {
                vec![projector.ebitda_comparison(&filter(self.registry.quarterly(), selection))?]
            }
            ViewKind::ProductivityRanking => {
                let views =
                    projector.productivity_ranking(&filter(self.registry.productivity(), selection))?;
                vec![views.positive, views.raw]
            }
            ViewKind::AnnualComparison => {
                vec![projector.annual_comparison(&filter(self.registry.annual(), selection))?]
            }
            ViewKind::IpBreakdown => {
                vec![projector.ip_breakdown(
                    &filter(self.registry.ip_breakdown(), selection),
                    &params.entity,
                )?]
            }
            ViewKind::DeepDive => {
                let focus = Selection {
                    entities: BTreeSet::from([params.entity.clone()]),
                    periods: selection.periods.clone(),
                };
                vec![projector.entity_deep_dive(
                    &filter(self.registry.quarterly(), &focus),
                    &params.entity,
                )?]
            }
            ViewKind::RawTable => {
                vec![projector.raw_table(&filter(self.registry.quarterly(), selection))]
            }
        };

        Ok(specs)
    }

    /// Render every view in [`ViewKind::ALL`] order.
    pub fn render_all(
        &self,
        selection: &Selection,
        params: &ViewParams,
    ) -> Result<Vec<ChartSpec>, CoreError> {
        let mut specs = Vec::new();
        for kind in ViewKind::ALL {
            specs.extend(self.render(kind, selection, params)?);
        }
        Ok(specs)
    }

    /// KPI widgets for `params.entity` in `params.period`.
    ///
    /// Reads the unfiltered tables: the previous quarter is needed for the
    /// deltas even when the selection leaves it out.
    pub fn kpis(&self, params: &ViewParams) -> Result<Vec<Kpi>, CoreError> {
        let period: Period = params.period.parse()?;
        let mut kpis = kpi::margin_kpis(self.registry.quarterly(), &params.entity, period)?;
        kpis.extend(kpi::headcount_kpi(
            self.registry.productivity(),
            &params.entity,
        ));
        Ok(kpis)
    }
}
