//! Backend-agnostic chart and KPI specifications.
//!
//! A [`ChartSpec`] is the full contract with the renderer: which fields map
//! to which axes, the projected rows, and an optional sort. It carries raw
//! numbers and tri-state cells only; unit suffixes and decimal precision are
//! applied by the presentation layer.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::units::Unit;
use crate::value::Cell;

/// One projected row: field name → cell.
pub type Record = BTreeMap<String, Cell>;

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// Kind of chart the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    GroupedBar,
    StackedBar,
    RankedBar,
    Table,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::GroupedBar => "grouped_bar",
            Self::StackedBar => "stacked_bar",
            Self::RankedBar => "ranked_bar",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort already applied to `ChartSpec::rows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortSpec {
    pub field: String,
    pub direction: Direction,
}

impl SortSpec {
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// A second series drawn over the main chart, e.g. a margin line over
/// revenue bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Overlay {
    pub kind: ChartKind,
    pub y_field: String,
    /// Draw against a secondary y axis.
    pub secondary_axis: bool,
    /// Fixed `[min, max]` for the overlay axis.
    pub range: Option<[f64; 2]>,
    pub rows: Vec<Record>,
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// Declarative chart or table description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_field: String,
    pub y_field: String,
    pub series_field: Option<String>,
    pub tooltip_fields: Vec<String>,
    pub rows: Vec<Record>,
    pub sort: Option<SortSpec>,
    /// Explicit category order for the x axis. Empty means row order.
    pub category_order: Vec<String>,
    pub overlay: Option<Overlay>,
    /// Series value → `#rrggbb`.
    pub colors: BTreeMap<String, String>,
}

impl ChartSpec {
    /// Start a spec with no rows, no sort and no overlay.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        kind: ChartKind,
        x_field: impl Into<String>,
        y_field: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            x_field: x_field.into(),
            y_field: y_field.into(),
            series_field: None,
            tooltip_fields: Vec::new(),
            rows: Vec::new(),
            sort: None,
            category_order: Vec::new(),
            overlay: None,
            colors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, field: impl Into<String>) -> Self {
        self.series_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_tooltips<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tooltip_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// True when the selection produced nothing to draw. Renderers show an
    /// explicit "no data" state for it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one field across all rows, in row order.
    #[must_use]
    pub fn column(&self, field: &str) -> Vec<Option<&Cell>> {
        self.rows.iter().map(|row| row.get(field)).collect()
    }

    /// Text values of one field across all rows; non-text cells are skipped.
    #[must_use]
    pub fn text_column(&self, field: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.get(field).and_then(Cell::as_text))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Kpi
// ---------------------------------------------------------------------------

/// A scalar KPI widget: one headline value with an optional change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Kpi {
    pub label: String,
    pub entity: String,
    pub field: String,
    pub value: Cell,
    pub unit: Unit,
    /// Change against `baseline`, in `delta_unit`.
    pub delta: Option<f64>,
    pub delta_unit: Option<Unit>,
    pub baseline: Option<String>,
}
