//! Row structs for every dataset table.
//!
//! All rows expose their fields by name through [`Row`], which is what the
//! selection filter and the view projector consume. Field lookup returns
//! `None` only when a field is structurally absent; a present but
//! inapplicable value is `Some(Cell::NotApplicable)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chart::Record;
use crate::period::Period;
use crate::value::{Cell, Metric};

/// Field names shared by rows and chart specs.
pub mod fields {
    pub const ENTITY: &str = "entity";
    pub const PERIOD: &str = "period";

    pub const REVENUE: &str = "Revenue";
    pub const OP: &str = "OP";
    pub const OPM: &str = "OPM";
    pub const EBITDA_MARGIN: &str = "EBITDA_Margin";

    pub const METRIC: &str = "Metric";
    pub const VALUE: &str = "Value";

    pub const IP: &str = "IP";
    pub const SHARE: &str = "Share";

    pub const HEADCOUNT: &str = "Headcount";
    pub const OP_PER_EMPLOYEE: &str = "OP_per_Employee";
    pub const DEVELOPER_RATIO: &str = "Developer_Ratio";
    pub const AVG_TENURE: &str = "Avg_Tenure";

    pub const MEASURE: &str = "Measure";
    pub const AMOUNT: &str = "Amount";
}

/// Named field access shared by all table rows.
pub trait Row {
    /// Company the row belongs to.
    fn entity(&self) -> &str;

    /// Quarter the row belongs to, if the table is quarterly.
    fn period(&self) -> Option<Period>;

    /// Look up a field by name. `None` means the row has no such field.
    fn field(&self, name: &str) -> Option<Cell>;

    /// All field names in display order.
    fn field_names(&self) -> Vec<&str>;
}

/// Copy every field of a row into a plain record.
#[must_use]
pub fn to_record<R: Row + ?Sized>(row: &R) -> Record {
    row.field_names()
        .into_iter()
        .filter_map(|name| row.field(name).map(|cell| (name.to_string(), cell)))
        .collect()
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// One company-quarter of financial metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entity: String,
    pub period: Period,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Metric>,
}

impl Observation {
    #[must_use]
    pub fn new(entity: impl Into<String>, period: Period) -> Self {
        Self {
            entity: entity.into(),
            period,
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style metric insertion, mostly for tests and fixtures.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<Metric>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> Option<Metric> {
        self.metrics.get(name).copied()
    }
}

impl Row for Observation {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Option<Period> {
        Some(self.period)
    }

    fn field(&self, name: &str) -> Option<Cell> {
        match name {
            fields::ENTITY => Some(Cell::from(self.entity.as_str())),
            fields::PERIOD => Some(Cell::Text(self.period.to_string())),
            metric => self.metric(metric).map(Cell::from),
        }
    }

    fn field_names(&self) -> Vec<&str> {
        let mut names = vec![fields::ENTITY, fields::PERIOD];
        names.extend(self.metrics.keys().map(String::as_str));
        names
    }
}

// ---------------------------------------------------------------------------
// AnnualMetricRow
// ---------------------------------------------------------------------------

/// One annual metric for one company, e.g. (Krafton, OP Margin, 43.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualMetricRow {
    pub entity: String,
    pub metric: String,
    pub value: Metric,
}

impl Row for AnnualMetricRow {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Option<Period> {
        None
    }

    fn field(&self, name: &str) -> Option<Cell> {
        match name {
            fields::ENTITY => Some(Cell::from(self.entity.as_str())),
            fields::METRIC => Some(Cell::from(self.metric.as_str())),
            fields::VALUE => Some(Cell::from(self.value)),
            _ => None,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        vec![fields::ENTITY, fields::METRIC, fields::VALUE]
    }
}

// ---------------------------------------------------------------------------
// IpBreakdownRow
// ---------------------------------------------------------------------------

/// Revenue attributed to one IP (game title) of a company in one quarter.
///
/// `share` is supplied with the data and never recomputed from `revenue`,
/// so the shares of one quarter need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpBreakdownRow {
    pub entity: String,
    pub period: Period,
    pub ip: String,
    pub revenue: Metric,
    pub share: Metric,
}

impl Row for IpBreakdownRow {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Option<Period> {
        Some(self.period)
    }

    fn field(&self, name: &str) -> Option<Cell> {
        match name {
            fields::ENTITY => Some(Cell::from(self.entity.as_str())),
            fields::PERIOD => Some(Cell::Text(self.period.to_string())),
            fields::IP => Some(Cell::from(self.ip.as_str())),
            fields::REVENUE => Some(Cell::from(self.revenue)),
            fields::SHARE => Some(Cell::from(self.share)),
            _ => None,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        vec![
            fields::ENTITY,
            fields::PERIOD,
            fields::IP,
            fields::REVENUE,
            fields::SHARE,
        ]
    }
}

// ---------------------------------------------------------------------------
// ProductivityRow
// ---------------------------------------------------------------------------

/// Annual workforce productivity for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRow {
    pub entity: String,
    pub headcount: Metric,
    pub op: Metric,
    pub op_per_employee: Metric,
    pub developer_ratio: Metric,
    pub avg_tenure: Metric,
}

impl Row for ProductivityRow {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Option<Period> {
        None
    }

    fn field(&self, name: &str) -> Option<Cell> {
        match name {
            fields::ENTITY => Some(Cell::from(self.entity.as_str())),
            fields::HEADCOUNT => Some(Cell::from(self.headcount)),
            fields::OP => Some(Cell::from(self.op)),
            fields::OP_PER_EMPLOYEE => Some(Cell::from(self.op_per_employee)),
            fields::DEVELOPER_RATIO => Some(Cell::from(self.developer_ratio)),
            fields::AVG_TENURE => Some(Cell::from(self.avg_tenure)),
            _ => None,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        vec![
            fields::ENTITY,
            fields::HEADCOUNT,
            fields::OP,
            fields::OP_PER_EMPLOYEE,
            fields::DEVELOPER_RATIO,
            fields::AVG_TENURE,
        ]
    }
}
