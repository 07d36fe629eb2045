//! Selection filter.
//!
//! A row passes when its entity is selected (exact, case-sensitive match)
//! and, if the row belongs to a quarter, that quarter is selected. Output
//! keeps the original row order. An empty entity selection matches nothing.

use std::collections::BTreeSet;

use dash_core::{Period, Record, Row, to_record};
use dash_registry::TableRef;
use serde::{Deserialize, Serialize};

/// Which quarters to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl PeriodFilter {
    /// Restrict to the given period tags.
    pub fn only<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(tags.into_iter().map(Into::into).collect())
    }

    /// Rows without a period are not subject to the period criterion.
    #[must_use]
    pub fn matches(&self, period: Option<Period>) -> bool {
        match (self, period) {
            (Self::All, _) | (Self::Only(_), None) => true,
            (Self::Only(tags), Some(period)) => tags.contains(&period.to_string()),
        }
    }
}

/// The user's inclusion criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub entities: BTreeSet<String>,
    pub periods: PeriodFilter,
}

impl Selection {
    /// Select the given entities across every period.
    pub fn entities<I, S>(entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entities: entities.into_iter().map(Into::into).collect(),
            periods: PeriodFilter::All,
        }
    }

    #[must_use]
    pub fn with_periods(mut self, periods: PeriodFilter) -> Self {
        self.periods = periods;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.entities.contains(row.entity()) && self.periods.matches(row.period())
    }
}

/// Keep the rows matching `selection`, in their original order.
#[must_use]
pub fn filter<R: Row + Clone>(rows: &[R], selection: &Selection) -> Vec<R> {
    if selection.is_empty() {
        tracing::debug!(rows = rows.len(), "filter: empty entity selection, nothing kept");
        return Vec::new();
    }

    let kept: Vec<R> = rows
        .iter()
        .filter(|row| selection.matches(*row))
        .cloned()
        .collect();

    tracing::debug!(rows = rows.len(), kept = kept.len(), "filter: applied selection");
    kept
}

/// Filter any registry table and flatten the survivors into records.
#[must_use]
pub fn filter_table(table: TableRef<'_>, selection: &Selection) -> Vec<Record> {
    match table {
        TableRef::Quarterly(rows) => filter(rows, selection).iter().map(to_record).collect(),
        TableRef::Annual(rows) => filter(rows, selection).iter().map(to_record).collect(),
        TableRef::IpBreakdown(rows) => filter(rows, selection).iter().map(to_record).collect(),
        TableRef::Productivity(rows) => filter(rows, selection).iter().map(to_record).collect(),
    }
}

#[cfg(test)]
mod tests {
    use dash_core::{AnnualMetricRow, Metric, Observation};

    use super::*;

    fn obs(entity: &str, tag: &str) -> Observation {
        Observation::new(entity, tag.parse().unwrap()).with_metric("OPM", 1.0)
    }

    fn table() -> Vec<Observation> {
        vec![
            obs("Shift Up", "1Q25"),
            obs("Krafton", "1Q25"),
            obs("Shift Up", "2Q25"),
            obs("Krafton", "2Q25"),
        ]
    }

    fn keys(rows: &[Observation]) -> Vec<String> {
        rows.iter()
            .map(|r| format!("{} {}", r.entity, r.period))
            .collect()
    }

    #[test]
    fn keeps_original_order() {
        let kept = filter(&table(), &Selection::entities(["Krafton", "Shift Up"]));
        assert_eq!(
            keys(&kept),
            vec!["Shift Up 1Q25", "Krafton 1Q25", "Shift Up 2Q25", "Krafton 2Q25"]
        );
    }

    #[test]
    fn empty_selection_keeps_nothing() {
        let kept = filter(&table(), &Selection::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn entity_match_is_case_sensitive() {
        let kept = filter(&table(), &Selection::entities(["shift up"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn unknown_entities_contribute_nothing() {
        let kept = filter(&table(), &Selection::entities(["Krafton", "Smilegate"]));
        assert_eq!(keys(&kept), vec!["Krafton 1Q25", "Krafton 2Q25"]);
    }

    #[test]
    fn period_restriction_applies_to_quarterly_rows() {
        let selection =
            Selection::entities(["Shift Up"]).with_periods(PeriodFilter::only(["2Q25"]));
        let kept = filter(&table(), &selection);
        assert_eq!(keys(&kept), vec!["Shift Up 2Q25"]);
    }

    #[test]
    fn period_restriction_ignores_rows_without_period() {
        let rows = vec![AnnualMetricRow {
            entity: "Krafton".into(),
            metric: "OP Margin".into(),
            value: Metric::Value(43.5),
        }];
        let selection = Selection::entities(["Krafton"]).with_periods(PeriodFilter::only(["3Q25"]));
        assert_eq!(filter(&rows, &selection).len(), 1);
    }
}
