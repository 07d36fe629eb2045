//! Scalar KPI widgets.

use dash_core::rows::fields;
use dash_core::{Cell, CoreError, Kpi, Observation, Period, ProductivityRow, Row, Unit};

/// Margin KPIs for one company in one quarter, each with its change in
/// percentage points against the previous quarter.
///
/// Returns no widgets when the company has no row for `period`. The delta
/// is left out when either quarter's value is not applicable or the
/// previous quarter has no row.
pub fn margin_kpis(
    rows: &[Observation],
    entity: &str,
    period: Period,
) -> Result<Vec<Kpi>, CoreError> {
    const VIEW: &str = "kpi";

    let find = |period: Period| {
        rows.iter()
            .find(|row| row.entity == entity && row.period == period)
    };

    let Some(current) = find(period) else {
        tracing::debug!(entity, %period, "kpi: no row for selection");
        return Ok(Vec::new());
    };
    let previous = period.previous().and_then(find);

    let mut kpis = Vec::with_capacity(2);
    for (field, label) in [
        (fields::OPM, "operating margin"),
        (fields::EBITDA_MARGIN, "EBITDA margin"),
    ] {
        let value = current
            .field(field)
            .ok_or_else(|| CoreError::missing_field(VIEW, field))?;
        let baseline = previous.and_then(|row| row.field(field));
        let delta = match (value.as_number(), baseline.as_ref().and_then(Cell::as_number)) {
            (Some(now), Some(before)) => Some(now - before),
            _ => None,
        };

        kpis.push(Kpi {
            label: format!("{period} {label}"),
            entity: entity.to_string(),
            field: field.to_string(),
            value,
            unit: Unit::Percent,
            delta,
            delta_unit: delta.map(|_| Unit::PercentagePoint),
            baseline: delta.and(previous).map(|row| row.period.to_string()),
        });
    }

    Ok(kpis)
}

/// Headcount KPI for one company, if the productivity table has it.
#[must_use]
pub fn headcount_kpi(rows: &[ProductivityRow], entity: &str) -> Option<Kpi> {
    let row = rows.iter().find(|row| row.entity == entity)?;
    Some(Kpi {
        label: "Headcount".to_string(),
        entity: entity.to_string(),
        field: fields::HEADCOUNT.to_string(),
        value: Cell::from(row.headcount),
        unit: Unit::Persons,
        delta: None,
        delta_unit: None,
        baseline: None,
    })
}
