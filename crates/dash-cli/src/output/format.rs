//! Unit-aware number formatting for table output.
//!
//! Currency is in 억원 (100 million KRW). JSON output never goes through
//! here; it carries plain numbers.

use dash_core::{Cell, Kpi, Unit};

pub const NOT_APPLICABLE: &str = "N/A";

/// Format one record cell using the unit of its field.
#[must_use]
pub fn format_cell(field: &str, cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Number(value) => format_number(*value, Unit::for_field(field)),
        Cell::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}

#[must_use]
pub fn format_number(value: f64, unit: Unit) -> String {
    match unit {
        Unit::HundredMillionWon => format!("{}억원", group_thousands(value, 0)),
        Unit::Percent => format!("{value:.1}%"),
        Unit::PercentagePoint => format!("{value:+.1}%p"),
        Unit::Persons => format!("{}명", group_thousands(value, 0)),
        Unit::Years => format!("{value:.1}년"),
        Unit::HundredMillionWonPerHead => format!("{value:.2}억원/명"),
        Unit::Label => value.to_string(),
    }
}

/// Headline value of a KPI widget.
#[must_use]
pub fn format_kpi_value(kpi: &Kpi) -> String {
    match &kpi.value {
        Cell::Number(value) => format_number(*value, kpi.unit),
        other => format_cell(&kpi.field, other),
    }
}

/// Change line of a KPI widget, e.g. `+4.9%p vs 2Q25`.
#[must_use]
pub fn format_kpi_delta(kpi: &Kpi) -> Option<String> {
    let delta = kpi.delta?;
    let unit = kpi.delta_unit.unwrap_or(kpi.unit);
    let change = format_number(delta, unit);
    Some(match &kpi.baseline {
        Some(baseline) => format!("{change} vs {baseline}"),
        None => change,
    })
}

/// `1234567.8` with 0 decimals → `1,234,568`.
fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(int, frac)| (int, Some(frac)));

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let rounds_to_zero = formatted.chars().all(|ch| matches!(ch, '0' | '.'));
    if value < 0.0 && !rounds_to_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}
