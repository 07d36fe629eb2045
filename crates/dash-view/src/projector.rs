//! View projector: filtered rows → [`ChartSpec`].
//!
//! Every view selects, derives, sorts and groups rows. None of them
//! aggregates across rows, so figures in different currencies are never
//! summed. A view whose required field is absent from the rows fails with
//! [`CoreError::Schema`]; an empty input yields an empty spec.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use dash_core::rows::fields;
use dash_core::{
    AnnualMetricRow, Catalog, Cell, ChartKind, ChartSpec, CoreError, IpBreakdownRow, Observation,
    Overlay, ProductivityRow, Record, Row, SortSpec, to_record,
};

/// Colours for the annual margin comparison series.
const ANNUAL_METRIC_COLORS: [(&str, &str); 2] =
    [("OP Margin", "#1F77B4"), ("EBITDA Margin", "#2CA02C")];

/// Colours for the deep-dive revenue and operating profit bars.
const DEEP_DIVE_COLORS: [(&str, &str); 2] = [(fields::REVENUE, "#FF9F9F"), (fields::OP, "#FF4B4B")];

/// Fixed range of the deep-dive margin axis.
const MARGIN_AXIS_RANGE: [f64; 2] = [0.0, 100.0];

/// Both productivity variants, built from one filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductivityViews {
    /// Ranked bars of companies with positive operating profit per employee.
    pub positive: ChartSpec,
    /// Every selected company, in table order.
    pub raw: ChartSpec,
}

/// Projects filtered rows onto chart specifications.
///
/// Holds the entity catalog for canonical ordering and colours; everything
/// else comes from the rows passed to each view.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    catalog: &'a Catalog,
}

impl<'a> Projector<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Operating margin per quarter, one line per company.
    pub fn margin_trend(&self, rows: &[Observation]) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "margin_trend";
        require_fields(VIEW, rows, &[fields::OPM])?;

        let mut ordered: Vec<&Observation> = rows.iter().collect();
        ordered.sort_by_key(|row| row.period);

        let mut spec = ChartSpec::new(
            "Quarterly operating margin (%)",
            ChartKind::Line,
            fields::PERIOD,
            fields::OPM,
        )
        .with_series(fields::ENTITY)
        .with_tooltips([fields::ENTITY, fields::PERIOD, fields::OPM]);
        spec.category_order = period_order(ordered.iter().map(|row| row.period.to_string()));
        spec.colors = self.entity_colors(ordered.iter().map(|row| row.entity.as_str()));
        spec.rows = ordered.into_iter().map(to_record).collect();

        tracing::debug!(view = VIEW, rows = spec.rows.len(), "projector: built view");
        Ok(spec)
    }

    /// One quarter's companies ranked by `value_field`, largest first.
    ///
    /// Ties keep table order. Not-applicable values rank after every number.
    /// A text field such as `entity` cannot be ranked and is rejected.
    pub fn period_snapshot(
        &self,
        rows: &[Observation],
        period: &str,
        value_field: &str,
    ) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "period_snapshot";
        let period: dash_core::Period = period.parse()?;
        require_fields(VIEW, rows, &[value_field])?;
        if rows
            .iter()
            .any(|row| matches!(row.field(value_field), Some(Cell::Text(_))))
        {
            return Err(CoreError::Validation(format!(
                "view '{VIEW}' ranks numeric fields; '{value_field}' holds text"
            )));
        }

        let mut records: Vec<Record> = rows
            .iter()
            .filter(|row| row.period == period)
            .map(to_record)
            .collect();
        sort_descending(&mut records, value_field);

        let mut spec = ChartSpec::new(
            format!("{period} {value_field}"),
            ChartKind::RankedBar,
            fields::ENTITY,
            value_field,
        )
        .with_series(fields::ENTITY)
        .with_tooltips([fields::ENTITY, value_field]);
        spec.sort = Some(SortSpec::descending(value_field));
        spec.category_order = text_values(&records, fields::ENTITY);
        spec.colors = self.entity_colors(spec.category_order.iter().map(String::as_str));
        spec.rows = records;

        tracing::debug!(view = VIEW, %period, rows = spec.rows.len(), "projector: built view");
        Ok(spec)
    }

    /// EBITDA margin per company grouped by quarter. Rows whose EBITDA
    /// margin is not applicable are left out entirely.
    pub fn ebitda_comparison(&self, rows: &[Observation]) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "ebitda_comparison";
        require_fields(VIEW, rows, &[fields::EBITDA_MARGIN])?;

        let records: Vec<Record> = rows
            .iter()
            .filter(|row| {
                row.metric(fields::EBITDA_MARGIN)
                    .is_some_and(|m| !m.is_not_applicable())
            })
            .map(to_record)
            .collect();

        let mut spec = ChartSpec::new(
            "Quarterly EBITDA margin (%)",
            ChartKind::GroupedBar,
            fields::ENTITY,
            fields::EBITDA_MARGIN,
        )
        .with_series(fields::PERIOD)
        .with_tooltips([fields::ENTITY, fields::PERIOD, fields::EBITDA_MARGIN]);
        spec.category_order = dedup(text_values(&records, fields::ENTITY));
        spec.rows = records;

        tracing::debug!(
            view = VIEW,
            rows = spec.rows.len(),
            dropped = rows.len() - spec.rows.len(),
            "projector: built view"
        );
        Ok(spec)
    }

    /// Operating profit per employee, as a positive-only ranking and as a
    /// raw table. Both variants read the same record set.
    pub fn productivity_ranking(
        &self,
        rows: &[ProductivityRow],
    ) -> Result<ProductivityViews, CoreError> {
        const VIEW: &str = "productivity_ranking";
        require_fields(VIEW, rows, &[fields::OP_PER_EMPLOYEE])?;

        let records: Vec<Record> = rows.iter().map(to_record).collect();

        let mut positive_rows: Vec<Record> = records
            .iter()
            .filter(|record| {
                record
                    .get(fields::OP_PER_EMPLOYEE)
                    .and_then(Cell::as_number)
                    .is_some_and(|v| v > 0.0)
            })
            .cloned()
            .collect();
        sort_descending(&mut positive_rows, fields::OP_PER_EMPLOYEE);

        let mut positive = ChartSpec::new(
            "Operating profit per employee",
            ChartKind::RankedBar,
            fields::ENTITY,
            fields::OP_PER_EMPLOYEE,
        )
        .with_series(fields::ENTITY)
        .with_tooltips([
            fields::ENTITY,
            fields::HEADCOUNT,
            fields::OP,
            fields::OP_PER_EMPLOYEE,
        ]);
        positive.sort = Some(SortSpec::descending(fields::OP_PER_EMPLOYEE));
        positive.category_order = text_values(&positive_rows, fields::ENTITY);
        positive.colors = self.entity_colors(positive.category_order.iter().map(String::as_str));
        positive.rows = positive_rows;

        let columns: Vec<String> = rows
            .first()
            .map(|row| row.field_names().into_iter().map(String::from).collect())
            .unwrap_or_default();
        let mut raw = ChartSpec::new(
            "Workforce productivity",
            ChartKind::Table,
            fields::ENTITY,
            fields::OP_PER_EMPLOYEE,
        )
        .with_tooltips(columns);
        raw.rows = records;

        tracing::debug!(
            view = VIEW,
            positive = positive.rows.len(),
            raw = raw.rows.len(),
            "projector: built view"
        );
        Ok(ProductivityViews { positive, raw })
    }

    /// Annual OP and EBITDA margins side by side, companies in canonical
    /// catalog order.
    pub fn annual_comparison(&self, rows: &[AnnualMetricRow]) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "annual_comparison";
        require_fields(VIEW, rows, &[fields::METRIC, fields::VALUE])?;

        let mut ordered: Vec<&AnnualMetricRow> = rows.iter().collect();
        ordered.sort_by_key(|row| self.catalog.rank(&row.entity));

        let mut spec = ChartSpec::new(
            "Annual margin comparison (%)",
            ChartKind::GroupedBar,
            fields::ENTITY,
            fields::VALUE,
        )
        .with_series(fields::METRIC)
        .with_tooltips([fields::ENTITY, fields::METRIC, fields::VALUE]);
        spec.category_order = dedup(ordered.iter().map(|row| row.entity.clone()).collect());
        spec.colors = ANNUAL_METRIC_COLORS
            .iter()
            .map(|(metric, color)| ((*metric).to_string(), (*color).to_string()))
            .collect();
        spec.rows = ordered.into_iter().map(to_record).collect();

        tracing::debug!(view = VIEW, rows = spec.rows.len(), "projector: built view");
        Ok(spec)
    }

    /// Revenue per IP of one company, stacked per quarter.
    ///
    /// IP names are only unique within a company, so rows of every other
    /// entity are dropped rather than stacked together.
    pub fn ip_breakdown(
        &self,
        rows: &[IpBreakdownRow],
        entity: &str,
    ) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "ip_breakdown";
        require_fields(VIEW, rows, &[fields::IP, fields::REVENUE, fields::SHARE])?;

        let mut ordered: Vec<&IpBreakdownRow> =
            rows.iter().filter(|row| row.entity == entity).collect();
        ordered.sort_by_key(|row| row.period);

        let mut spec = ChartSpec::new(
            format!("{entity} revenue by IP"),
            ChartKind::StackedBar,
            fields::PERIOD,
            fields::REVENUE,
        )
        .with_series(fields::IP)
        .with_tooltips([
            fields::ENTITY,
            fields::PERIOD,
            fields::IP,
            fields::REVENUE,
            fields::SHARE,
        ]);
        spec.category_order = period_order(ordered.iter().map(|row| row.period.to_string()));
        spec.rows = ordered.into_iter().map(to_record).collect();

        tracing::debug!(
            view = VIEW,
            entity,
            rows = spec.rows.len(),
            dropped = rows.len() - spec.rows.len(),
            "projector: built view"
        );
        Ok(spec)
    }

    /// Revenue and operating profit bars for one company per quarter, with
    /// its operating margin as a line on a secondary axis.
    pub fn entity_deep_dive(
        &self,
        rows: &[Observation],
        entity: &str,
    ) -> Result<ChartSpec, CoreError> {
        const VIEW: &str = "deep_dive";
        require_fields(VIEW, rows, &[fields::REVENUE, fields::OP, fields::OPM])?;

        let mut ordered: Vec<&Observation> =
            rows.iter().filter(|row| row.entity == entity).collect();
        ordered.sort_by_key(|row| row.period);

        let mut bars = Vec::with_capacity(ordered.len() * 2);
        let mut line = Vec::with_capacity(ordered.len());
        for row in &ordered {
            for measure in [fields::REVENUE, fields::OP] {
                let mut record = Record::new();
                record.insert(fields::ENTITY.into(), Cell::from(row.entity.as_str()));
                record.insert(fields::PERIOD.into(), Cell::Text(row.period.to_string()));
                record.insert(fields::MEASURE.into(), Cell::from(measure));
                record.insert(
                    fields::AMOUNT.into(),
                    row.field(measure).unwrap_or(Cell::NotApplicable),
                );
                bars.push(record);
            }

            let mut record = Record::new();
            record.insert(fields::PERIOD.into(), Cell::Text(row.period.to_string()));
            record.insert(
                fields::OPM.into(),
                row.field(fields::OPM).unwrap_or(Cell::NotApplicable),
            );
            line.push(record);
        }

        let mut spec = ChartSpec::new(
            format!("{entity} quarterly results and operating margin"),
            ChartKind::GroupedBar,
            fields::PERIOD,
            fields::AMOUNT,
        )
        .with_series(fields::MEASURE)
        .with_tooltips([fields::PERIOD, fields::MEASURE, fields::AMOUNT]);
        spec.category_order = period_order(ordered.iter().map(|row| row.period.to_string()));
        spec.colors = DEEP_DIVE_COLORS
            .iter()
            .map(|(measure, color)| ((*measure).to_string(), (*color).to_string()))
            .collect();
        if !line.is_empty() {
            spec.overlay = Some(Overlay {
                kind: ChartKind::Line,
                y_field: fields::OPM.into(),
                secondary_axis: true,
                range: Some(MARGIN_AXIS_RANGE),
                rows: line,
            });
        }
        spec.rows = bars;

        tracing::debug!(view = VIEW, entity, rows = spec.rows.len(), "projector: built view");
        Ok(spec)
    }

    /// Every field of the selected quarterly rows, in table order.
    #[must_use]
    pub fn raw_table(&self, rows: &[Observation]) -> ChartSpec {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for name in row.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }

        let mut spec = ChartSpec::new(
            "Quarterly data",
            ChartKind::Table,
            fields::ENTITY,
            fields::PERIOD,
        )
        .with_tooltips(columns);
        spec.rows = rows.iter().map(to_record).collect();
        spec
    }

    fn entity_colors<'n, I>(&self, names: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'n str>,
    {
        self.catalog.colors_for(names)
    }
}

/// Fail with a schema error if any row lacks one of `required`.
fn require_fields<R: Row>(view: &str, rows: &[R], required: &[&str]) -> Result<(), CoreError> {
    for row in rows {
        for field in required {
            if row.field(field).is_none() {
                return Err(CoreError::missing_field(view, *field));
            }
        }
    }
    Ok(())
}

/// Stable sort, largest number first, non-numbers last.
fn sort_descending(records: &mut [Record], field: &str) {
    records.sort_by(|a, b| {
        let a = a.get(field).and_then(Cell::as_number);
        let b = b.get(field).and_then(Cell::as_number);
        match (a, b) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn text_values(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.get(field).and_then(Cell::as_text))
        .map(String::from)
        .collect()
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Distinct period tags in chronological order.
fn period_order<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut tags = dedup(tags.into_iter().collect());
    tags.sort_by(|a, b| dash_core::period::compare_tags(a, b));
    tags
}
