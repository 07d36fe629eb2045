use dash_core::{ChartSpec, Kpi, Record};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod format;
pub mod table;

/// Shown in place of a table when the selection produced no rows.
pub const NO_DATA: &str = "(no data)";

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print chart specs: JSON for renderers, or one formatted table per spec.
pub fn output_specs(specs: &[ChartSpec], format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(&specs, format);
    }

    let blocks = specs.iter().map(render_spec_table).collect::<Vec<_>>();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

/// Print table records with unit formatting in table mode.
pub fn output_records(records: &[Record], format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(&records, format);
    }

    let columns = record_columns(records);
    println!("{}", render_records(records, &columns));
    Ok(())
}

/// Print KPI widgets, one line each in table mode.
pub fn output_kpis(kpis: &[Kpi], format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(&kpis, format);
    }

    if kpis.is_empty() {
        println!("{NO_DATA}");
        return Ok(());
    }

    let headers = ["entity", "kpi", "value", "change"];
    let rows = kpis
        .iter()
        .map(|kpi| {
            vec![
                kpi.entity.clone(),
                kpi.label.clone(),
                format::format_kpi_value(kpi),
                format::format_kpi_delta(kpi).unwrap_or_else(|| String::from("-")),
            ]
        })
        .collect::<Vec<_>>();
    println!("{}", table::render_table(&headers, &rows, table_options()));
    Ok(())
}

/// Title, then the spec's rows (and overlay rows, if any) as tables.
#[must_use]
pub fn render_spec_table(spec: &ChartSpec) -> String {
    let mut out = format!("{} [{}]", spec.title, spec.kind);
    out.push('\n');

    if spec.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let columns = if spec.tooltip_fields.is_empty() {
        record_columns(&spec.rows)
    } else {
        spec.tooltip_fields.clone()
    };
    out.push_str(&render_records(&spec.rows, &columns));

    if let Some(overlay) = &spec.overlay {
        let axis = if overlay.secondary_axis {
            "secondary axis"
        } else {
            "primary axis"
        };
        out.push_str(&format!("\n\n{} {} ({axis})\n", overlay.kind, overlay.y_field));
        out.push_str(&render_records(&overlay.rows, &record_columns(&overlay.rows)));
    }

    out
}

fn render_records(records: &[Record], columns: &[String]) -> String {
    if records.is_empty() {
        return String::from(NO_DATA);
    }

    let headers = columns.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    record.get(column).map_or_else(
                        || String::from("-"),
                        |cell| format::format_cell(column, cell),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&headers, &rows, table_options())
}

/// Columns of a record set: `entity` and `period` first, the rest in key
/// order.
fn record_columns(records: &[Record]) -> Vec<String> {
    let mut columns = Vec::<String>::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns.sort_by_key(|column| match column.as_str() {
        "entity" => 0,
        "period" => 1,
        _ => 2,
    });
    columns
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_value_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_table(&headers, &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from(NO_DATA);
    }

    let mut headers = Vec::<String>::new();
    for item in items.iter().filter_map(Value::as_object) {
        for key in item.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, table_options());
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use dash_core::{Cell, ChartKind, Overlay};
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct TableSummary {
        name: &'static str,
        rows: usize,
    }

    fn record(pairs: &[(&str, Cell)]) -> Record {
        pairs
            .iter()
            .map(|(key, cell)| ((*key).to_string(), cell.clone()))
            .collect()
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = TableSummary {
            name: "quarterly",
            rows: 18,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["name"], "quarterly");
        assert_eq!(parsed["rows"], 18);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = vec![TableSummary {
            name: "annual",
            rows: 12,
        }];
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_array_lists_every_field() {
        let value = vec![
            TableSummary {
                name: "quarterly",
                rows: 18,
            },
            TableSummary {
                name: "productivity",
                rows: 6,
            },
        ];
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        assert!(header.starts_with("name"));
        assert!(header.contains("rows"));
        assert!(out.contains("productivity"));
    }

    #[test]
    fn empty_spec_renders_no_data() {
        let spec = ChartSpec::new("3Q25 Revenue", ChartKind::RankedBar, "entity", "Revenue");
        let out = render_spec_table(&spec);
        assert_eq!(out, "3Q25 Revenue [ranked_bar]\n(no data)");
    }

    #[test]
    fn spec_table_formats_units_and_not_applicable() {
        let mut spec = ChartSpec::new("Quarterly data", ChartKind::Table, "entity", "period")
            .with_tooltips(["entity", "period", "Revenue", "EBITDA_Margin"]);
        spec.rows = vec![record(&[
            ("entity", Cell::from("Nexon")),
            ("period", Cell::from("1Q25")),
            ("Revenue", Cell::Number(1270.0)),
            ("EBITDA_Margin", Cell::NotApplicable),
        ])];

        let out = render_spec_table(&spec);
        assert!(out.contains("1,270억원"));
        assert!(out.contains("N/A"));
        assert!(!out.contains("0.0%"));
    }

    #[test]
    fn overlay_rows_follow_the_main_table() {
        let mut spec = ChartSpec::new("Shift Up", ChartKind::GroupedBar, "period", "Amount")
            .with_tooltips(["period", "Measure", "Amount"]);
        spec.rows = vec![record(&[
            ("period", Cell::from("3Q25")),
            ("Measure", Cell::from("Revenue")),
            ("Amount", Cell::Number(755.0)),
        ])];
        spec.overlay = Some(Overlay {
            kind: ChartKind::Line,
            y_field: "OPM".into(),
            secondary_axis: true,
            range: Some([0.0, 100.0]),
            rows: vec![record(&[
                ("period", Cell::from("3Q25")),
                ("OPM", Cell::Number(65.6)),
            ])],
        });

        let out = render_spec_table(&spec);
        assert!(out.contains("line OPM (secondary axis)"));
        assert!(out.contains("65.6%"));
    }

    #[test]
    fn record_columns_lead_with_entity_and_period() {
        let records = vec![record(&[
            ("OPM", Cell::Number(1.0)),
            ("period", Cell::from("1Q25")),
            ("entity", Cell::from("Krafton")),
        ])];
        assert_eq!(record_columns(&records), vec!["entity", "period", "OPM"]);
    }
}
