//! Serde roundtrip and JsonSchema validation tests for the renderer contract.

use std::collections::BTreeMap;

use schemars::schema_for;
use dash_core::chart::*;
use dash_core::units::Unit;
use dash_core::value::Cell;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn record(pairs: &[(&str, Cell)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            pretty_assertions::assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    ranked_bar_roundtrip,
    ChartSpec,
    ChartSpec {
        sort: Some(SortSpec::descending("Revenue")),
        rows: vec![
            record(&[("entity", Cell::from("Krafton")), ("Revenue", Cell::Number(8706.0))]),
            record(&[("entity", Cell::from("Shift Up")), ("Revenue", Cell::Number(755.0))]),
        ],
        colors: BTreeMap::from([
            ("Krafton".to_string(), "#1F77B4".to_string()),
            ("Shift Up".to_string(), "#FF4B4B".to_string()),
        ]),
        ..ChartSpec::new("3Q25 Revenue", ChartKind::RankedBar, "entity", "Revenue")
            .with_series("entity")
    }
);

roundtrip_and_validate!(
    not_applicable_cells_roundtrip,
    ChartSpec,
    ChartSpec {
        rows: vec![record(&[
            ("entity", Cell::from("Nexon")),
            ("period", Cell::from("1Q25")),
            ("EBITDA_Margin", Cell::NotApplicable),
        ])],
        ..ChartSpec::new("Raw", ChartKind::Table, "entity", "EBITDA_Margin")
    }
);

roundtrip_and_validate!(
    overlay_roundtrip,
    ChartSpec,
    ChartSpec {
        overlay: Some(Overlay {
            kind: ChartKind::Line,
            y_field: "OPM".into(),
            secondary_axis: true,
            range: Some([0.0, 100.0]),
            rows: vec![record(&[("period", Cell::from("3Q25")), ("OPM", Cell::Number(65.6))])],
        }),
        category_order: vec!["1Q25".into(), "2Q25".into(), "3Q25".into()],
        ..ChartSpec::new("Shift Up", ChartKind::GroupedBar, "period", "Amount")
            .with_series("Measure")
    }
);

roundtrip_and_validate!(
    kpi_roundtrip,
    Kpi,
    Kpi {
        label: "3Q25 OPM".into(),
        entity: "Shift Up".into(),
        field: "OPM".into(),
        value: Cell::Number(65.6),
        unit: Unit::Percent,
        delta: Some(4.9),
        delta_unit: Some(Unit::PercentagePoint),
        baseline: Some("2Q25".into()),
    }
);

#[test]
fn schema_rejects_not_applicable_spelled_as_null() {
    let schema = serde_json::to_value(schema_for!(Cell)).unwrap();
    let errors = validate_against_schema(&schema, &serde_json::Value::Null);
    assert!(!errors.is_empty());
}
