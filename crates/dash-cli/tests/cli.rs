//! Runs the `gamedash` binary against the builtin dataset.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;

fn gamedash(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gamedash"))
        .args(args)
        .current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("GAMEDASH_LOG")
        .env_remove("GAMEDASH_DATA__PATH")
        .env_remove("GAMEDASH_GENERAL__COMPANIES")
        .env_remove("GAMEDASH_GENERAL__PERIODS")
        .output()
        .expect("run gamedash")
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "gamedash failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn tables_lists_row_counts() {
    let dir = tempfile::tempdir().unwrap();
    let value = json(&gamedash(dir.path(), &["tables"]));
    assert_eq!(value[0]["name"], "quarterly");
    assert_eq!(value[0]["rows"], 18);
    assert_eq!(value.as_array().map(Vec::len), Some(4));
}

#[test]
fn snapshot_view_ranks_selected_companies() {
    let dir = tempfile::tempdir().unwrap();
    let value = json(&gamedash(
        dir.path(),
        &["--companies", "Shift Up,Krafton", "view", "period_snapshot"],
    ));
    let rows = value[0]["rows"].as_array().expect("rows");
    let entities: Vec<&str> = rows
        .iter()
        .filter_map(|row| row["entity"]["text"].as_str())
        .collect();
    assert_eq!(entities, vec!["Krafton", "Shift Up"]);
}

#[test]
fn table_format_prints_units_and_not_applicable() {
    let dir = tempfile::tempdir().unwrap();
    let output = gamedash(
        dir.path(),
        &["--format", "table", "--companies", "Nexon", "table", "quarterly"],
    );
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("1,270억원"));
    assert!(text.contains("N/A"));
}

#[test]
fn empty_selection_prints_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let output = gamedash(
        dir.path(),
        &["--format", "table", "--companies", "", "view", "margin_trend"],
    );
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("(no data)"));
}

#[test]
fn unknown_view_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let output = gamedash(dir.path(), &["view", "waterfall"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("gamedash error:"));
    assert!(stderr.contains("waterfall"));
}

#[test]
fn project_config_sets_default_selection() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".gamedash")).unwrap();
    std::fs::write(
        dir.path().join(".gamedash/config.toml"),
        "[general]\ncompanies = [\"NCSoft\"]\n",
    )
    .unwrap();

    let value = json(&gamedash(dir.path(), &["table", "productivity"]));
    let rows = value.as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["entity"]["text"], "NCSoft");
}

#[test]
fn external_dataset_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.toml");
    std::fs::write(
        &data,
        r##"
[[entity]]
name = "Smilegate"
color = "#17BECF"

[[quarterly]]
entity = "Smilegate"
period = "3Q25"
Revenue = 1500
OP = 300
OPM = 20.0
EBITDA_Margin = "n/a"
"##,
    )
    .unwrap();

    let value = json(&gamedash(
        dir.path(),
        &[
            "--data",
            data.to_str().unwrap(),
            "--companies",
            "Smilegate",
            "kpi",
            "--entity",
            "Smilegate",
        ],
    ));
    let kpis = value.as_array().expect("kpis");
    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[1]["value"], "not_applicable");
}

#[test]
fn schema_describes_chart_specs() {
    let dir = tempfile::tempdir().unwrap();
    let value = json(&gamedash(dir.path(), &["schema"]));
    assert_eq!(value["type"], "array");
}

#[test]
fn snapshot_refuses_to_rank_a_text_field() {
    let dir = tempfile::tempdir().unwrap();
    let output = gamedash(dir.path(), &["view", "period_snapshot", "--field", "entity"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("'entity' holds text"), "{stderr}");
}
