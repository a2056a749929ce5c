mod common;

use assert_cmd::Command;
use common::{num, text, workbook_bytes, FixtureDir};
use predicates::str::contains;

fn sample_quality_bytes() -> Vec<u8> {
    workbook_bytes(&[(
        "DATA",
        vec![
            vec![text("Date"), text("GSM"), text("Shift"), text("Dry Strength (MD)")],
            vec![text("1-Aug-25"), num(18.5), text("A"), num(450.0)],
            vec![text("2-Aug-25"), num(18.7), text("B"), num(455.0)],
        ],
    )])
}

#[test]
fn quality_command_emits_json_to_stdout() {
    let dir = FixtureDir::new();
    let input = dir.write("quality.xlsx", &sample_quality_bytes());

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["quality", "-i", input.to_str().unwrap(), "--json", "-"])
        .assert()
        .success()
        .stdout(contains("\"date\": \"2025-08-02\""))
        .stdout(contains("\"gsm\""));
}

#[test]
fn quality_command_writes_json_file() {
    let dir = FixtureDir::new();
    let input = dir.write("quality.xlsx", &sample_quality_bytes());
    let output = dir.path().join("records.json");

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args([
            "quality",
            "-i",
            input.to_str().unwrap(),
            "--json",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).expect("read json output");
    let records: serde_json::Value = serde_json::from_str(&contents).expect("parse json");
    let array = records.as_array().expect("array of records");
    assert_eq!(array.len(), 2);
    // Newest first.
    assert_eq!(array[0]["date"], "2025-08-02");
    assert_eq!(array[1]["readings"]["gsm"]["value"], 18.5);
}

#[test]
fn quality_preview_renders_a_table() {
    let dir = FixtureDir::new();
    let input = dir.write("quality.xlsx", &sample_quality_bytes());

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["quality", "-i", input.to_str().unwrap(), "--preview"])
        .assert()
        .success()
        .stdout(contains("date"))
        .stdout(contains("2025-08-01"))
        .stdout(contains("18.50"));
}

#[test]
fn missing_sheet_fails_with_the_sheet_name() {
    let dir = FixtureDir::new();
    let bytes = workbook_bytes(&[(
        "Sheet1",
        vec![vec![text("Date")], vec![text("1-Aug-25")]],
    )]);
    let input = dir.write("wrong.xlsx", &bytes);

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["quality", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("no sheet named 'DATA'"));
}

#[test]
fn sheets_command_lists_workbook_sheets() {
    let dir = FixtureDir::new();
    let bytes = workbook_bytes(&[
        ("COSTING", vec![vec![text("Date")]]),
        ("RAW MATERIAL", vec![vec![text("Date")]]),
    ]);
    let input = dir.write("costing.xlsx", &bytes);

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["sheets", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("COSTING"))
        .stdout(contains("RAW MATERIAL"));
}

#[test]
fn costing_command_round_trips_line_items() {
    let dir = FixtureDir::new();
    let bytes = workbook_bytes(&[
        (
            "COSTING",
            vec![
                vec![text("Date"), text("Total Cost"), text("Production")],
                vec![text("1-Aug-25"), num(75_000.0), num(25.0)],
            ],
        ),
        (
            "RAW MATERIAL",
            vec![
                vec![text("Date"), text("Material"), text("Qty"), text("Rate")],
                vec![text("1-Aug-25"), text("Virgin Pulp"), num(12_000.0), num(4.5)],
            ],
        ),
    ]);
    let input = dir.write("costing.xlsx", &bytes);

    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["costing", "-i", input.to_str().unwrap(), "--json", "-"])
        .assert()
        .success()
        .stdout(contains("\"totalCost\": 75000.0"))
        .stdout(contains("\"material\": \"Virgin Pulp\""));
}

#[test]
fn nonexistent_input_file_fails_cleanly() {
    Command::cargo_bin("mill-intake")
        .expect("binary exists")
        .args(["quality", "-i", "no-such-file.xlsx"])
        .assert()
        .failure()
        .stderr(contains("Reading input file"));
}
