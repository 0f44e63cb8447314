//! Integration tests for the wtrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging completion marks and weights
//! - Markdown and JSON reports
//! - Import merging and rejection
//! - Week navigation output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI pointed at an isolated data dir and config home
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wtrack"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn store_path(dir: &Path) -> std::path::PathBuf {
    dir.join("data").join("workout-tracker-v1.json")
}

fn read_store(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(store_path(dir)).expect("Failed to read store");
    serde_json::from_str(&raw).expect("Store is not JSON")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("wtrack"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly workout plan tracker"));
}

#[test]
fn test_check_and_weight_persist() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["check", "Monday-0-0-A", "--week", "2025-W05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press done"));

    cli(dir)
        .args(["weight", "Monday-0-0-A", "80", "--week", "2025-W05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press: 80 kg"));

    let store = read_store(dir);
    assert_eq!(store["2025-W05"]["completion"]["Monday-0-0-A"], true);
    assert_eq!(store["2025-W05"]["weights"]["Monday-0-0-A"], "80");
}

#[test]
fn test_check_toggle_and_off() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["check", "Tuesday-cardio-0", "--week", "2025-W05", "--toggle"])
        .assert()
        .success();
    assert_eq!(read_store(dir)["2025-W05"]["completion"]["Tuesday-cardio-0"], true);

    cli(dir)
        .args(["check", "Tuesday-cardio-0", "--week", "2025-W05", "--off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not done"));
    assert_eq!(read_store(dir)["2025-W05"]["completion"]["Tuesday-cardio-0"], false);
}

#[test]
fn test_imported_cardio_mark_is_shown() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .arg("import")
        .write_stdin(r#"{"weeks": {"2025-W05": {"completion": {"Monday-cardio-0": true}}}}"#)
        .assert()
        .success();

    cli(dir)
        .args(["show", "--week", "2025-W05", "--day", "Monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("Monday-cardio-0"))
        .stdout(predicate::str::contains("Monday-cardio-1").not());

    cli(dir)
        .args(["check", "Monday-cardio-1", "--week", "2025-W05"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_key_rejected() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["weight", "Monday-9-9-A", "80", "--week", "2025-W05"])
        .assert()
        .failure();

    // Straight sets have no B slot
    cli(dir)
        .args(["check", "Wednesday-0-0-B", "--week", "2025-W05"])
        .assert()
        .failure();

    // Cardio takes marks, not weights
    cli(dir)
        .args(["weight", "Monday-cardio-0", "45", "--week", "2025-W05"])
        .assert()
        .failure();

    assert!(!store_path(dir).exists());
}

#[test]
fn test_invalid_week_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["show", "--week", "2025-W60"])
        .assert()
        .failure();
}

#[test]
fn test_show_day() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["weight", "Monday-0-0-A", "77.5", "--week", "2025-W04"])
        .assert()
        .success();

    cli(dir)
        .args(["show", "--week", "2025-W05", "--day", "mon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest + Back + Abs"))
        .stdout(predicate::str::contains("10 total sets"))
        .stdout(predicate::str::contains("A: Bench Press"))
        .stdout(predicate::str::contains("(last: 77.5 kg)"))
        .stdout(predicate::str::contains("45' continuous at 60–70% max heart rate"));
}

#[test]
fn test_show_rest_day() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["show", "--week", "2025-W05", "--day", "Sunday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REST DAY"))
        .stdout(predicate::str::contains("Suggested recovery"));
}

#[test]
fn test_week_navigation() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["week", "--week", "2025-W52"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-W51"))
        .stdout(predicate::str::contains("2026-W01"))
        .stdout(predicate::str::contains("Sun  rest"));
}

#[test]
fn test_markdown_report_to_stdout() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["weight", "Monday-0-0-A", "80", "--week", "2025-W05"])
        .assert()
        .success();

    cli(dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Workout plan progress report"))
        .stdout(predicate::str::contains("## Week 2025-W05 (Jan 27–Feb 2)"))
        .stdout(predicate::str::contains("- **Bench Press**: 80 kg"));
}

#[test]
fn test_json_report_roundtrip_via_import() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let export = dir.join("export.json");

    cli(dir)
        .args(["check", "Friday-1-0-B", "--week", "2025-W10"])
        .assert()
        .success();
    cli(dir)
        .args(["weight", "Friday-1-0-B", "35", "--week", "2025-W10"])
        .assert()
        .success();

    cli(dir)
        .args(["report", "--format", "json", "--output"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(exported["weeks"]["2025-W10"]["label"], "Mar 3–Mar 9");
    assert_eq!(exported["exerciseHistory"]["Barbell Curl"][0], "35");

    // Import into a fresh data dir
    let other = setup_test_dir();
    cli(other.path())
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported successfully"));

    assert_eq!(read_store(other.path()), read_store(dir));
}

#[test]
fn test_import_from_stdin_merges() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["weight", "Monday-0-0-A", "80", "--week", "2025-W05"])
        .assert()
        .success();

    cli(dir)
        .arg("import")
        .write_stdin(r#"{"weeks": {"2025-W06": {"weights": {"Monday-0-0-A": "82.5"}}}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported successfully"));

    let store = read_store(dir);
    assert_eq!(store["2025-W05"]["weights"]["Monday-0-0-A"], "80");
    assert_eq!(store["2025-W06"]["weights"]["Monday-0-0-A"], "82.5");
}

#[test]
fn test_invalid_import_reports_and_keeps_store() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["weight", "Monday-0-0-A", "80", "--week", "2025-W05"])
        .assert()
        .success();
    let before = fs::read_to_string(store_path(dir)).unwrap();

    for bad in ["{not json", r#"{"weeks": []}"#, r#"{"days": {}}"#] {
        cli(dir)
            .arg("import")
            .write_stdin(bad)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid data"));
    }

    assert_eq!(fs::read_to_string(store_path(dir)).unwrap(), before);
}

#[test]
fn test_keys_listing() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["keys", "--day", "Tuesday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tuesday-2-1-A"))
        .stdout(predicate::str::contains("Skull Crusher"))
        .stdout(predicate::str::contains("Tuesday-cardio-0"))
        .stdout(predicate::str::contains("Tuesday-2-1-B").not());
}
