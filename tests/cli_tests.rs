//! End-to-end tests of the gear-solver binary

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SMALL_PROFILE: &str = r#"{
    "version": "1.0.0",
    "name": "bench lathe",
    "gears": [20, 25, 40, 50],
    "train_lengths": [2, 4],
    "leadscrew": { "mm": 2 },
    "tolerance": 0.001,
    "preferred_driver": 25,
    "metric_pitches": [1.0, 0.8],
    "imperial_pitches": []
}"#;

fn gear_solver() -> Command {
    Command::cargo_bin("gear-solver").unwrap()
}

fn write_profile(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("lathe.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_find_metric_pitch() {
    gear_solver()
        .args(["find", "--mm", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metric threads"))
        .stdout(predicate::str::contains("1.500 mm"));
}

#[test]
fn test_find_uses_preferred_driver_from_profile() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    // 1 mm on a 2 mm leadscrew needs ratio 2: 20:40 or 25:50
    gear_solver()
        .args(["find", "--mm", "1", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("[25:50]"))
        .stdout(predicate::str::contains("[20:40]").not());
}

#[test]
fn test_find_without_preference_shows_all_ties() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    gear_solver()
        .args(["find", "--ratio", "2", "--no-preference", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("[20:40]"))
        .stdout(predicate::str::contains("[25:50]"));
}

#[test]
fn test_find_requires_a_target() {
    gear_solver().arg("find").assert().failure();
    gear_solver()
        .args(["find", "--mm", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn test_find_warns_when_out_of_tolerance() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    gear_solver()
        .args(["find", "--ratio", "7", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stderr(predicate::str::contains("no gear train within tolerance"))
        .stdout(predicate::str::contains("(nearest)"));
}

#[test]
fn test_table_json_output() {
    let output = gear_solver()
        .args(["table", "--metric-only", "--lengths", "2,4", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 25);
    for result in results {
        assert_eq!(result["system"], "metric");
        assert!(!result["trains"].as_array().unwrap().is_empty());
    }
    assert_eq!(json["leadscrew"]["unit"], "tpi");
}

#[test]
fn test_table_tsv_output() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    let output = gear_solver()
        .args(["table", "--format", "tsv", "--profile"])
        .arg(&profile)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("system\tpitch\tunit"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.starts_with("metric\t")));
}

#[test]
fn test_trains_listing() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    // 4 distinct gears, no duplicates: 12 ordered pairs
    let output = gear_solver()
        .args(["trains", "--lengths", "2", "--format", "tsv", "--profile"])
        .arg(&profile)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 13);

    gear_solver()
        .args(["trains", "--min", "2", "--max", "2", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("[20:40]"))
        .stdout(predicate::str::contains("[25:50]"))
        .stdout(predicate::str::contains("[20:25]").not());
}

#[test]
fn test_trains_rejects_inverted_range() {
    gear_solver()
        .args(["trains", "--min", "3", "--max", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed"));
}

#[test]
fn test_profile_show() {
    gear_solver()
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gears: 13"))
        .stdout(predicate::str::contains("8.000 tpi"));
}

#[test]
fn test_profile_export_then_use() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("exported.json");

    gear_solver()
        .args(["profile", "export"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported profile"));

    let contents = std::fs::read_to_string(&exported).unwrap();
    assert!(contents.contains("\"created_at\""));

    gear_solver()
        .args(["find", "--tpi", "16", "--lengths", "2", "--profile"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("16.000 tpi"));
}

#[test]
fn test_invalid_profile_fails() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, "{ not json");

    gear_solver()
        .args(["table", "--profile"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse profile"));
}

#[test]
fn test_no_trains_is_an_error() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    gear_solver()
        .args(["table", "--lengths", "6", "--profile"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No gear trains can be built"));
}

#[test]
fn test_rejected_length_reported_once() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, SMALL_PROFILE);

    for command in ["table", "trains"] {
        let output = gear_solver()
            .args([command, "--lengths", "2,3", "--profile"])
            .arg(&profile)
            .output()
            .unwrap();
        assert!(output.status.success());

        let stderr = String::from_utf8(output.stderr).unwrap();
        assert_eq!(stderr.matches("Invalid train length 3").count(), 1, "{command}: {stderr}");
    }
}

const TIED_PROFILE: &str = r#"{
    "version": "1.0.0",
    "name": "six ways to double",
    "gears": [20, 22, 25, 30, 35, 40, 44, 45, 50, 60, 70, 90],
    "train_lengths": [2],
    "leadscrew": { "mm": 2 },
    "tolerance": 0.001,
    "metric_pitches": [1.0],
    "imperial_pitches": []
}"#;

#[test]
fn test_machine_readable_output_lists_every_tie() {
    let dir = TempDir::new().unwrap();
    let profile = write_profile(&dir, TIED_PROFILE);

    // 20:40, 22:44, 25:50, 30:60, 35:70 and 45:90
    let output = gear_solver()
        .args(["find", "--ratio", "2", "--no-preference", "--format", "json", "--profile"])
        .arg(&profile)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let result = &json["results"][0];
    assert_eq!(result["total_trains"], 6);
    assert_eq!(result["trains"].as_array().unwrap().len(), 6);

    let output = gear_solver()
        .args(["table", "--no-preference", "--format", "tsv", "--profile"])
        .arg(&profile)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 7);

    // Text stays short unless asked otherwise
    gear_solver()
        .args(["find", "--ratio", "2", "--no-preference", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 more equally good"));

    let output = gear_solver()
        .args(["find", "--ratio", "2", "--no-preference", "-n", "2", "--format", "json", "--profile"])
        .arg(&profile)
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"][0]["trains"].as_array().unwrap().len(), 2);
}
