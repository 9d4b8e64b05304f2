//! Integration tests for the `avail` CLI binary.
//!
//! These exercise the report, days and bounds subcommands through the actual
//! binary, including stdin/stdout piping, file I/O, layered configuration and
//! validation failures.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Every `TimeConfig` key, as an `AVAIL_*` environment override.
const CONFIG_ENV_VARS: [&str; 9] = [
    "AVAIL_START_DATE",
    "AVAIL_END_DATE",
    "AVAIL_WEEKDAY_START",
    "AVAIL_WEEKDAY_END",
    "AVAIL_WEEKEND_START",
    "AVAIL_WEEKEND_END",
    "AVAIL_TIMEZONE",
    "AVAIL_BUFFER_FACTOR",
    "AVAIL_BLOCKING_KEYWORDS",
];

/// Helper: the binary, isolated from the user's config file and environment.
fn avail() -> Command {
    let mut cmd = Command::cargo_bin("avail").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/avail-test-config")
        .env_remove("RUST_LOG");
    for key in CONFIG_ENV_VARS {
        cmd.env_remove(key);
    }
    // Any other AVAIL_* variable would also be picked up by the env provider.
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("AVAIL_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn snapshot() -> String {
    std::fs::read_to_string(fixture("snapshot.json")).expect("snapshot.json fixture must exist")
}

fn report_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("avail should run");
    assert!(
        output.status.success(),
        "avail failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn hours(value: &Value) -> f64 {
    value.as_f64().expect("hours should be numeric")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// report
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn report_stdin_to_stdout_json() {
    let report = report_json(
        avail()
            .args(["-c", &fixture("config.toml"), "report"])
            .write_stdin(snapshot()),
    );

    let days = report["daily_availability"].as_array().unwrap();
    assert_eq!(days.len(), 4);
    assert_eq!(days[1]["weekday"], "Sat");
    assert_close(hours(&days[1]["capacity_hours"]), 3.2);

    let monday = &days[3];
    assert_close(hours(&monday["fungible_hours"]), 1.0);
    assert_close(hours(&monday["task_hours"]), 2.0);
    assert_close(hours(&monday["total_hours"]), 5.4);
    assert_close(hours(&monday["available_hours"]), 3.4);

    let tasks = report["project_tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["project"], "Acme");
    assert_eq!(tasks[0]["task"], "Draft proposal");

    // Standup, the tracked task and the blocked placeholder; timeless events are dropped.
    let details = report["daily_details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details[2]["impact_type"], "ignored");
}

#[test]
fn report_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("report.json");

    avail()
        .args([
            "-c",
            &fixture("config.toml"),
            "report",
            "-i",
            &fixture("snapshot.json"),
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let report: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["fungible_summaries"][0]["calendar_name"], "Meetings");
}

#[test]
fn report_text_format() {
    avail()
        .args(["-c", &fixture("config.toml"), "report", "--format", "text"])
        .write_stdin(snapshot())
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily availability"))
        .stdout(predicate::str::contains("2026-03-16"))
        .stdout(predicate::str::contains("Acme / Draft proposal"))
        .stdout(predicate::str::contains("Meetings"));
}

#[test]
fn range_flags_override_config() {
    let report = report_json(
        avail()
            .args([
                "-c",
                &fixture("config.toml"),
                "report",
                "--start",
                "2026-03-16",
                "--end",
                "2026-03-16",
            ])
            .write_stdin(snapshot()),
    );

    let days = report["daily_availability"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2026-03-16");
}

#[test]
fn environment_overrides_config_file() {
    // In New York the 10:00Z standup is 06:00 local, before the window opens.
    let report = report_json(
        avail()
            .env("AVAIL_TIMEZONE", "America/New_York")
            .args(["-c", &fixture("config.toml"), "report"])
            .write_stdin(snapshot()),
    );

    assert!(report["fungible_summaries"].as_array().unwrap().is_empty());
    let monday = &report["daily_availability"][3];
    assert_close(hours(&monday["available_hours"]), 4.4);
}

#[test]
fn stray_environment_is_not_inherited() {
    // A buffer of 1.0 in the parent environment must not leak into the binary.
    std::env::set_var("AVAIL_BUFFER_FACTOR", "1.0");
    let report = report_json(
        avail()
            .args(["-c", &fixture("config.toml"), "report"])
            .write_stdin(snapshot()),
    );
    std::env::remove_var("AVAIL_BUFFER_FACTOR");

    let days = report["daily_availability"].as_array().unwrap();
    assert_close(hours(&days[3]["capacity_hours"]), 6.4);
}

#[test]
fn reversed_range_fails() {
    avail()
        .args([
            "-c",
            &fixture("config.toml"),
            "report",
            "--start",
            "2026-03-20",
            "--end",
            "2026-03-16",
        ])
        .write_stdin(snapshot())
        .assert()
        .failure()
        .stderr(predicate::str::contains("before start date"));
}

#[test]
fn invalid_window_fails_without_report() {
    avail()
        .args(["-c", &fixture("invalid_window.toml"), "report"])
        .write_stdin(snapshot())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("weekday window"));
}

#[test]
fn invalid_snapshot_fails() {
    avail()
        .args(["-c", &fixture("config.toml"), "report"])
        .write_stdin("this is not json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar snapshot"));
}

#[test]
fn missing_config_file_fails() {
    avail()
        .args(["-c", "/nonexistent/avail.toml", "report"])
        .write_stdin(snapshot())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// days / bounds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn days_lists_each_window() {
    let output = avail()
        .args(["-c", &fixture("config.toml"), "days"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("2026-03-13  Fri  weekday"));
    assert!(lines[1].contains("weekend  10:00-14:00  3.20h"));
    assert!(lines[3].contains("09:00-17:00  6.40h"));
}

#[test]
fn bounds_cover_local_days() {
    avail()
        .args([
            "bounds",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-16",
            "--timezone",
            "America/New_York",
        ])
        .assert()
        .success()
        .stdout("2026-03-16T04:00:00+00:00\n2026-03-17T04:00:00+00:00\n");
}

#[test]
fn bounds_reject_unknown_timezone() {
    avail()
        .args(["bounds", "--timezone", "Nowhere/Special"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn no_subcommand_prints_help() {
    avail()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
