//! Integration tests for the `slotgen` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the generate,
//! plan and strategies subcommands through the actual binary, including config files,
//! JSON output and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: `slotgen generate` for 2024-01-01 with the given window and duration.
fn generate(start: &str, end: &str, duration: &str) -> Command {
    let mut cmd = Command::cargo_bin("slotgen").unwrap();
    cmd.args([
        "generate",
        "--date",
        "2024-01-01",
        "--start",
        start,
        "--end",
        end,
        "--duration",
        duration,
    ]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn default_strategy_is_fixed_half_hour_grid() {
    // 08:30 + 45min = 09:15 > 09:00, so only 08:00 fits.
    generate("08:00", "09:00", "45")
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n");
}

#[test]
fn dynamic_strategy_json_output() {
    let output = generate("08:00", "12:00", "45")
        .args(["--strategy", "dynamic_duration", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let slots: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        slots,
        [
            "2024-01-01T08:00",
            "2024-01-01T08:45",
            "2024-01-01T09:30",
            "2024-01-01T10:15",
            "2024-01-01T11:00",
        ]
    );
}

#[test]
fn custom_cadence_flag() {
    generate("08:00", "09:00", "20")
        .args(["--cadence", "20"])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:20\n2024-01-01T08:40\n");
}

#[test]
fn buffered_strategy_flag() {
    generate("09:00", "11:00", "30")
        .args(["--strategy", "buffered", "--buffer", "15"])
        .assert()
        .success()
        .stdout("2024-01-01T09:00\n2024-01-01T09:45\n2024-01-01T10:30\n");
}

#[test]
fn zero_duration_prints_nothing() {
    generate("08:00", "17:00", "0")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn negative_duration_prints_empty_json_array() {
    generate("08:00", "17:00", "-30")
        .arg("--json")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn empty_block_prints_nothing() {
    generate("09:00", "09:00", "30")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn seconds_in_times_are_accepted() {
    generate("08:00:00", "09:00:00", "30")
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:30\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Config file and practitioner overrides
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_file_sets_default_strategy() {
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("engine.json")])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:15\n2024-01-01T08:30\n");
}

#[test]
fn config_file_practitioner_override() {
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("engine.json"), "--practitioner", "dr-lee"])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:30\n");
}

#[test]
fn config_file_buffered_override_uses_configured_buffer() {
    // 30 + 10 minutes: 08:40 + 30min = 09:10 > 09:00.
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("engine.json"), "-p", "dr-kim"])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n");
}

#[test]
fn unknown_practitioner_falls_back_to_default() {
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("engine.json"), "-p", "dr-nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01T08:15"));
}

#[test]
fn flags_override_config_file() {
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("engine.json"), "--cadence", "30"])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:30\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_config_file_fails() {
    generate("08:00", "09:00", "30")
        .args(["-c", &fixture("invalid.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"))
        .stderr(predicate::str::contains("cadence_minutes must be positive"));
}

#[test]
fn missing_config_file_fails() {
    generate("08:00", "09:00", "30")
        .args(["-c", "/nonexistent/engine.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn invalid_cadence_with_json_prints_error_body() {
    let output = generate("08:00", "09:00", "30")
        .args(["--cadence", "0", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["path"], "slotgen generate");
    assert!(body["message"].as_str().unwrap().contains("cadence"));
}

#[test]
fn negative_buffer_is_rejected() {
    generate("08:00", "09:00", "30")
        .args(["--strategy", "buffered", "--buffer", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("buffer_minutes must not be negative"));
}

#[test]
fn unknown_strategy_is_rejected() {
    generate("08:00", "09:00", "30")
        .args(["--strategy", "weekly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy"));
}

#[test]
fn malformed_date_is_rejected() {
    Command::cargo_bin("slotgen")
        .unwrap()
        .args([
            "generate", "--date", "2024-13-01", "--start", "08:00", "--end", "09:00",
            "--duration", "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn malformed_time_is_rejected() {
    generate("8am", "09:00", "30")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Plan subcommand
// ─────────────────────────────────────────────────────────────────────────────

/// Helper: `slotgen plan` against the availability fixture.
fn plan(practitioner: &str, date: &str, duration: &str) -> Command {
    let mut cmd = Command::cargo_bin("slotgen").unwrap();
    cmd.args([
        "plan",
        "--availability",
        &fixture("availability.json"),
        "--practitioner",
        practitioner,
        "--date",
        date,
        "--duration",
        duration,
    ]);
    cmd
}

#[test]
fn plan_merges_blocks_on_default_grid() {
    plan("dr-lee", "2024-01-01", "45")
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:30\n2024-01-01T09:00\n2024-01-01T13:00\n");
}

#[test]
fn plan_uses_practitioner_override_from_config() {
    plan("dr-lee", "2024-01-01", "45")
        .args(["-c", &fixture("engine.json"), "--json"])
        .assert()
        .success()
        .stdout("[\"2024-01-01T08:00\",\"2024-01-01T08:45\",\"2024-01-01T13:00\"]\n");
}

#[test]
fn plan_buffered_override_spaces_by_buffer() {
    plan("dr-kim", "2024-01-01", "20")
        .args(["-c", &fixture("engine.json")])
        .assert()
        .success()
        .stdout("2024-01-01T08:00\n2024-01-01T08:30\n");
}

#[test]
fn plan_only_uses_blocks_on_requested_date() {
    plan("dr-lee", "2024-01-02", "60")
        .assert()
        .success()
        .stdout("2024-01-02T09:00\n");
}

#[test]
fn plan_known_practitioner_without_blocks_is_empty() {
    plan("dr-kim", "2024-01-03", "30")
        .arg("--json")
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn plan_unknown_practitioner_prints_not_found_body() {
    let output = plan("dr-nobody", "2024-01-01", "30")
        .arg("--json")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "slotgen plan");
    assert!(body["message"].as_str().unwrap().contains("dr-nobody"));
}

#[test]
fn plan_zero_duration_is_bad_request() {
    let output = plan("dr-lee", "2024-01-01", "0")
        .arg("--json")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["path"], "slotgen plan");
}

#[test]
fn plan_missing_availability_file_fails() {
    Command::cargo_bin("slotgen")
        .unwrap()
        .args([
            "plan",
            "--availability",
            "/nonexistent/blocks.json",
            "--practitioner",
            "dr-lee",
            "--date",
            "2024-01-01",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read availability file"));
}

#[test]
fn plan_rejects_malformed_availability_file() {
    Command::cargo_bin("slotgen")
        .unwrap()
        .args([
            "plan",
            "--availability",
            &fixture("engine.json"),
            "--practitioner",
            "dr-lee",
            "--date",
            "2024-01-01",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid availability file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategies subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn strategies_lists_all_kinds() {
    Command::cargo_bin("slotgen")
        .unwrap()
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed_interval"))
        .stdout(predicate::str::contains("dynamic_duration"))
        .stdout(predicate::str::contains("buffered"));
}
