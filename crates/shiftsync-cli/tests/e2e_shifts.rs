//! E2E tests for the pure (network-free) `ssy shifts` surface.
//!
//! Each test runs the binary as a subprocess in an isolated temp directory
//! so no developer config file leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Build a Command targeting the ssy binary, rooted in `dir`.
fn ssy_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ssy"));
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr
    cmd.env("SHIFTSYNC_LOG", "error");
    cmd
}

#[test]
fn shifts_json_reports_all_three_windows() {
    let dir = TempDir::new().expect("temp dir");
    let output = ssy_cmd(dir.path())
        .args(["shifts", "--date", "2026-01-17", "--json"])
        .output()
        .expect("shifts should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["date"], "2026-01-17");
    let shifts = json["shifts"].as_array().expect("shifts array");
    assert_eq!(shifts.len(), 3);

    assert_eq!(shifts[0]["shift"], "Day");
    assert_eq!(shifts[0]["start"], "2026-01-17T02:30:00.000Z");
    assert_eq!(shifts[0]["end"], "2026-01-17T14:30:00.000Z");

    assert_eq!(shifts[1]["shift"], "General");
    assert_eq!(shifts[1]["start"], "2026-01-17T03:00:00.000Z");
    assert_eq!(shifts[1]["end"], "2026-01-17T12:00:00.000Z");

    // Night spans midnight: the end lands on the next calendar day.
    assert_eq!(shifts[2]["shift"], "Night");
    assert_eq!(shifts[2]["start"], "2026-01-17T14:30:00.000Z");
    assert_eq!(shifts[2]["end"], "2026-01-18T02:30:00.000Z");
}

#[test]
fn shifts_human_output_names_each_shift() {
    let dir = TempDir::new().expect("temp dir");
    ssy_cmd(dir.path())
        .args(["shifts", "--date", "2026-01-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day"))
        .stdout(predicate::str::contains("General"))
        .stdout(predicate::str::contains("Night"));
}

#[test]
fn invalid_date_fails_with_a_reason() {
    let dir = TempDir::new().expect("temp dir");
    ssy_cmd(dir.path())
        .args(["shifts", "--date", "2026-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid workday"));
}

#[test]
fn invalid_date_with_json_flag_yields_a_json_error() {
    let dir = TempDir::new().expect("temp dir");
    let output = ssy_cmd(dir.path())
        .args(["shifts", "--date", "not-a-date", "--json"])
        .output()
        .expect("shifts should not crash");
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("error is JSON");
    assert!(
        json["error"]
            .as_str()
            .expect("error field")
            .contains("invalid workday")
    );
}

#[test]
fn help_lists_every_subcommand() {
    let dir = TempDir::new().expect("temp dir");
    ssy_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("shifts"));
}
