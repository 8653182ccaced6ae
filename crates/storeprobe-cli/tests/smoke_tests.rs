//! Smoke tests for the storeprobe CLI
//!
//! These run the built binary end to end against temporary directories.

#![allow(deprecated)] // Command::cargo_bin is deprecated in newer assert_cmd releases
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the storeprobe binary with a clean speech environment
fn storeprobe() -> Command {
    let mut cmd = Command::cargo_bin("storeprobe").expect("storeprobe binary should exist");
    cmd.env_remove("SPEECH_KEY")
        .env_remove("SPEECH_REGION")
        .env_remove("TEST_SESSION_TIMESTAMP")
        .env_remove("STOREPROBE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    storeprobe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.1"));
}

#[test]
fn test_help_flag() {
    storeprobe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("delay"))
        .stdout(predicate::str::contains("a11y-report"))
        .stdout(predicate::str::contains("narrate"));
}

#[test]
fn test_no_args_fails() {
    storeprobe().assert().failure();
}

// ============================================================================
// Delay
// ============================================================================

#[test]
fn test_delay_sentence() {
    storeprobe()
        .args(["delay", "This is a longer sentence, with a comma and a period."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words:     11"))
        .stdout(predicate::str::contains("5900 ms"));
}

#[test]
fn test_delay_quick() {
    storeprobe()
        .args(["delay", "--quick", "Cart", "updated."])
        .assert()
        .success()
        .stdout(predicate::str::contains("2000 ms"));
}

#[test]
fn test_delay_json() {
    let output = storeprobe()
        .args(["delay", "--format", "json", "--long", "Checkout complete."])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["duration_ms"], 4000);
    assert_eq!(json["mode"], "long");
}

#[test]
fn test_delay_uses_config_profile() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("suite.yaml");
    fs::write(&config, "narration:\n  minimum_ms: 3000\n").unwrap();

    storeprobe()
        .args(["--config", config.to_str().unwrap(), "delay", "Hi."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delay:     3000 ms"));
}

// ============================================================================
// Accessibility report
// ============================================================================

#[test]
fn test_a11y_demo_report() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("reports");

    storeprobe()
        .args(["a11y-report", "--demo", "--json", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessibility-report.html"));

    let html = fs::read_to_string(out.join("accessibility-report.html")).unwrap();
    assert!(html.contains("Demo"));
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("accessibility-report.json")).unwrap())
            .unwrap();
    assert_eq!(summary["stats"]["total"], 10);
}

#[test]
fn test_a11y_missing_input() {
    let tmp = TempDir::new().unwrap();
    storeprobe()
        .args([
            "a11y-report",
            "--input",
            tmp.path().join("absent.json").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_a11y_requires_input_or_demo() {
    storeprobe().arg("a11y-report").assert().failure();
}

// ============================================================================
// Session and config
// ============================================================================

#[test]
fn test_session_from_env() {
    storeprobe()
        .arg("session")
        .env("TEST_SESSION_TIMESTAMP", "2025-01-05_1-07pm")
        .assert()
        .success()
        .stdout(predicate::str::contains("session_2025-01-05_1-07pm"));
}

#[test]
fn test_config_hides_key() {
    storeprobe()
        .arg("config")
        .env("SPEECH_KEY", "s3cret-key")
        .env("SPEECH_REGION", "eastus")
        .assert()
        .success()
        .stdout(predicate::str::contains("region: eastus"))
        .stdout(predicate::str::contains("s3cret-key").not());
}

#[test]
fn test_config_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("bad.yaml");
    fs::write(&config, "narration:\n  words_per_second: 0\n").unwrap();

    storeprobe()
        .args(["config", "--file", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("words_per_second"));
}

// ============================================================================
// Narration
// ============================================================================

#[test]
fn test_narrate_without_credentials() {
    let tmp = TempDir::new().unwrap();
    storeprobe()
        .args([
            "narrate",
            tmp.path().to_str().unwrap(),
            tmp.path().join("out").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPEECH_KEY"));
}
