//! CLI integration tests for wlgen
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn wlgen() -> Command {
    let mut cmd = Command::cargo_bin("wlgen").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

const ODOMETER: &str = "1A\n1B\n1C\n2A\n2B\n2C\n3A\n3B\n3C\n";

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    wlgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wordlist generator"))
        .stdout(predicate::str::contains("--method"));
}

#[test]
fn test_version() {
    wlgen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wlgen"));
}

#[test]
fn test_missing_positions() {
    wlgen().assert().failure();
}

#[test]
fn test_list_presets() {
    wlgen()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("@digits"))
        .stdout(predicate::str::contains("@pin4"));
}

#[test]
fn test_capabilities() {
    wlgen()
        .arg("--capabilities")
        .assert()
        .success()
        .stdout(predicate::str::contains("accelerated generator:"));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_odometer_output() {
    wlgen()
        .args(["--line-ending", "lf", "123", "ABC"])
        .assert()
        .success()
        .stdout(ODOMETER);
}

#[test]
fn test_every_method_same_output() {
    for method in ["auto", "list", "iter", "words"] {
        wlgen()
            .args(["--line-ending", "lf", "-m", method, "321", "CBA"])
            .assert()
            .success()
            .stdout(ODOMETER);
    }
}

#[test]
fn test_accelerated_output_or_refusal() {
    let output = wlgen()
        .args(["--line-ending", "lf", "-m", "accelerated", "123", "ABC"])
        .output()
        .unwrap();

    if output.status.success() {
        assert_eq!(String::from_utf8_lossy(&output.stdout), ODOMETER);
    } else {
        assert!(String::from_utf8_lossy(&output.stderr).contains("unavailable"));
    }
}

#[test]
fn test_memory_efficient_same_output() {
    wlgen()
        .args(["--line-ending", "lf", "--memory-efficient", "123", "ABC"])
        .assert()
        .success()
        .stdout(ODOMETER);
}

#[test]
fn test_ranges_and_classes() {
    wlgen()
        .args(["--line-ending", "lf", "a-b", "?d"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a0\na1\n"))
        .stdout(predicate::str::ends_with("b8\nb9\n"));
}

#[test]
fn test_preset() {
    wlgen()
        .args(["--line-ending", "lf", "-n", "2", "x", "@pin4"])
        .assert()
        .success()
        .stdout("x0000\nx0001\n");
}

#[test]
fn test_limit_on_huge_charset() {
    // 10^12 words; only the first three are produced
    wlgen()
        .args(["--line-ending", "lf", "-n", "3"])
        .args(["?d"; 12])
        .assert()
        .success()
        .stdout("000000000000\n000000000001\n000000000002\n");
}

#[test]
fn test_output_file_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");

    wlgen()
        .args(["--line-ending", "crlf", "-o"])
        .arg(&path)
        .args(["ab", "c"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read(&path).unwrap(), b"ac\r\nbc\r\n");
}

#[test]
fn test_config_file_line_ending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        "[output]\nline_ending = \"crlf\"\n\n[charsets.ab]\npositions = [\"ab\"]\n",
    )
    .unwrap();

    wlgen()
        .arg("--config")
        .arg(&path)
        .arg("@ab")
        .assert()
        .success()
        .stdout("a\r\nb\r\n");
}

// ============================================================================
// Estimates
// ============================================================================

#[test]
fn test_estimate() {
    wlgen()
        .args(["--estimate", "--line-ending", "lf", "?d", "?d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("words: 100"))
        .stdout(predicate::str::contains("bytes: 300"))
        .stdout(predicate::str::contains("method: list"));
}

#[test]
fn test_estimate_beyond_u64() {
    wlgen()
        .arg("--estimate")
        .args(["?d"; 25])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("words: 1{}", "0".repeat(25))))
        .stdout(predicate::str::contains("method: iter"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_position() {
    wlgen()
        .args(["abc", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty alphabet"));
}

#[test]
fn test_malformed_spec() {
    wlgen()
        .arg("z-a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_unknown_method_suggests() {
    wlgen()
        .args(["-m", "lst", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'list'?"));
}

#[test]
fn test_unknown_preset_suggests() {
    wlgen()
        .arg("@digts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean '@digits'?"));
}

#[test]
fn test_list_method_too_large() {
    wlgen()
        .args(["-m", "list"])
        .args(["?d"; 8])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to materialize"));
}

#[test]
fn test_unknown_line_ending() {
    wlgen()
        .args(["--line-ending", "cr", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown line ending"));
}
