//! End-to-end tests for the CLI binary.
//!
//! Only configuration-error paths are exercised here; a successful run would
//! reach out to the real listing endpoint.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--start-year"))
        .stdout(predicate::str::contains("--end-year"))
        .stdout(predicate::str::contains("--proxy"))
        .stdout(predicate::str::contains("--concurrency"));
}

#[test]
fn test_version_prints_name() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("openintel-dl"));
}

#[test]
fn test_start_year_below_minimum_fails_before_network() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.args(["--start-year", "2015"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid year range"));
}

#[test]
fn test_inverted_year_range_fails() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.args(["--start-year", "2022", "--end-year", "2020"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid year range"));
}

#[test]
fn test_malformed_proxy_fails() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.args([
        "--start-year",
        "2020",
        "--end-year",
        "2020",
        "--proxy",
        "not a proxy url",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid proxy URL"));
}

#[test]
fn test_concurrency_out_of_range_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("openintel-dl").expect("binary exists");
    cmd.args(["-c", "0"]).assert().failure();
}
