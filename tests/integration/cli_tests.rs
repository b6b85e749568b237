//! CLI integration tests
//!
//! Drive the deadfunc binary against snapshot fixtures on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn deadfunc() -> Command {
    Command::cargo_bin("deadfunc").expect("binary builds")
}

#[test]
fn test_dead_functions_exit_with_status_one() {
    deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("func 'helper' is unused"));
}

#[test]
fn test_clean_program_exits_zero() {
    deadfunc()
        .arg(fixtures_path().join("clean.json"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dead functions found"));
}

#[test]
fn test_json_format_output() {
    let output = deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let doc: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert_eq!(doc["total_issues"], 1);
    assert_eq!(doc["issues"][0]["func"], "helper");
    assert_eq!(doc["issues"][0]["line"], 13);
}

#[test]
fn test_filter_flag_excludes_everything_else() {
    // The only dead function lives in package app, so a filter matching a
    // different subtree reports nothing.
    deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .arg("--filter")
        .arg("^app/internal")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dead functions found"));
}

#[test]
fn test_tests_flag_includes_test_packages() {
    deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .arg("--tests")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("func 'testOnlyHelper' is unused"));
}

#[test]
fn test_bad_filter_is_a_configuration_error() {
    deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .arg("--filter")
        .arg("^app[")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid filter pattern"));
}

#[test]
fn test_missing_snapshot_is_an_error() {
    deadfunc()
        .arg("/nonexistent/snapshot.json")
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to"));
}

#[test]
fn test_config_file_supplies_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("deadfunc.toml");
    let mut file = std::fs::File::create(&config).unwrap();
    writeln!(file, "tests = true").unwrap();

    deadfunc()
        .arg(fixtures_path().join("dead_helper.json"))
        .arg("--quiet")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("func 'testOnlyHelper' is unused"));
}
