//! Basic CLI tests for quickview
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs. None of these reach the UI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quickview() -> Command {
    Command::cargo_bin("quickview").unwrap()
}

fn qv() -> Command {
    Command::cargo_bin("qv").unwrap()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    quickview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--as <VIEWER>"))
        .stdout(predicate::str::contains("EXIT CODES:"));
}

#[test]
fn help_short_flag_shows_usage() {
    quickview()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn version_flag_shows_version() {
    quickview()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn qv_alias_behaves_the_same() {
    qv().arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Missing File (Exit Code 1)
// =============================================================================

#[test]
fn nonexistent_file_returns_exit_code_1() {
    quickview()
        .arg("/nonexistent/path/that/does/not/exist.csv")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn directory_argument_returns_exit_code_1() {
    let temp = TempDir::new().unwrap();
    quickview()
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a file"));
}

// =============================================================================
// Invalid Arguments (Exit Code 3)
// =============================================================================

#[test]
fn no_arguments_returns_exit_code_3() {
    quickview()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing FILE"));
}

#[test]
fn unknown_option_returns_exit_code_3() {
    quickview()
        .arg("--unknown-option")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown option"));
}

#[test]
fn unknown_viewer_returns_exit_code_3() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("data.csv");
    std::fs::write(&file, "a,b\n").unwrap();

    quickview()
        .args(["--as", "spreadsheet"])
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown viewer"));
}

#[test]
fn as_without_value_returns_exit_code_3() {
    quickview()
        .arg("--as")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--as requires"));
}

#[test]
fn argument_errors_win_over_missing_file() {
    quickview()
        .args(["--bogus", "/nonexistent/file.txt"])
        .assert()
        .code(3);
}
