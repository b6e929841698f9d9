//! CLI interface E2E tests: help/version output, batch-mode file
//! execution, and error reporting for a bad program.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;
use std::io::Write;

fn schematika_bin() -> Command {
    Command::cargo_bin("schematika").expect("binary builds")
}

fn source_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write source");
    file
}

#[test]
fn help_lists_the_file_argument() {
    schematika_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("schematika"));
}

#[test]
fn version_reports_the_crate_version() {
    schematika_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn runs_a_batch_file_successfully() {
    let file = source_file("def answer = 6 * 7;");
    schematika_bin().arg(file.path()).assert().success();
}

#[test]
fn reports_gc_stats_when_asked() {
    let file = source_file("def answer = 1 + 1;");
    schematika_bin()
        .arg(file.path())
        .arg("--gc-stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("gc stats"));
}

#[test]
fn a_malformed_program_exits_nonzero_with_a_message() {
    let file = source_file("def x = ;");
    schematika_bin()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn missing_file_exits_nonzero() {
    schematika_bin()
        .arg("/nonexistent/path/to/a/schematika/program.schematika")
        .assert()
        .failure();
}
