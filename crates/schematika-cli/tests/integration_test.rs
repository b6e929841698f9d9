//! End-to-end check that the whole pipeline (lex → parse → interpret)
//! runs a small recursive program through the `schematika` binary.

use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn factorial_of_five_runs_without_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        "def fact = lambda(n : i64) if n == 0 then 1 else n * fact(n - 1); \
         def answer = fact(5);"
    )
    .unwrap();

    Command::cargo_bin("schematika")
        .expect("binary builds")
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn mixed_precision_arithmetic_widens_and_runs() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "def x : f64 = 1 + 2 * 3.5;").unwrap();

    Command::cargo_bin("schematika")
        .expect("binary builds")
        .arg(file.path())
        .assert()
        .success();
}
