//! Behavioural tests for the `treeviz` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

fn run_with_table(contents: &str) -> Output {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linkage.csv");
    fs::write(&path, contents).unwrap();
    run(&path)
}

fn run(path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_treeviz"))
        .arg(path)
        .output()
        .unwrap()
}

#[test]
fn relabels_csv_table() {
    let output = run_with_table("0,1,0.5,2\n2,3,0.7,3\n\n0, 4, 1.0, 4\n");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "0,1,0.5,2\n2,3,0.7,3\n5,4,1,4\n");
}

#[rstest]
#[case::unparsable_number("0,1,abc,2\n")]
#[case::fractional_identifier("0,1.5,0.5,2\n")]
#[case::empty_file("")]
fn rejects_bad_tables(#[case] contents: &str) {
    let output = run_with_table(contents);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir.path().join("absent.csv"));
    assert!(!output.status.success());
}
