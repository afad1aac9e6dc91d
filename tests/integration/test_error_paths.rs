//! Failure modes of the duplex-report command.

use tempfile::TempDir;

use crate::helpers::{run_duplex_report, write_text};

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing");

    let result = run_duplex_report(&[
        "--input",
        missing.to_str().unwrap(),
        "--output",
        temp_dir.path().join("out").to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("does not exist"));
}

#[test]
fn test_malformed_number_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_text(
        &temp_dir.path().join("S1.family_sizes.txt"),
        "family_size\tss_count\tss_fraction\n1\tmany\t0.5\n",
    );

    let result = run_duplex_report(&[
        "--input",
        temp_dir.path().to_str().unwrap(),
        "--output",
        temp_dir.path().join("out").to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Cannot convert 'many' in column 'ss_count'"), "stderr: {stderr}");
}

#[test]
fn test_invalid_ignore_pattern_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let result = run_duplex_report(&[
        "--input",
        temp_dir.path().to_str().unwrap(),
        "--output",
        temp_dir.path().join("out").to_str().unwrap(),
        "--ignore-samples",
        "S[",
    ]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("ignore-samples"));
}

#[test]
fn test_missing_output_argument_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = run_duplex_report(&["--input", temp_dir.path().to_str().unwrap()]);
    assert!(!result.status.success());
}
