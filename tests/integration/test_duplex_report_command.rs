//! Integration tests for the duplex-report command.

use fgqc_lib::metrics::ReportType;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{
    family_size_metrics, read_sections, run_duplex_report, write_family_sizes, write_text,
    write_yield_metrics, yield_metrics,
};

fn data_file(output: &std::path::Path, report: ReportType, extension: &str) -> std::path::PathBuf {
    output.join(format!("{}.{extension}", report.data_file_name()))
}

/// A directory with two samples, S2 nested one level down and without yield metrics.
fn create_logs(temp_dir: &TempDir) -> std::path::PathBuf {
    let logs = temp_dir.path().join("logs");
    let nested = logs.join("run2");
    fs::create_dir_all(&nested).expect("Failed to create log dirs");

    write_family_sizes(&logs, "S1", &family_size_metrics(&[(1, 6, 8), (2, 4, 2)]));
    write_yield_metrics(&logs, "S1", &yield_metrics(1000));
    write_family_sizes(&nested, "S2", &family_size_metrics(&[(1, 5, 5), (3, 5, 5)]));
    logs
}

#[test]
fn test_duplex_report_creates_sections() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logs = create_logs(&temp_dir);
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        logs.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    let sections = read_sections(&output);
    let names: Vec<&str> =
        sections.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Duplex family sizes", "Simplex family sizes", "Duplex yield metrics"]);

    let duplex = &sections[0]["plot"];
    assert_eq!(duplex["config"]["xlab"], "Duplex family size");
    assert_eq!(duplex["config"]["xDecimals"], false);
    assert_eq!(duplex["datasets"][0]["S1"]["1"], 8);
    assert_eq!(duplex["datasets"][0]["S2"]["3"], 5);
    assert_eq!(duplex["datasets"][1]["S1"]["2"], 0.2);

    let simplex = &sections[1]["plot"];
    assert_eq!(simplex["datasets"][0]["S1"]["1"], 6);
    assert_eq!(simplex["datasets"][1]["S1"]["1"], 0.6);

    let yield_plot = &sections[2]["plot"];
    assert_eq!(yield_plot["config"]["xDecimals"], true);
    assert!(yield_plot["config"].get("ylab").is_none());
    assert_eq!(yield_plot["datasets"].as_array().unwrap().len(), 7);
    assert_eq!(yield_plot["datasets"][0]["S1"]["0.5"], 0.5);
    assert_eq!(yield_plot["datasets"][6]["S1"]["1.0"], 1000);
    assert!(yield_plot["datasets"][6]["S1"].get("1").is_none());
    assert!(yield_plot["datasets"][6].get("S2").is_none());
}

#[test]
fn test_duplex_report_writes_tsv_data_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logs = create_logs(&temp_dir);
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        logs.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    let family = fs::read_to_string(data_file(&output, ReportType::FamilySizes, "txt")).unwrap();
    let lines: Vec<&str> = family.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Sample\tfamily_size\tcs_count\t"));
    assert!(lines[1].starts_with("S1\t1\t6\t"));
    assert!(lines[4].starts_with("S2\t3\t5\t"));

    let yields =
        fs::read_to_string(data_file(&output, ReportType::DuplexYieldMetrics, "txt")).unwrap();
    assert_eq!(yields.lines().count(), 3);
    assert!(yields.starts_with("Sample\tfraction\tread_pairs\t"));
}

#[test]
fn test_duplex_report_writes_json_data_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logs = create_logs(&temp_dir);
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        logs.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--data-format",
        "json",
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    let text = fs::read_to_string(data_file(&output, ReportType::FamilySizes, "json")).unwrap();
    let family: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(family["S1"]["1"]["ds_count"], 8);
    assert_eq!(family["S2"]["3"]["family_size"], 3);
    assert!(!data_file(&output, ReportType::FamilySizes, "txt").exists());
}

#[test]
fn test_duplex_report_ignore_samples() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logs = create_logs(&temp_dir);
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        logs.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--ignore-samples",
        "S2*",
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    let sections = read_sections(&output);
    let panel = sections[0]["plot"]["datasets"][0].as_object().unwrap();
    assert_eq!(panel.keys().collect::<Vec<_>>(), vec!["S1"]);
}

#[test]
fn test_duplex_report_files_and_gzip_inputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let family = write_family_sizes(temp_dir.path(), "S1", &family_size_metrics(&[(2, 1, 1)]));
    let gzipped = temp_dir.path().join("S3.family_sizes.txt.gz");
    write_text(
        &gzipped,
        "family_size\tss_count\tss_fraction\tds_count\tds_fraction\n4\t7\t1.0\t3\t1.0\n",
    );
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        family.to_str().unwrap(),
        gzipped.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    let sections = read_sections(&output);
    assert_eq!(sections[0]["plot"]["datasets"][0]["S1"]["2"], 1);
    assert_eq!(sections[0]["plot"]["datasets"][0]["S3"]["4"], 3);
    assert!(sections[2]["plot"]["datasets"][0].as_object().unwrap().is_empty());
}

#[test]
fn test_duplex_report_skips_duplex_family_size_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_text(
        &temp_dir.path().join("S1.duplex_family_sizes.txt"),
        "ab_size\tba_size\tcount\n1\t1\t5\n",
    );
    let output = temp_dir.path().join("out");

    let result = run_duplex_report(&[
        "--input",
        temp_dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "duplex-report failed: {result:?}");

    assert_eq!(read_sections(&output), serde_json::json!([]));
    assert!(!data_file(&output, ReportType::FamilySizes, "txt").exists());
}
