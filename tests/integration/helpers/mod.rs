//! Helper utilities for integration tests.

use fgoxide::io::{DelimFile, Io};
use fgqc_lib::metrics::{DuplexYieldMetric, FamilySizeMetric, Metric};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Family size metrics with the given `(family_size, ss_count, ds_count)` rows; fractions are
/// derived from the counts.
pub fn family_size_metrics(rows: &[(i64, i64, i64)]) -> Vec<FamilySizeMetric> {
    let ss_total: i64 = rows.iter().map(|r| r.1).sum();
    let ds_total: i64 = rows.iter().map(|r| r.2).sum();
    rows.iter()
        .map(|&(size, ss_count, ds_count)| {
            let mut metric = FamilySizeMetric::new(size);
            metric.cs_count = ss_count;
            metric.cs_fraction = ss_count as f64 / ss_total as f64;
            metric.ss_count = ss_count;
            metric.ss_fraction = ss_count as f64 / ss_total as f64;
            metric.ds_count = ds_count;
            metric.ds_fraction = ds_count as f64 / ds_total as f64;
            metric
        })
        .collect()
}

/// Yield metrics at fractions 0.5 and 1.0, scaled from `read_pairs` at the full fraction.
pub fn yield_metrics(read_pairs: i64) -> Vec<DuplexYieldMetric> {
    [0.5, 1.0]
        .iter()
        .map(|&fraction| {
            let mut metric = DuplexYieldMetric::new(fraction);
            metric.read_pairs = (read_pairs as f64 * fraction) as i64;
            metric.cs_families = metric.read_pairs / 2;
            metric.ss_families = metric.read_pairs / 4;
            metric.ds_families = metric.read_pairs / 8;
            metric.ds_duplexes = metric.read_pairs / 16;
            metric.ds_fraction_duplexes = 0.5;
            metric.ds_fraction_duplexes_ideal = 0.6;
            metric
        })
        .collect()
}

/// Writes `metrics` as a TSV with a header line.
fn write_metrics<M: Metric>(path: &Path, metrics: &[M]) {
    DelimFile::default()
        .write_tsv(&path, metrics.to_vec())
        .unwrap_or_else(|e| panic!("Failed to write {} metrics: {e}", M::metric_name()));
}

/// Writes `<dir>/<sample>.family_sizes.txt`.
pub fn write_family_sizes(dir: &Path, sample: &str, metrics: &[FamilySizeMetric]) -> PathBuf {
    let path = dir.join(format!("{sample}.family_sizes.txt"));
    write_metrics(&path, metrics);
    path
}

/// Writes `<dir>/<sample>.duplex_yield_metrics.txt`.
pub fn write_yield_metrics(dir: &Path, sample: &str, metrics: &[DuplexYieldMetric]) -> PathBuf {
    let path = dir.join(format!("{sample}.duplex_yield_metrics.txt"));
    write_metrics(&path, metrics);
    path
}

/// Writes `content` to `path`, gzip-compressed when `path` ends in `.gz`.
pub fn write_text(path: &Path, content: &str) {
    let mut writer = Io::default().new_writer(&path).expect("Failed to create file");
    writer.write_all(content.as_bytes()).expect("Failed to write file");
    writer.flush().expect("Failed to flush file");
}

/// Runs `fgqc duplex-report` with `args`.
pub fn run_duplex_report(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fgqc"))
        .arg("duplex-report")
        .args(args)
        .output()
        .expect("Failed to run duplex-report command")
}

/// Parses the sections document written to `output_dir`.
pub fn read_sections(output_dir: &Path) -> serde_json::Value {
    let path = output_dir.join(fgqc_lib::filesystem::SECTIONS_FILE_NAME);
    let text = std::fs::read_to_string(&path).expect("Failed to read sections");
    serde_json::from_str(&text).expect("Sections are not valid JSON")
}
