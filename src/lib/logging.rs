//! Logging utilities for formatted output.
//!
//! Consistent formatting of counts, percentages and durations, summaries of parsed
//! datasets, and an [`OperationTimer`] for timing parse passes.

use std::time::{Duration, Instant};

use fgqc_metrics::{Dataset, DuplexYieldMetric, Fraction, SampleTable, Value};

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use fgqc_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` places.
///
/// # Examples
///
/// ```
/// use fgqc_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form (e.g. "450ms", "45s", "2m 15s").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{secs}s")
    } else {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    }
}

/// Total `ds_count` over a sample's rows, saturating at `u64::MAX`.
///
/// Rows without an integer `ds_count`, or with a negative one, add nothing.
#[must_use]
pub fn ds_family_count(table: &SampleTable<i64>) -> u64 {
    table
        .values()
        .filter_map(|row| row.get("ds_count").and_then(Value::as_i64))
        .fold(0u64, |total, count| total.saturating_add(u64::try_from(count).unwrap_or(0)))
}

/// Logs the number of family sizes and DS families per sample.
pub fn log_family_size_summary(dataset: &Dataset<i64>) {
    log::info!("Family Size Summary:");
    for (sample, table) in dataset {
        log::info!(
            "  {sample}: {} family sizes, {} DS families",
            format_count(table.len() as u64),
            format_count(ds_family_count(table))
        );
    }
}

/// Logs the duplex yield of each sample at its largest downsampling fraction.
pub fn log_yield_summary(dataset: &Dataset<Fraction>) {
    log::info!("Duplex Yield Summary:");
    for (sample, table) in dataset {
        match table.values().next_back().and_then(DuplexYieldMetric::from_row) {
            Some(metric) => log::info!(
                "  {sample}: {} duplexes from {} read pairs at {} ({} of DS families)",
                format_count(u64::try_from(metric.ds_duplexes).unwrap_or(0)),
                format_count(u64::try_from(metric.read_pairs).unwrap_or(0)),
                format_percent(metric.fraction, 0),
                format_percent(metric.ds_fraction_duplexes, 2),
            ),
            None => log::info!("  {sample}: {} downsampling levels", table.len()),
        }
    }
}

/// Operation timing helper.
///
/// # Examples
///
/// ```no_run
/// use fgqc_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Parsing family size reports");
///
/// // ... do work ...
///
/// timer.log_completion(3, "samples");
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with an item count.
    pub fn log_completion(&self, count: u64, unit: &str) {
        log::info!(
            "{} completed: {} {unit} in {}",
            self.operation,
            format_count(count),
            format_duration(self.start_time.elapsed())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgqc_metrics::{ReportType, Row, YIELD_METRIC_KEYS};

    fn family_table(rows: &[[&str; 2]]) -> SampleTable<i64> {
        rows.iter()
            .map(|fields| {
                let row =
                    Row::from_fields(ReportType::FamilySizes, &["family_size", "ds_count"], fields)
                        .unwrap();
                (row.get("family_size").and_then(Value::as_i64).unwrap(), row)
            })
            .collect()
    }

    #[test]
    fn test_ds_family_count_without_cs_columns() {
        assert_eq!(ds_family_count(&family_table(&[["1", "5"], ["2", "3"]])), 8);
        assert_eq!(ds_family_count(&SampleTable::new()), 0);
    }

    #[test]
    fn test_ds_family_count_saturates() {
        let max = i64::MAX.to_string();
        let table = family_table(&[["1", max.as_str()], ["2", max.as_str()], ["3", max.as_str()]]);
        assert_eq!(ds_family_count(&table), u64::MAX);
    }

    #[test]
    fn test_ds_family_count_ignores_negative_and_missing() {
        let mut table = family_table(&[["1", "-4"], ["2", "6"]]);
        table.insert(
            3,
            Row::from_fields(ReportType::FamilySizes, &["family_size"], &["3"]).unwrap(),
        );
        assert_eq!(ds_family_count(&table), 6);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(123_456), "123,456");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.9543, 2), "95.43%");
        assert_eq!(format_percent(0.5, 1), "50.0%");
        assert_eq!(format_percent(0.0, 2), "0.00%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("Test");
        timer.log_completion(2, "samples");
    }

    #[test]
    fn test_log_summaries() {
        log_family_size_summary(&Dataset::new());
        log_yield_summary(&Dataset::new());

        let row = Row::from_fields(ReportType::FamilySizes, &["family_size", "ds_count"], &[
            "1", "5",
        ])
        .unwrap();
        let family: Dataset<i64> =
            [("S1".to_string(), SampleTable::from([(1, row)]))].into_iter().collect();
        log_family_size_summary(&family);

        let mut full = Row::default();
        full.insert("fraction", Value::Float(1.0));
        for key in YIELD_METRIC_KEYS {
            full.insert(key, Value::Integer(1));
        }
        full.insert("ds_fraction_duplexes", Value::Float(0.5));
        full.insert("ds_fraction_duplexes_ideal", Value::Float(0.6));
        let yields: Dataset<Fraction> =
            [("S1".to_string(), SampleTable::from([(Fraction(1.0), full)]))].into_iter().collect();
        log_yield_summary(&yields);
    }
}
