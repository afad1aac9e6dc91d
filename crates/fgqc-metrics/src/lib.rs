#![deny(unsafe_code)]

//! Row model and column tables for duplex sequencing QC reports.
//!
//! This crate provides:
//! - [`value`]: typed scalars and per-column coercion
//! - [`report`]: the two report kinds, their column tables, rows and per-sample tables
//! - [`duplex`]: typed records for the canonical report columns

pub mod duplex;
pub mod report;
pub mod value;

use serde::{Deserialize, Serialize};

/// A typed metric record that can be read from and written to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages and logging.
    fn metric_name() -> &'static str;
}

pub use duplex::{DuplexYieldMetric, FamilySizeMetric, YIELD_METRIC_KEYS};
pub use report::{
    Dataset, DuplexYieldMetrics, FamilySizes, Fraction, ReportKind, ReportType, Row, SampleTable,
};
pub use value::{CoercionError, ColumnType, Value};
