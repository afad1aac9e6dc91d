//! Typed records for the canonical columns of the duplex QC reports.
//!
//! The parser itself works on untyped [`Row`]s so that reports with extra, missing or
//! reordered columns still load. These records describe what a complete report looks like,
//! and can be recovered from a row when every canonical column is present.

use serde::{Deserialize, Serialize};

use crate::Metric;
use crate::report::Row;

/// Yield metric columns, in the order they are charted.
pub const YIELD_METRIC_KEYS: [&str; 7] = [
    "ds_fraction_duplexes",
    "ds_fraction_duplexes_ideal",
    "ds_duplexes",
    "ds_families",
    "ss_families",
    "cs_families",
    "read_pairs",
];

/// Frequencies of family sizes for the three kinds of families.
///
/// - **CS** (Coordinate & Strand): families grouped by unclipped 5' genomic positions and strands
/// - **SS** (Single Strand): single-strand families using UMIs, not linking opposing strands
/// - **DS** (Double Strand): families combining single-strand families from opposite strands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySizeMetric {
    /// The family size (number of read pairs grouped together)
    pub family_size: i64,
    pub cs_count: i64,
    pub cs_fraction: f64,
    /// Fraction of CS families with size >= `family_size`
    pub cs_fraction_gt_or_eq_size: f64,
    pub ss_count: i64,
    pub ss_fraction: f64,
    /// Fraction of SS families with size >= `family_size`
    pub ss_fraction_gt_or_eq_size: f64,
    pub ds_count: i64,
    pub ds_fraction: f64,
    /// Fraction of DS families with size >= `family_size`
    pub ds_fraction_gt_or_eq_size: f64,
}

impl FamilySizeMetric {
    /// Creates an empty metric for one family size.
    #[must_use]
    pub fn new(family_size: i64) -> Self {
        Self {
            family_size,
            cs_count: 0,
            cs_fraction: 0.0,
            cs_fraction_gt_or_eq_size: 0.0,
            ss_count: 0,
            ss_fraction: 0.0,
            ss_fraction_gt_or_eq_size: 0.0,
            ds_count: 0,
            ds_fraction: 0.0,
            ds_fraction_gt_or_eq_size: 0.0,
        }
    }
}

impl Default for FamilySizeMetric {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Metric for FamilySizeMetric {
    fn metric_name() -> &'static str {
        "family size"
    }
}

/// Yield metrics at one level of random downsampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplexYieldMetric {
    /// Approximate fraction of the full dataset used
    pub fraction: f64,
    /// Number of read pairs upon which the metrics are based
    pub read_pairs: i64,
    pub cs_families: i64,
    pub ss_families: i64,
    pub ds_families: i64,
    /// Number of DS families that are duplexes
    pub ds_duplexes: i64,
    pub ds_fraction_duplexes: f64,
    /// Expected fraction of DS families that are duplexes under an ideal model
    pub ds_fraction_duplexes_ideal: f64,
}

impl DuplexYieldMetric {
    /// Creates an empty metric for one downsampling fraction.
    #[must_use]
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction,
            read_pairs: 0,
            cs_families: 0,
            ss_families: 0,
            ds_families: 0,
            ds_duplexes: 0,
            ds_fraction_duplexes: 0.0,
            ds_fraction_duplexes_ideal: 0.0,
        }
    }

    /// Recovers the typed record from a parsed row; `None` if any column is missing.
    #[must_use]
    pub fn from_row(row: &Row) -> Option<Self> {
        let int = |column: &str| row.get(column).and_then(|v| v.as_i64());
        let float = |column: &str| row.get(column).and_then(|v| v.as_f64());
        Some(Self {
            fraction: float("fraction")?,
            read_pairs: int("read_pairs")?,
            cs_families: int("cs_families")?,
            ss_families: int("ss_families")?,
            ds_families: int("ds_families")?,
            ds_duplexes: int("ds_duplexes")?,
            ds_fraction_duplexes: float("ds_fraction_duplexes")?,
            ds_fraction_duplexes_ideal: float("ds_fraction_duplexes_ideal")?,
        })
    }
}

impl Default for DuplexYieldMetric {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Metric for DuplexYieldMetric {
    fn metric_name() -> &'static str {
        "duplex yield"
    }
}
