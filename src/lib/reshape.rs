//! Pivots per-sample row tables into per-metric panels for line charts.
//!
//! A row lacking a metric column contributes no point to that metric's panel, and a sample
//! left with no points is absent from the panel. There is no gap filling across samples
//! with different keys.

use fgqc_metrics::{Dataset, Fraction, YIELD_METRIC_KEYS};
use std::collections::BTreeMap;

use crate::plot::Panel;

/// Columns of the simplex family size panels: count, then fraction.
pub const SIMPLEX_COLUMNS: [&str; 2] = ["ss_count", "ss_fraction"];

/// Columns of the duplex family size panels: count, then fraction.
pub const DUPLEX_COLUMNS: [&str; 2] = ["ds_count", "ds_fraction"];

/// Family size panels for the simplex and duplex charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FamilySizeSeries {
    /// `[ss_count, ss_fraction]`
    pub simplex: Vec<Panel<i64>>,
    /// `[ds_count, ds_fraction]`
    pub duplex: Vec<Panel<i64>>,
}

/// Builds one panel: for every sample, key → value of `column`.
pub fn pivot<K: Copy + Ord>(dataset: &Dataset<K>, column: &str) -> Panel<K> {
    let mut panel = Panel::new();
    for (sample, table) in dataset {
        let points: BTreeMap<K, _> = table
            .iter()
            .filter_map(|(key, row)| row.get(column).map(|value| (*key, value.clone())))
            .collect();
        if points.len() < table.len() {
            log::debug!(
                "Sample '{sample}': {} rows lack column '{column}'",
                table.len() - points.len()
            );
        }
        if !points.is_empty() {
            panel.insert(sample.clone(), points);
        }
    }
    panel
}

/// Builds the simplex and duplex family size panels.
#[must_use]
pub fn reshape_family_sizes(dataset: &Dataset<i64>) -> FamilySizeSeries {
    FamilySizeSeries {
        simplex: SIMPLEX_COLUMNS.iter().map(|column| pivot(dataset, column)).collect(),
        duplex: DUPLEX_COLUMNS.iter().map(|column| pivot(dataset, column)).collect(),
    }
}

/// Builds the seven duplex yield panels, in [`YIELD_METRIC_KEYS`] order.
#[must_use]
pub fn reshape_duplex_yield(dataset: &Dataset<Fraction>) -> Vec<Panel<Fraction>> {
    YIELD_METRIC_KEYS.iter().map(|key| pivot(dataset, key)).collect()
}
