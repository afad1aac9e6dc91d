//! Line chart specifications handed to the report host.
//!
//! A [`LinePlot`] is a [`LineGraphConfig`] plus one [`Panel`] per entry in the config's
//! `data_labels`. The host renders it; nothing here draws.

use fgqc_metrics::{Fraction, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-sample series of one metric: sample name → (x value → y value).
pub type Panel<K> = BTreeMap<String, BTreeMap<K, Value>>;

/// Name and y-axis label of one panel of a multi-panel line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataLabel {
    pub name: String,
    pub ylab: String,
}

impl DataLabel {
    /// A label whose y-axis label equals its name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ylab: name.to_string() }
    }
}

/// Configuration of a line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineGraphConfig {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylab: Option<String>,
    pub xlab: String,
    /// Whether the x axis shows decimals; off for integer-valued family size axes
    #[serde(rename = "xDecimals")]
    pub x_decimals: bool,
    /// Tooltip template, with `{point.x}` and `{point.y}` placeholders
    pub tt_label: String,
    pub data_labels: Vec<DataLabel>,
}

impl LineGraphConfig {
    /// Default tooltip template.
    pub const DEFAULT_TOOLTIP: &'static str = "<b>{point.x}</b>: {point.y}";

    /// Creates a config with no y label, no panels and the default tooltip.
    ///
    /// Axis decimals are suppressed whenever `xlab` contains "size".
    #[must_use]
    pub fn new(id: &str, title: &str, xlab: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ylab: None,
            xlab: xlab.to_string(),
            x_decimals: !xlab.contains("size"),
            tt_label: Self::DEFAULT_TOOLTIP.to_string(),
            data_labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ylab(mut self, ylab: &str) -> Self {
        self.ylab = Some(ylab.to_string());
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tt_label: &str) -> Self {
        self.tt_label = tt_label.to_string();
        self
    }

    #[must_use]
    pub fn with_data_labels<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.data_labels = names.into_iter().map(|name| DataLabel::new(name.as_ref())).collect();
        self
    }
}

/// A line chart: config plus one panel per data label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePlot<K: Ord> {
    pub config: LineGraphConfig,
    pub datasets: Vec<Panel<K>>,
}

/// A line chart with either integer (family size) or fractional (downsampling) x values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plot {
    FamilySize(LinePlot<i64>),
    Downsampling(LinePlot<Fraction>),
}

impl Plot {
    #[must_use]
    pub fn config(&self) -> &LineGraphConfig {
        match self {
            Self::FamilySize(plot) => &plot.config,
            Self::Downsampling(plot) => &plot.config,
        }
    }

    /// Number of panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            Self::FamilySize(plot) => plot.datasets.len(),
            Self::Downsampling(plot) => plot.datasets.len(),
        }
    }
}

/// A report section: heading, anchor, description and chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub anchor: String,
    pub description: String,
    pub plot: Plot,
}

/// Turns a snake_case metric key into a chart label: `ds_fraction_duplexes` becomes
/// `Ds fraction duplexes`.
#[must_use]
pub fn metric_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
