//! Report sections for duplex sequencing QC.
//!
//! [`collect_duplex_seq_metrics`] is the module entry point: it parses both report kinds
//! through the host, reshapes them, and emits three sections in a fixed order:
//!
//! 1. Duplex family sizes
//! 2. Simplex family sizes
//! 3. Duplex yield metrics
//!
//! Nothing is emitted when neither report kind produced data.

use anyhow::Result;
use fgqc_metrics::{Dataset, Fraction, YIELD_METRIC_KEYS};

use crate::host::{ReportHost, SectionSink};
use crate::logging::{log_family_size_summary, log_yield_summary};
use crate::parser::{parse_duplex_yield_metrics, parse_family_sizes};
use crate::plot::{LineGraphConfig, LinePlot, Panel, Plot, Section, metric_label};
use crate::reshape::{reshape_duplex_yield, reshape_family_sizes};

/// Panel labels of both family size charts.
const FAMILY_SIZE_LABELS: [&str; 2] = ["Count", "Fraction"];

fn family_size_config(id: &str, title: &str, xlab: &str) -> LineGraphConfig {
    LineGraphConfig::new(id, title, xlab).with_ylab("Count").with_data_labels(FAMILY_SIZE_LABELS)
}

/// The duplex family size section.
#[must_use]
pub fn duplex_family_size_section(panels: Vec<Panel<i64>>) -> Section {
    Section {
        name: "Duplex family sizes".to_string(),
        anchor: "fgbio-frequency-duplex-family-sizes".to_string(),
        description: "Plot showing duplex tag family size distribution.".to_string(),
        plot: Plot::FamilySize(LinePlot {
            config: family_size_config(
                "fgbio_CollectDuplexSeqMetrics_duplex_family_sizes",
                "Fgbio: Frequency of duplex family sizes",
                "Duplex family size",
            ),
            datasets: panels,
        }),
    }
}

/// The simplex family size section.
#[must_use]
pub fn simplex_family_size_section(panels: Vec<Panel<i64>>) -> Section {
    Section {
        name: "Simplex family sizes".to_string(),
        anchor: "fgbio-frequency-simplex-family-sizes".to_string(),
        description: "Plot showing simplex tag family size distribution.".to_string(),
        plot: Plot::FamilySize(LinePlot {
            config: family_size_config(
                "fgbio_CollectDuplexSeqMetrics_simplex_family_sizes",
                "Fgbio: Frequency of simplex family sizes",
                "Simplex family size",
            ),
            datasets: panels,
        }),
    }
}

/// The duplex yield section, one panel per [`YIELD_METRIC_KEYS`] entry.
#[must_use]
pub fn duplex_yield_section(panels: Vec<Panel<Fraction>>) -> Section {
    let config = LineGraphConfig::new(
        "fgbio_CollectDuplexSeqMetrics_duplex_yield_metrics",
        "Fgbio: Duplex yield metrics",
        "Downsampling percentage",
    )
    .with_tooltip("<b>percentage downsampled {point.x}</b>: {point.y}")
    .with_data_labels(YIELD_METRIC_KEYS.iter().map(|key| metric_label(key)));

    Section {
        name: "Duplex yield metrics".to_string(),
        anchor: "fgbio-duplex-yield-metrics".to_string(),
        description: "Duplex yield metrics at different downsampling levels.".to_string(),
        plot: Plot::Downsampling(LinePlot { config, datasets: panels }),
    }
}

/// Reshapes both datasets and hands the three sections to `sink`.
///
/// Returns the number of samples with family size data. When both datasets are empty no
/// section is emitted.
pub fn emit_sections<S: SectionSink + ?Sized>(
    sink: &mut S,
    family_sizes: &Dataset<i64>,
    duplex_yield: &Dataset<Fraction>,
) -> usize {
    if family_sizes.is_empty() && duplex_yield.is_empty() {
        return 0;
    }

    let series = reshape_family_sizes(family_sizes);
    sink.add_section(duplex_family_size_section(series.duplex));
    sink.add_section(simplex_family_size_section(series.simplex));
    sink.add_section(duplex_yield_section(reshape_duplex_yield(duplex_yield)));
    family_sizes.len()
}

/// Parses, reshapes and emits the duplex QC sections through `host`.
///
/// Returns the number of samples with family size data; zero means the module produced
/// nothing worth reporting.
///
/// # Errors
/// Propagates discovery, parsing and persistence failures.
pub fn collect_duplex_seq_metrics<H: ReportHost>(host: &mut H) -> Result<usize> {
    let family_sizes = parse_family_sizes(&*host)?;
    let duplex_yield = parse_duplex_yield_metrics(&*host)?;

    if !family_sizes.is_empty() {
        log_family_size_summary(&family_sizes);
    }
    if !duplex_yield.is_empty() {
        log_yield_summary(&duplex_yield);
    }

    Ok(emit_sections(host, &family_sizes, &duplex_yield))
}
