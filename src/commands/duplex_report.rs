use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use fgqc_lib::filesystem::{DataFormat, FilesystemHost, ReportOptions};
use fgqc_lib::logging::OperationTimer;
use fgqc_lib::section::collect_duplex_seq_metrics;
use fgqc_lib::validation::{validate_output_dir, validate_paths_exist};

use crate::commands::command::Command;

/// Builds report sections from duplex sequencing metrics
#[derive(Parser, Debug)]
#[command(
    name = "duplex-report",
    author,
    version,
    about = "\x1b[38;5;173m[REPORTING]\x1b[0m \x1b[36mBuild QC report sections from duplex sequencing metrics\x1b[0m",
    long_about = r#"
Builds QC report sections from the metrics written by `CollectDuplexSeqMetrics`.

## Inputs

Each `--input` is either a metrics file or a directory that is searched recursively. Two
kinds of files are recognized by name, optionally gzipped:

1. **<sample>.family_sizes.txt**: frequency of tag families of different sizes
2. **<sample>.duplex_yield_metrics.txt**: yield metrics at increasing downsampling fractions

The text before the suffix is used as the sample name. `*.duplex_family_sizes.txt` files are
not family size reports and are skipped. Samples may be excluded with `--ignore-samples`,
which takes glob patterns over sample names.

## Outputs

The following files are written to the `--output` directory:

1. **multiqc_fgbio_CollectDuplexSeqMetrics_family_sizes.<ext>**: parsed family size data
2. **multiqc_fgbio_CollectDuplexSeqMetrics_duplex_yield_metrics.<ext>**: parsed yield data
3. **fgqc_duplex_sections.json**: the duplex family size, simplex family size and duplex
                                  yield sections, each a multi-panel line chart

Data files are only written for report kinds that produced data. `<ext>` is `txt` for
`--data-format tsv` (one line per sample and row) and `json` for `--data-format json`.
"#
)]
pub struct DuplexReport {
    /// Metrics files or directories to search for them
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Glob patterns of sample names to exclude
    #[arg(long = "ignore-samples", num_args = 1..)]
    pub ignore_samples: Vec<String>,

    /// Format of the parsed data files
    #[arg(long = "data-format", value_enum, default_value_t = DataFormat::Tsv)]
    pub data_format: DataFormat,
}

impl Command for DuplexReport {
    fn execute(&self, _command_line: &str) -> Result<()> {
        info!("DuplexReport");
        for input in &self.input {
            info!("  Input: {}", input.display());
        }
        info!("  Output: {}", self.output.display());
        if !self.ignore_samples.is_empty() {
            info!("  Ignoring samples: {}", self.ignore_samples.join(", "));
        }
        info!("  Data format: {:?}", self.data_format);

        let timer = OperationTimer::new("Building duplex report");

        validate_paths_exist(&self.input, "Input")?;
        validate_output_dir(&self.output)?;
        std::fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.display())
        })?;

        let mut host = FilesystemHost::new(&ReportOptions {
            inputs: self.input.clone(),
            output_dir: self.output.clone(),
            ignore_samples: self.ignore_samples.clone(),
            data_format: self.data_format,
        })?;

        let samples = collect_duplex_seq_metrics(&mut host)?;
        host.write_sections()?;

        if host.sections().is_empty() {
            info!("No duplex sequencing metrics found");
        } else {
            info!("Found {samples} reports with family size data");
        }
        timer.log_completion(samples as u64, "samples");
        Ok(())
    }
}
