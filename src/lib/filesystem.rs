//! Filesystem-backed report host used by the command line.
//!
//! - Discovery scans input directories recursively for `*.family_sizes.txt` and
//!   `*.duplex_yield_metrics.txt` (optionally gzipped); files given directly are accepted if
//!   their name matches. The sample name is the file name without the report suffix.
//! - Samples are excluded by glob patterns over sample names.
//! - Datasets are written to the output directory as TSV (long format) or JSON.
//! - Sections are collected and written as one JSON document.

use anyhow::{Context, Result};
use clap::ValueEnum;
use fgoxide::io::Io;
use fgqc_metrics::{Dataset, ReportType};
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::errors::FgqcError;
use crate::host::{DataWriter, LogDiscovery, LogFile, SampleFilter, SectionSink};
use crate::plot::Section;

/// File the collected sections are written to, inside the output directory.
pub const SECTIONS_FILE_NAME: &str = "fgqc_duplex_sections.json";

/// Format of persisted data files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    /// Tab-separated, one line per sample and row key
    #[default]
    Tsv,
    /// Nested JSON object: sample → key → row
    Json,
}

impl DataFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tsv => "txt",
            Self::Json => "json",
        }
    }
}

/// Options for a filesystem-backed report run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Files or directories to search for reports
    pub inputs: Vec<PathBuf>,
    /// Directory data files and sections are written to
    pub output_dir: PathBuf,
    /// Glob patterns of sample names to exclude
    pub ignore_samples: Vec<String>,
    pub data_format: DataFormat,
}

/// A [`ReportHost`](crate::host::ReportHost) reading reports from disk and writing its
/// outputs to a directory.
#[derive(Debug)]
pub struct FilesystemHost {
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    ignore: Vec<glob::Pattern>,
    data_format: DataFormat,
    sections: Vec<Section>,
}

impl FilesystemHost {
    /// Creates a host from `options`.
    ///
    /// # Errors
    /// Returns [`FgqcError::InvalidParameter`] if an ignore pattern is not a valid glob.
    pub fn new(options: &ReportOptions) -> crate::errors::Result<Self> {
        let ignore = options
            .ignore_samples
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|e| FgqcError::InvalidParameter {
                    parameter: "ignore-samples".to_string(),
                    reason: format!("'{pattern}': {e}"),
                })
            })
            .collect::<crate::errors::Result<Vec<_>>>()?;

        Ok(Self {
            inputs: options.inputs.clone(),
            output_dir: options.output_dir.clone(),
            ignore,
            data_format: options.data_format,
            sections: Vec::new(),
        })
    }

    /// Sections received so far.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Writes all received sections to [`SECTIONS_FILE_NAME`] in the output directory and
    /// returns its path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_sections(&self) -> Result<PathBuf> {
        let path = self.output_dir.join(SECTIONS_FILE_NAME);
        let mut writer = Io::default()
            .new_writer(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_json(&mut writer, &self.sections)
            .with_context(|| format!("Failed to write sections: {}", path.display()))?;
        writer.flush()?;
        info!("Wrote {} sections to {}", self.sections.len(), path.display());
        Ok(path)
    }

    fn find_in_dir(dir: &Path, report: ReportType, found: &mut BTreeSet<PathBuf>) -> Result<()> {
        let pattern = format!(
            "{}/**/*{}*",
            glob::Pattern::escape(&dir.to_string_lossy()),
            report.file_suffix()
        );
        for entry in glob::glob(&pattern).with_context(|| format!("Bad search path: {pattern}"))? {
            let path = entry.with_context(|| format!("Failed to search {}", dir.display()))?;
            if path.is_file() && sample_name(&path, report).is_some() {
                found.insert(path);
            }
        }
        Ok(())
    }
}

/// The sample name for `path` if its file name marks it as a `report` log.
///
/// # Example
/// ```
/// use fgqc_lib::filesystem::sample_name;
/// use fgqc_metrics::ReportType;
/// use std::path::Path;
///
/// let path = Path::new("runs/S1.family_sizes.txt");
/// assert_eq!(sample_name(path, ReportType::FamilySizes).as_deref(), Some("S1"));
/// assert_eq!(sample_name(Path::new("S1.duplex_family_sizes.txt"), ReportType::FamilySizes), None);
/// ```
#[must_use]
pub fn sample_name(path: &Path, report: ReportType) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    if report.excluded_suffixes().iter().any(|s| matches_suffix(file_name, s).is_some()) {
        return None;
    }
    matches_suffix(file_name, report.file_suffix())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

fn matches_suffix<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(suffix)
        .or_else(|| file_name.strip_suffix(".gz").and_then(|name| name.strip_suffix(suffix)))
}

impl LogDiscovery for FilesystemHost {
    fn discover(&self, report: ReportType) -> Result<Vec<LogFile>> {
        let mut found = BTreeSet::new();
        for input in &self.inputs {
            if input.is_dir() {
                Self::find_in_dir(input, report, &mut found)?;
            } else if sample_name(input, report).is_some() {
                found.insert(input.clone());
            }
        }

        let logs: Vec<LogFile> = found
            .into_iter()
            .filter_map(|path| {
                let sample_name = sample_name(&path, report)?;
                Some(LogFile { sample_name, location: path.to_string_lossy().into_owned() })
            })
            .collect();
        debug!("Found {} {report} reports", logs.len());
        Ok(logs)
    }

    fn open(&self, log: &LogFile) -> Result<Box<dyn BufRead + '_>> {
        let reader: Box<dyn BufRead + '_> = Io::default()
            .new_reader(&log.location)
            .with_context(|| format!("Failed to open {}", log.location))?;
        Ok(reader)
    }
}

impl SampleFilter for FilesystemHost {
    fn is_ignored(&self, sample: &str) -> bool {
        self.ignore.iter().any(|pattern| pattern.matches(sample))
    }
}

impl DataWriter for FilesystemHost {
    fn write_data_file<K>(&self, name: &str, key_column: &str, dataset: &Dataset<K>) -> Result<()>
    where
        K: Ord + Display + Serialize,
    {
        let path = self.output_dir.join(format!("{name}.{}", self.data_format.extension()));
        let mut writer = Io::default()
            .new_writer(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        match self.data_format {
            DataFormat::Tsv => write_long_tsv(&mut writer, key_column, dataset),
            DataFormat::Json => write_json(&mut writer, dataset),
        }
        .with_context(|| format!("Failed to write data file: {}", path.display()))?;
        writer.flush()?;

        info!("Wrote {} samples to {}", dataset.len(), path.display());
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a dataset as one line per (sample, row key): `Sample`, the key column, then every
/// other column seen in any row, in first-seen order. Missing values are left empty.
fn write_long_tsv<W, K>(writer: &mut W, key_column: &str, dataset: &Dataset<K>) -> Result<()>
where
    W: Write,
    K: Ord + Display,
{
    let columns: Vec<&str> = dataset
        .values()
        .flat_map(|table| table.values())
        .flat_map(|row| row.columns())
        .filter(|column| *column != key_column)
        .unique()
        .collect();

    writeln!(writer, "Sample\t{key_column}\t{}", columns.iter().join("\t"))?;
    for (sample, table) in dataset {
        for (key, row) in table {
            let values = columns
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
                .join("\t");
            writeln!(writer, "{sample}\t{key}\t{values}")?;
        }
    }
    Ok(())
}

impl SectionSink for FilesystemHost {
    fn add_section(&mut self, section: Section) {
        debug!("Adding section '{}'", section.name);
        self.sections.push(section);
    }
}
