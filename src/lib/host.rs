//! Collaborator interfaces supplied by the report host.
//!
//! Parsing and reshaping never touch the filesystem or a renderer directly. Everything
//! outside the core goes through these traits:
//!
//! - [`LogDiscovery`]: finds report logs for a [`ReportType`] and opens them one at a time
//! - [`SampleFilter`]: decides which samples are excluded from the report
//! - [`DataWriter`]: persists a parsed dataset
//! - [`SectionSink`]: receives finished report sections
//!
//! [`crate::filesystem::FilesystemHost`] implements all four for the command line.

use anyhow::Result;
use fgqc_metrics::{Dataset, ReportType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::BufRead;

use crate::plot::Section;

/// A discovered report log, not yet opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Resolved sample name
    pub sample_name: String,
    /// Host-specific location, passed back to [`LogDiscovery::open`]
    pub location: String,
}

/// Finds report logs and opens them.
pub trait LogDiscovery {
    /// Lists the logs of the given report type, in processing order.
    fn discover(&self, report: ReportType) -> Result<Vec<LogFile>>;

    /// Opens one discovered log for reading. The reader is dropped once the log is parsed.
    fn open(&self, log: &LogFile) -> Result<Box<dyn BufRead + '_>>;
}

/// Sample exclusion policy.
pub trait SampleFilter {
    /// True if `sample` must be left out of the report.
    fn is_ignored(&self, sample: &str) -> bool;

    /// Removes every ignored sample from a dataset.
    fn filter_samples<T>(&self, mut dataset: BTreeMap<String, T>) -> BTreeMap<String, T> {
        dataset.retain(|sample, _| {
            let ignored = self.is_ignored(sample);
            if ignored {
                log::debug!("Ignoring sample '{sample}'");
            }
            !ignored
        });
        dataset
    }
}

/// Persists parsed datasets.
pub trait DataWriter {
    /// Writes `dataset` under the base file name `name`. `key_column` names the column
    /// each sample table is keyed by.
    fn write_data_file<K>(&self, name: &str, key_column: &str, dataset: &Dataset<K>) -> Result<()>
    where
        K: Ord + Display + Serialize;
}

/// Receives report sections in the order they should appear.
pub trait SectionSink {
    fn add_section(&mut self, section: Section);
}

/// Everything the duplex QC module needs from its host.
pub trait ReportHost: LogDiscovery + SampleFilter + DataWriter + SectionSink {}

impl<T: LogDiscovery + SampleFilter + DataWriter + SectionSink> ReportHost for T {}
