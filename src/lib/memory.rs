//! In-memory [`ReportHost`](crate::host::ReportHost) for embedding and tests.
//!
//! Logs are registered as strings, persisted datasets are kept as JSON values and sections
//! are collected in a vector.

use anyhow::{Result, anyhow};
use fgqc_metrics::{Dataset, ReportType};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::{BufRead, Cursor};

use crate::host::{DataWriter, LogDiscovery, LogFile, SampleFilter, SectionSink};
use crate::plot::Section;

/// A host that keeps every input and output in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    logs: Vec<(ReportType, LogFile, String)>,
    ignored: BTreeSet<String>,
    data_files: RefCell<BTreeMap<String, serde_json::Value>>,
    sections: Vec<Section>,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a report log for `sample`. Logs are discovered in registration order.
    pub fn add_log(&mut self, report: ReportType, sample: &str, content: &str) -> &mut Self {
        let location = format!("{}#{}", report.key_column(), self.logs.len());
        let log = LogFile { sample_name: sample.to_string(), location };
        self.logs.push((report, log, content.to_string()));
        self
    }

    /// Excludes `sample` from every dataset.
    pub fn ignore_sample(&mut self, sample: &str) -> &mut Self {
        self.ignored.insert(sample.to_string());
        self
    }

    /// A persisted dataset, as JSON.
    #[must_use]
    pub fn data_file(&self, name: &str) -> Option<serde_json::Value> {
        self.data_files.borrow().get(name).cloned()
    }

    /// Names of all persisted datasets.
    #[must_use]
    pub fn data_file_names(&self) -> Vec<String> {
        self.data_files.borrow().keys().cloned().collect()
    }

    /// Sections received so far.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl LogDiscovery for MemoryHost {
    fn discover(&self, report: ReportType) -> Result<Vec<LogFile>> {
        Ok(self
            .logs
            .iter()
            .filter(|(r, _, _)| *r == report)
            .map(|(_, log, _)| log.clone())
            .collect())
    }

    fn open(&self, log: &LogFile) -> Result<Box<dyn BufRead + '_>> {
        let (_, _, content) = self
            .logs
            .iter()
            .find(|(_, l, _)| l.location == log.location)
            .ok_or_else(|| anyhow!("Unknown log location: {}", log.location))?;
        Ok(Box::new(Cursor::new(content.as_bytes())))
    }
}

impl SampleFilter for MemoryHost {
    fn is_ignored(&self, sample: &str) -> bool {
        self.ignored.contains(sample)
    }
}

impl DataWriter for MemoryHost {
    fn write_data_file<K>(&self, name: &str, _key_column: &str, dataset: &Dataset<K>) -> Result<()>
    where
        K: Ord + Display + Serialize,
    {
        let value = serde_json::to_value(dataset)?;
        self.data_files.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }
}

impl SectionSink for MemoryHost {
    fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }
}
