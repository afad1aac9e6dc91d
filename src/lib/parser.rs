//! Tab-separated report parsing.
//!
//! Both report kinds share one algorithm, parameterized by [`ReportKind`]:
//!
//! 1. The first line is the header. Surrounding whitespace is stripped and it is split on
//!    tabs. A header without the report's key column disqualifies the whole file.
//! 2. Every following line is stripped and split on tabs. Lines whose field count differs
//!    from the header are dropped silently, as are blank lines.
//! 3. Fields are zipped onto the header and coerced by the report's column table. A field
//!    that does not convert is a fatal error.
//! 4. Rows are indexed by their key column; a repeated key replaces the earlier row.
//!
//! A file that yields no rows contributes nothing. Across files, a repeated sample name
//! replaces the earlier sample's table.

use anyhow::Result as AnyResult;
use fgqc_metrics::{
    Dataset, DuplexYieldMetrics, FamilySizes, Fraction, ReportKind, Row, SampleTable,
};
use log::{debug, warn};
use std::io::BufRead;
use std::marker::PhantomData;

use crate::errors::{FgqcError, Result};
use crate::host::{DataWriter, LogDiscovery, SampleFilter};
use crate::logging::OperationTimer;

/// Parser for family size reports, keyed by `family_size`.
pub type FamilySizeParser = ReportParser<FamilySizes>;

/// Parser for duplex yield reports, keyed by `fraction`.
pub type YieldMetricsParser = ReportParser<DuplexYieldMetrics>;

/// Counters accumulated over one parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Logs opened
    pub files: u64,
    /// Logs skipped because the header lacked the key column or no rows survived
    pub files_without_data: u64,
    /// Rows kept
    pub rows: u64,
    /// Lines dropped for a field-count mismatch
    pub dropped_rows: u64,
}

/// Parses reports of one kind into per-sample tables.
#[derive(Debug, Default)]
pub struct ReportParser<K: ReportKind> {
    stats: ParseStats,
    _kind: PhantomData<K>,
}

impl<K: ReportKind> ReportParser<K> {
    #[must_use]
    pub fn new() -> Self {
        Self { stats: ParseStats::default(), _kind: PhantomData }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Parses one report for `sample`.
    ///
    /// Returns `Ok(None)` if the header lacks the key column or no valid rows remain.
    ///
    /// # Errors
    /// Returns [`FgqcError::InvalidField`] if a field cannot be coerced to its column type and
    /// [`FgqcError::Read`] if the stream cannot be read.
    pub fn parse_log<R: BufRead>(
        &mut self,
        reader: R,
        sample: &str,
    ) -> Result<Option<SampleTable<K::Key>>> {
        let report = K::REPORT_TYPE;
        let key_column = report.key_column();
        let read_err =
            |source: std::io::Error| FgqcError::Read { report, sample: sample.to_string(), source };
        self.stats.files += 1;

        let mut lines = reader.lines();
        let header_line = match lines.next() {
            Some(line) => line.map_err(read_err)?,
            None => {
                debug!("Empty {report} report for sample '{sample}'");
                self.stats.files_without_data += 1;
                return Ok(None);
            }
        };
        let header: Vec<&str> = header_line.trim().split('\t').collect();
        if !header.contains(&key_column) {
            debug!("Skipping {report} report for sample '{sample}': no '{key_column}' column");
            self.stats.files_without_data += 1;
            return Ok(None);
        }

        let mut table = SampleTable::new();
        for (index, line) in lines.enumerate() {
            let line = line.map_err(read_err)?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != header.len() {
                self.stats.dropped_rows += 1;
                continue;
            }

            let row = Row::from_fields(report, &header, &fields).map_err(|source| {
                FgqcError::InvalidField {
                    report,
                    sample: sample.to_string(),
                    line: index + 2,
                    source,
                }
            })?;
            match row.get(key_column).and_then(K::key_of) {
                Some(key) => {
                    table.insert(key, row);
                }
                None => self.stats.dropped_rows += 1,
            }
        }

        if table.is_empty() {
            debug!("No valid rows in {report} report for sample '{sample}'");
            self.stats.files_without_data += 1;
            return Ok(None);
        }
        self.stats.rows += table.len() as u64;
        Ok(Some(table))
    }

    /// Parses every report the host discovers, filters excluded samples, and persists the
    /// dataset if any sample remains.
    ///
    /// # Errors
    /// Fails on the first unreadable or malformed report, or if discovery or persistence
    /// fails.
    pub fn parse_all<H>(&mut self, host: &H) -> AnyResult<Dataset<K::Key>>
    where
        H: LogDiscovery + SampleFilter + DataWriter + ?Sized,
    {
        let report = K::REPORT_TYPE;
        let timer = OperationTimer::new(&format!("Parsing {report} reports"));

        let mut dataset = Dataset::new();
        for log in host.discover(report)? {
            let table = {
                let reader = host.open(&log)?;
                self.parse_log(reader, &log.sample_name)?
            };
            if let Some(table) = table {
                if dataset.insert(log.sample_name.clone(), table).is_some() {
                    warn!(
                        "Duplicate sample name '{}' in {report} reports; keeping {}",
                        log.sample_name, log.location
                    );
                }
            }
        }

        let dataset = host.filter_samples(dataset);
        if dataset.is_empty() {
            debug!("No {report} data found");
        } else {
            host.write_data_file(report.data_file_name(), report.key_column(), &dataset)?;
        }

        if self.stats.dropped_rows > 0 {
            debug!("Dropped {} malformed {report} rows", self.stats.dropped_rows);
        }
        timer.log_completion(dataset.len() as u64, "samples");
        Ok(dataset)
    }
}

/// Parses all family size reports the host discovers.
///
/// # Errors
/// See [`ReportParser::parse_all`].
pub fn parse_family_sizes<H>(host: &H) -> AnyResult<Dataset<i64>>
where
    H: LogDiscovery + SampleFilter + DataWriter + ?Sized,
{
    FamilySizeParser::new().parse_all(host)
}

/// Parses all duplex yield reports the host discovers.
///
/// # Errors
/// See [`ReportParser::parse_all`].
pub fn parse_duplex_yield_metrics<H>(host: &H) -> AnyResult<Dataset<Fraction>>
where
    H: LogDiscovery + SampleFilter + DataWriter + ?Sized,
{
    YieldMetricsParser::new().parse_all(host)
}
