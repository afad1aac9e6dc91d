//! Custom error types for fgqc operations.

use fgqc_metrics::{CoercionError, ReportType};
use thiserror::Error;

/// Result type alias for fgqc operations
pub type Result<T> = std::result::Result<T, FgqcError>;

/// Error type for fgqc operations
#[derive(Error, Debug)]
pub enum FgqcError {
    /// A field could not be converted to its column's declared type
    #[error("Invalid {report} report for sample '{sample}' at line {line}: {source}")]
    InvalidField {
        /// Which report was being parsed
        report: ReportType,
        /// The sample the report belongs to
        sample: String,
        /// One-based line number of the offending row
        line: usize,
        /// The underlying conversion failure
        #[source]
        source: CoercionError,
    },

    /// The report stream could not be read
    #[error("Failed to read {report} report for sample '{sample}': {source}")]
    Read {
        /// Which report was being read
        report: ReportType,
        /// The sample the report belongs to
        sample: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Input path problem
    #[error("Invalid {file_type} '{path}': {reason}")]
    InvalidPath {
        /// Kind of path (e.g., "Input", "Output directory")
        file_type: String,
        /// The path
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}
