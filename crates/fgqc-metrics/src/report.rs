//! Report kinds, rows, and the per-sample tables built from them.
//!
//! Two report kinds are understood:
//! - **family sizes** (`*.family_sizes.txt`): one row per family size, keyed by the integer
//!   `family_size` column
//! - **duplex yield metrics** (`*.duplex_yield_metrics.txt`): one row per downsampling level,
//!   keyed by the float `fraction` column
//!
//! Each kind declares the types of the columns it knows about; every other column is text.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::value::{CoercionError, ColumnType, Value};

/// Column types of the family size report.
const FAMILY_SIZE_COLUMNS: &[(&str, ColumnType)] = &[
    ("family_size", ColumnType::Integer),
    ("ss_count", ColumnType::Integer),
    ("ss_fraction", ColumnType::Float),
    ("ds_count", ColumnType::Integer),
    ("ds_fraction", ColumnType::Float),
    ("cs_count", ColumnType::Integer),
    ("cs_fraction", ColumnType::Float),
    ("families", ColumnType::Integer),
    ("fraction", ColumnType::Float),
    ("tag_family_size", ColumnType::Float),
];

/// Column types of the duplex yield report.
const DUPLEX_YIELD_COLUMNS: &[(&str, ColumnType)] = &[
    ("fraction", ColumnType::Float),
    ("read_pairs", ColumnType::Integer),
    ("cs_families", ColumnType::Integer),
    ("ss_families", ColumnType::Integer),
    ("ds_families", ColumnType::Integer),
    ("ds_duplexes", ColumnType::Integer),
    ("ds_fraction_duplexes_ideal", ColumnType::Float),
    ("ds_fraction_duplexes", ColumnType::Float),
];

/// The two report formats, independent of their row key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    FamilySizes,
    DuplexYieldMetrics,
}

impl ReportType {
    /// Human-readable name for log and error messages.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::FamilySizes => "family size",
            Self::DuplexYieldMetrics => "duplex yield",
        }
    }

    /// The column every row is indexed by. A header without it disqualifies the file.
    #[must_use]
    pub fn key_column(self) -> &'static str {
        match self {
            Self::FamilySizes => "family_size",
            Self::DuplexYieldMetrics => "fraction",
        }
    }

    /// Declared column types for this report.
    #[must_use]
    pub fn columns(self) -> &'static [(&'static str, ColumnType)] {
        match self {
            Self::FamilySizes => FAMILY_SIZE_COLUMNS,
            Self::DuplexYieldMetrics => DUPLEX_YIELD_COLUMNS,
        }
    }

    /// Declared type of `column`, defaulting to [`ColumnType::Text`].
    #[must_use]
    pub fn column_type(self, column: &str) -> ColumnType {
        self.columns()
            .iter()
            .find(|(name, _)| *name == column)
            .map_or(ColumnType::Text, |(_, ty)| *ty)
    }

    /// Base name (without extension) the parsed dataset is persisted under.
    #[must_use]
    pub fn data_file_name(self) -> &'static str {
        match self {
            Self::FamilySizes => "multiqc_fgbio_CollectDuplexSeqMetrics_family_sizes",
            Self::DuplexYieldMetrics => {
                "multiqc_fgbio_CollectDuplexSeqMetrics_duplex_yield_metrics"
            }
        }
    }

    /// File-name suffix identifying this report on disk.
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::FamilySizes => ".family_sizes.txt",
            Self::DuplexYieldMetrics => ".duplex_yield_metrics.txt",
        }
    }

    /// Suffixes of other reports that end with this report's suffix and must not match.
    #[must_use]
    pub fn excluded_suffixes(self) -> &'static [&'static str] {
        match self {
            Self::FamilySizes => &[".duplex_family_sizes.txt"],
            Self::DuplexYieldMetrics => &[],
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Ties a [`ReportType`] to the type its rows are keyed by.
pub trait ReportKind {
    /// Row key: unique per sample, ordered for charting.
    type Key: Copy + Ord + fmt::Debug + fmt::Display + Serialize;

    /// The runtime description of this report.
    const REPORT_TYPE: ReportType;

    /// Extracts the row key from the coerced key-column value.
    fn key_of(value: &Value) -> Option<Self::Key>;
}

/// Family size distribution report, keyed by `family_size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilySizes;

impl ReportKind for FamilySizes {
    type Key = i64;
    const REPORT_TYPE: ReportType = ReportType::FamilySizes;

    fn key_of(value: &Value) -> Option<i64> {
        value.as_i64()
    }
}

/// Duplex yield report, keyed by downsampling `fraction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplexYieldMetrics;

impl ReportKind for DuplexYieldMetrics {
    type Key = Fraction;
    const REPORT_TYPE: ReportType = ReportType::DuplexYieldMetrics;

    fn key_of(value: &Value) -> Option<Fraction> {
        match value {
            Value::Float(v) => Some(Fraction::new(*v)),
            _ => None,
        }
    }
}

/// A downsampling fraction with a total order so it can key ordered maps.
///
/// Ordering and equality follow [`f64::total_cmp`]. Serializes as its display string,
/// which keeps it usable as a JSON object key. The display string always carries a decimal
/// point (`1.0`, not `1`).
#[derive(Debug, Clone, Copy)]
pub struct Fraction(pub f64);

impl Fraction {
    /// Wraps `value`, folding `-0.0` into `0.0` so both key the same row.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn new(value: f64) -> Self {
        Self(if value == 0.0 { 0.0 } else { value })
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One data line of a report: column names (header order) with their typed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Builds a row by zipping `fields` onto `header`, coercing each field by its declared
    /// column type.
    ///
    /// A column repeated in the header keeps its first position and its last value.
    ///
    /// # Errors
    /// Returns the first field that cannot be coerced.
    pub fn from_fields(
        report: ReportType,
        header: &[&str],
        fields: &[&str],
    ) -> Result<Self, CoercionError> {
        let mut row = Self { fields: Vec::with_capacity(header.len()) };
        for (column, raw) in header.iter().zip(fields) {
            let value = report.column_type(column).coerce(column, raw)?;
            row.insert(column, value);
        }
        Ok(row)
    }

    /// Sets `column` to `value`, replacing any existing value in place.
    pub fn insert(&mut self, column: &str, value: Value) {
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    /// The value of `column`, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    /// Column names in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// All rows of one sample's report, indexed by row key.
pub type SampleTable<K> = BTreeMap<K, Row>;

/// Sample tables of every sample for one report kind, indexed by sample name.
pub type Dataset<K> = BTreeMap<String, SampleTable<K>>;
