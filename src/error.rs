//! Error types for the fault-record analyses
//!
//! All failures abort the whole run: the tool is a one-shot batch converter
//! with no intermediate state to corrupt, so there is no per-record
//! skip-and-continue. The variants here are programmatically distinguishable
//! and carry enough context to report exactly what was wrong.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::record::Ternary;
use crate::table::{TableReadError, TableWriteError};

/// Input-validation errors raised before any computation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// One or more required columns are absent from the input table.
    ///
    /// Every missing column is collected before failing, so a caller sees the
    /// full list at once rather than one name per run.
    MissingColumns {
        /// The required column names that were not found
        missing: Vec<Arc<str>>,
    },
    /// An attribute cell holds a value outside the ternary alphabet.
    InvalidAttribute {
        /// The column the cell belongs to
        column: Arc<str>,
        /// Zero-based data-row index of the cell
        row: usize,
        /// The offending raw value (trimmed)
        value: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingColumns { missing } => {
                write!(f, "Missing required columns: ")?;
                for (i, name) in missing.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", name)?;
                }
                Ok(())
            }
            SchemaError::InvalidAttribute { column, row, value } => write!(
                f,
                "Invalid value {:?} in column '{}' at row {}",
                value, column, row
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Internal-consistency failure of the covering-assignment step.
///
/// Never expected under correct merge semantics: every record's own un-merged
/// tuple is in the seed set and trivially covers itself, so reaching this
/// error indicates a bug in the closure computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageError {
    /// Positional index of the uncovered record
    pub index: usize,
    /// The record's attribute tuple
    pub tuple: [Ternary; 4],
}

impl fmt::Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No covering pattern for record {} ({}{}{}{}); pattern closure is inconsistent",
            self.index, self.tuple[0], self.tuple[1], self.tuple[2], self.tuple[3]
        )
    }
}

impl std::error::Error for CoverageError {}

/// Errors from the simulator-log parser.
#[derive(Debug)]
pub enum LogParseError {
    /// A line pattern failed to compile
    Pattern(regex::Error),
    /// IO error while reading the log
    Io(io::Error),
}

impl fmt::Display for LogParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogParseError::Pattern(err) => write!(f, "Invalid log line pattern: {}", err),
            LogParseError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LogParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogParseError::Pattern(err) => Some(err),
            LogParseError::Io(err) => Some(err),
        }
    }
}

impl From<regex::Error> for LogParseError {
    fn from(err: regex::Error) -> Self {
        LogParseError::Pattern(err)
    }
}

impl From<io::Error> for LogParseError {
    fn from(err: io::Error) -> Self {
        LogParseError::Io(err)
    }
}

/// The top-level error type: every failure a full pipeline run can produce.
#[derive(Debug)]
pub enum SiftError {
    /// Input schema validation failed
    Schema(SchemaError),
    /// Covering assignment found no pattern for a record
    Coverage(CoverageError),
    /// Failed to read a tabular input
    TableRead(TableReadError),
    /// Failed to write a tabular output
    TableWrite(TableWriteError),
    /// Failed to parse a simulator log
    Log(LogParseError),
    /// JSON serialization failed
    Json(serde_json::Error),
    /// IO error outside the readers/writers above
    Io(io::Error),
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiftError::Schema(err) => write!(f, "{}", err),
            SiftError::Coverage(err) => write!(f, "{}", err),
            SiftError::TableRead(err) => write!(f, "{}", err),
            SiftError::TableWrite(err) => write!(f, "{}", err),
            SiftError::Log(err) => write!(f, "{}", err),
            SiftError::Json(err) => write!(f, "{}", err),
            SiftError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiftError::Schema(err) => Some(err),
            SiftError::Coverage(err) => Some(err),
            SiftError::TableRead(err) => Some(err),
            SiftError::TableWrite(err) => Some(err),
            SiftError::Log(err) => Some(err),
            SiftError::Json(err) => Some(err),
            SiftError::Io(err) => Some(err),
        }
    }
}

impl From<SchemaError> for SiftError {
    fn from(err: SchemaError) -> Self {
        SiftError::Schema(err)
    }
}

impl From<CoverageError> for SiftError {
    fn from(err: CoverageError) -> Self {
        SiftError::Coverage(err)
    }
}

impl From<TableReadError> for SiftError {
    fn from(err: TableReadError) -> Self {
        SiftError::TableRead(err)
    }
}

impl From<TableWriteError> for SiftError {
    fn from(err: TableWriteError) -> Self {
        SiftError::TableWrite(err)
    }
}

impl From<LogParseError> for SiftError {
    fn from(err: LogParseError) -> Self {
        SiftError::Log(err)
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        SiftError::Json(err)
    }
}

impl From<io::Error> for SiftError {
    fn from(err: io::Error) -> Self {
        SiftError::Io(err)
    }
}
