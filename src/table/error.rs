//! Error types for tabular I/O

use std::fmt;
use std::io;

/// Errors in the structure of delimited tabular data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A quoted field was opened but never closed
    UnterminatedQuote {
        /// One-based line number where the quoted field started
        line: usize,
    },
    /// The input had no header row
    MissingHeader,
    /// A column being added does not match the table's row count
    ColumnLengthMismatch {
        /// Rows in the table
        expected: usize,
        /// Values supplied for the new column
        actual: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::UnterminatedQuote { line } => {
                write!(f, "Unterminated quoted field starting at line {}", line)
            }
            TableError::MissingHeader => write!(f, "Input has no header row"),
            TableError::ColumnLengthMismatch { expected, actual } => write!(
                f,
                "Column has {} values but the table has {} rows",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Errors that can occur while reading tabular data.
#[derive(Debug)]
pub enum TableReadError {
    /// Structural error in the data
    Table(TableError),
    /// IO error while reading
    Io(io::Error),
}

impl fmt::Display for TableReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableReadError::Table(err) => write!(f, "{}", err),
            TableReadError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TableReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableReadError::Table(err) => Some(err),
            TableReadError::Io(err) => Some(err),
        }
    }
}

impl From<TableError> for TableReadError {
    fn from(err: TableError) -> Self {
        TableReadError::Table(err)
    }
}

impl From<io::Error> for TableReadError {
    fn from(err: io::Error) -> Self {
        TableReadError::Io(err)
    }
}

/// Errors that can occur while writing tabular data.
#[derive(Debug)]
pub enum TableWriteError {
    /// IO error while writing
    Io(io::Error),
}

impl fmt::Display for TableWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableWriteError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TableWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableWriteError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for TableWriteError {
    fn from(err: io::Error) -> Self {
        TableWriteError::Io(err)
    }
}
