//! Tabular data model
//!
//! The loaders and exporters around the analysis engines exchange at-rest
//! tabular data: ordered rows with named columns, grouped into named sheets.
//! [`Table`] is the single in-memory representation; [`Workbook`] carries one
//! or more named sheets of it. The CSV serialization lives in [`csv`] and is
//! re-exported through the [`CsvRead`] and [`CsvWrite`] traits.

mod csv;
mod error;

pub use csv::{CsvRead, CsvWrite};
pub use error::{TableError, TableReadError, TableWriteError};

use std::sync::Arc;

use crate::error::SchemaError;

/// An ordered set of rows with named columns.
///
/// Cells are plain strings; interpretation (normalization, ternary parsing)
/// happens at record-extraction time, not here. Rows shorter than the header
/// are padded with empty cells so every cell access is total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<Arc<str>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    ///
    /// Column names are trimmed, matching the way spreadsheet headers arrive
    /// with stray whitespace.
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Table {
            columns: columns
                .iter()
                .map(|s| Arc::from(s.as_ref().trim()))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// The column names, in order.
    pub fn columns(&self) -> &[Arc<str>] {
        &self.columns
    }

    /// Number of data rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a column's position by (trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        self.columns.iter().position(|c| c.as_ref() == needle)
    }

    /// Resolve every named column, or fail with the full list of missing ones.
    ///
    /// This is the schema gate both pipelines run before any computation:
    /// a fatal [`SchemaError::MissingColumns`] names every absent column at
    /// once.
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, SchemaError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing: Vec<Arc<str>> = Vec::new();
        for name in names {
            match self.column_index(name.as_ref()) {
                Some(idx) => indices.push(idx),
                None => missing.push(Arc::from(name.as_ref())),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(SchemaError::MissingColumns { missing })
        }
    }

    /// Append a data row. Short rows are padded with empty cells; long rows
    /// are truncated to the header width.
    pub fn push_row<S: Into<String>>(&mut self, row: Vec<S>) {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.columns.len(), String::new());
        cells.truncate(self.columns.len());
        self.rows.push(cells);
    }

    /// Cell content at (row, column index). Always defined for valid indices
    /// because rows are padded on insertion.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Borrow a whole row.
    pub fn row(&self, row: usize) -> &[String] {
        &self.rows[row]
    }

    /// Append a computed column.
    ///
    /// The value count must match the current row count; derived fields are
    /// always produced one-per-record.
    pub fn add_column<S: Into<String>>(
        &mut self,
        name: &str,
        values: Vec<S>,
    ) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Arc::from(name.trim()));
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value.into());
        }
        Ok(())
    }

    /// A new table with the same columns keeping only rows whose index
    /// satisfies the predicate. Used to derive the minimal diagnostic set.
    pub fn filter_rows<F: FnMut(usize) -> bool>(&self, mut keep: F) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(i, _)| keep(*i))
                .map(|(_, row)| row.clone())
                .collect(),
        }
    }
}

/// One named sheet of tabular data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name (becomes the file stem on export)
    pub name: Arc<str>,
    /// The sheet's data
    pub table: Table,
}

/// An ordered collection of named sheets.
///
/// The dominance pipeline emits two sheets (`AllFaults`, `MinimalSet`); the
/// log parser emits one per initialization value (`Init0`, `Init1`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Workbook::default()
    }

    /// Append a named sheet.
    pub fn add_sheet(&mut self, name: &str, table: Table) {
        self.sheets.push(Sheet {
            name: Arc::from(name),
            table,
        });
    }

    /// All sheets in insertion order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Look up a sheet's table by name.
    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets
            .iter()
            .find(|s| s.name.as_ref() == name)
            .map(|s| &s.table)
    }

    /// Write every sheet as `<name>.csv` inside `dir`.
    pub fn to_csv_dir<P: AsRef<std::path::Path>>(&self, dir: P) -> Result<(), TableWriteError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        for sheet in &self.sheets {
            let path = dir.join(format!("{}.csv", sheet.name));
            sheet.table.to_csv_file(path)?;
        }
        Ok(())
    }
}
