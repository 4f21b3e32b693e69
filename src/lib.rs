//! # faultsift
//!
//! Analyses for hardware fault-test records. Each record is a tuple of four
//! ternary test conditions — detection address/value and injection
//! address/value, each one of {0, 1, don't-care} — plus the observed
//! operation-signature. Two independent engines operate on the same
//! normalized record set:
//!
//! - **Dominance filtering** marks every record whose test conditions are
//!   subsumed by another record's, and derives the minimal diagnostic set of
//!   records not dominated by any other.
//! - **Signature minimization** closes the set of attribute tuples under
//!   pairwise don't-care merging and assigns each record one covering pattern
//!   from the closure, pinning as few variables as possible.
//!
//! Around the engines, the crate carries the batch tool chain's format
//! conversions: CSV tables with named columns and sheets, simulator-log
//! parsing into tabular rows, and fixed-schema JSON export.
//!
//! ## Dominance filtering
//!
//! ```
//! use faultsift::{compute_dominance, minimal_indices, FaultRecord, SignatureRule, Ternary};
//!
//! let mut records = vec![
//!     FaultRecord::new(Ternary::Zero, Ternary::Zero, Ternary::Zero, Ternary::Zero, "R"),
//!     FaultRecord::new(Ternary::Zero, Ternary::DontCare, Ternary::Zero, Ternary::DontCare, "R"),
//! ];
//!
//! compute_dominance(&mut records, SignatureRule::Exact);
//!
//! // The fully specified record dominates the wildcarded one.
//! assert!(records[1].dominated);
//! assert_eq!(minimal_indices(&records), vec![0]);
//! ```
//!
//! ## Signature minimization
//!
//! ```
//! use faultsift::{minimize, FaultRecord, Ternary};
//!
//! let records = vec![
//!     FaultRecord::new(Ternary::Zero, Ternary::Zero, Ternary::DontCare, Ternary::DontCare, "R"),
//!     FaultRecord::new(Ternary::Zero, Ternary::DontCare, Ternary::Zero, Ternary::DontCare, "R"),
//! ];
//!
//! let result = minimize(&records).unwrap();
//! for (record, pattern) in records.iter().zip(&result.assignments) {
//!     assert!(pattern.covers(&record.attributes()));
//! }
//! ```
//!
//! ## Whole-table pipelines
//!
//! The engines are also exposed as table-in, table-out pipelines that
//! validate the input schema (`Da`, `Dv`, `Ia`, `Iv`, `Ops`) and preserve
//! every pass-through column:
//!
//! ```
//! use faultsift::{dominance_workbook, CsvRead, CsvWrite, SignatureRule, Table};
//!
//! let table = Table::from_csv_string(
//!     "Name,Da,Dv,Ia,Iv,Ops\n\
//!      stuck,0,0,0,0,R\n\
//!      broad,0,,0,,R\n",
//! ).unwrap();
//!
//! let book = dominance_workbook(&table, SignatureRule::Exact).unwrap();
//! let minimal = book.sheet("MinimalSet").unwrap();
//! assert_eq!(minimal.num_rows(), 1);
//! assert_eq!(minimal.cell(0, 0), "stuck");
//! ```
//!
//! The whole crate is single-threaded and batch-oriented: a run loads one
//! record set, computes, and exports, with no state surviving past the run.
//! Both engines are O(n²) in the batch size, which is acceptable at the
//! intended scale of hundreds of records.

pub mod dominance;
pub mod error;
pub mod json;
pub mod minimize;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod simlog;
pub mod table;

// Re-export the high-level public API
pub use dominance::{compute_dominance, dominates, minimal_indices, SignatureRule};
pub use error::{CoverageError, LogParseError, SchemaError, SiftError};
pub use json::{records_from_table, write_json, FaultJson};
pub use minimize::{closure, covering_pattern, minimize, Minimization, Pattern};
pub use normalize::{normalize, WILDCARD};
pub use pipeline::{dominance_workbook, minimized_table, ALL_FAULTS_SHEET, MINIMAL_SET_SHEET};
pub use record::{FaultRecord, Ternary, ATTRIBUTE_COLUMNS, REQUIRED_COLUMNS};
pub use simlog::LogParser;
pub use table::{CsvRead, CsvWrite, Sheet, Table, TableError, TableReadError, TableWriteError, Workbook};
