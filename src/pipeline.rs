//! End-to-end analysis pipelines
//!
//! Both pipelines take one loaded table, validate its schema, run an engine,
//! and hand back tabular output ready for export. Pass-through columns (names,
//! detection info, identifiers) are preserved unchanged alongside the computed
//! fields; the engines never interpret them.

use crate::dominance::{compute_dominance, SignatureRule};
use crate::error::SiftError;
use crate::minimize::minimize;
use crate::record::FaultRecord;
use crate::table::{Table, Workbook};

/// Sheet name for the full record set with dominance flags.
pub const ALL_FAULTS_SHEET: &str = "AllFaults";
/// Sheet name for the minimal diagnostic set.
pub const MINIMAL_SET_SHEET: &str = "MinimalSet";

/// Run the dominance analysis over a fault table.
///
/// Produces a two-sheet workbook: `AllFaults` is the input plus a boolean
/// `Dominated` column, and `MinimalSet` keeps only the rows no other record
/// dominates.
///
/// # Examples
///
/// ```
/// use faultsift::{dominance_workbook, CsvRead, SignatureRule, Table};
///
/// let table = Table::from_csv_string(
///     "Name,Da,Dv,Ia,Iv,Ops\n\
///      a,0,0,0,0,R\n\
///      b,0,X,0,X,R\n",
/// ).unwrap();
/// let book = dominance_workbook(&table, SignatureRule::Exact).unwrap();
/// assert_eq!(book.sheet("AllFaults").unwrap().num_rows(), 2);
/// assert_eq!(book.sheet("MinimalSet").unwrap().num_rows(), 1);
/// ```
pub fn dominance_workbook(
    table: &Table,
    rule: SignatureRule,
) -> Result<Workbook, SiftError> {
    let mut records = FaultRecord::from_table(table)?;
    compute_dominance(&mut records, rule);

    let flags: Vec<&str> = records
        .iter()
        .map(|r| if r.dominated { "true" } else { "false" })
        .collect();

    let mut all = table.clone();
    // One flag per record by construction
    if let Err(err) = all.add_column("Dominated", flags) {
        return Err(SiftError::TableRead(err.into()));
    }

    let minimal = all.filter_rows(|i| !records[i].dominated);

    let mut book = Workbook::new();
    book.add_sheet(ALL_FAULTS_SHEET, all);
    book.add_sheet(MINIMAL_SET_SHEET, minimal);
    Ok(book)
}

/// Run the signature minimization over a fault table.
///
/// Returns the input plus four integer columns `f_Da, f_Dv, f_Ia, f_Iv`
/// holding each record's assigned covering pattern in the {0, 1, -1}
/// encoding.
pub fn minimized_table(table: &Table) -> Result<Table, SiftError> {
    let records = FaultRecord::from_table(table)?;
    let result = minimize(&records)?;

    let mut out = table.clone();
    for (pos, name) in ["f_Da", "f_Dv", "f_Ia", "f_Iv"].into_iter().enumerate() {
        let values: Vec<String> = result
            .assignments
            .iter()
            .map(|p| p.to_ints()[pos].to_string())
            .collect();
        if let Err(err) = out.add_column(name, values) {
            return Err(SiftError::TableRead(err.into()));
        }
    }
    Ok(out)
}
