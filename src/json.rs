//! Fixed-schema JSON export
//!
//! Converts a loaded fault table into the JSON record schema downstream tools
//! consume. Fault names carry a subcase suffix in the source data
//! (`CIDC(1,0)`); the exporter splits that off and numbers subcases per base
//! name in row order instead. Missing integer cells encode as -1, and the
//! operation list is re-emitted in braced form (`"{W1}, {W0}"`).

use std::io::Write;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use crate::error::{SchemaError, SiftError};
use crate::normalize::{normalize, WILDCARD};
use crate::table::Table;

/// Columns the JSON exporter requires from the input table.
pub const JSON_COLUMNS: [&str; 11] = [
    "Name", "SFR", "Da", "Dv", "Ia", "Iv", "Ops", "Detect", "F", "R", "Gv",
];

/// One exported fault record, in the fixed field schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultJson {
    /// Base fault name, subcase suffix stripped
    pub name: String,
    /// Subcase number within the base name, in row order
    pub subcase: u32,
    /// Detection class tag
    #[serde(rename = "SFR")]
    pub sfr: String,
    /// Detection address (-1 when unspecified)
    #[serde(rename = "Da")]
    pub da: i64,
    /// Detection value (-1 when unspecified)
    #[serde(rename = "Dv")]
    pub dv: i64,
    /// Injection address (-1 when unspecified)
    #[serde(rename = "Ia")]
    pub ia: i64,
    /// Injection value (-1 when unspecified)
    #[serde(rename = "Iv")]
    pub iv: i64,
    /// Braced operation list, empty when no operations were observed
    #[serde(rename = "Ops")]
    pub ops: String,
    /// Detecting operation
    #[serde(rename = "Detect")]
    pub detect: String,
    #[serde(rename = "F")]
    pub f: i64,
    #[serde(rename = "R")]
    pub r: i64,
    #[serde(rename = "Gv")]
    pub gv: i64,
}

/// Parse an integer cell; blank, dash, and `nan` become -1, and spreadsheet
/// float spellings take their integer part.
fn int_cell(raw: &str, column: &Arc<str>, row: usize) -> Result<i64, SchemaError> {
    let canonical = normalize(raw);
    if canonical == WILDCARD {
        return Ok(-1);
    }
    let head = canonical.split('.').next().unwrap_or(canonical);
    head.parse().map_err(|_| SchemaError::InvalidAttribute {
        column: Arc::clone(column),
        row,
        value: raw.trim().to_string(),
    })
}

/// Reformat an operation list into braced tokens: `"W1; W0"` -> `"{W1}, {W0}"`.
fn braced_ops(raw: &str) -> String {
    let canonical = normalize(raw);
    if canonical == WILDCARD {
        return String::new();
    }
    canonical
        .replace(';', ",")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("{{{}}}", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a raw fault name into its base name, dropping any `(...)` suffix.
fn base_name(pattern: &Regex, raw: &str) -> String {
    match pattern.captures(raw) {
        Some(caps) => caps[1].to_string(),
        None => raw.trim().to_string(),
    }
}

/// Build the JSON records for every row of the table.
///
/// Requires the full [`JSON_COLUMNS`] schema; every missing column is
/// reported at once. Subcase numbers restart at 0 for each distinct base
/// name, counting in row order.
pub fn records_from_table(table: &Table) -> Result<Vec<FaultJson>, SiftError> {
    let indices = table.require_columns(&JSON_COLUMNS)?;
    let columns = table.columns();
    let name_pattern =
        Regex::new(r"^\s*([A-Za-z0-9_-]+)\s*(?:\(([^)]*)\))?").map_err(|err| {
            SiftError::Log(crate::error::LogParseError::Pattern(err))
        })?;

    let mut subcase_counts: std::collections::HashMap<String, u32> =
        std::collections::HashMap::new();
    let mut records = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        let cell = |slot: usize| table.cell(row, indices[slot]);

        let name = base_name(&name_pattern, cell(0));
        let counter = subcase_counts.entry(name.clone()).or_insert(0);
        let subcase = *counter;
        *counter += 1;

        records.push(FaultJson {
            name,
            subcase,
            sfr: cell(1).trim().to_string(),
            da: int_cell(cell(2), &columns[indices[2]], row)?,
            dv: int_cell(cell(3), &columns[indices[3]], row)?,
            ia: int_cell(cell(4), &columns[indices[4]], row)?,
            iv: int_cell(cell(5), &columns[indices[5]], row)?,
            ops: braced_ops(cell(6)),
            detect: cell(7).trim().to_string(),
            f: int_cell(cell(8), &columns[indices[8]], row)?,
            r: int_cell(cell(9), &columns[indices[9]], row)?,
            gv: int_cell(cell(10), &columns[indices[10]], row)?,
        });
    }
    Ok(records)
}

/// Serialize records as pretty-printed JSON.
pub fn write_json<W: Write>(writer: &mut W, records: &[FaultJson]) -> Result<(), SiftError> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn sample_table() -> Table {
        let mut table = Table::new(&JSON_COLUMNS);
        table.push_row(vec![
            "CIDC(1,0)", "S", "0", "1", "", "0.0", "W1; W0", "R1", "3", "-", "1",
        ]);
        table.push_row(vec![
            "CIDC(0,1)", "F", "1", "-", "0", "1", "", "R0", "2", "4", "0",
        ]);
        table.push_row(vec![
            "SAF", "R", "0", "0", "0", "0", "R1", "R1", "1", "1", "1",
        ]);
        table
    }

    #[test]
    fn test_name_splitting_and_subcase_numbering() {
        let records = records_from_table(&sample_table()).unwrap();
        assert_eq!(records[0].name, "CIDC");
        assert_eq!(records[0].subcase, 0);
        assert_eq!(records[1].name, "CIDC");
        assert_eq!(records[1].subcase, 1);
        assert_eq!(records[2].name, "SAF");
        assert_eq!(records[2].subcase, 0);
    }

    #[test]
    fn test_missing_int_cells_become_minus_one() {
        let records = records_from_table(&sample_table()).unwrap();
        assert_eq!(records[0].ia, -1);
        assert_eq!(records[0].iv, 0); // "0.0" takes the integer part
        assert_eq!(records[0].r, -1);
        assert_eq!(records[1].dv, -1);
    }

    #[test]
    fn test_braced_ops_formatting() {
        let records = records_from_table(&sample_table()).unwrap();
        assert_eq!(records[0].ops, "{W1}, {W0}");
        assert_eq!(records[1].ops, "");
        assert_eq!(records[2].ops, "{R1}");
    }

    #[test]
    fn test_missing_columns_reported() {
        let table = Table::new(&["Name", "Da"]);
        let err = records_from_table(&table).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Missing required columns"));
        assert!(msg.contains("SFR"));
        assert!(msg.contains("Gv"));
    }

    #[test]
    fn test_invalid_int_cell_fails() {
        let mut table = Table::new(&JSON_COLUMNS);
        table.push_row(vec![
            "SAF", "R", "0", "0", "0", "0", "R1", "R1", "many", "1", "1",
        ]);
        let err = records_from_table(&table).unwrap_err();
        assert!(err.to_string().contains("\"many\""));
    }

    #[test]
    fn test_json_shape() {
        let records = records_from_table(&sample_table()).unwrap();
        let mut buffer = Vec::new();
        write_json(&mut buffer, &records[..1]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "CIDC");
        assert_eq!(value[0]["SFR"], "S");
        assert_eq!(value[0]["Ia"], -1);
        assert_eq!(value[0]["Ops"], "{W1}, {W0}");
    }
}
