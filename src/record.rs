//! Fault-record data model
//!
//! This module provides the core record types shared by both analysis engines:
//! - [`Ternary`]: the three-valued attribute alphabet {0, 1, don't-care}
//! - [`FaultRecord`]: one test case — four ternary attributes plus the observed
//!   operation-signature token
//!
//! Records are extracted from a [`Table`] once per batch; all value validation
//! happens at that point, so the engines themselves are total functions.

use std::fmt;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::normalize::{normalize, WILDCARD};
use crate::table::Table;

/// The attribute columns required by both engines, in canonical order.
pub const ATTRIBUTE_COLUMNS: [&str; 4] = ["Da", "Dv", "Ia", "Iv"];

/// All columns a fault batch must expose: the four ternary attributes plus
/// the operation-signature column.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Da", "Dv", "Ia", "Iv", "Ops"];

/// A value of the ternary attribute alphabet.
///
/// The derived order places the wildcard last (`Zero < One < DontCare`), which
/// the minimizer's covering tie-break relies on: "lexicographically smallest"
/// prefers concrete values over wildcards at equal wildcard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ternary {
    /// The concrete value 0
    Zero,
    /// The concrete value 1
    One,
    /// Don't-care: any concrete value is acceptable here
    DontCare,
}

impl Ternary {
    /// Parse a raw cell into a ternary value.
    ///
    /// The cell is normalized first, so blanks, dashes, and `nan` spellings all
    /// parse as [`Ternary::DontCare`]. Spreadsheet float spellings (`0.0`,
    /// `1.0`) are accepted by taking the integer part, and both `x` and `X`
    /// count as wildcard spellings. Anything else is rejected with the column
    /// and row of the offending cell.
    pub fn from_cell(raw: &str, column: &Arc<str>, row: usize) -> Result<Self, SchemaError> {
        let canonical = normalize(raw);
        if canonical == WILDCARD {
            return Ok(Ternary::DontCare);
        }
        // Spreadsheets round-trip integer cells as "0.0"; keep the integer part.
        let head = canonical.split('.').next().unwrap_or(canonical);
        match head {
            "0" => Ok(Ternary::Zero),
            "1" => Ok(Ternary::One),
            "x" | "X" => Ok(Ternary::DontCare),
            _ => Err(SchemaError::InvalidAttribute {
                column: Arc::clone(column),
                row,
                value: raw.trim().to_string(),
            }),
        }
    }

    /// Export encoding: 0, 1, or -1 for don't-care.
    pub fn to_int(self) -> i64 {
        match self {
            Ternary::Zero => 0,
            Ternary::One => 1,
            Ternary::DontCare => -1,
        }
    }

    /// True if this value is the wildcard.
    pub fn is_wildcard(self) -> bool {
        self == Ternary::DontCare
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Ternary::Zero => '0',
            Ternary::One => '1',
            Ternary::DontCare => 'X',
        };
        write!(f, "{}", c)
    }
}

/// One fault-test record: a 4-tuple of ternary test conditions plus the
/// normalized operation-signature observed for this case.
///
/// The signature is an atomic token — the dominance engine compares it as a
/// whole under the default rule, never decomposing it. Identity is the
/// record's positional index within its loaded batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    /// Detection address condition
    pub da: Ternary,
    /// Detection value condition
    pub dv: Ternary,
    /// Injection address condition
    pub ia: Ternary,
    /// Injection value condition
    pub iv: Ternary,
    /// Normalized operation-signature token (`"X"` when unspecified)
    pub ops: Arc<str>,
    /// Computed: true if some other record in the batch dominates this one
    pub dominated: bool,
}

impl FaultRecord {
    /// Build a record from already-parsed parts. The signature is normalized
    /// here so callers can pass raw cell text.
    pub fn new(da: Ternary, dv: Ternary, ia: Ternary, iv: Ternary, ops: &str) -> Self {
        FaultRecord {
            da,
            dv,
            ia,
            iv,
            ops: Arc::from(normalize(ops)),
            dominated: false,
        }
    }

    /// The four ternary attributes in canonical column order.
    pub fn attributes(&self) -> [Ternary; 4] {
        [self.da, self.dv, self.ia, self.iv]
    }

    /// Extract one record per table row.
    ///
    /// Validates the schema up front — every missing required column is
    /// reported in a single [`SchemaError::MissingColumns`] — and then parses
    /// each attribute cell exactly once. Pass-through columns are left to the
    /// caller; the record only carries what the engines interpret.
    pub fn from_table(table: &Table) -> Result<Vec<FaultRecord>, SchemaError> {
        let indices = table.require_columns(&REQUIRED_COLUMNS)?;
        let (da_col, dv_col, ia_col, iv_col, ops_col) = (
            indices[0], indices[1], indices[2], indices[3], indices[4],
        );
        let columns = table.columns();

        let mut records = Vec::with_capacity(table.num_rows());
        for row in 0..table.num_rows() {
            let da = Ternary::from_cell(table.cell(row, da_col), &columns[da_col], row)?;
            let dv = Ternary::from_cell(table.cell(row, dv_col), &columns[dv_col], row)?;
            let ia = Ternary::from_cell(table.cell(row, ia_col), &columns[ia_col], row)?;
            let iv = Ternary::from_cell(table.cell(row, iv_col), &columns[iv_col], row)?;
            records.push(FaultRecord::new(da, dv, ia, iv, table.cell(row, ops_col)));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Arc<str> {
        Arc::from(name)
    }

    #[test]
    fn test_ternary_from_cell() {
        let c = col("Da");
        assert_eq!(Ternary::from_cell("0", &c, 0).unwrap(), Ternary::Zero);
        assert_eq!(Ternary::from_cell("1", &c, 0).unwrap(), Ternary::One);
        assert_eq!(Ternary::from_cell("", &c, 0).unwrap(), Ternary::DontCare);
        assert_eq!(Ternary::from_cell("-", &c, 0).unwrap(), Ternary::DontCare);
        assert_eq!(Ternary::from_cell("X", &c, 0).unwrap(), Ternary::DontCare);
        assert_eq!(Ternary::from_cell("x", &c, 0).unwrap(), Ternary::DontCare);
        assert_eq!(Ternary::from_cell("nan", &c, 0).unwrap(), Ternary::DontCare);
    }

    #[test]
    fn test_ternary_accepts_float_spellings() {
        let c = col("Iv");
        assert_eq!(Ternary::from_cell("0.0", &c, 3).unwrap(), Ternary::Zero);
        assert_eq!(Ternary::from_cell("1.0", &c, 3).unwrap(), Ternary::One);
    }

    #[test]
    fn test_ternary_rejects_other_values() {
        let c = col("Dv");
        let err = Ternary::from_cell("2", &c, 7).unwrap_err();
        match err {
            SchemaError::InvalidAttribute { column, row, value } => {
                assert_eq!(column.as_ref(), "Dv");
                assert_eq!(row, 7);
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ternary_order_puts_wildcard_last() {
        assert!(Ternary::Zero < Ternary::One);
        assert!(Ternary::One < Ternary::DontCare);
    }

    #[test]
    fn test_ternary_int_encoding() {
        assert_eq!(Ternary::Zero.to_int(), 0);
        assert_eq!(Ternary::One.to_int(), 1);
        assert_eq!(Ternary::DontCare.to_int(), -1);
    }

    #[test]
    fn test_record_normalizes_ops() {
        let r = FaultRecord::new(
            Ternary::Zero,
            Ternary::One,
            Ternary::DontCare,
            Ternary::Zero,
            "  R1 ",
        );
        assert_eq!(r.ops.as_ref(), "R1");
        assert!(!r.dominated);

        let blank = FaultRecord::new(
            Ternary::Zero,
            Ternary::Zero,
            Ternary::Zero,
            Ternary::Zero,
            "",
        );
        assert_eq!(blank.ops.as_ref(), "X");
    }

    #[test]
    fn test_attributes_order() {
        let r = FaultRecord::new(
            Ternary::Zero,
            Ternary::One,
            Ternary::DontCare,
            Ternary::One,
            "R",
        );
        assert_eq!(
            r.attributes(),
            [Ternary::Zero, Ternary::One, Ternary::DontCare, Ternary::One]
        );
    }
}
