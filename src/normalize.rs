//! Cell-value normalization
//!
//! Every attribute cell and operation-signature cell passes through [`normalize`]
//! before either analysis engine sees it. Absent, blank, dash, and `nan` spellings
//! all collapse to the single wildcard marker; everything else keeps its trimmed
//! string form.

/// The canonical wildcard ("don't care") marker.
///
/// Wildcard is the unique absorbing value: it never fails an
/// equality-with-wildcard test in either engine.
pub const WILDCARD: &str = "X";

/// Normalize a raw cell value.
///
/// Returns [`WILDCARD`] when the trimmed input is empty, a dash, or a
/// case-insensitive spelling of `nan` (blank spreadsheet cells round-trip
/// through all three forms); otherwise returns the trimmed input.
///
/// This function is pure and total, and idempotent:
/// `normalize(normalize(x)) == normalize(x)` for every input.
///
/// # Examples
///
/// ```
/// use faultsift::{normalize, WILDCARD};
///
/// assert_eq!(normalize(" 1 "), "1");
/// assert_eq!(normalize(""), WILDCARD);
/// assert_eq!(normalize("-"), WILDCARD);
/// assert_eq!(normalize("NaN"), WILDCARD);
/// assert_eq!(normalize("R1"), "R1");
/// ```
pub fn normalize(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan") {
        WILDCARD
    } else {
        trimmed
    }
}
