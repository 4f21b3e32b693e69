//! Signature minimizer
//!
//! Computes a reduced set of ternary "don't-care" patterns covering a batch of
//! fault records. The procedure is a closure under pairwise merge, not
//! prime-implicant absorption: merged patterns are added to the set, subsumed
//! patterns are never removed, and the loop runs to a fixpoint where a full
//! pass produces nothing new. Each record is then assigned one covering
//! pattern from the closure.
//!
//! Covering assignment is deterministic: among all patterns covering a
//! record's tuple, the one with the most wildcards wins, ties broken by the
//! lexicographically smallest pattern under the [`Ternary`] order
//! (`Zero < One < DontCare`).

use std::collections::HashSet;
use std::fmt;

use crate::error::CoverageError;
use crate::record::{FaultRecord, Ternary};


/// A generalized region of attribute space: a 4-tuple over {0, 1, X}.
///
/// Patterns exist only for the duration of one minimization run. They are
/// created from record tuples (the seed) and by merging compatible pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(pub [Ternary; 4]);

impl Pattern {
    /// Two patterns are compatible when every position is equal or has a
    /// wildcard on at least one side.
    pub fn compatible(&self, other: &Pattern) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a == b || a.is_wildcard() || b.is_wildcard())
    }

    /// Merge two compatible patterns.
    ///
    /// Positionwise: agreement keeps the value; a wildcard on one side keeps
    /// the other side's concrete value. Merging never widens a concrete value
    /// into a wildcard — it only reconciles one side's wildcard against the
    /// other's concrete value.
    pub fn merge(&self, other: &Pattern) -> Pattern {
        let mut out = [Ternary::DontCare; 4];
        for (i, (a, b)) in self.0.iter().zip(other.0.iter()).enumerate() {
            out[i] = if a == b {
                *a
            } else if a.is_wildcard() {
                *b
            } else {
                *a
            };
        }
        Pattern(out)
    }

    /// A pattern covers a tuple when every position is wildcard or equal to
    /// the tuple's value.
    pub fn covers(&self, tuple: &[Ternary; 4]) -> bool {
        self.0
            .iter()
            .zip(tuple.iter())
            .all(|(p, t)| p.is_wildcard() || p == t)
    }

    /// Number of wildcard positions.
    pub fn wildcard_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_wildcard()).count()
    }

    /// Export encoding of the four positions: {0, 1, -1 for wildcard}.
    pub fn to_ints(&self) -> [i64; 4] {
        [
            self.0[0].to_int(),
            self.0[1].to_int(),
            self.0[2].to_int(),
            self.0[3].to_int(),
        ]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl From<[Ternary; 4]> for Pattern {
    fn from(tuple: [Ternary; 4]) -> Self {
        Pattern(tuple)
    }
}

/// Result of one minimization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimization {
    /// The full pattern closure, in deterministic discovery order
    pub patterns: Vec<Pattern>,
    /// One covering pattern per input record, by position
    pub assignments: Vec<Pattern>,
}

/// Close a pattern set under pairwise merge.
///
/// The seed is deduplicated in first-seen order. Each pass merges every
/// compatible pair touching the current frontier — (known x frontier) and
/// (frontier x frontier) — and appends unseen results; the loop ends when a
/// pass adds nothing. The set only ever grows, and the output order is a
/// deterministic function of the seed order.
pub fn closure<I: IntoIterator<Item = Pattern>>(seed: I) -> Vec<Pattern> {
    let mut known: Vec<Pattern> = Vec::new();
    let mut seen: HashSet<Pattern> = HashSet::new();
    for pattern in seed {
        if seen.insert(pattern) {
            known.push(pattern);
        }
    }

    // The frontier is the suffix of `known` added by the previous pass; pairs
    // entirely inside the older prefix were already merged.
    let mut frontier_start = 0;
    while frontier_start < known.len() {
        let pass_end = known.len();
        let mut added: Vec<Pattern> = Vec::new();
        for i in 0..pass_end {
            let j_lo = if i < frontier_start {
                frontier_start
            } else {
                i + 1
            };
            for j in j_lo..pass_end {
                let (a, b) = (known[i], known[j]);
                if a.compatible(&b) {
                    let merged = a.merge(&b);
                    if seen.insert(merged) {
                        added.push(merged);
                    }
                }
            }
        }
        frontier_start = pass_end;
        known.extend(added);
    }
    known
}

/// Find the covering pattern for a tuple under the deterministic tie-break:
/// most wildcards first, then lexicographically smallest.
pub fn covering_pattern(patterns: &[Pattern], tuple: &[Ternary; 4]) -> Option<Pattern> {
    patterns
        .iter()
        .filter(|p| p.covers(tuple))
        .min_by_key(|p| (std::cmp::Reverse(p.wildcard_count()), p.0))
        .copied()
}

/// Run the full minimization over a record batch.
///
/// Seeds the pattern set with the distinct attribute tuples of the records,
/// closes it under pairwise merge, and assigns each record a covering
/// pattern. A record with no covering pattern is a fatal internal-consistency
/// error: its own tuple is in the seed and covers itself, so this cannot
/// happen unless the closure is broken.
///
/// # Examples
///
/// ```
/// use faultsift::{minimize, FaultRecord, Ternary};
///
/// let records = vec![
///     FaultRecord::new(Ternary::Zero, Ternary::Zero, Ternary::DontCare, Ternary::DontCare, "R"),
///     FaultRecord::new(Ternary::Zero, Ternary::DontCare, Ternary::Zero, Ternary::DontCare, "R"),
/// ];
/// let result = minimize(&records).unwrap();
/// // The two seeds merge into 000X, which joins the closure.
/// assert!(result.patterns.iter().any(|p| p.to_string() == "000X"));
/// assert_eq!(result.assignments.len(), 2);
/// ```
pub fn minimize(records: &[FaultRecord]) -> Result<Minimization, CoverageError> {
    let patterns = closure(records.iter().map(|r| Pattern(r.attributes())));

    let mut assignments = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let tuple = record.attributes();
        let assigned = covering_pattern(&patterns, &tuple)
            .ok_or(CoverageError { index, tuple })?;
        assignments.push(assigned);
    }

    Ok(Minimization {
        patterns,
        assignments,
    })
}
