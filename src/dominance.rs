//! Dominance engine
//!
//! Record *i* dominates record *j* when *i*'s test conditions subsume *j*'s:
//! on every ternary attribute *j* is either wildcard or equal to *i*, and the
//! operation signatures pass the configured gate. The relation is an
//! asymmetric subsumption test, not a symmetric compatibility test — *i* may
//! be more specific where *j* doesn't care, never the other way around.
//!
//! The batch computation is a plain O(n²) sweep over all ordered pairs. No
//! indexing or early termination: batches are hundreds of records, and the
//! attribute test is four comparisons.

use std::collections::BTreeSet;

use crate::normalize::WILDCARD;
use crate::record::FaultRecord;

/// How the operation-signature gate of the dominance test compares signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureRule {
    /// Strict equality of the normalized signature tokens. This is the active
    /// reference behavior.
    #[default]
    Exact,
    /// Superset containment over the operation letters (`W`, `R`, `I`) found
    /// in each signature, case-insensitive; a wildcard signature is the empty
    /// set. An alternative semantics kept as an explicit option — it is never
    /// applied unless asked for.
    Superset,
}

/// The operation letters the `Superset` rule extracts from a signature.
const OPERATION_LETTERS: [char; 3] = ['W', 'R', 'I'];

fn operation_set(signature: &str) -> BTreeSet<char> {
    if signature == WILDCARD {
        return BTreeSet::new();
    }
    signature
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| OPERATION_LETTERS.contains(c))
        .collect()
}

/// Test whether record `a` dominates record `b` under the given rule.
///
/// # Examples
///
/// ```
/// use faultsift::{dominates, FaultRecord, SignatureRule, Ternary};
///
/// let a = FaultRecord::new(Ternary::Zero, Ternary::Zero, Ternary::Zero, Ternary::Zero, "R");
/// let b = FaultRecord::new(Ternary::Zero, Ternary::DontCare, Ternary::Zero, Ternary::DontCare, "R");
///
/// // a is specific everywhere b is, and the signatures match exactly.
/// assert!(dominates(&a, &b, SignatureRule::Exact));
/// assert!(!dominates(&b, &a, SignatureRule::Exact));
/// ```
pub fn dominates(a: &FaultRecord, b: &FaultRecord, rule: SignatureRule) -> bool {
    for (va, vb) in a.attributes().into_iter().zip(b.attributes()) {
        if !vb.is_wildcard() && va != vb {
            return false;
        }
    }
    match rule {
        SignatureRule::Exact => a.ops == b.ops,
        SignatureRule::Superset => operation_set(&a.ops).is_superset(&operation_set(&b.ops)),
    }
}

/// Mark every record dominated by some other record in the batch.
///
/// All ordered pairs (i, j) with i != j are tested; `records[j].dominated` is
/// set when i dominates j. Self-comparisons are excluded, so a record never
/// dominates itself. Two records with identical attributes and signature
/// dominate each other and both end up marked — which removes both from the
/// minimal set. Defined for any batch, including the empty one.
pub fn compute_dominance(records: &mut [FaultRecord], rule: SignatureRule) {
    for record in records.iter_mut() {
        record.dominated = false;
    }
    for i in 0..records.len() {
        for j in 0..records.len() {
            if i == j || records[j].dominated {
                continue;
            }
            if dominates(&records[i], &records[j], rule) {
                records[j].dominated = true;
            }
        }
    }
}

/// Indices of the minimal diagnostic set: every record not dominated by any
/// other. Call after [`compute_dominance`].
pub fn minimal_indices(records: &[FaultRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.dominated)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Ternary::{DontCare as X, One, Zero};

    fn rec(attrs: [crate::record::Ternary; 4], ops: &str) -> FaultRecord {
        FaultRecord::new(attrs[0], attrs[1], attrs[2], attrs[3], ops)
    }

    #[test]
    fn test_specific_dominates_wildcard() {
        // A = (0,0,0,0, "R"), B = (0,X,0,X, "R"): A passes all four attribute
        // checks against B's wildcards and the signatures are equal.
        let a = rec([Zero, Zero, Zero, Zero], "R");
        let b = rec([Zero, X, Zero, X], "R");
        assert!(dominates(&a, &b, SignatureRule::Exact));
        assert!(!dominates(&b, &a, SignatureRule::Exact));
    }

    #[test]
    fn test_ops_gate_is_load_bearing() {
        // All-wildcard attributes trivially pass the attribute checks, but a
        // differing signature still blocks dominance.
        let all_x = rec([X, X, X, X], "R");
        let concrete = rec([Zero, One, Zero, One], "W");
        assert!(!dominates(&all_x, &concrete, SignatureRule::Exact));

        let same_ops = rec([Zero, One, Zero, One], "R");
        assert!(dominates(&all_x, &same_ops, SignatureRule::Exact));
    }

    #[test]
    fn test_mismatched_concrete_attribute_blocks() {
        let a = rec([Zero, Zero, Zero, Zero], "R");
        let b = rec([One, X, X, X], "R");
        assert!(!dominates(&a, &b, SignatureRule::Exact));
    }

    #[test]
    fn test_identical_records_dominate_each_other() {
        let mut records = vec![rec([Zero, One, X, X], "R"), rec([Zero, One, X, X], "R")];
        compute_dominance(&mut records, SignatureRule::Exact);
        assert!(records[0].dominated);
        assert!(records[1].dominated);
        // The minimal set excludes both; this follows the pairwise algorithm,
        // not an idealized anti-symmetric dominance.
        assert!(minimal_indices(&records).is_empty());
    }

    #[test]
    fn test_no_self_domination() {
        let mut records = vec![rec([Zero, One, Zero, One], "R")];
        compute_dominance(&mut records, SignatureRule::Exact);
        assert!(!records[0].dominated);
        assert_eq!(minimal_indices(&records), vec![0]);
    }

    #[test]
    fn test_empty_batch() {
        let mut records: Vec<FaultRecord> = Vec::new();
        compute_dominance(&mut records, SignatureRule::Exact);
        assert!(minimal_indices(&records).is_empty());
    }

    #[test]
    fn test_flags_are_reset_between_runs() {
        let mut records = vec![rec([Zero, Zero, Zero, Zero], "R"), rec([Zero, X, X, X], "R")];
        compute_dominance(&mut records, SignatureRule::Exact);
        assert!(records[1].dominated);

        // Change the dominated record so nothing subsumes it any more.
        records[1] = rec([One, One, One, One], "W");
        compute_dominance(&mut records, SignatureRule::Exact);
        assert!(!records[1].dominated);
    }

    #[test]
    fn test_superset_rule() {
        let a = rec([Zero, X, X, X], "W1, R0");
        let b = rec([Zero, X, X, X], "R1");
        // {W, R} is a superset of {R}.
        assert!(dominates(&a, &b, SignatureRule::Superset));
        assert!(!dominates(&b, &a, SignatureRule::Superset));
        // The exact rule compares the atomic tokens and fails.
        assert!(!dominates(&a, &b, SignatureRule::Exact));
    }

    #[test]
    fn test_superset_rule_wildcard_is_empty_set() {
        let blank = rec([Zero, X, X, X], "");
        let read = rec([Zero, X, X, X], "R1");
        // Every set contains the empty set.
        assert!(dominates(&read, &blank, SignatureRule::Superset));
        assert!(!dominates(&blank, &read, SignatureRule::Superset));
    }
}
