//! Matching strategies: identity-key, perfect, and elimination with
//! chain-order retry.
//!
//! All strategies work over indexes into the two input slices and track
//! claimed rows with a boolean mask, so both collections stay stable for
//! auditing and every outcome is a partial injection by construction.

use std::collections::HashMap;

use commentdb_core::{CanonicalRecord, ExternalRow};

use crate::compare::Comparator;
use crate::error::ReconcileError;
use crate::model::{MatchOutcome, MatchedPair};

/// Match each record to the first unclaimed row whose `CID` parses to the
/// record's sequence number. Duplicate CIDs claim rows in worksheet order.
pub fn match_by_identity(records: &[CanonicalRecord], rows: &[ExternalRow]) -> MatchOutcome {
    let mut by_sequence: HashMap<u32, Vec<usize>> = HashMap::new();
    for (ri, row) in rows.iter().enumerate() {
        if let Some(sequence) = row.sequence_number() {
            by_sequence.entry(sequence).or_default().push(ri);
        }
    }
    // Pop from the front: first unclaimed row wins
    for positions in by_sequence.values_mut() {
        positions.reverse();
    }

    let mut claimed = vec![false; rows.len()];
    let mut pairs = Vec::new();
    let mut unmatched_canonical = Vec::new();

    for (ci, record) in records.iter().enumerate() {
        let claim = by_sequence
            .get_mut(&record.comment_id)
            .and_then(|positions| positions.pop());
        match claim {
            Some(ri) => {
                claimed[ri] = true;
                pairs.push(MatchedPair {
                    canonical: ci,
                    external: ri,
                });
            }
            None => unmatched_canonical.push(ci),
        }
    }

    finish(pairs, unmatched_canonical, &claimed)
}

/// For each record in input order, claim the first unclaimed row that
/// satisfies every comparator in chain order (short-circuit AND).
pub fn match_perfect(
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
    chain: &[Comparator],
) -> MatchOutcome {
    let mut claimed = vec![false; rows.len()];
    let mut pairs = Vec::new();
    let mut unmatched_canonical = Vec::new();

    for (ci, record) in records.iter().enumerate() {
        let found = rows.iter().enumerate().position(|(ri, row)| {
            !claimed[ri] && chain.iter().all(|comparator| comparator.accepts(record, row))
        });
        match found {
            Some(ri) => {
                claimed[ri] = true;
                pairs.push(MatchedPair {
                    canonical: ci,
                    external: ri,
                });
            }
            None => unmatched_canonical.push(ci),
        }
    }

    finish(pairs, unmatched_canonical, &claimed)
}

/// Elimination matching with chain rotation.
///
/// One pass narrows each record's unclaimed candidate set comparator by
/// comparator: a single survivor is the match, zero survivors leaves the
/// record unmatched, several survivors after the whole chain resolve to
/// the lowest row index. A pass that leaves unmatched records triggers a
/// retry with the chain rotated left by one, up to chain-length rotations;
/// the first complete pass wins. When no rotation completes, the last
/// rotation's partial outcome is returned rather than discarding it, since
/// `require_total_match` already keeps partial outcomes from being applied.
pub fn match_by_elimination(
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
    chain: &[Comparator],
) -> Result<MatchOutcome, ReconcileError> {
    if rows.len() < records.len() {
        return Err(ReconcileError::InsufficientRows {
            external: rows.len(),
            canonical: records.len(),
        });
    }

    let rotations = chain.len().max(1);
    let mut last = MatchOutcome {
        pairs: Vec::new(),
        unmatched_canonical: (0..records.len()).collect(),
        unmatched_external: (0..rows.len()).collect(),
    };

    for rotation in 0..rotations {
        let mut order = chain.to_vec();
        // rotation < chain.len() == order.len(), so this never panics
        order.rotate_left(rotation);

        let outcome = eliminate_pass(records, rows, &order);
        let complete = outcome.is_total();
        last = outcome;
        if complete {
            break;
        }
    }

    Ok(last)
}

fn eliminate_pass(
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
    chain: &[Comparator],
) -> MatchOutcome {
    let mut claimed = vec![false; rows.len()];
    let mut pairs = Vec::new();
    let mut unmatched_canonical = Vec::new();

    for (ci, record) in records.iter().enumerate() {
        let mut candidates: Vec<usize> = (0..rows.len()).filter(|ri| !claimed[*ri]).collect();

        let mut found = None;
        for comparator in chain {
            candidates.retain(|&ri| comparator.accepts(record, &rows[ri]));
            match candidates.len() {
                0 => break,
                1 => {
                    found = Some(candidates[0]);
                    break;
                }
                _ => {}
            }
        }
        // Several survivors after the whole chain: lowest row index wins
        if found.is_none() {
            found = candidates.first().copied();
        }

        match found {
            Some(ri) => {
                claimed[ri] = true;
                pairs.push(MatchedPair {
                    canonical: ci,
                    external: ri,
                });
            }
            None => unmatched_canonical.push(ci),
        }
    }

    finish(pairs, unmatched_canonical, &claimed)
}

fn finish(pairs: Vec<MatchedPair>, unmatched_canonical: Vec<usize>, claimed: &[bool]) -> MatchOutcome {
    let unmatched_external = claimed
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(ri, _)| ri)
        .collect();
    MatchOutcome {
        pairs,
        unmatched_canonical,
        unmatched_external,
    }
}
