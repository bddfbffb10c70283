//! Audit report assembly.

use commentdb_core::{CanonicalRecord, ExternalRow};

use crate::model::{MatchOutcome, ReconcileReport, RecordInsert, RecordUpdate};

/// Assemble the caller-facing report from a match outcome and the applied
/// change payloads. Identities are sequence numbers on the canonical side
/// and `CID`-or-row-number on the external side.
pub fn build_report(
    outcome: &MatchOutcome,
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
    updates: &[RecordUpdate],
    inserts: &[RecordInsert],
) -> ReconcileReport {
    ReconcileReport {
        matched: outcome
            .pairs
            .iter()
            .map(|p| records[p.canonical].comment_id)
            .collect(),
        unmatched_canonical: outcome
            .unmatched_canonical
            .iter()
            .map(|&ci| records[ci].comment_id)
            .collect(),
        unmatched_external: outcome
            .unmatched_external
            .iter()
            .map(|&ri| rows[ri].identity())
            .collect(),
        added_external: inserts.iter().map(|i| i.source.clone()).collect(),
        changed: updates.iter().filter(|u| !u.changes.is_empty()).count(),
    }
}
