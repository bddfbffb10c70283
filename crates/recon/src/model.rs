use commentdb_core::CanonicalRecord;
use serde::Serialize;

use crate::config::{MatcherStrategy, MergePolicy};
use crate::differ::ChangeSet;

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// One matched pair, as indexes into the two input slices. Index-based so
/// both collections stay intact for auditing; claimed rows are tracked by
/// mask, never by removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    pub canonical: usize,
    pub external: usize,
}

/// A partial injection both ways: no canonical index and no external index
/// appears in more than one pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchOutcome {
    pub pairs: Vec<MatchedPair>,
    pub unmatched_canonical: Vec<usize>,
    pub unmatched_external: Vec<usize>,
}

impl MatchOutcome {
    pub fn is_total(&self) -> bool {
        self.unmatched_canonical.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Merge output
// ---------------------------------------------------------------------------

/// Field changes for one existing record, applied by the persistence
/// collaborator as an update-by-id.
#[derive(Debug, Clone, Serialize)]
pub struct RecordUpdate {
    pub record_id: i64,
    pub comment_id: u32,
    pub changes: ChangeSet,
}

/// A brand-new record seeded from an unmatched external row.
#[derive(Debug, Clone, Serialize)]
pub struct RecordInsert {
    /// Audit identity of the originating row.
    pub source: String,
    pub record: CanonicalRecord,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Sequence numbers of matched canonical records.
    pub matched: Vec<u32>,
    /// Sequence numbers of canonical records with no pair.
    pub unmatched_canonical: Vec<u32>,
    /// Identities of external rows with no pair.
    pub unmatched_external: Vec<String>,
    /// Identities of external rows turned into new records.
    pub added_external: Vec<String>,
    /// Records that received at least one changed field.
    pub changed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileMeta {
    pub strategy: MatcherStrategy,
    pub policy: MergePolicy,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResult {
    pub meta: ReconcileMeta,
    pub report: ReconcileReport,
    pub updates: Vec<RecordUpdate>,
    pub inserts: Vec<RecordInsert>,
}
