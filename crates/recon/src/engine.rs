//! Engine orchestration: validate options, match, resolve the merge
//! policy, assemble the result.

use commentdb_core::{CanonicalRecord, ExternalRow};

use crate::compare;
use crate::config::{MatcherStrategy, MergePolicy, ReconcileOptions};
use crate::differ;
use crate::error::ReconcileError;
use crate::matcher;
use crate::model::{MatchOutcome, ReconcileMeta, ReconcileResult, RecordInsert, RecordUpdate};
use crate::report::build_report;

/// Run one reconciliation. Pure apart from the report timestamp: the same
/// records, rows and options always produce the same matching and changes.
pub fn run(
    options: &ReconcileOptions,
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
) -> Result<ReconcileResult, ReconcileError> {
    options.validate()?;
    let categories = options.selected();
    let chain = compare::default_chain();

    let outcome = match options.strategy {
        MatcherStrategy::ByIdentity => matcher::match_by_identity(records, rows),
        MatcherStrategy::Perfect => matcher::match_perfect(records, rows, &chain),
        MatcherStrategy::ByElimination => matcher::match_by_elimination(records, rows, &chain)?,
    };

    let mut updates = Vec::new();
    let mut inserts = Vec::new();

    match options.policy {
        MergePolicy::RequireTotalMatch => {
            // Partial correspondence is not an error: the report carries
            // the unmatched identifiers and nothing is applied
            if outcome.is_total() {
                updates = diff_matched(&outcome, records, rows, &categories);
            }
        }
        MergePolicy::ApplyPartial => {
            updates = diff_matched(&outcome, records, rows, &categories);
        }
        MergePolicy::InsertUnmatchedOnly => {
            for &ri in &outcome.unmatched_external {
                let row = &rows[ri];
                inserts.push(RecordInsert {
                    source: row.identity(),
                    record: differ::derive_new_record(row, &categories),
                });
            }
        }
    }

    let report = build_report(&outcome, records, rows, &updates, &inserts);

    Ok(ReconcileResult {
        meta: ReconcileMeta {
            strategy: options.strategy,
            policy: options.policy,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        report,
        updates,
        inserts,
    })
}

/// Diff every matched pair; pairs with nothing to change produce no
/// update payload.
fn diff_matched(
    outcome: &MatchOutcome,
    records: &[CanonicalRecord],
    rows: &[ExternalRow],
    categories: &[crate::config::UpdateCategory],
) -> Vec<RecordUpdate> {
    let mut updates = Vec::new();
    for pair in &outcome.pairs {
        let record = &records[pair.canonical];
        let changes = differ::diff_pair(record, &rows[pair.external], categories);
        if changes.is_empty() {
            continue;
        }
        updates.push(RecordUpdate {
            record_id: record.record_id,
            comment_id: record.comment_id,
            changes,
        });
    }
    updates
}
