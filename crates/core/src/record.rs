use serde::{Deserialize, Serialize};

/// One stored comment, optionally joined with one of its resolutions.
///
/// Records are read-only inputs to the reconciliation engine: the engine
/// computes change sets against them but never mutates them itself.
/// Page, line and clause are kept exactly as stored (decimal strings),
/// since the corruption-tolerant comparators work on the written form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Stable store id, used by the persistence collaborator for updates.
    pub record_id: i64,
    /// Externally visible sequence number (the worksheet's `CID`).
    pub comment_id: u32,
    /// Ordinal when a comment carries more than one resolution.
    pub resolution_ordinal: Option<u32>,

    // Placement
    pub category: String,
    pub clause: String,
    pub page: String,
    pub line: String,

    // Content
    pub comment: String,
    pub proposed_change: String,

    // Triage
    pub comment_group: String,
    pub owning_adhoc: String,
    pub adhoc_notes: String,

    // Disposition
    pub assignee: String,
    pub resn_status: String,
    pub resolution: String,
    pub motion_number: String,

    // Editorial
    pub edit_status: String,
    pub edit_notes: String,
    pub edited_in_draft: String,
}
