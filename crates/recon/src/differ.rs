//! Category-scoped field diffing between a canonical record and its
//! matched external row.
//!
//! A field enters the change set only when its category was selected and
//! its normalized external value genuinely differs from the canonical
//! value: corruption-equivalent values (rounded pages, truncated clauses,
//! mojibake text) are not changes.

use commentdb_core::{CanonicalRecord, ExternalRow};
use serde::Serialize;

use crate::compare::{clause_equivalent, numeric_equivalent};
use crate::config::UpdateCategory;
use crate::normalize::text_equivalent;
use crate::status;

/// Sparse field-level change map. `None` means "leave the field alone";
/// `Some` carries the new value, including an explicit empty string when
/// an emptied cell clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owning_adhoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adhoc_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resn_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_in_draft: Option<String>,
}

impl ChangeSet {
    pub fn field_count(&self) -> usize {
        self.comment_id.is_some() as usize
            + self.clause.is_some() as usize
            + self.page.is_some() as usize
            + self.comment.is_some() as usize
            + self.proposed_change.is_some() as usize
            + self.comment_group.is_some() as usize
            + self.owning_adhoc.is_some() as usize
            + self.adhoc_notes.is_some() as usize
            + self.assignee.is_some() as usize
            + self.resn_status.is_some() as usize
            + self.resolution.is_some() as usize
            + self.motion_number.is_some() as usize
            + self.edit_status.is_some() as usize
            + self.edit_notes.is_some() as usize
            + self.edited_in_draft.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Write the set fields onto a record. The persistence collaborator
    /// uses this to apply an update-by-id; idempotence tests use it to
    /// check that an applied pair satisfies the full comparator chain.
    pub fn apply_to(&self, record: &mut CanonicalRecord) {
        if let Some(v) = self.comment_id {
            record.comment_id = v;
        }
        if let Some(v) = &self.clause {
            record.clause = v.clone();
        }
        if let Some(v) = self.page {
            record.page = format_decimal(v);
        }
        if let Some(v) = &self.comment {
            record.comment = v.clone();
        }
        if let Some(v) = &self.proposed_change {
            record.proposed_change = v.clone();
        }
        if let Some(v) = &self.comment_group {
            record.comment_group = v.clone();
        }
        if let Some(v) = &self.owning_adhoc {
            record.owning_adhoc = v.clone();
        }
        if let Some(v) = &self.adhoc_notes {
            record.adhoc_notes = v.clone();
        }
        if let Some(v) = &self.assignee {
            record.assignee = v.clone();
        }
        if let Some(v) = &self.resn_status {
            record.resn_status = v.clone();
        }
        if let Some(v) = &self.resolution {
            record.resolution = v.clone();
        }
        if let Some(v) = &self.motion_number {
            record.motion_number = v.clone();
        }
        if let Some(v) = &self.edit_status {
            record.edit_status = v.clone();
        }
        if let Some(v) = &self.edit_notes {
            record.edit_notes = v.clone();
        }
        if let Some(v) = &self.edited_in_draft {
            record.edited_in_draft = v.clone();
        }
    }
}

/// Compute the change set for one matched pair, restricted to the
/// selected categories. Non-selected categories are never inspected.
pub fn diff_pair(
    record: &CanonicalRecord,
    row: &ExternalRow,
    categories: &[UpdateCategory],
) -> ChangeSet {
    let mut changes = ChangeSet::default();
    let cell = |v: &Option<String>| -> String { v.as_deref().unwrap_or("").to_string() };

    for category in categories {
        match category {
            UpdateCategory::Identity => {
                if let Some(sequence) = row.sequence_number() {
                    if sequence != record.comment_id {
                        changes.comment_id = Some(sequence);
                    }
                }
            }
            UpdateCategory::PlacementAndContent => {
                let clause = cell(&row.clause);
                if !clause_equivalent(&record.clause, &clause) {
                    changes.clause = Some(clause);
                }
                let page = cell(&row.page);
                if !numeric_equivalent(&record.page, &page) {
                    changes.page = Some(parse_decimal(&page));
                }
                // Content rides along with placement
                let comment = cell(&row.comment);
                if !text_equivalent(&record.comment, &comment) {
                    changes.comment = Some(comment);
                }
                let proposed = cell(&row.proposed_change);
                if !text_equivalent(&record.proposed_change, &proposed) {
                    changes.proposed_change = Some(proposed);
                }
            }
            UpdateCategory::TriageGroup => {
                let group = cell(&row.comment_group);
                if group != record.comment_group {
                    changes.comment_group = Some(group);
                }
            }
            UpdateCategory::AdHocOwner => {
                let owner = cell(&row.owning_adhoc);
                if owner != record.owning_adhoc {
                    changes.owning_adhoc = Some(owner);
                }
            }
            UpdateCategory::Notes => {
                let notes = cell(&row.adhoc_notes);
                if notes != record.adhoc_notes {
                    changes.adhoc_notes = Some(notes);
                }
            }
            UpdateCategory::Assignee => {
                let assignee = cell(&row.assignee);
                if assignee != record.assignee {
                    changes.assignee = Some(assignee);
                }
            }
            UpdateCategory::Disposition => {
                diff_disposition(record, row, &mut changes);
            }
            UpdateCategory::Editorial => {
                let edit_status = cell(&row.edit_status);
                if edit_status != record.edit_status {
                    changes.edit_status = Some(edit_status);
                }
                let edit_notes = cell(&row.edit_notes);
                if edit_notes != record.edit_notes {
                    changes.edit_notes = Some(edit_notes);
                }
                let draft = cell(&row.edited_in_draft);
                if draft != record.edited_in_draft {
                    changes.edited_in_draft = Some(draft);
                }
            }
        }
    }

    changes
}

/// The resolution body may carry its own status as a leading keyword;
/// otherwise the separate status column is taken verbatim.
fn diff_disposition(record: &CanonicalRecord, row: &ExternalRow, changes: &mut ChangeSet) {
    let body_cell = row.resolution.as_deref().unwrap_or("");
    match status::split_status_prefix(body_cell) {
        Some((code, body)) => {
            if body != record.resolution {
                changes.resolution = Some(body);
            }
            if code != record.resn_status {
                changes.resn_status = Some(code.to_string());
            }
        }
        None => {
            let body = body_cell.trim();
            if body != record.resolution {
                changes.resolution = Some(body.to_string());
            }
            let code = row.resn_status.as_deref().unwrap_or("");
            if code != record.resn_status {
                changes.resn_status = Some(code.to_string());
            }
        }
    }

    let motion = row.motion_number.as_deref().unwrap_or("");
    if motion != record.motion_number {
        changes.motion_number = Some(motion.to_string());
    }
}

/// Seed a brand-new record from an unmatched external row: identity,
/// placement and content come straight from the row, then the selected
/// category derivations run against the empty baseline.
pub fn derive_new_record(row: &ExternalRow, categories: &[UpdateCategory]) -> CanonicalRecord {
    let cell = |v: &Option<String>| -> String { v.as_deref().unwrap_or("").to_string() };

    let mut record = CanonicalRecord {
        comment_id: row.sequence_number().unwrap_or(0),
        category: cell(&row.category),
        clause: cell(&row.clause),
        page: cell(&row.page),
        line: cell(&row.line),
        comment: cell(&row.comment),
        proposed_change: cell(&row.proposed_change),
        ..Default::default()
    };

    let derived = diff_pair(&CanonicalRecord::default(), row, categories);
    derived.apply_to(&mut record);
    record
}

/// Decimal parse with the legacy default: unparsable becomes zero.
pub fn parse_decimal(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpdateCategory as C;

    fn record() -> CanonicalRecord {
        CanonicalRecord {
            record_id: 9,
            comment_id: 101,
            category: "T".into(),
            clause: "6.3.1.10".into(),
            page: "42.00".into(),
            line: "5".into(),
            comment: "The wording is ambiguous".into(),
            proposed_change: "Reword the sentence".into(),
            comment_group: "PHY".into(),
            owning_adhoc: "Ad-hoc A".into(),
            adhoc_notes: "".into(),
            assignee: "A. Editor".into(),
            resn_status: "".into(),
            resolution: "".into(),
            motion_number: "".into(),
            edit_status: "".into(),
            edit_notes: "".into(),
            edited_in_draft: "".into(),
            ..Default::default()
        }
    }

    fn row() -> ExternalRow {
        ExternalRow {
            row: 2,
            cid: Some("101".into()),
            category: Some("T".into()),
            clause: Some("6.3.1.1".into()),
            page: Some("42".into()),
            line: Some("5".into()),
            comment: Some("The wording is ambiguous".into()),
            proposed_change: Some("Reword the sentence".into()),
            ..Default::default()
        }
    }

    #[test]
    fn corruption_equivalent_placement_is_not_a_change() {
        let changes = diff_pair(&record(), &row(), &[C::PlacementAndContent]);
        assert!(changes.is_empty());
    }

    #[test]
    fn genuine_placement_edit_is_a_change() {
        let mut ext = row();
        ext.clause = Some("6.4".into());
        ext.page = Some("17".into());
        let changes = diff_pair(&record(), &ext, &[C::PlacementAndContent]);
        assert_eq!(changes.clause.as_deref(), Some("6.4"));
        assert_eq!(changes.page, Some(17.0));
    }

    #[test]
    fn unparsable_page_defaults_to_zero() {
        let mut ext = row();
        ext.page = Some("??".into());
        let mut rec = record();
        rec.page = "42".into();
        let changes = diff_pair(&rec, &ext, &[C::PlacementAndContent]);
        assert_eq!(changes.page, Some(0.0));
    }

    #[test]
    fn unselected_categories_never_inspected() {
        let mut ext = row();
        ext.assignee = Some("B. Editor".into());
        ext.comment_group = Some("MAC".into());
        let changes = diff_pair(&record(), &ext, &[C::Notes]);
        assert!(changes.assignee.is_none());
        assert!(changes.comment_group.is_none());
        assert!(changes.is_empty());
    }

    #[test]
    fn emptied_cell_clears_the_field() {
        let ext = row(); // comment_group cell absent
        let changes = diff_pair(&record(), &ext, &[C::TriageGroup]);
        assert_eq!(changes.comment_group.as_deref(), Some(""));
    }

    #[test]
    fn disposition_keyword_derives_status_and_body() {
        let mut ext = row();
        ext.resolution = Some("ACCEPTED - fix typo".into());
        let changes = diff_pair(&record(), &ext, &[C::Disposition]);
        assert_eq!(changes.resn_status.as_deref(), Some("accepted"));
        assert_eq!(changes.resolution.as_deref(), Some("fix typo"));
    }

    #[test]
    fn disposition_without_keyword_uses_status_column() {
        let mut ext = row();
        ext.resolution = Some("  See motion 42.  ".into());
        ext.resn_status = Some("V".into());
        ext.motion_number = Some("42".into());
        let changes = diff_pair(&record(), &ext, &[C::Disposition]);
        assert_eq!(changes.resolution.as_deref(), Some("See motion 42."));
        assert_eq!(changes.resn_status.as_deref(), Some("V"));
        assert_eq!(changes.motion_number.as_deref(), Some("42"));
    }

    #[test]
    fn identity_change_from_cid() {
        let mut ext = row();
        ext.cid = Some("205".into());
        let changes = diff_pair(&record(), &ext, &[C::Identity]);
        assert_eq!(changes.comment_id, Some(205));

        // Same sequence number, even float-mangled, is no change
        ext.cid = Some("101.0".into());
        let changes = diff_pair(&record(), &ext, &[C::Identity]);
        assert!(changes.is_empty());
    }

    #[test]
    fn apply_to_round_trips() {
        let mut ext = row();
        ext.assignee = Some("B. Editor".into());
        ext.resolution = Some("REVISED: use shall".into());
        let changes = diff_pair(&record(), &ext, &[C::Assignee, C::Disposition]);

        let mut rec = record();
        changes.apply_to(&mut rec);
        assert_eq!(rec.assignee, "B. Editor");
        assert_eq!(rec.resn_status, "revised");
        assert_eq!(rec.resolution, "use shall");

        // Re-diffing the applied record yields nothing
        let again = diff_pair(&rec, &ext, &[C::Assignee, C::Disposition]);
        assert!(again.is_empty());
    }

    #[test]
    fn new_record_from_row() {
        let mut ext = row();
        ext.resolution = Some("REJECTED - out of scope".into());
        ext.assignee = Some("C. Editor".into());
        let record = derive_new_record(&ext, &[C::Disposition, C::Assignee]);
        assert_eq!(record.comment_id, 101);
        assert_eq!(record.category, "T");
        assert_eq!(record.clause, "6.3.1.1");
        assert_eq!(record.comment, "The wording is ambiguous");
        assert_eq!(record.resn_status, "rejected");
        assert_eq!(record.resolution, "out of scope");
        assert_eq!(record.assignee, "C. Editor");
        assert_eq!(record.record_id, 0);
    }
}
