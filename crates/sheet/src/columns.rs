//! Header resolution against the fixed legacy column vocabulary.

use commentdb_core::{ExternalRow, LEGACY_COLUMNS};

use crate::error::SheetError;

/// Column indexes resolved from a header row. Every legacy column must be
/// present; extra columns are ignored.
#[derive(Debug)]
pub struct ColumnIndex {
    idx: [usize; LEGACY_COLUMNS.len()],
}

impl ColumnIndex {
    pub fn resolve(header: &[String]) -> Result<Self, SheetError> {
        let mut idx = [0usize; LEGACY_COLUMNS.len()];
        for (slot, name) in LEGACY_COLUMNS.iter().enumerate() {
            idx[slot] = header
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| SheetError::MissingColumn((*name).to_string()))?;
        }
        Ok(Self { idx })
    }

    /// Build one row. `row_number` is the 1-based worksheet row.
    /// Empty cells become `None`; short records read as empty.
    pub fn row(&self, record: &[String], row_number: usize) -> ExternalRow {
        let cell = |slot: usize| -> Option<String> {
            let value = record.get(self.idx[slot]).map(String::as_str).unwrap_or("");
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        ExternalRow {
            row: row_number,
            cid: cell(0),
            commenter: cell(1),
            clause: cell(2),
            page: cell(3),
            line: cell(4),
            category: cell(5),
            comment: cell(6),
            proposed_change: cell(7),
            resolution: cell(8),
            resn_status: cell(9),
            motion_number: cell(10),
            assignee: cell(11),
            comment_group: cell(12),
            owning_adhoc: cell(13),
            adhoc_notes: cell(14),
            edit_status: cell(15),
            edit_notes: cell(16),
            edited_in_draft: cell(17),
        }
    }
}
