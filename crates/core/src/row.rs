use serde::{Deserialize, Serialize};

/// The legacy tool's fixed worksheet vocabulary, in column order.
/// A header row that does not contain every one of these is a parse
/// error in `commentdb-sheet`, never a lookup miss inside the engine.
pub const LEGACY_COLUMNS: [&str; 18] = [
    "CID",
    "Commenter",
    "Clause Number(C)",
    "Page(C)",
    "Line(C)",
    "Type of Comment",
    "Comment",
    "Proposed Change",
    "Resolution",
    "Resn Status",
    "Motion Number",
    "Assignee",
    "Comment Group",
    "Owning Ad-hoc",
    "Ad-hoc Notes",
    "Edit Status",
    "Edit Notes",
    "Edited in Draft",
];

/// One parsed row from the re-imported legacy worksheet.
///
/// Closed column set: one optional field per known legacy column, `None`
/// for an empty cell. Rows are immutable inputs; the worksheet row number
/// is kept so unmatched rows stay identifiable in the audit report even
/// when the `CID` cell is blank or mangled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalRow {
    /// 1-based worksheet row number (header row is 1).
    pub row: usize,

    pub cid: Option<String>,
    pub commenter: Option<String>,
    pub clause: Option<String>,
    pub page: Option<String>,
    pub line: Option<String>,
    pub category: Option<String>,
    pub comment: Option<String>,
    pub proposed_change: Option<String>,
    pub resolution: Option<String>,
    pub resn_status: Option<String>,
    pub motion_number: Option<String>,
    pub assignee: Option<String>,
    pub comment_group: Option<String>,
    pub owning_adhoc: Option<String>,
    pub adhoc_notes: Option<String>,
    pub edit_status: Option<String>,
    pub edit_notes: Option<String>,
    pub edited_in_draft: Option<String>,
}

impl ExternalRow {
    /// Audit identity: the `CID` cell when present, else the row number.
    pub fn identity(&self) -> String {
        match self.cid.as_deref().map(str::trim) {
            Some(cid) if !cid.is_empty() => cid.to_string(),
            _ => format!("row {}", self.row),
        }
    }

    /// Sequence number parsed from `CID`. The legacy tool stores numbers
    /// as floats, so `"123.0"` rounds back to `123`.
    pub fn sequence_number(&self) -> Option<u32> {
        let cid = self.cid.as_deref()?.trim();
        if let Ok(n) = cid.parse::<u32>() {
            return Some(n);
        }
        let f = cid.parse::<f64>().ok()?;
        if f.is_finite() && f >= 0.0 {
            Some(f.round() as u32)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_cid() {
        let row = ExternalRow {
            row: 7,
            cid: Some("1042".into()),
            ..Default::default()
        };
        assert_eq!(row.identity(), "1042");
    }

    #[test]
    fn identity_falls_back_to_row_number() {
        let row = ExternalRow {
            row: 7,
            cid: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(row.identity(), "row 7");
    }

    #[test]
    fn sequence_number_tolerates_float_mangling() {
        let mut row = ExternalRow {
            cid: Some("123".into()),
            ..Default::default()
        };
        assert_eq!(row.sequence_number(), Some(123));

        row.cid = Some("123.0".into());
        assert_eq!(row.sequence_number(), Some(123));

        row.cid = Some("not a number".into());
        assert_eq!(row.sequence_number(), None);
    }
}
