//! Excel import for the legacy workbook.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use commentdb_core::ExternalRow;

use crate::columns::ColumnIndex;
use crate::error::SheetError;

/// The fixed worksheet the legacy tool writes comment rows to.
pub const COMMENTS_WORKSHEET: &str = "Comments";

/// Import the fixed comments worksheet from an Excel file.
pub fn import_workbook(path: &Path) -> Result<Vec<ExternalRow>, SheetError> {
    import_worksheet(path, COMMENTS_WORKSHEET)
}

/// Import a named worksheet from an Excel file (xlsx, xls, ods).
pub fn import_worksheet(path: &Path, sheet_name: &str) -> Result<Vec<ExternalRow>, SheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Workbook(e.to_string()))?;

    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(SheetError::MissingWorksheet(sheet_name.to_string()));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    let mut row_iter = range.rows();
    let header: Vec<String> = match row_iter.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => Vec::new(),
    };
    let index = ColumnIndex::resolve(&header)?;

    let mut rows = Vec::new();
    for (i, cells) in row_iter.enumerate() {
        let fields: Vec<String> = cells.iter().map(cell_text).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(index.row(&fields, i + 2));
    }
    Ok(rows)
}

/// Cell text as the legacy tool displays it: whole floats lose their
/// fractional part, since the tool stores numeric cells as floats.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_formats_whole_floats_as_integers() {
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Float(42.5)), "42.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String("6.3.1".into())), "6.3.1");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn missing_file_is_a_workbook_error() {
        let err = import_workbook(Path::new("/nonexistent/ballot.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::Workbook(_)));
    }
}
