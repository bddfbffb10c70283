//! CSV import for the legacy worksheet export.

use std::io::Read;
use std::path::Path;

use commentdb_core::ExternalRow;

use crate::columns::ColumnIndex;
use crate::error::SheetError;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, SheetError> {
    let mut file = std::fs::File::open(path).map_err(|e| SheetError::Io(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| SheetError::Io(e.to_string()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Parse CSV text into external rows. The first record must be the legacy
/// header row; worksheet row numbers start at 2 for the first data row.
pub fn parse_csv(content: &str) -> Result<Vec<ExternalRow>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| SheetError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let index = ColumnIndex::resolve(&header)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SheetError::Csv(e.to_string()))?;
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        rows.push(index.row(&fields, i + 2));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentdb_core::LEGACY_COLUMNS;

    fn sheet(body: &str) -> String {
        let header = LEGACY_COLUMNS.join(",");
        format!("{header}\n{body}")
    }

    #[test]
    fn parse_basic_rows() {
        let csv = sheet(
            "101,A. Reviewer,6.3.1,42,5,T,Bad wording,Fix it,,,,,,,,,,\n\
             102,B. Reviewer,7.1,10,1,E,Typo,Correct it,ACCEPTED,,,,,,,,,\n",
        );
        let rows = parse_csv(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[0].cid.as_deref(), Some("101"));
        assert_eq!(rows[0].clause.as_deref(), Some("6.3.1"));
        assert_eq!(rows[1].resolution.as_deref(), Some("ACCEPTED"));
        assert_eq!(rows[1].resn_status, None);
    }

    #[test]
    fn quoted_commas_survive() {
        let csv = sheet("101,,6.3,1,1,T,\"Confusing, and wrong\",Reword,,,,,,,,,,\n");
        let rows = parse_csv(&csv).unwrap();
        assert_eq!(rows[0].comment.as_deref(), Some("Confusing, and wrong"));
    }

    #[test]
    fn header_mismatch_rejected() {
        let err = parse_csv("CID,Commenter\n1,Someone\n").unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn(_)));
    }

    #[test]
    fn windows_1252_bytes_decode() {
        use std::io::Write;

        let header = LEGACY_COLUMNS.join(",");
        let mut bytes = format!("{header}\n").into_bytes();
        // "naïve" with 0xEF = ï in Windows-1252, invalid as UTF-8 here
        bytes.extend_from_slice(b"101,,6.3,1,1,T,na\xefve,Fix,,,,,,,,,,\n");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        let content = read_file_as_utf8(file.path()).unwrap();
        let rows = parse_csv(&content).unwrap();
        assert_eq!(rows[0].comment.as_deref(), Some("na\u{ef}ve"));
    }
}
