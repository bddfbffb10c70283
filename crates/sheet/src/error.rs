use std::fmt;

#[derive(Debug)]
pub enum SheetError {
    /// IO error (file read, etc.).
    Io(String),
    /// CSV parse error.
    Csv(String),
    /// Workbook could not be opened or read.
    Workbook(String),
    /// The fixed worksheet is not present in the workbook.
    MissingWorksheet(String),
    /// The header row lacks a required legacy column.
    MissingColumn(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Workbook(msg) => write!(f, "workbook error: {msg}"),
            Self::MissingWorksheet(name) => write!(f, "worksheet '{name}' not found"),
            Self::MissingColumn(column) => write!(f, "missing column '{column}'"),
        }
    }
}

impl std::error::Error for SheetError {}
