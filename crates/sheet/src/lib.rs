//! `commentdb-sheet` — Legacy worksheet import.
//!
//! Turns the legacy tool's re-imported spreadsheet (CSV export or the
//! workbook itself) into typed [`ExternalRow`]s for the reconciliation
//! engine. Header validation against the fixed column vocabulary happens
//! here; the engine never sees a string-keyed map.

pub mod columns;
pub mod csv;
pub mod error;
pub mod xlsx;

pub use commentdb_core::ExternalRow;
pub use crate::csv::{parse_csv, read_file_as_utf8};
pub use error::SheetError;
pub use xlsx::{import_workbook, import_worksheet, COMMENTS_WORKSHEET};
