//! `commentdb-core` — Shared data model for comment reconciliation.
//!
//! Canonical comment/resolution records, parsed legacy worksheet rows,
//! and the legacy tool's fixed column vocabulary. No logic lives here.

pub mod record;
pub mod row;

pub use record::CanonicalRecord;
pub use row::{ExternalRow, LEGACY_COLUMNS};
