//! `commentdb-recon` — Corruption-tolerant reconciliation and merge engine.
//!
//! Pure engine crate: receives canonical records and parsed worksheet rows,
//! returns a match outcome, change sets, and an audit report. No IO.
//!
//! The legacy spreadsheet tool mangles data in predictable ways (mojibake,
//! integer rounding, clause truncation), so matching is done through an
//! ordered chain of tolerant comparators rather than by exact keys.

pub mod compare;
pub mod config;
pub mod differ;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod report;
pub mod status;

pub use config::{MatcherStrategy, MergePolicy, ReconcileOptions, UpdateCategory};
pub use differ::ChangeSet;
pub use engine::run;
pub use error::ReconcileError;
pub use model::{MatchOutcome, ReconcileReport, ReconcileResult};
