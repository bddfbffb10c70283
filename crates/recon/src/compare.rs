//! The comparator chain: ordered, corruption-tolerant field predicates.
//!
//! Comparators are plain values so a chain rotation is a reindex of the
//! sequence, never a rebuild. All predicates are pure; the same chain is
//! reused for every candidate pair in a run.

use commentdb_core::{CanonicalRecord, ExternalRow};

use crate::normalize::text_equivalent;

/// Shortest clause value the legacy tool's truncation produces. External
/// values at least this long may be a truncated prefix of the canonical.
pub const CLAUSE_TRUNCATION_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Category,
    Clause,
    Page,
    Line,
    Comment,
    ProposedChange,
}

impl Comparator {
    /// Does this record/row pair look like the same real-world item under
    /// this predicate's tolerance rule?
    pub fn accepts(&self, record: &CanonicalRecord, row: &ExternalRow) -> bool {
        match self {
            Self::Category => record.category == row.category.as_deref().unwrap_or(""),
            Self::Clause => {
                clause_equivalent(&record.clause, row.clause.as_deref().unwrap_or(""))
            }
            Self::Page => numeric_equivalent(&record.page, row.page.as_deref().unwrap_or("")),
            Self::Line => numeric_equivalent(&record.line, row.line.as_deref().unwrap_or("")),
            Self::Comment => {
                text_equivalent(&record.comment, row.comment.as_deref().unwrap_or(""))
            }
            Self::ProposedChange => text_equivalent(
                &record.proposed_change,
                row.proposed_change.as_deref().unwrap_or(""),
            ),
        }
    }
}

/// The fixed chain, in matching order.
pub fn default_chain() -> Vec<Comparator> {
    vec![
        Comparator::Category,
        Comparator::Clause,
        Comparator::Page,
        Comparator::Line,
        Comparator::Comment,
        Comparator::ProposedChange,
    ]
}

/// Clause paths survive the legacy tool in three shapes: unchanged,
/// trailing `.0` components stripped, or truncated to a prefix.
pub fn clause_equivalent(canonical: &str, external: &str) -> bool {
    if canonical == external {
        return true;
    }
    if strip_trailing_zero_components(canonical) == external {
        return true;
    }
    external.len() >= CLAUSE_TRUNCATION_LEN
        && canonical.len() > external.len()
        && canonical.starts_with(external)
}

fn strip_trailing_zero_components(clause: &str) -> String {
    let mut parts: Vec<&str> = clause.split('.').collect();
    while parts.len() > 1 && matches!(parts.last(), Some(&"0")) {
        parts.pop();
    }
    parts.join(".")
}

/// Page/line numbers come back as integers; non-numeric canonical values
/// pass through the tool unchanged, so anything matches them.
pub fn numeric_equivalent(canonical: &str, external: &str) -> bool {
    if canonical == external {
        return true;
    }
    let canonical_value: f64 = match canonical.trim().parse() {
        Ok(v) => v,
        // Not numeric at all: the tool preserved it as-is, accept anything
        Err(_) => return true,
    };
    match external.trim().parse::<f64>() {
        Ok(external_value) => canonical_value.round() == external_value,
        Err(_) => false,
    }
}
