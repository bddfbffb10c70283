use std::fmt;

use crate::config::{MatcherStrategy, MergePolicy};

#[derive(Debug)]
pub enum ReconcileError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Unknown update-category token.
    UnknownCategory(String),
    /// Unknown merge-policy token.
    UnknownPolicy(String),
    /// Unknown matcher-strategy token.
    UnknownStrategy(String),
    /// Policy and strategy cannot be combined.
    PolicyConflict {
        policy: MergePolicy,
        strategy: MatcherStrategy,
    },
    /// Elimination needs at least as many external rows as canonical records.
    InsufficientRows { external: usize, canonical: usize },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "options parse error: {msg}"),
            Self::UnknownCategory(token) => write!(f, "unknown update category: '{token}'"),
            Self::UnknownPolicy(token) => write!(f, "unknown merge policy: '{token}'"),
            Self::UnknownStrategy(token) => write!(f, "unknown matcher strategy: '{token}'"),
            Self::PolicyConflict { policy, strategy } => {
                write!(f, "policy '{policy}' cannot be combined with strategy '{strategy}'")
            }
            Self::InsufficientRows { external, canonical } => {
                write!(
                    f,
                    "elimination needs at least as many external rows as canonical records \
                     ({external} external, {canonical} canonical)"
                )
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
