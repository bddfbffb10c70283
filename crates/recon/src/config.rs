use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

// ---------------------------------------------------------------------------
// Update categories
// ---------------------------------------------------------------------------

/// Closed set of selectable change groups. Tokens are the caller-facing
/// names; `placementAndContent` re-evaluates content whenever placement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateCategory {
    Identity,
    PlacementAndContent,
    TriageGroup,
    AdHocOwner,
    Notes,
    Assignee,
    Disposition,
    Editorial,
}

impl UpdateCategory {
    pub const ALL: [UpdateCategory; 8] = [
        Self::Identity,
        Self::PlacementAndContent,
        Self::TriageGroup,
        Self::AdHocOwner,
        Self::Notes,
        Self::Assignee,
        Self::Disposition,
        Self::Editorial,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::PlacementAndContent => "placementAndContent",
            Self::TriageGroup => "triageGroup",
            Self::AdHocOwner => "adHocOwner",
            Self::Notes => "notes",
            Self::Assignee => "assignee",
            Self::Disposition => "disposition",
            Self::Editorial => "editorial",
        }
    }
}

impl fmt::Display for UpdateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for UpdateCategory {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.token() == s)
            .copied()
            .ok_or_else(|| ReconcileError::UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Merge policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Any unmatched canonical record means no changes are produced at all.
    /// Intended for bulk reconciliation where partial merges are unsafe.
    RequireTotalMatch,
    /// Diff every matched pair; leftovers are reported but untouched.
    ApplyPartial,
    /// Matched pairs are reported but unchanged; every unmatched external
    /// row seeds a brand-new record.
    InsertUnmatchedOnly,
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequireTotalMatch => write!(f, "require_total_match"),
            Self::ApplyPartial => write!(f, "apply_partial"),
            Self::InsertUnmatchedOnly => write!(f, "insert_unmatched_only"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require_total_match" => Ok(Self::RequireTotalMatch),
            "apply_partial" => Ok(Self::ApplyPartial),
            "insert_unmatched_only" => Ok(Self::InsertUnmatchedOnly),
            _ => Err(ReconcileError::UnknownPolicy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Matcher strategy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherStrategy {
    /// Match on the parsed `CID` sequence number.
    ByIdentity,
    /// First unclaimed row satisfying every comparator.
    Perfect,
    /// Narrow candidates comparator-by-comparator, with chain rotation.
    ByElimination,
}

impl fmt::Display for MatcherStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIdentity => write!(f, "by_identity"),
            Self::Perfect => write!(f, "perfect"),
            Self::ByElimination => write!(f, "by_elimination"),
        }
    }
}

impl FromStr for MatcherStrategy {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_identity" => Ok(Self::ByIdentity),
            "perfect" => Ok(Self::Perfect),
            "by_elimination" => Ok(Self::ByElimination),
            _ => Err(ReconcileError::UnknownStrategy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub strategy: MatcherStrategy,
    pub policy: MergePolicy,
    pub categories: Vec<UpdateCategory>,
}

/// Raw TOML shape; tokens are validated through `FromStr` so bad input
/// produces the precise unknown-token error rather than a serde message.
#[derive(Deserialize)]
struct OptionsDoc {
    strategy: String,
    policy: String,
    #[serde(default)]
    categories: Option<Vec<String>>,
}

impl ReconcileOptions {
    /// All categories selected.
    pub fn new(strategy: MatcherStrategy, policy: MergePolicy) -> Self {
        Self {
            strategy,
            policy,
            categories: UpdateCategory::ALL.to_vec(),
        }
    }

    pub fn with_categories(mut self, categories: &[UpdateCategory]) -> Self {
        self.categories = categories.to_vec();
        self
    }

    pub fn from_toml(input: &str) -> Result<Self, ReconcileError> {
        let doc: OptionsDoc =
            toml::from_str(input).map_err(|e| ReconcileError::ConfigParse(e.to_string()))?;

        let strategy = doc.strategy.parse()?;
        let policy = doc.policy.parse()?;
        let categories = match doc.categories {
            // Omitted selects everything
            None => UpdateCategory::ALL.to_vec(),
            Some(tokens) => tokens
                .iter()
                .map(|t| t.parse())
                .collect::<Result<Vec<_>, _>>()?,
        };

        let options = Self {
            strategy,
            policy,
            categories,
        };
        options.validate()?;
        Ok(options)
    }

    /// Reject invalid strategy/policy combinations.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        // Elimination hunts for a total correspondence; its partial results
        // are not meaningful in isolation.
        if self.policy == MergePolicy::ApplyPartial
            && self.strategy == MatcherStrategy::ByElimination
        {
            return Err(ReconcileError::PolicyConflict {
                policy: self.policy,
                strategy: self.strategy,
            });
        }
        Ok(())
    }

    /// Selected categories with duplicates removed, first occurrence wins.
    pub fn selected(&self) -> Vec<UpdateCategory> {
        let mut seen = Vec::new();
        for c in &self.categories {
            if !seen.contains(c) {
                seen.push(*c);
            }
        }
        seen
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_options() {
        let options = ReconcileOptions::from_toml(
            r#"
strategy = "by_elimination"
policy = "require_total_match"
categories = ["disposition", "assignee"]
"#,
        )
        .unwrap();
        assert_eq!(options.strategy, MatcherStrategy::ByElimination);
        assert_eq!(options.policy, MergePolicy::RequireTotalMatch);
        assert_eq!(
            options.categories,
            vec![UpdateCategory::Disposition, UpdateCategory::Assignee]
        );
    }

    #[test]
    fn omitted_categories_select_all() {
        let options = ReconcileOptions::from_toml(
            r#"
strategy = "perfect"
policy = "apply_partial"
"#,
        )
        .unwrap();
        assert_eq!(options.categories.len(), UpdateCategory::ALL.len());
    }

    #[test]
    fn unknown_category_names_the_token() {
        let err = ReconcileOptions::from_toml(
            r#"
strategy = "perfect"
policy = "apply_partial"
categories = ["placement"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReconcileError::UnknownCategory(t) if t == "placement"));
    }

    #[test]
    fn unknown_policy_and_strategy_rejected() {
        let err = "settle".parse::<MergePolicy>().unwrap_err();
        assert!(err.to_string().contains("settle"));
        let err = "fuzzy".parse::<MatcherStrategy>().unwrap_err();
        assert!(err.to_string().contains("fuzzy"));
    }

    #[test]
    fn partial_apply_with_elimination_rejected() {
        let err = ReconcileOptions::from_toml(
            r#"
strategy = "by_elimination"
policy = "apply_partial"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReconcileError::PolicyConflict { .. }));
    }

    #[test]
    fn duplicate_categories_deduplicated() {
        let options = ReconcileOptions::new(MatcherStrategy::Perfect, MergePolicy::ApplyPartial)
            .with_categories(&[
                UpdateCategory::Notes,
                UpdateCategory::Assignee,
                UpdateCategory::Notes,
            ]);
        assert_eq!(
            options.selected(),
            vec![UpdateCategory::Notes, UpdateCategory::Assignee]
        );
    }

    #[test]
    fn category_tokens_round_trip() {
        for c in UpdateCategory::ALL {
            assert_eq!(c.token().parse::<UpdateCategory>().unwrap(), c);
        }
        assert_eq!(
            "adHocOwner".parse::<UpdateCategory>().unwrap(),
            UpdateCategory::AdHocOwner
        );
    }
}
