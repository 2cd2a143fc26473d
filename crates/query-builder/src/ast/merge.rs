//! Defines the AST for SQL MERGE statements.

use crate::{
    ast::{
        common::{Field, TableRef},
        expr::Expr,
    },
    error::StateError,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A fully specified MERGE statement.
///
/// Instances are normally produced by
/// [`MergeBuilder::build`](crate::builder::merge::MergeBuilder::build), which
/// validates them. The WHEN clauses are rendered exactly in the order they
/// appear in `when_clauses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub target: TableRef,
    pub source: TableRef,
    pub on: Expr,
    pub when_clauses: Vec<WhenClause>,
}

/// Which side(s) of the target/source join a row appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchingSituation {
    /// Present in both target and source.
    Matched,
    /// Present only in source.
    NotMatched,
    /// Present only in target.
    NotMatchedBySource,
}

impl MatchingSituation {
    pub const ALL: [MatchingSituation; 3] = [
        MatchingSituation::Matched,
        MatchingSituation::NotMatched,
        MatchingSituation::NotMatchedBySource,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            MatchingSituation::Matched => "MATCHED",
            MatchingSituation::NotMatched => "NOT MATCHED",
            MatchingSituation::NotMatchedBySource => "NOT MATCHED BY SOURCE",
        }
    }
}

impl fmt::Display for MatchingSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for MatchingSituation {
    type Err = StateError;

    /// Accepts `MATCHED`, `NOT_MATCHED` and `NOT_MATCHED_BY_SOURCE` in any
    /// case, with words separated by underscores or spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split(|c: char| c == '_' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_");

        match normalized.as_str() {
            "MATCHED" => Ok(MatchingSituation::Matched),
            "NOT_MATCHED" => Ok(MatchingSituation::NotMatched),
            "NOT_MATCHED_BY_SOURCE" => Ok(MatchingSituation::NotMatchedBySource),
            _ => Err(StateError::UnknownSituation(s.to_string())),
        }
    }
}

/// One `WHEN <situation> [AND <condition>] THEN <action>` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    pub situation: MatchingSituation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expr>,
    pub action: MergeAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeAction {
    Delete,
    Update {
        assignments: Vec<MergeAssignment>,
    },
    Insert {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
        values: Vec<Expr>,
    },
}

impl MergeAction {
    pub fn name(&self) -> &'static str {
        match self {
            MergeAction::Delete => "DELETE",
            MergeAction::Update { .. } => "UPDATE",
            MergeAction::Insert { .. } => "INSERT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeAssignment {
    pub field: Field,
    pub value: Expr,
}
