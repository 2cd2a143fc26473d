//! JSON description of a MERGE statement, as read by the CLI.

use crate::error::CliError;
use query_builder::{
    ast::{
        common::{Field, TableRef},
        expr::Expr,
        merge::MatchingSituation,
    },
    builder::merge::MergeBuilder,
    error::QueryError,
    merge,
    renderer::RenderConfig,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementFile {
    pub target: TableRef,
    pub source: TableRef,
    pub on: Expr,
    #[serde(default)]
    pub when: Vec<WhenSpec>,
    #[serde(default)]
    pub settings: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WhenSpec {
    Delete {
        situation: String,
        #[serde(default)]
        and: Option<Expr>,
    },
    Update {
        situation: String,
        #[serde(default)]
        and: Option<Expr>,
        set: Vec<AssignmentSpec>,
    },
    Insert {
        values: Vec<Expr>,
        #[serde(default)]
        columns: Option<Vec<String>>,
        #[serde(default)]
        when: Option<Expr>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSpec {
    pub field: Field,
    pub value: Expr,
}

impl StatementFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let statement: StatementFile = serde_json::from_str(&source)?;
        debug!(
            "Loaded statement file {} with {} WHEN clause(s)",
            path.display(),
            statement.when.len()
        );
        Ok(statement)
    }

    /// Replays the file through the builder, so misuse surfaces as the same
    /// `StateError` a library caller would see.
    pub fn into_builder(self) -> Result<MergeBuilder, QueryError> {
        let mut builder = merge(self.target).using(self.source)?.on(self.on)?;

        for spec in self.when {
            builder = match spec {
                WhenSpec::Delete { situation, and } => {
                    builder.delete(MatchingSituation::from_str(&situation)?, and)?
                }
                WhenSpec::Update {
                    situation,
                    and,
                    set,
                } => {
                    let mut builder = builder.update(MatchingSituation::from_str(&situation)?, and)?;
                    for assignment in set {
                        builder = builder.set(assignment.field, assignment.value)?;
                    }
                    builder
                }
                WhenSpec::Insert {
                    values,
                    columns,
                    when,
                } => {
                    let builder = builder.insert_unmatched_source(values, when)?;
                    match columns {
                        Some(columns) => {
                            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
                            builder.columns(&names)?
                        }
                        None => builder,
                    }
                }
            };
        }

        Ok(builder)
    }
}
