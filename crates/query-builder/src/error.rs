use crate::builder::merge::BuilderState;
use thiserror::Error;

/// A builder method was called out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("`{call}` is not allowed in state {state}, the builder must be {expected}")]
    OutOfOrder {
        call: &'static str,
        state: BuilderState,
        expected: BuilderState,
    },

    #[error("`set` requires a pending WHEN ... THEN UPDATE clause (builder is {0})")]
    NoPendingUpdate(BuilderState),

    #[error("`columns` requires the most recent WHEN clause to be an INSERT")]
    NoPendingInsert,

    #[error("Insert columns are already declared for WHEN clause #{0}")]
    ColumnsAlreadyDeclared(usize),

    #[error("The ON predicate is already set")]
    OnAlreadySet,

    #[error(
        "Unknown matching situation '{0}', expected MATCHED, NOT_MATCHED or NOT_MATCHED_BY_SOURCE"
    )]
    UnknownSituation(String),
}

/// The statement is structurally incomplete. WHEN clauses are numbered from 1
/// in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("MERGE statement has no target table")]
    MissingTarget,

    #[error("MERGE statement has no source table")]
    MissingSource,

    #[error("MERGE statement has no ON predicate")]
    MissingOnPredicate,

    #[error("WHEN clause #{clause} updates no columns")]
    EmptyAssignments { clause: usize },

    #[error("WHEN clause #{clause} inserts no values")]
    EmptyInsertValues { clause: usize },

    #[error("WHEN clause #{clause} declares {columns} insert column(s) but {values} value(s)")]
    InsertArityMismatch {
        clause: usize,
        columns: usize,
        values: usize,
    },

    #[error("WHEN clause #{clause} assigns {field}, which is not a column of target table {target}")]
    ForeignAssignmentTarget {
        clause: usize,
        field: String,
        target: String,
    },
}

/// An AST node has no valid SQL rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Cannot render non-finite numeric literal {0}")]
    NonFiniteLiteral(String),

    #[error("Identifier must not be empty")]
    EmptyIdentifier,

    #[error("Function call has no name")]
    EmptyFunctionName,

    #[error("Raw SQL fragment is empty")]
    EmptyLiteral,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Builder state error: {0}")]
    State(#[from] StateError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
