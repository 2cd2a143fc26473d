//! Provides a fluent builder for constructing `Merge` ASTs.
//!
//! The builder tracks an explicit [`BuilderState`] and rejects calls made
//! out of order with a [`StateError`]:
//!
//! ```text
//! Init --merge--> HasTarget --using--> HasSource --on--> Ready
//! Ready/AwaitingSet --delete / insert_unmatched_source--> Ready
//! Ready/AwaitingSet --update--> AwaitingSet --set--> AwaitingSet
//! ```

use crate::{
    ast::{
        common::{Field, TableRef},
        expr::Expr,
        merge::{MatchingSituation, Merge, MergeAction, MergeAssignment, WhenClause},
    },
    dialect::Ansi,
    error::{BuildError, QueryError, StateError},
    renderer::RenderConfig,
    validation,
};
use model::core::value::Value;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BuilderState {
    #[default]
    Init,
    HasTarget,
    HasSource,
    Ready,
    AwaitingSet,
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuilderState::Init => "Init",
            BuilderState::HasTarget => "HasTarget",
            BuilderState::HasSource => "HasSource",
            BuilderState::Ready => "Ready",
            BuilderState::AwaitingSet => "AwaitingSet",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeBuilder {
    target: Option<TableRef>,
    source: Option<TableRef>,
    on: Option<Expr>,
    when_clauses: Vec<WhenClause>,
    state: BuilderState,
}

impl MergeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder that already holds its target table.
    pub fn with_target(target: TableRef) -> Self {
        Self {
            target: Some(target),
            state: BuilderState::HasTarget,
            ..Default::default()
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn when_clauses(&self) -> &[WhenClause] {
        &self.when_clauses
    }

    pub fn merge(mut self, target: TableRef) -> Result<Self, StateError> {
        self.expect_state("merge", BuilderState::Init)?;
        debug!("MERGE target set to {}", target);
        self.target = Some(target);
        self.transition(BuilderState::HasTarget);
        Ok(self)
    }

    pub fn using(mut self, source: TableRef) -> Result<Self, StateError> {
        self.expect_state("using", BuilderState::HasTarget)?;
        debug!("MERGE source set to {}", source);
        self.source = Some(source);
        self.transition(BuilderState::HasSource);
        Ok(self)
    }

    /// Sets the join predicate. It can be set only once.
    pub fn on(mut self, predicate: Expr) -> Result<Self, StateError> {
        if self.on.is_some() {
            return Err(StateError::OnAlreadySet);
        }
        self.expect_state("on", BuilderState::HasSource)?;
        self.on = Some(predicate);
        self.transition(BuilderState::Ready);
        Ok(self)
    }

    /// Appends `WHEN <when> [AND <and_>] THEN DELETE`.
    pub fn delete(mut self, when: MatchingSituation, and_: Option<Expr>) -> Result<Self, StateError> {
        self.expect_actionable("delete")?;
        self.push_clause(when, and_, MergeAction::Delete);
        self.transition(BuilderState::Ready);
        Ok(self)
    }

    /// Opens `WHEN <when> [AND <and_>] THEN UPDATE`; assignments are added
    /// with [`set`](Self::set).
    pub fn update(mut self, when: MatchingSituation, and_: Option<Expr>) -> Result<Self, StateError> {
        self.expect_actionable("update")?;
        self.push_clause(
            when,
            and_,
            MergeAction::Update {
                assignments: Vec::new(),
            },
        );
        self.transition(BuilderState::AwaitingSet);
        Ok(self)
    }

    /// Adds `<field>=<value>` to the pending UPDATE clause.
    pub fn set(mut self, field: Field, value: impl Into<Expr>) -> Result<Self, StateError> {
        let state = self.state;
        if state != BuilderState::AwaitingSet {
            return Err(StateError::NoPendingUpdate(state));
        }
        let Some(WhenClause {
            action: MergeAction::Update { assignments },
            ..
        }) = self.when_clauses.last_mut()
        else {
            return Err(StateError::NoPendingUpdate(state));
        };

        assignments.push(MergeAssignment {
            field,
            value: value.into(),
        });
        Ok(self)
    }

    /// Appends `WHEN NOT MATCHED [AND <when>] THEN INSERT VALUES (...)`.
    pub fn insert_unmatched_source(
        mut self,
        values: Vec<Expr>,
        when: Option<Expr>,
    ) -> Result<Self, StateError> {
        self.expect_actionable("insert_unmatched_source")?;
        self.push_clause(
            MatchingSituation::NotMatched,
            when,
            MergeAction::Insert {
                columns: None,
                values,
            },
        );
        self.transition(BuilderState::Ready);
        Ok(self)
    }

    /// Declares the target columns of the INSERT clause just appended.
    ///
    /// Only applies while that INSERT is still the last clause; once another
    /// clause follows it, this returns [`StateError::NoPendingInsert`].
    pub fn columns(mut self, names: &[&str]) -> Result<Self, StateError> {
        self.expect_actionable("columns")?;
        let clause_no = self.when_clauses.len();
        let Some(WhenClause {
            action: MergeAction::Insert { columns, .. },
            ..
        }) = self.when_clauses.last_mut()
        else {
            return Err(StateError::NoPendingInsert);
        };

        if columns.is_some() {
            return Err(StateError::ColumnsAlreadyDeclared(clause_no));
        }
        *columns = Some(names.iter().map(|s| s.to_string()).collect());
        Ok(self)
    }

    /// Validates the accumulated state and returns the `Merge` AST.
    ///
    /// The builder is left untouched, so this can be called repeatedly.
    pub fn build(&self) -> Result<Merge, BuildError> {
        let target = self.target.clone().ok_or(BuildError::MissingTarget)?;
        let source = self.source.clone().ok_or(BuildError::MissingSource)?;
        let on = self.on.clone().ok_or(BuildError::MissingOnPredicate)?;

        let merge = Merge {
            target,
            source,
            on,
            when_clauses: self.when_clauses.clone(),
        };
        validation::validate(&merge)?;

        if merge.when_clauses.is_empty() {
            warn!("MERGE into {} has no WHEN clauses", merge.target);
        }
        debug!(
            "Built MERGE into {} with {} WHEN clause(s)",
            merge.target,
            merge.when_clauses.len()
        );
        Ok(merge)
    }

    /// Validates and renders the statement with inline literals.
    pub fn to_sql(&self) -> Result<String, QueryError> {
        Ok(self.render_with(RenderConfig::default())?.0)
    }

    /// Validates and renders the statement, returning the SQL text and any
    /// bound parameters.
    pub fn render_with(&self, config: RenderConfig) -> Result<(String, Vec<Value>), QueryError> {
        let merge = self.build()?;
        Ok(merge.render_with(&Ansi, config)?)
    }

    fn transition(&mut self, next: BuilderState) {
        if self.state != next {
            debug!("MERGE builder: {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn expect_state(&self, call: &'static str, expected: BuilderState) -> Result<(), StateError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(StateError::OutOfOrder {
                call,
                state: self.state,
                expected,
            })
        }
    }

    /// WHEN clauses may be appended once the ON predicate is set.
    fn expect_actionable(&self, call: &'static str) -> Result<(), StateError> {
        match self.state {
            BuilderState::Ready | BuilderState::AwaitingSet => Ok(()),
            state => Err(StateError::OutOfOrder {
                call,
                state,
                expected: BuilderState::Ready,
            }),
        }
    }

    fn push_clause(&mut self, situation: MatchingSituation, condition: Option<Expr>, action: MergeAction) {
        debug!(
            "Appending WHEN {} THEN {} clause #{}",
            situation,
            action.name(),
            self.when_clauses.len() + 1
        );
        self.when_clauses.push(WhenClause {
            situation,
            condition,
            action,
        });
    }
}
