//! Structural checks run on a `Merge` before it is rendered.

use crate::{
    ast::merge::{Merge, MergeAction, WhenClause},
    error::BuildError,
};

/// Checks every WHEN clause of `merge`, returning the first problem found.
pub fn validate(merge: &Merge) -> Result<(), BuildError> {
    for (i, clause) in merge.when_clauses.iter().enumerate() {
        validate_clause(merge, i + 1, clause)?;
    }
    Ok(())
}

fn validate_clause(merge: &Merge, clause_no: usize, clause: &WhenClause) -> Result<(), BuildError> {
    match &clause.action {
        MergeAction::Delete => Ok(()),
        MergeAction::Update { assignments } => {
            if assignments.is_empty() {
                return Err(BuildError::EmptyAssignments { clause: clause_no });
            }
            if let Some(foreign) = assignments
                .iter()
                .find(|a| !a.field.belongs_to(&merge.target))
            {
                return Err(BuildError::ForeignAssignmentTarget {
                    clause: clause_no,
                    field: foreign.field.to_string(),
                    target: merge.target.to_string(),
                });
            }
            Ok(())
        }
        MergeAction::Insert { columns, values } => {
            if values.is_empty() {
                return Err(BuildError::EmptyInsertValues { clause: clause_no });
            }
            match columns {
                Some(columns) if columns.len() != values.len() => {
                    Err(BuildError::InsertArityMismatch {
                        clause: clause_no,
                        columns: columns.len(),
                        values: values.len(),
                    })
                }
                _ => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{
            common::TableRef,
            expr::Expr,
            functions::now,
            merge::{MatchingSituation, Merge, MergeAction, MergeAssignment, WhenClause},
        },
        error::BuildError,
        validation::validate,
    };

    fn merge_with(actions: Vec<MergeAction>) -> Merge {
        let target = TableRef::new("target");
        let source = TableRef::new("source");
        Merge {
            on: source.field("id").equals(target.field("id")),
            target,
            source,
            when_clauses: actions
                .into_iter()
                .map(|action| WhenClause {
                    situation: MatchingSituation::Matched,
                    condition: None,
                    action,
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_statement() {
        let target = TableRef::new("target");
        let merge = merge_with(vec![
            MergeAction::Delete,
            MergeAction::Update {
                assignments: vec![MergeAssignment {
                    field: target.field("title"),
                    value: Expr::from("x"),
                }],
            },
            MergeAction::Insert {
                columns: Some(vec!["updated_at".to_string()]),
                values: vec![now()],
            },
            MergeAction::Insert {
                columns: None,
                values: vec![now(), Expr::from(1)],
            },
        ]);
        assert_eq!(validate(&merge), Ok(()));
    }

    #[test]
    fn test_empty_update() {
        let merge = merge_with(vec![
            MergeAction::Delete,
            MergeAction::Update {
                assignments: vec![],
            },
        ]);
        assert_eq!(
            validate(&merge),
            Err(BuildError::EmptyAssignments { clause: 2 })
        );
    }

    #[test]
    fn test_assignment_outside_target() {
        let source = TableRef::new("source");
        let merge = merge_with(vec![MergeAction::Update {
            assignments: vec![MergeAssignment {
                field: source.field("title"),
                value: Expr::from("x"),
            }],
        }]);
        assert_eq!(
            validate(&merge),
            Err(BuildError::ForeignAssignmentTarget {
                clause: 1,
                field: "source.title".to_string(),
                target: "target".to_string(),
            })
        );
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let merge = merge_with(vec![MergeAction::Insert {
            columns: Some(vec!["a".to_string(), "b".to_string()]),
            values: vec![now()],
        }]);
        assert_eq!(
            validate(&merge),
            Err(BuildError::InsertArityMismatch {
                clause: 1,
                columns: 2,
                values: 1,
            })
        );
    }

    #[test]
    fn test_insert_without_values() {
        let merge = merge_with(vec![MergeAction::Insert {
            columns: None,
            values: vec![],
        }]);
        assert_eq!(
            validate(&merge),
            Err(BuildError::EmptyInsertValues { clause: 1 })
        );
    }

    #[test]
    fn test_no_when_clauses_is_valid() {
        assert_eq!(validate(&merge_with(vec![])), Ok(()));
    }
}
