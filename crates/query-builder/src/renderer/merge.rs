use crate::{
    ast::{
        expr::BinaryOperator,
        merge::{Merge, MergeAction, MergeAssignment, WhenClause},
    },
    dialect::{Ansi, Dialect},
    error::{QueryError, RenderError},
    renderer::{
        Render, RenderConfig, Renderer,
        expr::{Side, render_operand},
    },
    validation,
};
use model::core::value::Value;
use tracing::debug;

impl Merge {
    /// Validates and renders the statement with inline literals.
    pub fn to_sql(&self) -> Result<String, QueryError> {
        validation::validate(self)?;
        Ok(self.render_with(&Ansi, RenderConfig::default())?.0)
    }

    /// Renders the statement without validating it.
    pub fn render_with(
        &self,
        dialect: &dyn Dialect,
        config: RenderConfig,
    ) -> Result<(String, Vec<Value>), RenderError> {
        let mut renderer = Renderer::with_config(dialect, config);
        self.render(&mut renderer)?;
        let (sql, params) = renderer.finish();
        debug!(
            "Rendered MERGE into {} ({} bytes, {} params)",
            self.target,
            sql.len(),
            params.len()
        );
        Ok((sql, params))
    }
}

impl Render for Merge {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        r.sql.push_str("MERGE ");
        r.render_table_ref(&self.target)?;

        r.sql.push_str(" ON ");
        r.render_table_ref(&self.source)?;

        r.sql.push_str(" WHERE ");
        self.on.render(r)?;

        for clause in &self.when_clauses {
            r.sql.push(' ');
            clause.render(r)?;
        }
        Ok(())
    }
}

impl Render for WhenClause {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        r.sql.push_str("WHEN ");
        r.sql.push_str(self.situation.keyword());

        // The condition is the right operand of an implicit AND.
        if let Some(condition) = &self.condition {
            r.sql.push_str(" AND ");
            render_operand(r, BinaryOperator::And, condition, Side::Right)?;
        }

        r.sql.push_str(" THEN ");
        self.action.render(r)
    }
}

impl Render for MergeAction {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        match self {
            MergeAction::Delete => r.sql.push_str("DELETE"),
            MergeAction::Update { assignments } => {
                r.sql.push_str("UPDATE SET ");
                r.render_list(assignments, ",")?;
            }
            MergeAction::Insert { columns, values } => {
                r.sql.push_str("INSERT ");
                if let Some(columns) = columns {
                    r.sql.push('(');
                    for (i, column) in columns.iter().enumerate() {
                        if i > 0 {
                            r.sql.push(',');
                        }
                        r.push_identifier(column)?;
                    }
                    r.sql.push_str(") ");
                }
                r.sql.push_str("VALUES (");
                r.render_list(values, ",")?;
                r.sql.push(')');
            }
        }
        Ok(())
    }
}

impl Render for MergeAssignment {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        self.field.render(r)?;
        r.sql.push('=');
        self.value.render(r)
    }
}
