//! Defines the core rendering trait and context for converting AST to SQL.

use model::core::value::Value;
use serde::{Deserialize, Serialize};

use crate::{ast::common::TableRef, dialect::Dialect, error::RenderError};

pub mod expr;
pub mod merge;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer) -> Result<(), RenderError>;
}

/// How literal values are written into the SQL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamStyle {
    /// Literals are rendered inline, e.g. `'(Expired Product)'`.
    #[default]
    Inline,
    /// Literals are replaced by dialect placeholders and collected as parameters.
    Placeholder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub param_style: ParamStyle,
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    pub param_style: ParamStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self::with_config(dialect, RenderConfig::default())
    }

    pub fn with_config(dialect: &'a dyn Dialect, config: RenderConfig) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            param_style: config.param_style,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    /// Writes a literal, inline or as a bound parameter depending on the
    /// configured [`ParamStyle`].
    pub fn add_value(&mut self, value: &Value) -> Result<(), RenderError> {
        match self.param_style {
            ParamStyle::Placeholder => self.add_param(value.clone()),
            ParamStyle::Inline => {
                if !value.is_finite() {
                    return Err(RenderError::NonFiniteLiteral(format!("{value:?}")));
                }
                self.sql.push_str(&value.to_string());
            }
        }
        Ok(())
    }

    pub fn push_identifier(&mut self, ident: &str) -> Result<(), RenderError> {
        if ident.is_empty() {
            return Err(RenderError::EmptyIdentifier);
        }
        self.sql.push_str(&self.dialect.quote_identifier(ident));
        Ok(())
    }

    pub fn render_table_ref(&mut self, table: &TableRef) -> Result<(), RenderError> {
        if let Some(schema) = &table.schema {
            self.push_identifier(schema)?;
            self.sql.push('.');
        }
        self.push_identifier(&table.name)
    }

    /// Writes `items` separated by `sep`.
    pub fn render_list<T: Render>(&mut self, items: &[T], sep: &str) -> Result<(), RenderError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            item.render(self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ast::common::TableRef,
        dialect::Ansi,
        error::RenderError,
        renderer::{ParamStyle, RenderConfig, Renderer},
    };

    #[test]
    fn test_inline_values() {
        let dialect = Ansi;
        let mut renderer = Renderer::new(&dialect);
        renderer.add_value(&Value::String("it's".to_string())).unwrap();
        renderer.sql.push(',');
        renderer.add_value(&Value::Int(5)).unwrap();
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "'it''s',5");
        assert!(params.is_empty());
    }

    #[test]
    fn test_placeholder_values() {
        let dialect = Ansi;
        let config = RenderConfig {
            param_style: ParamStyle::Placeholder,
        };
        let mut renderer = Renderer::with_config(&dialect, config);
        renderer.add_value(&Value::String("a".to_string())).unwrap();
        renderer.sql.push(',');
        renderer.add_value(&Value::Float(f64::NAN)).unwrap();
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "?,?");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Value::String("a".to_string()));
    }

    #[test]
    fn test_inline_rejects_non_finite_floats() {
        let dialect = Ansi;
        let mut renderer = Renderer::new(&dialect);
        let err = renderer
            .add_value(&Value::Float(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, RenderError::NonFiniteLiteral(_)));
    }

    #[test]
    fn test_render_table_ref() {
        let dialect = Ansi;
        let mut renderer = Renderer::new(&dialect);
        renderer
            .render_table_ref(&TableRef::with_schema("crm", "users"))
            .unwrap();
        assert_eq!(renderer.sql, r#""crm"."users""#);

        let mut renderer = Renderer::new(&dialect);
        assert_eq!(
            renderer.render_table_ref(&TableRef::new("")),
            Err(RenderError::EmptyIdentifier)
        );
    }
}
