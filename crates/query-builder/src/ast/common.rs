//! Defines common, reusable AST nodes for building SQL queries.

use crate::ast::expr::{Expr, Ident};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: &str) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
        }
    }

    pub fn with_schema(schema: &str, name: &str) -> Self {
        Self {
            schema: Some(schema.to_string()),
            name: name.to_string(),
        }
    }

    /// Returns a reference to the column `name` of this table.
    pub fn field(&self, name: &str) -> Field {
        Field::new(self, name)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A column belonging to a specific table, rendered as `"table"."column"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub table: TableRef,
    pub name: String,
}

impl Field {
    pub fn new(table: &TableRef, name: &str) -> Self {
        Self {
            table: table.clone(),
            name: name.to_string(),
        }
    }

    /// Matches on the table name only, since field qualifiers render
    /// without the schema.
    pub fn belongs_to(&self, table: &TableRef) -> bool {
        self.table.name == table.name
    }

    pub fn equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).equals(rhs)
    }

    pub fn not_equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).not_equals(rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).lt(rhs)
    }

    pub fn lt_eq(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).lt_eq(rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).gt(rhs)
    }

    pub fn gt_eq(self, rhs: impl Into<Expr>) -> Expr {
        Expr::from(self).gt_eq(rhs)
    }

    pub fn is_null(self) -> Expr {
        Expr::from(self).is_null()
    }

    pub fn is_not_null(self) -> Expr {
        Expr::from(self).is_not_null()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table.name, self.name)
    }
}

impl From<Field> for Expr {
    fn from(field: Field) -> Self {
        Expr::Identifier(Ident {
            qualifier: Some(field.table.name),
            name: field.name,
        })
    }
}

impl From<&Field> for Expr {
    fn from(field: &Field) -> Self {
        Expr::from(field.clone())
    }
}
