//! Defines the AST for SQL expressions.

use model::core::value::Value;
use serde::{Deserialize, Serialize};

/// Binding strength of `NOT`, between `AND` and the comparison operators.
pub const NOT_PRECEDENCE: u8 = 3;

/// Binding strength of leaves and self-delimiting nodes (identifiers,
/// literals, function calls, parenthesized groups).
pub const ATOM_PRECEDENCE: u8 = u8::MAX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// A literal value, such as a string, number, boolean, or NULL.
    Value(Value),

    /// A comparison or logical operation, e.g., `column = 'value'` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g., `COUNT(*)` or `ISNULL(notes)`.
    FunctionCall(FunctionCall),

    /// Logical negation, `NOT <expr>`.
    Not(Box<Expr>),

    /// `<expr> IS NULL`, or `<expr> IS NOT NULL` when negated.
    IsNull { expr: Box<Expr>, negated: bool },

    /// An explicitly parenthesized expression.
    Nested(Box<Expr>),

    /// Raw SQL text emitted verbatim.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String, // e.g., the 'id' in 'users.id'
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub wildcard: bool, // represents the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    /// Returns the precedence of this operator (higher binds tighter).
    pub const fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq => 4,
        }
    }
}

impl Expr {
    pub fn binary(left: impl Into<Expr>, op: BinaryOperator, right: impl Into<Expr>) -> Self {
        Expr::BinaryOp(Box::new(BinaryOp {
            left: left.into(),
            op,
            right: right.into(),
        }))
    }

    /// Precedence tag used by the renderer to decide on parentheses locally.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::BinaryOp(op) => op.op.precedence(),
            Expr::Not(_) => NOT_PRECEDENCE,
            Expr::IsNull { .. } => BinaryOperator::Eq.precedence(),
            Expr::Identifier(_)
            | Expr::Value(_)
            | Expr::FunctionCall(_)
            | Expr::Nested(_)
            | Expr::Literal(_) => ATOM_PRECEDENCE,
        }
    }

    /// The operator of a boolean combination, `None` for every other node.
    pub fn logical_op(&self) -> Option<BinaryOperator> {
        match self {
            Expr::BinaryOp(op) if op.op.is_logical() => Some(op.op),
            _ => None,
        }
    }

    pub fn equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::Eq, rhs)
    }

    pub fn not_equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::NotEq, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::Lt, rhs)
    }

    pub fn lt_eq(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::LtEq, rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::Gt, rhs)
    }

    pub fn gt_eq(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::GtEq, rhs)
    }

    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::And, rhs)
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOperator::Or, rhs)
    }

    pub fn negate(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Expr {
        Expr::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Wraps the expression in explicit parentheses.
    pub fn nested(self) -> Expr {
        Expr::Nested(Box::new(self))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Identifier(ident)
    }
}

impl From<FunctionCall> for Expr {
    fn from(func: FunctionCall) -> Self {
        Expr::FunctionCall(func)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Value(Value::String(s))
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Value(Value::Int(v))
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Value(Value::Int(v as i64))
    }
}

impl From<u64> for Expr {
    fn from(v: u64) -> Self {
        Expr::Value(Value::Uint(v))
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Value(Value::Float(v))
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Expr::Value(Value::Boolean(v))
    }
}
