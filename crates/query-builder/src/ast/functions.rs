//! Constructors for the SQL functions commonly used in MERGE conditions
//! and value lists.

use crate::ast::expr::{Expr, FunctionCall};

/// A call to an arbitrary function, e.g. `func("LOWER", vec![field.into()])`.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::FunctionCall(FunctionCall {
        name: name.to_string(),
        args,
        wildcard: false,
    })
}

/// `NOW()`
pub fn now() -> Expr {
    func("NOW", Vec::new())
}

/// `ISNULL(<expr>)`
pub fn isnull(expr: impl Into<Expr>) -> Expr {
    func("ISNULL", vec![expr.into()])
}

/// `COALESCE(<a>,<b>,...)`
pub fn coalesce(args: Vec<Expr>) -> Expr {
    func("COALESCE", args)
}

/// `COUNT(*)`
pub fn count_all() -> Expr {
    Expr::FunctionCall(FunctionCall {
        name: "COUNT".to_string(),
        args: Vec::new(),
        wildcard: true,
    })
}
