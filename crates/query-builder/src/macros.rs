#[macro_export]
macro_rules! value {
    ($val:expr) => {
        $crate::ast::expr::Expr::Value($val)
    };
}

#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::ast::common::TableRef::new(&$name.to_string())
    };
    ($schema:expr, $name:expr) => {
        $crate::ast::common::TableRef::with_schema(&$schema.to_string(), &$name.to_string())
    };
}

/// Creates a `Field` expression, e.g. `field!("source", "id")`.
#[macro_export]
macro_rules! field {
    ($table:expr, $name:expr) => {
        $crate::ast::expr::Expr::from($crate::ast::common::Field::new(
            &$crate::table_ref!($table),
            &$name.to_string(),
        ))
    };
}

#[macro_export]
macro_rules! ident {
    ($name:expr) => {
        $crate::ast::expr::Expr::Identifier($crate::ast::expr::Ident {
            qualifier: None,
            name: $name.to_string(),
        })
    };
    ($qualifier:expr, $name:expr) => {
        $crate::ast::expr::Expr::Identifier($crate::ast::expr::Ident {
            qualifier: Some($qualifier.to_string()),
            name: $name.to_string(),
        })
    };
}
