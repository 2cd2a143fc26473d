use crate::{
    ast::{
        common::Field,
        expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident, NOT_PRECEDENCE},
    },
    error::RenderError,
    renderer::{Render, Renderer},
};

/// Position of an operand relative to its binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Decides whether `child` must be parenthesized as the `side` operand of `parent`.
///
/// Boolean combinations nested in a boolean combination are wrapped unless
/// they repeat the parent operator on the left, so that a left-associative
/// parser rebuilds the same tree. Predicates nested in a comparison are
/// always wrapped.
pub fn needs_parens(parent: BinaryOperator, child: &Expr, side: Side) -> bool {
    match child.logical_op() {
        Some(child_op) if parent.is_logical() => child_op != parent || side == Side::Right,
        Some(_) => true,
        None if parent.is_logical() => false,
        None => child.precedence() <= parent.precedence(),
    }
}

/// Renders `child` as an operand of `parent`, adding parentheses if needed.
pub fn render_operand(
    r: &mut Renderer,
    parent: BinaryOperator,
    child: &Expr,
    side: Side,
) -> Result<(), RenderError> {
    if needs_parens(parent, child, side) {
        render_wrapped(r, child)
    } else {
        child.render(r)
    }
}

fn render_wrapped(r: &mut Renderer, expr: &Expr) -> Result<(), RenderError> {
    r.sql.push('(');
    expr.render(r)?;
    r.sql.push(')');
    Ok(())
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_value(val),
            Expr::BinaryOp(op) => op.render(r),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Not(inner) => {
                r.sql.push_str("NOT ");
                if inner.precedence() < NOT_PRECEDENCE {
                    render_wrapped(r, inner)
                } else {
                    inner.render(r)
                }
            }
            Expr::IsNull { expr, negated } => {
                if expr.precedence() <= self.precedence() {
                    render_wrapped(r, expr)?;
                } else {
                    expr.render(r)?;
                }
                r.sql.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Expr::Nested(inner) => render_wrapped(r, inner),
            Expr::Literal(text) => {
                if text.trim().is_empty() {
                    return Err(RenderError::EmptyLiteral);
                }
                r.sql.push_str(text);
                Ok(())
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        if let Some(qualifier) = &self.qualifier {
            r.push_identifier(qualifier)?;
            r.sql.push('.');
        }
        r.push_identifier(&self.name)
    }
}

impl Render for Field {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        r.push_identifier(&self.table.name)?;
        r.sql.push('.');
        r.push_identifier(&self.name)
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        render_operand(r, self.op, &self.left, Side::Left)?;

        if self.op.is_logical() {
            r.sql.push(' ');
            r.sql.push_str(self.op.as_str());
            r.sql.push(' ');
        } else {
            r.sql.push_str(self.op.as_str());
        }

        render_operand(r, self.op, &self.right, Side::Right)
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) -> Result<(), RenderError> {
        if self.name.is_empty() {
            return Err(RenderError::EmptyFunctionName);
        }
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            r.render_list(&self.args, ",")?;
        }
        r.sql.push(')');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ast::{
            common::TableRef,
            expr::{BinaryOperator, Expr, FunctionCall, Ident},
            functions::{coalesce, count_all, isnull, now},
        },
        dialect::Ansi,
        error::RenderError,
        renderer::{
            ParamStyle, Render, RenderConfig, Renderer,
            expr::{Side, needs_parens},
        },
    };

    fn render(expr: &Expr) -> String {
        let dialect = Ansi;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer).unwrap();
        renderer.finish().0
    }

    fn tables() -> (TableRef, TableRef) {
        (TableRef::new("target"), TableRef::new("source"))
    }

    #[test]
    fn test_render_comparisons() {
        let (target, source) = tables();

        assert_eq!(
            render(&source.field("id").equals(target.field("id"))),
            r#""source"."id"="target"."id""#
        );
        assert_eq!(
            render(&target.field("expire_at").lt_eq(now())),
            r#""target"."expire_at"<=NOW()"#
        );
        assert_eq!(
            render(&target.field("qty").not_equals(0)),
            r#""target"."qty"<>0"#
        );
        assert_eq!(
            render(&target.field("title").gt_eq("A")),
            r#""target"."title">='A'"#
        );
    }

    #[test]
    fn test_render_literals() {
        let t = TableRef::new("t");
        assert_eq!(
            render(&t.field("name").equals("O'Brien")),
            r#""t"."name"='O''Brien'"#
        );
        assert_eq!(
            render(&t.field("note").equals(Value::Null)),
            r#""t"."note"=NULL"#
        );
        assert_eq!(
            render(&crate::field!("t", "note").equals(crate::value!(Value::Boolean(true)))),
            r#""t"."note"=true"#
        );
        assert_eq!(render(&Expr::from(1.25)), "1.25");
        assert_eq!(render(&Expr::Literal("DEFAULT".to_string())), "DEFAULT");
    }

    #[test]
    fn test_render_unqualified_identifier() {
        assert_eq!(render(&crate::ident!("title")), r#""title""#);
        assert_eq!(render(&crate::ident!("t", "title")), r#""t"."title""#);
    }

    #[test]
    fn test_render_functions() {
        let source = TableRef::new("source");
        assert_eq!(render(&now()), "NOW()");
        assert_eq!(
            render(&isnull(source.field("notes"))),
            r#"ISNULL("source"."notes")"#
        );
        assert_eq!(
            render(&coalesce(vec![source.field("a").into(), Expr::from("none")])),
            r#"COALESCE("source"."a",'none')"#
        );
        assert_eq!(render(&count_all()), "COUNT(*)");
    }

    #[test]
    fn test_render_negation() {
        let source = TableRef::new("source");
        assert_eq!(
            render(&isnull(source.field("notes")).negate()),
            r#"NOT ISNULL("source"."notes")"#
        );
        assert_eq!(
            render(&source.field("a").equals(1).negate()),
            r#"NOT "source"."a"=1"#
        );
        assert_eq!(
            render(&source.field("a").equals(1).and(source.field("b").equals(2)).negate()),
            r#"NOT ("source"."a"=1 AND "source"."b"=2)"#
        );
    }

    #[test]
    fn test_render_is_null() {
        let t = TableRef::new("t");
        assert_eq!(render(&t.field("a").is_null()), r#""t"."a" IS NULL"#);
        assert_eq!(render(&t.field("a").is_not_null()), r#""t"."a" IS NOT NULL"#);
        assert_eq!(
            render(&t.field("a").equals(1).is_null()),
            r#"("t"."a"=1) IS NULL"#
        );
    }

    #[test]
    fn test_render_same_operator_chains_left_associative() {
        let t = TableRef::new("t");
        let a = t.field("a").equals(1);
        let b = t.field("b").equals(2);
        let c = t.field("c").equals(3);

        assert_eq!(
            render(&a.clone().and(b.clone()).and(c.clone())),
            r#""t"."a"=1 AND "t"."b"=2 AND "t"."c"=3"#
        );
        assert_eq!(
            render(&a.and(b.and(c))),
            r#""t"."a"=1 AND ("t"."b"=2 AND "t"."c"=3)"#
        );
    }

    #[test]
    fn test_render_mixed_boolean_operators() {
        let t = TableRef::new("t");
        let a = t.field("a").equals(1);
        let b = t.field("b").equals(2);
        let c = t.field("c").equals(3);

        assert_eq!(
            render(&a.clone().or(b.clone()).and(c.clone())),
            r#"("t"."a"=1 OR "t"."b"=2) AND "t"."c"=3"#
        );
        assert_eq!(
            render(&a.clone().and(b.clone()).or(c.clone())),
            r#"("t"."a"=1 AND "t"."b"=2) OR "t"."c"=3"#
        );
        assert_eq!(
            render(&c.or(a.and(b))),
            r#""t"."c"=3 OR ("t"."a"=1 AND "t"."b"=2)"#
        );
    }

    #[test]
    fn test_render_predicate_operands_of_comparison() {
        let t = TableRef::new("t");
        let inner = t.field("a").equals(1);
        let expr = Expr::binary(inner, BinaryOperator::Eq, true);
        assert_eq!(render(&expr), r#"("t"."a"=1)=true"#);
    }

    #[test]
    fn test_render_explicit_nesting() {
        let t = TableRef::new("t");
        assert_eq!(
            render(&t.field("expire_at").gt(now()).nested()),
            r#"("t"."expire_at">NOW())"#
        );
    }

    #[test]
    fn test_needs_parens() {
        let t = TableRef::new("t");
        let cmp = t.field("a").equals(1);
        let and = cmp.clone().and(cmp.clone());

        assert!(!needs_parens(BinaryOperator::And, &and, Side::Left));
        assert!(needs_parens(BinaryOperator::And, &and, Side::Right));
        assert!(needs_parens(BinaryOperator::Or, &and, Side::Left));
        assert!(!needs_parens(BinaryOperator::Or, &cmp, Side::Right));
        assert!(!needs_parens(BinaryOperator::And, &cmp.clone().negate(), Side::Left));
        assert!(needs_parens(BinaryOperator::Eq, &cmp.clone().negate(), Side::Left));
        assert!(!needs_parens(BinaryOperator::Eq, &now(), Side::Right));
    }

    #[test]
    fn test_render_errors() {
        let dialect = Ansi;

        let mut renderer = Renderer::new(&dialect);
        let unnamed = Expr::FunctionCall(FunctionCall {
            name: String::new(),
            args: vec![],
            wildcard: false,
        });
        assert_eq!(
            unnamed.render(&mut renderer),
            Err(RenderError::EmptyFunctionName)
        );

        let mut renderer = Renderer::new(&dialect);
        let blank = Expr::Identifier(Ident {
            qualifier: Some("t".to_string()),
            name: String::new(),
        });
        assert_eq!(blank.render(&mut renderer), Err(RenderError::EmptyIdentifier));

        let mut renderer = Renderer::new(&dialect);
        assert_eq!(
            Expr::Literal(" ".to_string()).render(&mut renderer),
            Err(RenderError::EmptyLiteral)
        );
    }

    #[test]
    fn test_render_with_placeholders() {
        let t = TableRef::new("t");
        let expr = t.field("a").equals("x").and(t.field("b").gt(10));

        let dialect = Ansi;
        let config = RenderConfig {
            param_style: ParamStyle::Placeholder,
        };
        let mut renderer = Renderer::with_config(&dialect, config);
        expr.render(&mut renderer).unwrap();
        let (sql, params) = renderer.finish();

        assert_eq!(sql, r#""t"."a"=? AND "t"."b">?"#);
        assert_eq!(params, vec![Value::String("x".to_string()), Value::Int(10)]);
    }
}
