//! Ergonomic builder functions for expressions.
//!
//! ```ignore
//! use quarry::ast::builders::*;
//!
//! let active = and([eq("active", true), gte("age", 18)]);
//! let by_role = is_in("role", ["admin", "mod"]);
//! let total = func("count", [star()]).as_alias("total");
//! ```

use crate::ast::{BinaryOp, Expr, Value};
use crate::query::SelectQuery;

/// A column reference; dots split qualifiers (`"posts.user_id"`).
pub fn col(name: &str) -> Expr {
    Expr::from(name)
}

/// All columns (*)
pub fn star() -> Expr {
    Expr::Star
}

/// SQL written verbatim.
pub fn raw(sql: impl Into<String>) -> Expr {
    Expr::Raw(sql.into())
}

/// A single bound value.
pub fn arg(value: impl Into<Value>) -> Expr {
    Expr::Arg(value.into())
}

/// SQL text with `?` markers, one per value.
pub fn clause(sql: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Expr {
    Expr::Clause {
        sql: sql.into(),
        args: args.into_iter().collect(),
    }
}

/// Compare two arbitrary expressions.
pub fn cond(left: impl Into<Expr>, op: BinaryOp, right: impl Into<Expr>) -> Expr {
    Expr::Binary {
        left: Box::new(left.into()),
        op,
        right: Box::new(right.into()),
    }
}

fn bound(column: &str, op: BinaryOp, value: impl Into<Value>) -> Expr {
    cond(col(column), op, Expr::Arg(value.into()))
}

/// column = value
pub fn eq(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Eq, value)
}

/// column <> value
pub fn ne(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Ne, value)
}

/// column > value
pub fn gt(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Gt, value)
}

/// column >= value
pub fn gte(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Gte, value)
}

/// column < value
pub fn lt(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Lt, value)
}

/// column <= value
pub fn lte(column: &str, value: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Lte, value)
}

/// column LIKE value
pub fn like(column: &str, pattern: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::Like, pattern)
}

/// column ILIKE value
pub fn ilike(column: &str, pattern: impl Into<Value>) -> Expr {
    bound(column, BinaryOp::ILike, pattern)
}

/// column IN (values), one placeholder per value
pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Expr {
    Expr::In {
        expr: Box::new(col(column)),
        list: values.into_iter().map(|v| Expr::Arg(v.into())).collect(),
        negated: false,
    }
}

/// column NOT IN (values)
pub fn not_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Expr {
    Expr::In {
        expr: Box::new(col(column)),
        list: values.into_iter().map(|v| Expr::Arg(v.into())).collect(),
        negated: true,
    }
}

pub fn is_null(column: &str) -> Expr {
    Expr::IsNull {
        expr: Box::new(col(column)),
        negated: false,
    }
}

pub fn is_not_null(column: &str) -> Expr {
    Expr::IsNull {
        expr: Box::new(col(column)),
        negated: true,
    }
}

pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::And(exprs.into_iter().collect())
}

pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Or(exprs.into_iter().collect())
}

pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::Not(Box::new(expr.into()))
}

/// A function call such as `count(*)` or `coalesce(a, b)`.
pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Func {
        name: name.into(),
        args: args.into_iter().collect(),
    }
}

/// A parenthesized list.
pub fn group(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Group(exprs.into_iter().collect())
}

pub fn subquery(q: SelectQuery) -> Expr {
    Expr::Subquery(Box::new(q))
}

pub fn exists(q: SelectQuery) -> Expr {
    Expr::Exists(Box::new(q))
}

/// Extension trait to add fluent methods to Expr
pub trait ExprExt {
    /// Add an alias to this expression
    fn as_alias(self, alias: &str) -> Expr;
}

impl ExprExt for Expr {
    fn as_alias(self, alias: &str) -> Expr {
        match self {
            Expr::Aliased { expr, .. } => Expr::Aliased {
                expr,
                alias: alias.to_string(),
            },
            other => Expr::Aliased {
                expr: Box::new(other),
                alias: alias.to_string(),
            },
        }
    }
}
