use std::io::Write;

use crate::ast::Value;
use crate::error::{QuarryError, QuarryResult};
use crate::query::SelectQuery;
use crate::transpiler::{Dialect, Express, express_slice};

/// Binary operators for expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    ILike,
    /// String concatenation (||)
    Concat,
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Eq => write!(f, "="),
            BinaryOp::Ne => write!(f, "<>"),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Lte => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Gte => write!(f, ">="),
            BinaryOp::Like => write!(f, "LIKE"),
            BinaryOp::ILike => write!(f, "ILIKE"),
            BinaryOp::Concat => write!(f, "||"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
        }
    }
}

/// A general expression node.
///
/// The tree owns all of its children, so a derived `Clone` is a full deep
/// copy and a cloned statement never shares storage with its source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All columns (*)
    Star,
    /// A possibly qualified identifier (`"posts"."user_id"`), quoted per dialect
    Ident(Vec<String>),
    /// SQL written verbatim
    Raw(String),
    /// A single bound value
    Arg(Value),
    /// SQL text whose `?` markers are replaced by placeholders for `args`
    Clause { sql: String, args: Vec<Value> },
    /// left op right
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    IsNull { expr: Box<Expr>, negated: bool },
    /// Conjunction, parenthesized when it has more than one operand
    And(Vec<Expr>),
    /// Disjunction, parenthesized when it has more than one operand
    Or(Vec<Expr>),
    In {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// Function call; the name is written verbatim
    Func { name: String, args: Vec<Expr> },
    /// Parenthesized, comma separated list
    Group(Vec<Expr>),
    /// expr AS alias
    Aliased { expr: Box<Expr>, alias: String },
    /// A nested SELECT in parentheses
    Subquery(Box<SelectQuery>),
    Exists(Box<SelectQuery>),
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Ident(name.split('.').map(str::to_string).collect())
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::from(name.as_str())
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Arg(v)
    }
}

impl From<SelectQuery> for Expr {
    fn from(q: SelectQuery) -> Self {
        Expr::Subquery(Box::new(q))
    }
}

/// Write `items` joined by `sep` inside parentheses, threading the index.
fn express_wrapped(
    w: &mut dyn Write,
    d: &dyn Dialect,
    start: usize,
    items: &[Expr],
    sep: &str,
) -> QuarryResult<Vec<Value>> {
    if items.len() == 1 {
        return items[0].express(w, d, start);
    }
    express_slice(w, d, start, items, "(", sep, ")")
}

/// Write an operand of a binary operator, parenthesizing compound nodes so the
/// tree's grouping survives operator precedence.
fn express_operand(w: &mut dyn Write, d: &dyn Dialect, start: usize, e: &Expr) -> QuarryResult<Vec<Value>> {
    match e {
        Expr::Binary { .. } | Expr::Not(_) | Expr::IsNull { .. } | Expr::In { .. } => {
            w.write_all(b"(")?;
            let args = e.express(w, d, start)?;
            w.write_all(b")")?;
            Ok(args)
        }
        _ => e.express(w, d, start),
    }
}

fn express_clause(
    w: &mut dyn Write,
    d: &dyn Dialect,
    start: usize,
    sql: &str,
    args: &[Value],
) -> QuarryResult<Vec<Value>> {
    let mut out = String::with_capacity(sql.len() + args.len() * 2);
    let mut used = 0;
    let mut in_literal = false;

    for c in sql.chars() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                out.push(c);
            }
            '?' if !in_literal => {
                if used >= args.len() {
                    return Err(QuarryError::render(format!(
                        "clause '{}' has more placeholders than its {} argument(s)",
                        sql,
                        args.len()
                    )));
                }
                out.push_str(&d.placeholder(start + used));
                used += 1;
            }
            _ => out.push(c),
        }
    }

    if used != args.len() {
        return Err(QuarryError::render(format!(
            "clause '{}' has {} placeholder(s) but {} argument(s)",
            sql,
            used,
            args.len()
        )));
    }

    w.write_all(out.as_bytes())?;
    Ok(args.to_vec())
}

impl Express for Expr {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        match self {
            Expr::Star => {
                w.write_all(b"*")?;
                Ok(Vec::new())
            }
            Expr::Ident(parts) => {
                if parts.is_empty() || parts.iter().any(String::is_empty) {
                    return Err(QuarryError::render(format!(
                        "empty identifier part in '{}'",
                        parts.join(".")
                    )));
                }
                let quoted: Vec<String> = parts
                    .iter()
                    .map(|p| if p == "*" { p.clone() } else { d.quote_identifier(p) })
                    .collect();
                w.write_all(quoted.join(".").as_bytes())?;
                Ok(Vec::new())
            }
            Expr::Raw(sql) => {
                w.write_all(sql.as_bytes())?;
                Ok(Vec::new())
            }
            Expr::Arg(v) => {
                w.write_all(d.placeholder(start).as_bytes())?;
                Ok(vec![v.clone()])
            }
            Expr::Clause { sql, args } => express_clause(w, d, start, sql, args),
            Expr::Binary { left, op, right } => {
                let mut args = express_operand(w, d, start, left)?;
                write!(w, " {} ", op)?;
                args.extend(express_operand(w, d, start + args.len(), right)?);
                Ok(args)
            }
            Expr::Not(e) => {
                w.write_all(b"NOT ")?;
                e.express(w, d, start)
            }
            Expr::IsNull { expr, negated } => {
                let args = expr.express(w, d, start)?;
                let kw: &[u8] = if *negated { b" IS NOT NULL" } else { b" IS NULL" };
                w.write_all(kw)?;
                Ok(args)
            }
            Expr::And(items) => {
                if items.is_empty() {
                    return Err(QuarryError::render("AND with no operands"));
                }
                express_wrapped(w, d, start, items, " AND ")
            }
            Expr::Or(items) => {
                if items.is_empty() {
                    return Err(QuarryError::render("OR with no operands"));
                }
                express_wrapped(w, d, start, items, " OR ")
            }
            Expr::In { expr, list, negated } => {
                if list.is_empty() {
                    return Err(QuarryError::render("IN with an empty list"));
                }
                let mut args = expr.express(w, d, start)?;
                let kw: &[u8] = if *negated { b" NOT IN " } else { b" IN " };
                w.write_all(kw)?;
                args.extend(express_slice(w, d, start + args.len(), list, "(", ", ", ")")?);
                Ok(args)
            }
            Expr::Func { name, args: fargs } => {
                if name.trim().is_empty() {
                    return Err(QuarryError::render("function call with an empty name"));
                }
                w.write_all(name.as_bytes())?;
                w.write_all(b"(")?;
                let args = express_slice(w, d, start, fargs, "", ", ", "")?;
                w.write_all(b")")?;
                Ok(args)
            }
            Expr::Group(items) => {
                w.write_all(b"(")?;
                let args = express_slice(w, d, start, items, "", ", ", "")?;
                w.write_all(b")")?;
                Ok(args)
            }
            Expr::Aliased { expr, alias } => {
                let args = expr.express(w, d, start)?;
                write!(w, " AS {}", d.quote_identifier(alias))?;
                Ok(args)
            }
            Expr::Subquery(q) => {
                w.write_all(b"(")?;
                let args = q.express(w, d, start)?;
                w.write_all(b")")?;
                Ok(args)
            }
            Expr::Exists(q) => {
                w.write_all(b"EXISTS (")?;
                let args = q.express(w, d, start)?;
                w.write_all(b")")?;
                Ok(args)
            }
        }
    }
}
