//! Loading the rows on the far end of a relationship.

use crate::ast::builders::cond;
use crate::ast::{BinaryOp, Expr, Value};
use crate::error::{QuarryError, QuarryResult};
use crate::mods::{QueryMod, sm};
use crate::query::SelectQuery;

use super::Relationship;

fn qualified(table: &str, column: &str) -> Expr {
    Expr::Ident(vec![table.to_string(), column.to_string()])
}

/// Build the SELECT that loads the rows `rel` points at from one source row.
///
/// `values` are the source row's key values, one per source column of the
/// first side, in column-name order.
///
/// ```ignore
/// let rel = rels.find("users", "posts_user_id_fkey")?;
/// let q = related_query(rel, vec![Value::Int(7)])?;
/// // SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $1
/// ```
pub fn related_query(rel: &Relationship, values: Vec<Value>) -> QuarryResult<SelectQuery> {
    let (first, last) = match rel.sides.as_slice() {
        [only] => (only, only),
        [first, last] => (first, last),
        _ => {
            return Err(QuarryError::render(format!(
                "relationship '{}' has {} sides",
                rel.name,
                rel.sides.len()
            )));
        }
    };

    if values.len() != first.pairs.len() {
        return Err(QuarryError::render(format!(
            "relationship '{}' needs {} values, got {}",
            rel.name,
            first.pairs.len(),
            values.len()
        )));
    }

    let target = last.to.as_str();
    let mut q = SelectQuery::new();
    q.apply([
        sm::columns([qualified(target, "*")]),
        sm::from(target).boxed(),
    ]);

    if rel.sides.len() == 2 {
        let through = first.to.as_str();
        let mut join = sm::inner_join(through);
        for (join_col, target_col) in &last.pairs {
            join = join.on(cond(
                qualified(through, join_col),
                BinaryOp::Eq,
                qualified(target, target_col),
            ));
        }
        join.apply(&mut q);
    }

    // Filter on the columns the first hop lands on.
    let filtered = first.to.as_str();
    for ((_, column), value) in first.pairs.iter().zip(values) {
        q.apply([sm::where_(cond(qualified(filtered, column), BinaryOp::Eq, Expr::Arg(value)))]);
    }

    Ok(q)
}
