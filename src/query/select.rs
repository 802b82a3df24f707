//! SELECT statements.

use std::io::Write;

use crate::ast::Value;
use crate::clause::{
    Combine, Fetch, FromItems, GroupBy, Having, Limit, Lock, Offset, OrderBy, Select, Where,
    Windows, With,
};
use crate::error::QuarryResult;
use crate::mods::QueryMod;
use crate::query::Query;
use crate::transpiler::{Dialect, Express, express_if};

/// A SELECT statement, one field per clause.
///
/// `Clone` is a full deep copy: a cloned template can be refined and rendered
/// without affecting the statement it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub with: With,
    pub select: Select,
    pub from: FromItems,
    pub where_clause: Where,
    pub group_by: GroupBy,
    pub having: Having,
    pub windows: Windows,
    pub combine: Combine,
    pub order_by: OrderBy,
    pub limit: Limit,
    pub offset: Offset,
    pub fetch: Fetch,
    pub lock: Lock,
}

impl_clauses!(SelectQuery {
    with: With,
    select: Select,
    from: FromItems,
    where_clause: Where,
    group_by: GroupBy,
    having: Having,
    windows: Windows,
    combine: Combine,
    order_by: OrderBy,
    limit: Limit,
    offset: Offset,
    fetch: Fetch,
    lock: Lock,
});

/// Build a SELECT from modifiers applied in order.
///
/// ```ignore
/// use quarry::prelude::*;
///
/// let q = select([
///     sm::columns(["id", "email"]),
///     sm::from("users").boxed(),
///     sm::where_(eq("active", true)),
///     sm::limit(10),
/// ]);
/// let (sql, args) = q.build(&Postgres)?;
/// ```
pub fn select<M: QueryMod<SelectQuery>>(mods: impl IntoIterator<Item = M>) -> SelectQuery {
    let mut q = SelectQuery::default();
    q.apply(mods);
    q
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply modifiers in the given order.
    pub fn apply<M: QueryMod<Self>>(&mut self, mods: impl IntoIterator<Item = M>) -> &mut Self {
        for m in mods {
            m.apply(self);
        }
        self
    }

    /// Whether the statement carries clauses that bind to the whole of a set
    /// operation, so it must be parenthesized as a set operand.
    pub(crate) fn needs_grouping(&self) -> bool {
        self.with.is_present()
            || self.combine.is_present()
            || self.order_by.is_present()
            || self.limit.is_present()
            || self.offset.is_present()
            || self.fetch.is_present()
            || self.lock.is_present()
    }
}

impl Express for SelectQuery {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let mut args: Vec<Value> = Vec::new();

        let with_args = express_if(w, d, start, &self.with, self.with.is_present(), "", "\n")?;
        args.extend(with_args);

        let select_args = express_if(w, d, start + args.len(), &self.select, true, "", "")?;
        args.extend(select_args);

        let from_args =
            express_if(w, d, start + args.len(), &self.from, self.from.is_present(), "\nFROM ", "")?;
        args.extend(from_args);

        let where_args = express_if(
            w,
            d,
            start + args.len(),
            &self.where_clause,
            self.where_clause.is_present(),
            "\n",
            "",
        )?;
        args.extend(where_args);

        let group_args =
            express_if(w, d, start + args.len(), &self.group_by, self.group_by.is_present(), "\n", "")?;
        args.extend(group_args);

        let having_args =
            express_if(w, d, start + args.len(), &self.having, self.having.is_present(), "\n", "")?;
        args.extend(having_args);

        let window_args =
            express_if(w, d, start + args.len(), &self.windows, self.windows.is_present(), "\n", "")?;
        args.extend(window_args);

        let combine_args =
            express_if(w, d, start + args.len(), &self.combine, self.combine.is_present(), "\n", "")?;
        args.extend(combine_args);

        let order_args =
            express_if(w, d, start + args.len(), &self.order_by, self.order_by.is_present(), "\n", "")?;
        args.extend(order_args);

        let limit_args =
            express_if(w, d, start + args.len(), &self.limit, self.limit.is_present(), "\n", "")?;
        args.extend(limit_args);

        let offset_args =
            express_if(w, d, start + args.len(), &self.offset, self.offset.is_present(), "\n", "")?;
        args.extend(offset_args);

        let fetch_args =
            express_if(w, d, start + args.len(), &self.fetch, self.fetch.is_present(), "\n", "")?;
        args.extend(fetch_args);

        let lock_args =
            express_if(w, d, start + args.len(), &self.lock, self.lock.is_present(), "\n", "")?;
        args.extend(lock_args);

        Ok(args)
    }
}

impl Query for SelectQuery {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::mods::sm;
    use crate::transpiler::{MySql, Postgres, Sqlite};

    #[test]
    fn test_simple_select() {
        let q = select([sm::from("users").boxed()]);
        let (sql, args) = q.build(&Postgres).unwrap();
        assert_eq!(sql, "SELECT *\nFROM \"users\"\n");
        assert!(args.is_empty());
    }

    #[test]
    fn test_select_without_from() {
        let q = select([sm::columns([raw("1")])]);
        assert_eq!(q.build(&Postgres).unwrap().0, "SELECT 1\n");
    }

    #[test]
    fn test_dialect_tokens() {
        let q = select([
            sm::columns(["id"]),
            sm::from("users").boxed(),
            sm::where_(eq("id", 7)),
            sm::where_(eq("org_id", 2)),
        ]);
        assert_eq!(
            q.build(&Postgres).unwrap().0,
            "SELECT \"id\"\nFROM \"users\"\nWHERE \"id\" = $1 AND \"org_id\" = $2\n"
        );
        assert_eq!(
            q.build(&MySql).unwrap().0,
            "SELECT `id`\nFROM `users`\nWHERE `id` = ? AND `org_id` = ?\n"
        );
        assert_eq!(
            q.build(&Sqlite).unwrap().0,
            "SELECT \"id\"\nFROM \"users\"\nWHERE \"id\" = ?1 AND \"org_id\" = ?2\n"
        );
    }

    #[test]
    fn test_render_error_aborts() {
        let q = select([sm::from("users").boxed(), sm::where_(and([]))]);
        let mut sink = Vec::new();
        assert!(q.render(&mut sink, &Postgres, 1).is_err());
    }
}
