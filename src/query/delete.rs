//! DELETE statements.

use std::io::Write;

use crate::ast::{Expr, Value};
use crate::clause::{FromItem, FromItems, Returning, Where, With};
use crate::error::QuarryResult;
use crate::mods::QueryMod;
use crate::query::Query;
use crate::transpiler::{Dialect, Express, express_if};

/// A DELETE statement. Joined tables go in `using`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub with: With,
    pub table: FromItem,
    pub using: FromItems,
    pub where_clause: Where,
    pub returning: Returning,
}

impl_clauses!(DeleteQuery {
    with: With,
    table: FromItem,
    using: FromItems,
    where_clause: Where,
    returning: Returning,
});

/// Build a DELETE on `table` from modifiers applied in order.
pub fn delete<M: QueryMod<DeleteQuery>>(
    table: impl Into<Expr>,
    mods: impl IntoIterator<Item = M>,
) -> DeleteQuery {
    let mut q = DeleteQuery::new(table);
    q.apply(mods);
    q
}

impl DeleteQuery {
    pub fn new(table: impl Into<Expr>) -> Self {
        Self {
            with: With::default(),
            table: FromItem::new(table),
            using: FromItems::default(),
            where_clause: Where::default(),
            returning: Returning::default(),
        }
    }

    pub fn apply<M: QueryMod<Self>>(&mut self, mods: impl IntoIterator<Item = M>) -> &mut Self {
        for m in mods {
            m.apply(self);
        }
        self
    }
}

impl Express for DeleteQuery {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let mut args = express_if(w, d, start, &self.with, self.with.is_present(), "", "\n")?;

        args.extend(express_if(w, d, start + args.len(), &self.table, true, "DELETE FROM ", "")?);

        args.extend(express_if(
            w,
            d,
            start + args.len(),
            &self.using,
            self.using.is_present(),
            "\nUSING ",
            "",
        )?);

        args.extend(express_if(
            w,
            d,
            start + args.len(),
            &self.where_clause,
            self.where_clause.is_present(),
            "\n",
            "",
        )?);

        args.extend(express_if(
            w,
            d,
            start + args.len(),
            &self.returning,
            self.returning.is_present(),
            "\n",
            "",
        )?);

        Ok(args)
    }
}

impl Query for DeleteQuery {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::mods::dm;
    use crate::transpiler::{Postgres, Sqlite};

    #[test]
    fn test_delete_with_using_and_returning() {
        let q = delete(
            "films",
            [
                dm::only(),
                dm::using("producers").alias("p").boxed(),
                dm::where_(cond(col("films.producer_id"), crate::ast::BinaryOp::Eq, col("p.id"))),
                dm::where_(eq("p.name", "foo")),
                dm::returning(["films.id"]),
            ],
        );
        let (sql, args) = q.build(&Postgres).unwrap();
        assert_eq!(
            sql,
            "DELETE FROM ONLY \"films\"\nUSING \"producers\" AS \"p\"\nWHERE \"films\".\"producer_id\" = \"p\".\"id\" AND \"p\".\"name\" = $1\nRETURNING \"films\".\"id\"\n"
        );
        assert_eq!(args, vec![Value::from("foo")]);
    }

    #[test]
    fn test_bare_delete() {
        let q = DeleteQuery::new("sessions");
        assert_eq!(q.build(&Sqlite).unwrap().0, "DELETE FROM \"sessions\"\n");
    }
}
