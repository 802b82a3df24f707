//! Clause containers.
//!
//! Each container holds the data of one clause, reports whether it is
//! present, and renders itself. An absent clause is the container's default
//! value and renders nothing.

pub mod combine;
pub mod condition;
pub mod from;
pub mod group_by;
pub mod limit;
pub mod lock;
pub mod order_by;
pub mod returning;
pub mod select;
pub mod window;
pub mod with;

pub use self::combine::{Combine, CombineStrategy};
pub use self::condition::{Having, Where};
pub use self::from::{FromItem, FromItems, Join, JoinKind};
pub use self::group_by::GroupBy;
pub use self::limit::{Fetch, Limit, Offset};
pub use self::lock::{Lock, LockStrength, LockWait};
pub use self::order_by::{NullsOrder, OrderBy, OrderDef, OrderDirection};
pub use self::returning::Returning;
pub use self::select::{Distinct, Select};
pub use self::window::{Frame, FrameBound, FrameMode, NamedWindow, WindowDef, Windows};
pub use self::with::{Cte, With};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::error::QuarryError;
    use crate::transpiler::{MySql, Postgres, to_sql};

    #[test]
    fn test_from_items_with_joins() {
        let mut from = FromItems::default();
        let mut users = FromItem::new("users");
        users.alias = Some("u".to_string());
        from.items.push(users);

        let mut join = Join::new(JoinKind::Left, "posts");
        join.to.alias = Some("p".to_string());
        join.on.push(cond(col("p.user_id"), crate::ast::BinaryOp::Eq, col("u.id")));
        join.on.push(eq("p.published", true));
        from.joins.push(join);

        let (sql, args) = to_sql(&from, &Postgres, 3).unwrap();
        assert_eq!(
            sql,
            "\"users\" AS \"u\"\nLEFT JOIN \"posts\" AS \"p\" ON \"p\".\"user_id\" = \"u\".\"id\" AND \"p\".\"published\" = $3"
        );
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_join_without_from_item_fails() {
        let mut from = FromItems::default();
        from.joins.push(Join::new(JoinKind::Inner, "posts"));
        assert!(from.is_present());
        assert!(to_sql(&from, &Postgres, 1).is_err());
    }

    #[test]
    fn test_join_using() {
        let mut from = FromItems::default();
        from.items.push(FromItem::new("a"));
        let mut join = Join::new(JoinKind::Inner, "b");
        join.using = vec!["id".to_string()];
        from.joins.push(join);
        let (sql, _) = to_sql(&from, &MySql, 1).unwrap();
        assert_eq!(sql, "`a`\nINNER JOIN `b` USING (`id`)");
    }

    fn from_with(join: Join) -> FromItems {
        FromItems {
            items: vec![FromItem::new("a")],
            joins: vec![join],
        }
    }

    #[test]
    fn test_join_condition_shapes() {
        let bare = Join::new(JoinKind::Inner, "b");
        assert!(matches!(to_sql(&from_with(bare), &Postgres, 1), Err(QuarryError::Render(_))));

        let mut cross_on = Join::new(JoinKind::Cross, "b");
        cross_on.on.push(raw("true"));
        assert!(matches!(to_sql(&from_with(cross_on), &Postgres, 1), Err(QuarryError::Render(_))));

        let mut natural_using = Join::new(JoinKind::Left, "b");
        natural_using.natural = true;
        natural_using.using = vec!["id".to_string()];
        assert!(to_sql(&from_with(natural_using), &Postgres, 1).is_err());

        let mut both = Join::new(JoinKind::Inner, "b");
        both.on.push(raw("true"));
        both.using = vec!["id".to_string()];
        assert!(to_sql(&from_with(both), &Postgres, 1).is_err());

        let (sql, _) = to_sql(&from_with(Join::new(JoinKind::Cross, "b")), &Postgres, 1).unwrap();
        assert_eq!(sql, "\"a\"\nCROSS JOIN \"b\"");

        let mut natural = Join::new(JoinKind::Left, "b");
        natural.natural = true;
        let (sql, _) = to_sql(&from_with(natural), &Postgres, 1).unwrap();
        assert_eq!(sql, "\"a\"\nNATURAL LEFT JOIN \"b\"");
    }

    #[test]
    fn test_window_definition() {
        let window = NamedWindow {
            name: "w".to_string(),
            definition: WindowDef {
                from: None,
                partition_by: vec![col("dept")],
                order_by: vec![OrderDef {
                    expr: col("salary"),
                    direction: Some(OrderDirection::Desc),
                    nulls: Some(NullsOrder::Last),
                }],
                frame: Some(Frame {
                    mode: FrameMode::Rows,
                    start: FrameBound::UnboundedPreceding,
                    end: Some(FrameBound::CurrentRow),
                }),
            },
        };
        let windows = Windows { windows: vec![window] };
        let (sql, _) = to_sql(&windows, &Postgres, 1).unwrap();
        assert_eq!(
            sql,
            "WINDOW \"w\" AS (PARTITION BY \"dept\" ORDER BY \"salary\" DESC NULLS LAST ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn test_lock_rendering() {
        let lock = Lock {
            strength: Some(LockStrength::NoKeyUpdate),
            tables: vec!["users".to_string(), "posts".to_string()],
            wait: LockWait::SkipLocked,
        };
        let (sql, args) = to_sql(&lock, &Postgres, 9).unwrap();
        assert_eq!(sql, "FOR NO KEY UPDATE OF \"users\", \"posts\" SKIP LOCKED");
        assert!(args.is_empty());
        assert!(!Lock::default().is_present());
    }

    #[test]
    fn test_fetch_rendering() {
        let fetch = Fetch { count: Some(5), with_ties: true };
        let (sql, _) = to_sql(&fetch, &Postgres, 1).unwrap();
        assert_eq!(sql, "FETCH NEXT 5 ROWS WITH TIES");
    }

    #[test]
    fn test_column_aliases_need_table_alias() {
        let mut item = FromItem::new("generate_series");
        item.alias_columns = vec!["n".to_string()];
        assert!(to_sql(&item, &Postgres, 1).is_err());
    }
}
