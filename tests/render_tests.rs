use pretty_assertions::assert_eq;
use quarry::prelude::*;

fn active_users() -> SelectQuery {
    select([
        sm::columns(["id", "email"]),
        sm::from("users").boxed(),
        sm::where_(eq("active", true)),
    ])
}

#[test]
fn test_full_clause_order() {
    let big_spenders = select([
        sm::columns(["user_id"]),
        sm::from("orders").boxed(),
        sm::where_(gt("total", 100)),
    ]);

    let q = select([
        sm::with("big_spenders", big_spenders).boxed(),
        sm::columns([col("u.id"), func("count", [star()]).as_alias("n")]),
        sm::from("users").alias("u").boxed(),
        sm::inner_join("big_spenders")
            .alias("b")
            .on(cond(col("b.user_id"), BinaryOp::Eq, col("u.id")))
            .boxed(),
        sm::where_(eq("u.active", true)),
        sm::group_by(["u.id"]),
        sm::having(cond(func("count", [star()]), BinaryOp::Gt, arg(2))),
        sm::window("w").partition_by(["u.region"]).boxed(),
        sm::order_by("n").desc().boxed(),
        sm::limit(10),
        sm::offset(20),
        sm::fetch(5),
        sm::for_update(["u"]).nowait().boxed(),
    ]);

    let mut buf = Vec::new();
    let args = q.render(&mut buf, &Postgres, 3).unwrap();
    let sql = String::from_utf8(buf).unwrap();

    assert_eq!(
        sql,
        "WITH \"big_spenders\" AS (SELECT \"user_id\"\n\
         FROM \"orders\"\n\
         WHERE \"total\" > $3)\n\
         SELECT \"u\".\"id\", count(*) AS \"n\"\n\
         FROM \"users\" AS \"u\"\n\
         INNER JOIN \"big_spenders\" AS \"b\" ON \"b\".\"user_id\" = \"u\".\"id\"\n\
         WHERE \"u\".\"active\" = $4\n\
         GROUP BY \"u\".\"id\"\n\
         HAVING count(*) > $5\n\
         WINDOW \"w\" AS (PARTITION BY \"u\".\"region\")\n\
         ORDER BY \"n\" DESC\n\
         LIMIT 10\n\
         OFFSET 20\n\
         FETCH NEXT 5 ROWS ONLY\n\
         FOR UPDATE OF \"u\" NOWAIT\n"
    );
    assert_eq!(args, vec![Value::Int(100), Value::Bool(true), Value::Int(2)]);
}

#[test]
fn test_clause_omission() {
    let q = select([sm::from("users").boxed()]);
    assert_eq!(q.build(&Postgres).unwrap().0, "SELECT *\nFROM \"users\"\n");

    let q = select([
        sm::with("recent", select([sm::from("posts").boxed()])).boxed(),
        sm::from("recent").boxed(),
    ]);
    assert_eq!(
        q.build(&Postgres).unwrap().0,
        "WITH \"recent\" AS (SELECT *\nFROM \"posts\")\nSELECT *\nFROM \"recent\"\n"
    );
}

#[test]
fn test_union_then_order() {
    let admins = select([
        sm::columns(["id"]),
        sm::from("admins").boxed(),
        sm::where_(eq("level", 3)),
    ]);
    let q = select([
        sm::columns(["id"]),
        sm::from("users").boxed(),
        sm::where_(eq("active", true)),
        sm::union_all(admins),
        sm::order_by("id").boxed(),
    ]);

    let (sql, args) = q.build(&Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"id\"\nFROM \"users\"\nWHERE \"active\" = $1\nUNION ALL\nSELECT \"id\"\nFROM \"admins\"\nWHERE \"level\" = $2\nORDER BY \"id\"\n"
    );
    assert_eq!(args, vec![Value::Bool(true), Value::Int(3)]);
}

#[test]
fn test_nested_set_operation_keeps_grouping() {
    let q = select([
        sm::from("a").boxed(),
        sm::except(select([
            sm::from("b").boxed(),
            sm::except(select([sm::from("c").boxed()])),
        ])),
        sm::order_by("id").boxed(),
    ]);

    assert_eq!(
        q.build(&Postgres).unwrap().0,
        "SELECT *\nFROM \"a\"\n\
         EXCEPT (SELECT *\nFROM \"b\"\nEXCEPT\nSELECT *\nFROM \"c\")\n\
         ORDER BY \"id\"\n"
    );
}

#[test]
fn test_limited_operand_is_parenthesized() {
    let q = select([
        sm::from("a").boxed(),
        sm::where_(eq("x", 1)),
        sm::union(select([
            sm::from("b").boxed(),
            sm::where_(eq("y", 2)),
            sm::limit(1),
        ])),
        sm::order_by("id").boxed(),
    ]);

    let (sql, args) = q.build(&Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT *\nFROM \"a\"\nWHERE \"x\" = $1\n\
         UNION (SELECT *\nFROM \"b\"\nWHERE \"y\" = $2\nLIMIT 1)\n\
         ORDER BY \"id\"\n"
    );
    assert_eq!(args, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_combine_is_replaced() {
    let mut q = active_users();
    q.apply([sm::union(select([sm::from("a").boxed()]))]);
    q.apply([sm::except(select([sm::from("b").boxed()]))]);

    let (sql, _) = q.build(&Postgres).unwrap();
    assert!(sql.contains("EXCEPT\nSELECT *\nFROM \"b\""));
    assert!(!sql.contains("UNION"));
}

#[test]
fn test_contiguous_numbering() {
    let q = select([
        sm::with("x", select([sm::where_(eq("a", 1)), sm::where_(eq("b", 2))])).boxed(),
        sm::columns([func("coalesce", [col("name"), arg("anon")])]),
        sm::from("users").boxed(),
        sm::where_(is_in("role", ["admin", "mod", "owner"])),
        sm::where_(clause("age BETWEEN ? AND ?", [Value::Int(18), Value::Int(65)])),
        sm::limit(5),
        sm::having(eq("c", 9)),
    ]);

    let start = 7;
    let (sql, args) = {
        let mut buf = Vec::new();
        let args = q.render(&mut buf, &Postgres, start).unwrap();
        (String::from_utf8(buf).unwrap(), args)
    };

    assert_eq!(args.len(), 9);
    let mut pos = 0;
    for n in start..start + args.len() {
        let token = format!("${}", n);
        let found = sql[pos..].find(&token).unwrap_or_else(|| panic!("missing {} in {}", token, sql));
        pos += found + token.len();
    }
    assert!(!sql.contains(&format!("${}", start + args.len())));
    assert!(!sql.contains(&format!("${}", start - 1)));
}

#[test]
fn test_clone_is_independent_and_deterministic() {
    let template = active_users();
    let mut refined = template.clone();
    refined.apply([sm::where_(eq("org_id", 4)), sm::limit(1)]);

    let first = template.build(&Postgres).unwrap();
    let second = template.build(&Postgres).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.0,
        "SELECT \"id\", \"email\"\nFROM \"users\"\nWHERE \"active\" = $1\n"
    );

    let (sql, args) = refined.build(&Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"id\", \"email\"\nFROM \"users\"\nWHERE \"active\" = $1 AND \"org_id\" = $2\nLIMIT 1\n"
    );
    assert_eq!(args.len(), 2);
    assert_eq!(refined.clone().build(&Postgres).unwrap(), (sql, args));
}

#[test]
fn test_same_tree_across_dialects() {
    let q = active_users();
    assert_eq!(
        q.build(&MySql).unwrap().0,
        "SELECT `id`, `email`\nFROM `users`\nWHERE `active` = ?\n"
    );
    assert_eq!(
        q.build(&Sqlite).unwrap().0,
        "SELECT \"id\", \"email\"\nFROM \"users\"\nWHERE \"active\" = ?1\n"
    );
}

#[test]
fn test_distinct_on_and_lateral_join() {
    let latest = select([
        sm::columns(["title"]),
        sm::from("posts").boxed(),
        sm::where_(cond(col("posts.user_id"), BinaryOp::Eq, col("u.id"))),
        sm::order_by("created_at").desc().nulls_last().boxed(),
        sm::limit(1),
    ]);

    let q = select([
        sm::distinct_on(["u.org_id"]),
        sm::columns(["u.org_id", "p.title"]),
        sm::from("users").alias("u").boxed(),
        sm::left_join(subquery(latest)).lateral().alias("p").on(raw("true")).boxed(),
    ]);

    assert_eq!(
        q.build(&Postgres).unwrap().0,
        "SELECT DISTINCT ON (\"u\".\"org_id\") \"u\".\"org_id\", \"p\".\"title\"\n\
         FROM \"users\" AS \"u\"\n\
         LEFT JOIN LATERAL (SELECT \"title\"\n\
         FROM \"posts\"\n\
         WHERE \"posts\".\"user_id\" = \"u\".\"id\"\n\
         ORDER BY \"created_at\" DESC NULLS LAST\n\
         LIMIT 1) AS \"p\" ON true\n"
    );
}

#[test]
fn test_exists_and_or_group() {
    let has_posts = select([
        sm::columns([raw("1")]),
        sm::from("posts").boxed(),
        sm::where_(cond(col("posts.user_id"), BinaryOp::Eq, col("users.id"))),
    ]);
    let q = select([
        sm::from("users").boxed(),
        sm::where_(or([eq("role", "admin"), exists(has_posts)])),
        sm::where_(is_not_null("email")),
    ]);

    let (sql, args) = q.build(&Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT *\nFROM \"users\"\nWHERE (\"role\" = $1 OR EXISTS (SELECT 1\nFROM \"posts\"\nWHERE \"posts\".\"user_id\" = \"users\".\"id\")) AND \"email\" IS NOT NULL\n"
    );
    assert_eq!(args, vec![Value::from("admin")]);
}

#[test]
fn test_recursive_cte_with_columns() {
    let q = select([
        sm::with_recursive("tree", select([sm::from("nodes").boxed()]))
            .columns(["id", "parent_id"])
            .not_materialized()
            .boxed(),
        sm::from("tree").boxed(),
    ]);
    assert_eq!(
        q.build(&Postgres).unwrap().0,
        "WITH RECURSIVE \"tree\"(\"id\", \"parent_id\") AS NOT MATERIALIZED (SELECT *\nFROM \"nodes\")\nSELECT *\nFROM \"tree\"\n"
    );
}

#[test]
fn test_delete_statement() {
    let stale = select([
        sm::columns(["id"]),
        sm::from("sessions").boxed(),
        sm::where_(lt("expires_at", 1_700_000_000i64)),
    ]);
    let q = delete(
        "sessions",
        [
            dm::with("stale", stale).boxed(),
            dm::using("stale").alias("s").boxed(),
            dm::where_(cond(col("sessions.id"), BinaryOp::Eq, col("s.id"))),
            dm::returning(["sessions.id"]),
        ],
    );

    let (sql, args) = q.build(&Postgres).unwrap();
    assert_eq!(
        sql,
        "WITH \"stale\" AS (SELECT \"id\"\nFROM \"sessions\"\nWHERE \"expires_at\" < $1)\n\
         DELETE FROM \"sessions\"\n\
         USING \"stale\" AS \"s\"\n\
         WHERE \"sessions\".\"id\" = \"s\".\"id\"\n\
         RETURNING \"sessions\".\"id\"\n"
    );
    assert_eq!(args, vec![Value::Int(1_700_000_000)]);
}

#[test]
fn test_render_errors() {
    let empty_in = select([sm::from("t").boxed(), sm::where_(is_in::<i32>("id", []))]);
    assert!(matches!(empty_in.build(&Postgres), Err(QuarryError::Render(_))));

    let mismatch = select([sm::where_(clause("a = ? AND b = ?", [Value::Int(1)]))]);
    assert!(matches!(mismatch.build(&Postgres), Err(QuarryError::Render(_))));

    let join_only = select([sm::inner_join("posts").boxed()]);
    assert!(matches!(join_only.build(&Postgres), Err(QuarryError::Render(_))));
}

struct ClosedSink;

impl std::io::Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure() {
    let err = active_users().render(&mut ClosedSink, &Postgres, 1).unwrap_err();
    assert!(matches!(err, QuarryError::Sink(_)));
}
