//! SELECT modifiers.
//!
//! Plain constructors return a boxed [`Mod`]; the refinable ones return a
//! chain, which goes into a list with `.boxed()`.

use crate::ast::Expr;
use crate::clause::{self, CombineStrategy, Distinct, JoinKind, LockStrength};
use crate::query::SelectQuery;

use super::{
    Columns, Combine, CteChain, Fetch, FromChain, GroupBy, GroupByDistinct, Having, JoinChain,
    Limit, LockChain, Mod, Offset, OrderChain, SetDistinct, Where, WindowChain,
};

pub type SelectMod = Mod<SelectQuery>;

pub fn with(name: &str, query: SelectQuery) -> CteChain<SelectQuery> {
    CteChain::new(name, query, false)
}

pub fn with_recursive(name: &str, query: SelectQuery) -> CteChain<SelectQuery> {
    CteChain::new(name, query, true)
}

pub fn columns<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> SelectMod {
    Box::new(Columns(exprs.into_iter().map(Into::into).collect()))
}

pub fn distinct() -> SelectMod {
    Box::new(SetDistinct(Distinct::default()))
}

pub fn distinct_on<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> SelectMod {
    Box::new(SetDistinct(Distinct {
        on: exprs.into_iter().map(Into::into).collect(),
    }))
}

pub fn from(table: impl Into<Expr>) -> FromChain<SelectQuery> {
    FromChain::new(table)
}

pub fn inner_join(table: impl Into<Expr>) -> JoinChain<SelectQuery> {
    JoinChain::new(JoinKind::Inner, table)
}

pub fn left_join(table: impl Into<Expr>) -> JoinChain<SelectQuery> {
    JoinChain::new(JoinKind::Left, table)
}

pub fn right_join(table: impl Into<Expr>) -> JoinChain<SelectQuery> {
    JoinChain::new(JoinKind::Right, table)
}

pub fn full_join(table: impl Into<Expr>) -> JoinChain<SelectQuery> {
    JoinChain::new(JoinKind::Full, table)
}

pub fn cross_join(table: impl Into<Expr>) -> JoinChain<SelectQuery> {
    JoinChain::new(JoinKind::Cross, table)
}

pub fn where_(condition: Expr) -> SelectMod {
    Box::new(Where(condition))
}

pub fn having(condition: Expr) -> SelectMod {
    Box::new(Having(condition))
}

pub fn group_by<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> SelectMod {
    Box::new(GroupBy(exprs.into_iter().map(Into::into).collect()))
}

pub fn group_by_distinct(distinct: bool) -> SelectMod {
    Box::new(GroupByDistinct(distinct))
}

pub fn window(name: &str) -> WindowChain<SelectQuery> {
    WindowChain::new(name)
}

pub fn order_by(expr: impl Into<Expr>) -> OrderChain<SelectQuery> {
    OrderChain::new(expr)
}

fn combine(strategy: CombineStrategy, all: bool, query: SelectQuery) -> SelectMod {
    Box::new(Combine(clause::Combine {
        strategy,
        all,
        query: Some(Box::new(query)),
    }))
}

pub fn union(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Union, false, query)
}

pub fn union_all(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Union, true, query)
}

pub fn intersect(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Intersect, false, query)
}

pub fn intersect_all(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Intersect, true, query)
}

pub fn except(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Except, false, query)
}

pub fn except_all(query: SelectQuery) -> SelectMod {
    combine(CombineStrategy::Except, true, query)
}

pub fn limit(count: u64) -> SelectMod {
    Box::new(Limit(count))
}

pub fn offset(count: u64) -> SelectMod {
    Box::new(Offset(count))
}

/// FETCH NEXT n ROWS ONLY
pub fn fetch(count: u64) -> SelectMod {
    Box::new(Fetch(clause::Fetch {
        count: Some(count),
        with_ties: false,
    }))
}

/// FETCH NEXT n ROWS WITH TIES
pub fn fetch_with_ties(count: u64) -> SelectMod {
    Box::new(Fetch(clause::Fetch {
        count: Some(count),
        with_ties: true,
    }))
}

fn lock<S: Into<String>>(
    strength: LockStrength,
    tables: impl IntoIterator<Item = S>,
) -> LockChain<SelectQuery> {
    LockChain::new(strength, tables.into_iter().map(Into::into).collect())
}

pub fn for_update<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> LockChain<SelectQuery> {
    lock(LockStrength::Update, tables)
}

pub fn for_no_key_update<S: Into<String>>(
    tables: impl IntoIterator<Item = S>,
) -> LockChain<SelectQuery> {
    lock(LockStrength::NoKeyUpdate, tables)
}

pub fn for_share<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> LockChain<SelectQuery> {
    lock(LockStrength::Share, tables)
}

pub fn for_key_share<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> LockChain<SelectQuery> {
    lock(LockStrength::KeyShare, tables)
}
