//! Query modifiers.
//!
//! A modifier is a deferred mutation of a statement. Modifiers that touch a
//! single clause are generic over any statement exposing that clause through
//! `AsMut`, so `Where` serves SELECT and DELETE alike. The statement-specific
//! constructor namespaces live in [`sm`] and [`dm`].

pub mod dm;
pub mod sm;

use std::marker::PhantomData;

use crate::ast::Expr;
use crate::clause::{
    self, Cte, Distinct, Frame, FromItem, FromItems, Join, JoinKind, LockStrength, LockWait,
    NamedWindow, NullsOrder, OrderDef, OrderDirection, WindowDef,
};
use crate::query::SelectQuery;

/// Something that can be applied to a statement of kind `Q`.
pub trait QueryMod<Q> {
    fn apply(&self, q: &mut Q);

    /// Erase the concrete modifier type so it can sit in a list with others.
    fn boxed(self) -> Mod<Q>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// A type-erased modifier.
pub type Mod<Q> = Box<dyn QueryMod<Q>>;

impl<Q, M: QueryMod<Q> + ?Sized> QueryMod<Q> for Box<M> {
    fn apply(&self, q: &mut Q) {
        (**self).apply(q)
    }
}

/// Apply a closure as a modifier.
pub struct ModFn<F>(pub F);

impl<Q, F: Fn(&mut Q)> QueryMod<Q> for ModFn<F> {
    fn apply(&self, q: &mut Q) {
        (self.0)(q)
    }
}

// ---- single-clause modifiers ----

/// Append projection columns.
#[derive(Debug, Clone)]
pub struct Columns(pub Vec<Expr>);

impl<Q: AsMut<clause::Select>> QueryMod<Q> for Columns {
    fn apply(&self, q: &mut Q) {
        q.as_mut().columns.extend(self.0.iter().cloned());
    }
}

/// Set DISTINCT, replacing any earlier DISTINCT ON list.
#[derive(Debug, Clone)]
pub struct SetDistinct(pub Distinct);

impl<Q: AsMut<clause::Select>> QueryMod<Q> for SetDistinct {
    fn apply(&self, q: &mut Q) {
        q.as_mut().distinct = Some(self.0.clone());
    }
}

/// AND a condition into WHERE.
#[derive(Debug, Clone)]
pub struct Where(pub Expr);

impl<Q: AsMut<clause::Where>> QueryMod<Q> for Where {
    fn apply(&self, q: &mut Q) {
        q.as_mut().conditions.push(self.0.clone());
    }
}

/// AND a condition into HAVING.
#[derive(Debug, Clone)]
pub struct Having(pub Expr);

impl<Q: AsMut<clause::Having>> QueryMod<Q> for Having {
    fn apply(&self, q: &mut Q) {
        q.as_mut().conditions.push(self.0.clone());
    }
}

/// Append grouping expressions.
#[derive(Debug, Clone)]
pub struct GroupBy(pub Vec<Expr>);

impl<Q: AsMut<clause::GroupBy>> QueryMod<Q> for GroupBy {
    fn apply(&self, q: &mut Q) {
        q.as_mut().groups.extend(self.0.iter().cloned());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GroupByDistinct(pub bool);

impl<Q: AsMut<clause::GroupBy>> QueryMod<Q> for GroupByDistinct {
    fn apply(&self, q: &mut Q) {
        q.as_mut().distinct = self.0;
    }
}

/// Replace the set operation.
#[derive(Debug, Clone)]
pub struct Combine(pub clause::Combine);

impl<Q: AsMut<clause::Combine>> QueryMod<Q> for Combine {
    fn apply(&self, q: &mut Q) {
        *q.as_mut() = self.0.clone();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Limit(pub u64);

impl<Q: AsMut<clause::Limit>> QueryMod<Q> for Limit {
    fn apply(&self, q: &mut Q) {
        q.as_mut().count = Some(self.0);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Offset(pub u64);

impl<Q: AsMut<clause::Offset>> QueryMod<Q> for Offset {
    fn apply(&self, q: &mut Q) {
        q.as_mut().count = Some(self.0);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Fetch(pub clause::Fetch);

impl<Q: AsMut<clause::Fetch>> QueryMod<Q> for Fetch {
    fn apply(&self, q: &mut Q) {
        *q.as_mut() = self.0;
    }
}

/// Append RETURNING expressions.
#[derive(Debug, Clone)]
pub struct Returning(pub Vec<Expr>);

impl<Q: AsMut<clause::Returning>> QueryMod<Q> for Returning {
    fn apply(&self, q: &mut Q) {
        q.as_mut().expressions.extend(self.0.iter().cloned());
    }
}

/// Mark the target table ONLY (no inheritance children).
#[derive(Debug, Clone, Copy)]
pub struct Only;

impl<Q: AsMut<FromItem>> QueryMod<Q> for Only {
    fn apply(&self, q: &mut Q) {
        q.as_mut().only = true;
    }
}

// ---- chains ----
//
// Chains carry the statement kind so `.boxed()` needs no annotation. Nothing
// is mutated until the chain is applied.

/// A pending row lock.
#[derive(Debug, Clone)]
pub struct LockChain<Q> {
    lock: clause::Lock,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> LockChain<Q> {
    pub(crate) fn new(strength: LockStrength, tables: Vec<String>) -> Self {
        Self {
            lock: clause::Lock {
                strength: Some(strength),
                tables,
                wait: LockWait::Wait,
            },
            _q: PhantomData,
        }
    }

    pub fn nowait(mut self) -> Self {
        self.lock.wait = LockWait::NoWait;
        self
    }

    pub fn skip_locked(mut self) -> Self {
        self.lock.wait = LockWait::SkipLocked;
        self
    }
}

impl<Q: AsMut<clause::Lock>> QueryMod<Q> for LockChain<Q> {
    fn apply(&self, q: &mut Q) {
        *q.as_mut() = self.lock.clone();
    }
}

/// A pending FROM (or USING) item.
#[derive(Debug, Clone)]
pub struct FromChain<Q> {
    item: FromItem,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> FromChain<Q> {
    pub(crate) fn new(table: impl Into<Expr>) -> Self {
        Self {
            item: FromItem::new(table),
            _q: PhantomData,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.item.alias = Some(alias.to_string());
        self
    }

    /// Name the item's columns; needs an alias when rendered.
    pub fn alias_columns<S: Into<String>>(mut self, cols: impl IntoIterator<Item = S>) -> Self {
        self.item.alias_columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn only(mut self) -> Self {
        self.item.only = true;
        self
    }

    pub fn lateral(mut self) -> Self {
        self.item.lateral = true;
        self
    }
}

impl<Q: AsMut<FromItems>> QueryMod<Q> for FromChain<Q> {
    fn apply(&self, q: &mut Q) {
        q.as_mut().items.push(self.item.clone());
    }
}

/// A pending join.
#[derive(Debug, Clone)]
pub struct JoinChain<Q> {
    join: Join,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> JoinChain<Q> {
    pub(crate) fn new(kind: JoinKind, table: impl Into<Expr>) -> Self {
        Self {
            join: Join::new(kind, table),
            _q: PhantomData,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.join.to.alias = Some(alias.to_string());
        self
    }

    pub fn lateral(mut self) -> Self {
        self.join.to.lateral = true;
        self
    }

    pub fn natural(mut self) -> Self {
        self.join.natural = true;
        self
    }

    /// AND a join condition.
    pub fn on(mut self, condition: Expr) -> Self {
        self.join.on.push(condition);
        self
    }

    /// Join on equality of `left` and `right` columns.
    pub fn on_eq(self, left: &str, right: &str) -> Self {
        self.on(crate::ast::builders::cond(
            left,
            crate::ast::BinaryOp::Eq,
            right,
        ))
    }

    pub fn using<S: Into<String>>(mut self, cols: impl IntoIterator<Item = S>) -> Self {
        self.join.using = cols.into_iter().map(Into::into).collect();
        self
    }
}

impl<Q: AsMut<FromItems>> QueryMod<Q> for JoinChain<Q> {
    fn apply(&self, q: &mut Q) {
        q.as_mut().joins.push(self.join.clone());
    }
}

/// A pending ORDER BY term.
#[derive(Debug, Clone)]
pub struct OrderChain<Q> {
    def: OrderDef,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> OrderChain<Q> {
    pub(crate) fn new(expr: impl Into<Expr>) -> Self {
        Self {
            def: OrderDef::new(expr),
            _q: PhantomData,
        }
    }

    pub fn asc(mut self) -> Self {
        self.def.direction = Some(OrderDirection::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.def.direction = Some(OrderDirection::Desc);
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.def.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.def.nulls = Some(NullsOrder::Last);
        self
    }
}

impl<Q: AsMut<clause::OrderBy>> QueryMod<Q> for OrderChain<Q> {
    fn apply(&self, q: &mut Q) {
        q.as_mut().expressions.push(self.def.clone());
    }
}

/// A pending named window.
#[derive(Debug, Clone)]
pub struct WindowChain<Q> {
    window: NamedWindow,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> WindowChain<Q> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            window: NamedWindow {
                name: name.to_string(),
                definition: WindowDef::default(),
            },
            _q: PhantomData,
        }
    }

    /// Refine an existing window.
    pub fn from(mut self, base: &str) -> Self {
        self.window.definition.from = Some(base.to_string());
        self
    }

    pub fn partition_by<E: Into<Expr>>(mut self, exprs: impl IntoIterator<Item = E>) -> Self {
        self.window.definition.partition_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    pub fn order_by(mut self, def: OrderDef) -> Self {
        self.window.definition.order_by.push(def);
        self
    }

    pub fn frame(mut self, frame: Frame) -> Self {
        self.window.definition.frame = Some(frame);
        self
    }
}

impl<Q: AsMut<clause::Windows>> QueryMod<Q> for WindowChain<Q> {
    fn apply(&self, q: &mut Q) {
        q.as_mut().windows.push(self.window.clone());
    }
}

/// A pending common table expression.
#[derive(Debug, Clone)]
pub struct CteChain<Q> {
    cte: Cte,
    recursive: bool,
    _q: PhantomData<fn() -> Q>,
}

impl<Q> CteChain<Q> {
    pub(crate) fn new(name: &str, query: SelectQuery, recursive: bool) -> Self {
        Self {
            cte: Cte::new(name, query),
            recursive,
            _q: PhantomData,
        }
    }

    pub fn columns<S: Into<String>>(mut self, cols: impl IntoIterator<Item = S>) -> Self {
        self.cte.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn materialized(mut self) -> Self {
        self.cte.materialized = Some(true);
        self
    }

    pub fn not_materialized(mut self) -> Self {
        self.cte.materialized = Some(false);
        self
    }
}

impl<Q: AsMut<clause::With>> QueryMod<Q> for CteChain<Q> {
    fn apply(&self, q: &mut Q) {
        let with = q.as_mut();
        if self.recursive {
            with.recursive = true;
        }
        with.ctes.push(self.cte.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::query::{DeleteQuery, Query, select};
    use crate::transpiler::Postgres;

    #[test]
    fn test_where_accumulates() {
        let q = select([
            sm::from("users").boxed(),
            sm::where_(eq("a", 1)),
            sm::where_(eq("b", 2)),
        ]);
        assert_eq!(q.where_clause.conditions.len(), 2);
    }

    #[test]
    fn test_limit_overwrites() {
        let q = select([sm::limit(10), sm::limit(20), sm::offset(5), sm::offset(0)]);
        assert_eq!(q.limit.count, Some(20));
        assert_eq!(q.offset.count, Some(0));
    }

    #[test]
    fn test_lock_chain_is_deferred() {
        let chain = sm::for_update(["users"]).skip_locked();
        let mut q = select([sm::from("users").boxed()]);
        assert!(!q.lock.is_present());

        q.apply([chain]);
        assert_eq!(q.lock.wait, LockWait::SkipLocked);
        assert_eq!(q.lock.strength, Some(LockStrength::Update));
    }

    #[test]
    fn test_same_mod_serves_delete() {
        let mut q = DeleteQuery::new("users");
        q.apply([Where(eq("id", 3))]);
        let (sql, _) = q.build(&Postgres).unwrap();
        assert_eq!(sql, "DELETE FROM \"users\"\nWHERE \"id\" = $1\n");
    }

    #[test]
    fn test_closure_mod() {
        let mut q = SelectQuery::new();
        q.apply([ModFn(|q: &mut SelectQuery| q.limit.count = Some(1))]);
        assert_eq!(q.limit.count, Some(1));
    }
}
