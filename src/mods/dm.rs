//! DELETE modifiers.

use crate::ast::Expr;
use crate::clause::JoinKind;
use crate::query::{DeleteQuery, SelectQuery};

use super::{CteChain, FromChain, JoinChain, Mod, Only, Returning, Where};

pub type DeleteMod = Mod<DeleteQuery>;

pub fn with(name: &str, query: SelectQuery) -> CteChain<DeleteQuery> {
    CteChain::new(name, query, false)
}

pub fn with_recursive(name: &str, query: SelectQuery) -> CteChain<DeleteQuery> {
    CteChain::new(name, query, true)
}

/// Skip inheritance children of the target table.
pub fn only() -> DeleteMod {
    Box::new(Only)
}

/// Add a USING item.
pub fn using(table: impl Into<Expr>) -> FromChain<DeleteQuery> {
    FromChain::new(table)
}

pub fn inner_join(table: impl Into<Expr>) -> JoinChain<DeleteQuery> {
    JoinChain::new(JoinKind::Inner, table)
}

pub fn left_join(table: impl Into<Expr>) -> JoinChain<DeleteQuery> {
    JoinChain::new(JoinKind::Left, table)
}

pub fn where_(condition: Expr) -> DeleteMod {
    Box::new(Where(condition))
}

pub fn returning<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> DeleteMod {
    Box::new(Returning(exprs.into_iter().map(Into::into).collect()))
}
