use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express, express_slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDef {
    pub expr: Expr,
    pub direction: Option<OrderDirection>,
    pub nulls: Option<NullsOrder>,
}

impl OrderDef {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: None,
            nulls: None,
        }
    }
}

impl Express for OrderDef {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let args = self.expr.express(w, d, start)?;
        match self.direction {
            Some(OrderDirection::Asc) => w.write_all(b" ASC")?,
            Some(OrderDirection::Desc) => w.write_all(b" DESC")?,
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => w.write_all(b" NULLS FIRST")?,
            Some(NullsOrder::Last) => w.write_all(b" NULLS LAST")?,
            None => {}
        }
        Ok(args)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    pub expressions: Vec<OrderDef>,
}

impl OrderBy {
    pub fn is_present(&self) -> bool {
        !self.expressions.is_empty()
    }
}

impl Express for OrderBy {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        express_slice(w, d, start, &self.expressions, "ORDER BY ", ", ", "")
    }
}
