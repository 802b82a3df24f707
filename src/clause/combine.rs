use std::io::Write;

use crate::ast::Value;
use crate::error::QuarryResult;
use crate::query::SelectQuery;
use crate::transpiler::{Dialect, Express};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CombineStrategy {
    #[default]
    Union,
    Intersect,
    Except,
}

impl CombineStrategy {
    fn keyword(&self) -> &'static str {
        match self {
            CombineStrategy::Union => "UNION",
            CombineStrategy::Intersect => "INTERSECT",
            CombineStrategy::Except => "EXCEPT",
        }
    }
}

/// The trailing set operation. Only one is held per statement; longer chains
/// nest a further combination inside `query`, which is then parenthesized
/// along with any operand that has its own ORDER BY, LIMIT, OFFSET, FETCH,
/// locking or WITH.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combine {
    pub strategy: CombineStrategy,
    pub all: bool,
    pub query: Option<Box<SelectQuery>>,
}

impl Combine {
    pub fn is_present(&self) -> bool {
        self.query.is_some()
    }
}

impl Express for Combine {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let Some(query) = &self.query else {
            return Ok(Vec::new());
        };

        w.write_all(self.strategy.keyword().as_bytes())?;
        if self.all {
            w.write_all(b" ALL")?;
        }
        if !query.needs_grouping() {
            w.write_all(b"\n")?;
            return query.express(w, d, start);
        }

        w.write_all(b" (")?;
        let args = query.express(w, d, start)?;
        w.write_all(b")")?;
        Ok(args)
    }
}
