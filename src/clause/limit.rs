//! Row-count clauses. Counts are literals and bind no parameters, but they
//! still take the running index like every other clause.

use std::io::Write;

use crate::ast::Value;
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit {
    pub count: Option<u64>,
}

impl Limit {
    pub fn is_present(&self) -> bool {
        self.count.is_some()
    }
}

impl Express for Limit {
    fn express(&self, w: &mut dyn Write, _d: &dyn Dialect, _start: usize) -> QuarryResult<Vec<Value>> {
        if let Some(count) = self.count {
            write!(w, "LIMIT {}", count)?;
        }
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    pub count: Option<u64>,
}

impl Offset {
    pub fn is_present(&self) -> bool {
        self.count.is_some()
    }
}

impl Express for Offset {
    fn express(&self, w: &mut dyn Write, _d: &dyn Dialect, _start: usize) -> QuarryResult<Vec<Value>> {
        if let Some(count) = self.count {
            write!(w, "OFFSET {}", count)?;
        }
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fetch {
    pub count: Option<u64>,
    pub with_ties: bool,
}

impl Fetch {
    pub fn is_present(&self) -> bool {
        self.count.is_some()
    }
}

impl Express for Fetch {
    fn express(&self, w: &mut dyn Write, _d: &dyn Dialect, _start: usize) -> QuarryResult<Vec<Value>> {
        if let Some(count) = self.count {
            let tail = if self.with_ties { "WITH TIES" } else { "ONLY" };
            write!(w, "FETCH NEXT {} ROWS {}", count, tail)?;
        }
        Ok(Vec::new())
    }
}
