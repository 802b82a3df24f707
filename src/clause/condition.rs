use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express, express_slice};

/// WHERE conditions, ANDed together. Present with at least one condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    pub conditions: Vec<Expr>,
}

impl Where {
    pub fn is_present(&self) -> bool {
        !self.conditions.is_empty()
    }
}

impl Express for Where {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        express_slice(w, d, start, &self.conditions, "WHERE ", " AND ", "")
    }
}

/// HAVING conditions, ANDed together. Present with at least one condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Having {
    pub conditions: Vec<Expr>,
}

impl Having {
    pub fn is_present(&self) -> bool {
        !self.conditions.is_empty()
    }
}

impl Express for Having {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        express_slice(w, d, start, &self.conditions, "HAVING ", " AND ", "")
    }
}
