use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express, express_slice};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Returning {
    pub expressions: Vec<Expr>,
}

impl Returning {
    pub fn is_present(&self) -> bool {
        !self.expressions.is_empty()
    }
}

impl Express for Returning {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        express_slice(w, d, start, &self.expressions, "RETURNING ", ", ", "")
    }
}
