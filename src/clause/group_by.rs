use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express, express_slice};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBy {
    pub groups: Vec<Expr>,
    pub distinct: bool,
}

impl GroupBy {
    pub fn is_present(&self) -> bool {
        !self.groups.is_empty()
    }
}

impl Express for GroupBy {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let prefix = if self.distinct { "GROUP BY DISTINCT " } else { "GROUP BY " };
        express_slice(w, d, start, &self.groups, prefix, ", ", "")
    }
}
