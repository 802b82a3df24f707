use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express, express_slice};

/// `DISTINCT` or `DISTINCT ON (exprs)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distinct {
    pub on: Vec<Expr>,
}

/// The projection list. Always rendered; an empty list selects `*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    pub columns: Vec<Expr>,
    pub distinct: Option<Distinct>,
}

impl Express for Select {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let mut args = Vec::new();
        w.write_all(b"SELECT ")?;

        if let Some(distinct) = &self.distinct {
            w.write_all(b"DISTINCT ")?;
            args.extend(express_slice(w, d, start, &distinct.on, "ON (", ", ", ") ")?);
        }

        if self.columns.is_empty() {
            w.write_all(b"*")?;
        } else {
            args.extend(express_slice(w, d, start + args.len(), &self.columns, "", ", ", "")?);
        }

        Ok(args)
    }
}
