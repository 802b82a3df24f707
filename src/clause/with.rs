use std::io::Write;

use crate::ast::Value;
use crate::error::{QuarryError, QuarryResult};
use crate::query::SelectQuery;
use crate::transpiler::{Dialect, Express, express_slice};

/// One common table expression: `name (cols) AS [NOT] MATERIALIZED (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: String,
    pub columns: Vec<String>,
    /// `None` leaves materialization to the planner
    pub materialized: Option<bool>,
    pub query: Box<SelectQuery>,
}

impl Cte {
    pub fn new(name: impl Into<String>, query: SelectQuery) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            materialized: None,
            query: Box::new(query),
        }
    }
}

impl Express for Cte {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        if self.name.is_empty() {
            return Err(QuarryError::render("CTE with an empty name"));
        }

        w.write_all(d.quote_identifier(&self.name).as_bytes())?;
        if !self.columns.is_empty() {
            let cols: Vec<String> = self.columns.iter().map(|c| d.quote_identifier(c)).collect();
            write!(w, "({})", cols.join(", "))?;
        }
        w.write_all(b" AS ")?;
        match self.materialized {
            Some(true) => w.write_all(b"MATERIALIZED ")?,
            Some(false) => w.write_all(b"NOT MATERIALIZED ")?,
            None => {}
        }

        w.write_all(b"(")?;
        let args = self.query.express(w, d, start)?;
        w.write_all(b")")?;
        Ok(args)
    }
}

/// The WITH clause. Present when it holds at least one CTE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

impl With {
    pub fn is_present(&self) -> bool {
        !self.ctes.is_empty()
    }
}

impl Express for With {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let prefix = if self.recursive { "WITH RECURSIVE " } else { "WITH " };
        express_slice(w, d, start, &self.ctes, prefix, ",\n", "")
    }
}
