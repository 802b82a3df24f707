use std::io::Write;

use crate::ast::{Expr, Value};
use crate::error::{QuarryError, QuarryResult};
use crate::transpiler::{Dialect, Express, express_slice};

/// A table, sub-select or function in FROM or JOIN position.
#[derive(Debug, Clone, PartialEq)]
pub struct FromItem {
    pub table: Expr,
    pub alias: Option<String>,
    /// Column aliases, `AS t (a, b)`; needs `alias`
    pub alias_columns: Vec<String>,
    pub only: bool,
    pub lateral: bool,
}

impl FromItem {
    pub fn new(table: impl Into<Expr>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            alias_columns: Vec::new(),
            only: false,
            lateral: false,
        }
    }
}

impl Express for FromItem {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        if self.only {
            w.write_all(b"ONLY ")?;
        }
        if self.lateral {
            w.write_all(b"LATERAL ")?;
        }

        let args = self.table.express(w, d, start)?;

        match &self.alias {
            Some(alias) => {
                write!(w, " AS {}", d.quote_identifier(alias))?;
                if !self.alias_columns.is_empty() {
                    let cols: Vec<String> =
                        self.alias_columns.iter().map(|c| d.quote_identifier(c)).collect();
                    write!(w, " ({})", cols.join(", "))?;
                }
            }
            None if !self.alias_columns.is_empty() => {
                return Err(QuarryError::render("column aliases without a table alias"));
            }
            None => {}
        }

        Ok(args)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A join onto the FROM list. `on` conditions are ANDed.
///
/// Qualified joins need exactly one of `on` or `using`; CROSS and NATURAL
/// joins take neither.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub natural: bool,
    pub to: FromItem,
    pub on: Vec<Expr>,
    pub using: Vec<String>,
}

impl Join {
    pub fn new(kind: JoinKind, to: impl Into<Expr>) -> Self {
        Self {
            kind,
            natural: false,
            to: FromItem::new(to),
            on: Vec::new(),
            using: Vec::new(),
        }
    }
}

impl Join {
    fn check(&self) -> QuarryResult<()> {
        let has_on = !self.on.is_empty();
        let has_using = !self.using.is_empty();
        let unqualified = self.natural || self.kind == JoinKind::Cross;

        match (unqualified, has_on, has_using) {
            (_, true, true) => Err(QuarryError::render("join with both ON and USING")),
            (true, true, _) | (true, _, true) => Err(QuarryError::render(format!(
                "{}{} takes no join condition",
                if self.natural { "NATURAL " } else { "" },
                self.kind.keyword()
            ))),
            (false, false, false) => Err(QuarryError::render(format!(
                "{} without ON or USING",
                self.kind.keyword()
            ))),
            _ => Ok(()),
        }
    }
}

impl Express for Join {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        self.check()?;

        if self.natural {
            w.write_all(b"NATURAL ")?;
        }
        write!(w, "{} ", self.kind.keyword())?;
        let mut args = self.to.express(w, d, start)?;

        if !self.using.is_empty() {
            let cols: Vec<String> = self.using.iter().map(|c| d.quote_identifier(c)).collect();
            write!(w, " USING ({})", cols.join(", "))?;
        } else {
            args.extend(express_slice(w, d, start + args.len(), &self.on, " ON ", " AND ", "")?);
        }

        Ok(args)
    }
}

/// The FROM list and the joins chained onto it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FromItems {
    pub items: Vec<FromItem>,
    pub joins: Vec<Join>,
}

impl FromItems {
    pub fn is_present(&self) -> bool {
        !self.items.is_empty() || !self.joins.is_empty()
    }
}

impl Express for FromItems {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        if self.items.is_empty() {
            return Err(QuarryError::render("JOIN without a FROM item"));
        }

        let mut args = express_slice(w, d, start, &self.items, "", ",\n", "")?;
        args.extend(express_slice(w, d, start + args.len(), &self.joins, "\n", "\n", "")?);
        Ok(args)
    }
}
