use std::io::Write;

use crate::ast::{Expr, Value};
use crate::clause::OrderDef;
use crate::error::{QuarryError, QuarryResult};
use crate::transpiler::{Dialect, Express, express_slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    Range,
    Rows,
    Groups,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

impl std::fmt::Display for FrameBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameBound::UnboundedPreceding => write!(f, "UNBOUNDED PRECEDING"),
            FrameBound::Preceding(n) => write!(f, "{} PRECEDING", n),
            FrameBound::CurrentRow => write!(f, "CURRENT ROW"),
            FrameBound::Following(n) => write!(f, "{} FOLLOWING", n),
            FrameBound::UnboundedFollowing => write!(f, "UNBOUNDED FOLLOWING"),
        }
    }
}

/// Window frame: `ROWS start` or `ROWS BETWEEN start AND end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub mode: FrameMode,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.mode {
            FrameMode::Range => "RANGE",
            FrameMode::Rows => "ROWS",
            FrameMode::Groups => "GROUPS",
        };
        match self.end {
            Some(end) => write!(f, "{} BETWEEN {} AND {}", mode, self.start, end),
            None => write!(f, "{} {}", mode, self.start),
        }
    }
}

/// Separate consecutive window definition parts with one space.
fn space(w: &mut dyn Write, wrote: &mut bool) -> std::io::Result<()> {
    if *wrote {
        w.write_all(b" ")?;
    }
    *wrote = true;
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowDef {
    /// Name of an existing window this one refines
    pub from: Option<String>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderDef>,
    pub frame: Option<Frame>,
}

impl Express for WindowDef {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let mut wrote = false;

        if let Some(from) = &self.from {
            space(w, &mut wrote)?;
            w.write_all(d.quote_identifier(from).as_bytes())?;
        }

        let mut args = Vec::new();
        if !self.partition_by.is_empty() {
            space(w, &mut wrote)?;
            args.extend(express_slice(w, d, start, &self.partition_by, "PARTITION BY ", ", ", "")?);
        }
        if !self.order_by.is_empty() {
            space(w, &mut wrote)?;
            args.extend(express_slice(
                w,
                d,
                start + args.len(),
                &self.order_by,
                "ORDER BY ",
                ", ",
                "",
            )?);
        }
        if let Some(frame) = &self.frame {
            space(w, &mut wrote)?;
            write!(w, "{}", frame)?;
        }

        Ok(args)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedWindow {
    pub name: String,
    pub definition: WindowDef,
}

impl Express for NamedWindow {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        if self.name.is_empty() {
            return Err(QuarryError::render("window with an empty name"));
        }
        write!(w, "{} AS (", d.quote_identifier(&self.name))?;
        let args = self.definition.express(w, d, start)?;
        w.write_all(b")")?;
        Ok(args)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Windows {
    pub windows: Vec<NamedWindow>,
}

impl Windows {
    pub fn is_present(&self) -> bool {
        !self.windows.is_empty()
    }
}

impl Express for Windows {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        express_slice(w, d, start, &self.windows, "WINDOW ", ", ", "")
    }
}
