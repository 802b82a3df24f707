//! Statement assemblers.
//!
//! A statement owns one container per clause it supports and renders them in
//! fixed grammar order, threading the running placeholder index from clause
//! to clause.

use std::io::Write;

use crate::ast::Value;
use crate::error::{QuarryError, QuarryResult};
use crate::transpiler::{Dialect, Express};

/// Expose each clause container of a statement as `AsMut<Clause>`, the
/// capability generic modifiers are bounded on.
macro_rules! impl_clauses {
    ($query:ty { $($field:ident: $clause:ty),* $(,)? }) => {
        $(
            impl AsMut<$clause> for $query {
                fn as_mut(&mut self) -> &mut $clause {
                    &mut self.$field
                }
            }
        )*
    };
}

pub mod delete;
pub mod select;

pub use delete::{DeleteQuery, delete};
pub use select::{SelectQuery, select};

/// A complete statement: renders with a terminating separator.
pub trait Query: Express {
    /// Render the statement to `w`, numbering placeholders from `start`.
    ///
    /// On error the sink holds undefined partial output and must be discarded.
    fn render(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        let args = self.express(w, d, start)?;
        w.write_all(b"\n")?;
        tracing::debug!(dialect = d.name(), params = args.len(), "rendered statement");
        Ok(args)
    }

    /// Render into an owned string with placeholders numbered from 1.
    fn build(&self, d: &dyn Dialect) -> QuarryResult<(String, Vec<Value>)> {
        let mut buf = Vec::new();
        let args = self.render(&mut buf, d, 1)?;
        let sql = String::from_utf8(buf)
            .map_err(|e| QuarryError::render(format!("non UTF-8 output: {}", e)))?;
        Ok((sql, args))
    }
}
