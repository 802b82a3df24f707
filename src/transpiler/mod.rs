//! SQL rendering for quarry statement trees.
//!
//! Every renderable node implements [`Express`]: it writes itself to a sink
//! and returns the values it bound, numbering its placeholders from `start`.

pub mod dialect;

use std::io::Write;

use crate::ast::Value;
use crate::error::QuarryResult;

pub use dialect::{Dialect, DialectKind, MySql, Postgres, Sqlite, escape_identifier};

/// A node that can be written as SQL.
pub trait Express {
    /// Write this node to `w`. `start` is the 1-based index of the first
    /// placeholder this node may emit; the returned values are bound to
    /// `start`, `start + 1`, … in order.
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>>;
}

impl<E: Express + ?Sized> Express for Box<E> {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, start: usize) -> QuarryResult<Vec<Value>> {
        (**self).express(w, d, start)
    }
}

/// Write `e` wrapped in `prefix`/`suffix` when `cond` holds; write nothing
/// and bind nothing otherwise.
pub fn express_if(
    w: &mut dyn Write,
    d: &dyn Dialect,
    start: usize,
    e: &dyn Express,
    cond: bool,
    prefix: &str,
    suffix: &str,
) -> QuarryResult<Vec<Value>> {
    if !cond {
        return Ok(Vec::new());
    }

    w.write_all(prefix.as_bytes())?;
    let args = e.express(w, d, start)?;
    w.write_all(suffix.as_bytes())?;
    Ok(args)
}

/// Write each item separated by `sep`, the whole run wrapped in
/// `prefix`/`suffix`. An empty slice writes nothing at all.
pub fn express_slice<E: Express>(
    w: &mut dyn Write,
    d: &dyn Dialect,
    start: usize,
    items: &[E],
    prefix: &str,
    sep: &str,
    suffix: &str,
) -> QuarryResult<Vec<Value>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    w.write_all(prefix.as_bytes())?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.write_all(sep.as_bytes())?;
        }
        let item_args = item.express(w, d, start + args.len())?;
        args.extend(item_args);
    }
    w.write_all(suffix.as_bytes())?;
    Ok(args)
}

/// Render any node into an owned string, numbering placeholders from `start`.
pub fn to_sql(e: &dyn Express, d: &dyn Dialect, start: usize) -> QuarryResult<(String, Vec<Value>)> {
    let mut buf = Vec::new();
    let args = e.express(&mut buf, d, start)?;
    let sql = String::from_utf8(buf)
        .map_err(|err| crate::error::QuarryError::render(format!("non UTF-8 output: {}", err)))?;
    Ok((sql, args))
}
