//! Dialect strategies: placeholder tokens and identifier quoting.
//!
//! Every clause renders through `&dyn Dialect`, never through a concrete
//! SQL variant, so one statement tree serves every target grammar.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuarryError;

/// Token-rendering strategy for one SQL grammar.
pub trait Dialect {
    /// Short lowercase name (`postgres`, `mysql`, `sqlite`).
    fn name(&self) -> &'static str;

    /// Placeholder token for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> Cow<'static, str>;

    /// Quote a single identifier part.
    fn quote_identifier(&self, name: &str) -> String;
}

/// Wrap `name` in `quote`, doubling any embedded quote characters.
pub fn escape_identifier(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// PostgreSQL: `$1`, `"ident"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> Cow<'static, str> {
        Cow::Owned(format!("${}", index))
    }

    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '"')
    }
}

/// MySQL / MariaDB: `?`, `` `ident` ``.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> Cow<'static, str> {
        Cow::Borrowed("?")
    }

    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '`')
    }
}

/// SQLite: numbered `?1`, `"ident"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, index: usize) -> Cow<'static, str> {
        Cow::Owned(format!("?{}", index))
    }

    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name, '"')
    }
}

/// Built-in dialects, selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::MySql => &MySql,
            DialectKind::Sqlite => &Sqlite,
        }
    }
}

impl FromStr for DialectKind {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "psql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(QuarryError::Config(format!("unknown dialect '{}'", other))),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dialect().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(Postgres.placeholder(3), "$3");
        assert_eq!(MySql.placeholder(3), "?");
        assert_eq!(Sqlite.placeholder(3), "?3");
    }

    #[test]
    fn test_quote_escapes_embedded_quotes() {
        assert_eq!(Postgres.quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(MySql.quote_identifier("order"), "`order`");
    }

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("PostgreSQL".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("mariadb".parse::<DialectKind>().unwrap(), DialectKind::MySql);
        assert!("oracle".parse::<DialectKind>().is_err());
        assert_eq!(DialectKind::Sqlite.to_string(), "sqlite");
    }
}
