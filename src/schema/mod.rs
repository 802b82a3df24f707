//! Table catalog model.
//!
//! Tables are produced by an external introspection step and loaded from
//! JSON or TOML; see [`Catalog`].

pub mod catalog;
pub mod classify;

use serde::{Deserialize, Serialize};

pub use catalog::Catalog;
pub use classify::{has_exact_unique, is_join_table};

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub col_type: String,
    #[serde(default)]
    pub nullable: bool,
}

/// A primary key or unique constraint. Column order does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(default)]
    pub name: String,
    pub columns: Vec<String>,
}

/// A foreign key; `columns[i]` references `foreign_columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub foreign_table: String,
    pub foreign_columns: Vec<String>,
}

/// Table descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Option<Constraint>,
    #[serde(default)]
    pub uniques: Vec<Constraint>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    /// Recomputed by [`Catalog::new`]
    #[serde(default)]
    pub is_join_table: bool,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            uniques: Vec::new(),
            foreign_keys: Vec::new(),
            is_join_table: false,
        }
    }

    pub fn column(mut self, name: &str, col_type: &str) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            col_type: col_type.to_string(),
            nullable: false,
        });
        self
    }

    pub fn primary_key(mut self, name: &str, columns: &[&str]) -> Self {
        self.primary_key = Some(Constraint {
            name: name.to_string(),
            columns: to_strings(columns),
        });
        self
    }

    pub fn unique(mut self, name: &str, columns: &[&str]) -> Self {
        self.uniques.push(Constraint {
            name: name.to_string(),
            columns: to_strings(columns),
        });
        self
    }

    pub fn foreign_key(
        mut self,
        name: &str,
        columns: &[&str],
        foreign_table: &str,
        foreign_columns: &[&str],
    ) -> Self {
        self.foreign_keys.push(ForeignKey {
            name: name.to_string(),
            columns: to_strings(columns),
            foreign_table: foreign_table.to_string(),
            foreign_columns: to_strings(foreign_columns),
        });
        self
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
