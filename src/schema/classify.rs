//! Structural predicates over a table's key shape.

use std::collections::HashSet;

use super::Table;

/// Same members and same length; an empty set never matches.
fn same_set(a: &[String], b: &[String]) -> bool {
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter().all(|c| b.contains(c.as_str()))
}

/// True when `cols` is exactly the primary key or a unique constraint of
/// `table`, compared as a set.
pub fn has_exact_unique(table: &Table, cols: &[String]) -> bool {
    if cols.is_empty() {
        return false;
    }

    let pk_match = table
        .primary_key
        .as_ref()
        .is_some_and(|pk| same_set(&pk.columns, cols));

    pk_match || table.uniques.iter().any(|u| same_set(&u.columns, cols))
}

/// A join table is fully identified by two disjoint foreign keys: it has a
/// primary key, exactly two foreign keys, and every column is both a key
/// column and a foreign key column.
pub fn is_join_table(table: &Table) -> bool {
    let Some(pk) = &table.primary_key else {
        return false;
    };

    let [fk1, fk2] = table.foreign_keys.as_slice() else {
        return false;
    };

    let total = table.columns.len();
    if total != pk.columns.len() || total != fk1.columns.len() + fk2.columns.len() {
        return false;
    }

    fk1.columns.iter().all(|c| !fk2.columns.contains(c))
}
