//! Relationship inference.
//!
//! Every foreign key yields a one-sided relationship on its owning table and,
//! unless the owner is a join table or the key points back at its own table,
//! a mirrored relationship on the referenced table. Each join table then
//! yields a two-sided many-to-many relationship on both tables it connects.

pub mod query;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{QuarryError, QuarryResult};
use crate::schema::{ForeignKey, Table, has_exact_unique};

pub use query::related_query;

/// One hop of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelSide {
    pub from: String,
    pub to: String,
    /// Source column to target column
    pub pairs: BTreeMap<String, String>,
    /// The target row is uniquely determined (to-one)
    pub to_unique: bool,
}

/// A named association. One side for a direct foreign key, two sides for a
/// many-to-many routed through a join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: String,
    pub sides: Vec<RelSide>,
}

impl Relationship {
    /// Table the relationship is recorded on.
    pub fn source(&self) -> Option<&str> {
        self.sides.first().map(|s| s.from.as_str())
    }

    /// Table the relationship loads.
    pub fn target(&self) -> Option<&str> {
        self.sides.last().map(|s| s.to.as_str())
    }

    /// The join table, for many-to-many relationships.
    pub fn through(&self) -> Option<&str> {
        match self.sides.as_slice() {
            [first, _] => Some(first.to.as_str()),
            _ => None,
        }
    }

    pub fn is_to_many(&self) -> bool {
        self.sides.iter().any(|s| !s.to_unique)
    }
}

/// Relationships per table, in table-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Relationships(BTreeMap<String, Vec<Relationship>>);

impl Relationships {
    /// Relationships recorded on `table`, in discovery order.
    pub fn get(&self, table: &str) -> &[Relationship] {
        self.0.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first relationship on `table` called `name`.
    pub fn find(&self, table: &str, name: &str) -> QuarryResult<&Relationship> {
        self.get(table)
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| QuarryError::UnknownRelationship {
                table: table.to_string(),
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Relationship])> {
        self.0.iter().map(|(t, rels)| (t.as_str(), rels.as_slice()))
    }

    /// Number of tables holding at least one relationship.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, table: &str, rel: Relationship) {
        tracing::debug!(
            table,
            name = %rel.name,
            sides = rel.sides.len(),
            "inferred relationship"
        );
        self.0.entry(table.to_string()).or_default().push(rel);
    }
}

/// Local to foreign pairing of a key, and its inverse.
fn pair_columns(fk: &ForeignKey) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut pairs = BTreeMap::new();
    let mut inverse = BTreeMap::new();
    for (local, foreign) in fk.columns.iter().zip(&fk.foreign_columns) {
        pairs.insert(local.clone(), foreign.clone());
        inverse.insert(foreign.clone(), local.clone());
    }
    (pairs, inverse)
}

fn invert(pairs: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// Many-to-many relationship recorded on `near.to`, routed through `join`
/// along `near` (inverted) and then `far`.
fn many_to_many(join: &str, near: &Relationship, far: &Relationship, unique: [bool; 2]) -> Relationship {
    let near = &near.sides[0];
    let far_side = &far.sides[0];
    Relationship {
        name: far.name.clone(),
        sides: vec![
            RelSide {
                from: near.to.clone(),
                to: join.to_string(),
                pairs: invert(&near.pairs),
                to_unique: unique[0],
            },
            RelSide {
                from: join.to_string(),
                to: far_side.to.clone(),
                pairs: far_side.pairs.clone(),
                to_unique: unique[1],
            },
        ],
    }
}

/// Infer every relationship in `tables`.
///
/// Join tables are recognized by their `is_join_table` flag. A join table
/// that does not end up with exactly two one-sided relationships is a
/// catalog defect and fails the whole pass.
pub fn build_relationships(tables: &[Table]) -> QuarryResult<Relationships> {
    let by_name: HashMap<&str, &Table> = tables.iter().map(|t| (t.name.as_str(), t)).collect();
    let mut rels = Relationships::default();

    for t1 in tables {
        // [local_unique, foreign_unique] per foreign key
        let mut fk_unique: HashMap<&str, [bool; 2]> = HashMap::with_capacity(t1.foreign_keys.len());

        for fk in &t1.foreign_keys {
            let local_unique = has_exact_unique(t1, &fk.columns);

            let Some(t2) = by_name.get(fk.foreign_table.as_str()) else {
                tracing::warn!(
                    table = %t1.name,
                    foreign_key = %fk.name,
                    target = %fk.foreign_table,
                    "skipping foreign key to a table outside the catalog"
                );
                continue;
            };

            let foreign_unique = has_exact_unique(t2, &fk.foreign_columns);
            fk_unique.insert(fk.name.as_str(), [local_unique, foreign_unique]);

            let (pairs, inverse) = pair_columns(fk);

            rels.push(
                &t1.name,
                Relationship {
                    name: fk.name.clone(),
                    sides: vec![RelSide {
                        from: t1.name.clone(),
                        to: t2.name.clone(),
                        pairs,
                        to_unique: foreign_unique,
                    }],
                },
            );

            if !t1.is_join_table && t1.name != t2.name {
                rels.push(
                    &t2.name,
                    Relationship {
                        name: fk.name.clone(),
                        sides: vec![RelSide {
                            from: t2.name.clone(),
                            to: t1.name.clone(),
                            pairs: inverse,
                            to_unique: local_unique,
                        }],
                    },
                );
            }
        }

        if !t1.is_join_table {
            continue;
        }

        let (r1, r2) = match rels.get(&t1.name) {
            [r1, r2] => (r1.clone(), r2.clone()),
            other => {
                return Err(QuarryError::defect(
                    &t1.name,
                    format!("join table has {} relationships, expected 2", other.len()),
                ));
            }
        };
        if r1.sides.len() != 1 || r2.sides.len() != 1 {
            return Err(QuarryError::defect(
                &t1.name,
                "join table relationships must be one-sided",
            ));
        }

        let unique_of = |r: &Relationship| fk_unique.get(r.name.as_str()).copied().unwrap_or_default();

        let a = r1.sides[0].to.clone();
        let b = r2.sides[0].to.clone();
        rels.push(&a, many_to_many(&t1.name, &r1, &r2, unique_of(&r1)));
        rels.push(&b, many_to_many(&t1.name, &r2, &r1, unique_of(&r2)));
    }

    Ok(rels)
}
