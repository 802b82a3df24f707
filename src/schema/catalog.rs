//! Validated table catalogs.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use super::{Table, is_join_table};
use crate::error::{QuarryError, QuarryResult};
use crate::relationships::{Relationships, build_relationships};

/// On-disk shape: `{ "tables": [...] }` or `[[tables]]`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tables: Vec<Table>,
}

/// A validated set of tables with join-table flags computed.
///
/// The relationship map is inferred on first use and kept for the lifetime
/// of the catalog.
#[derive(Debug)]
pub struct Catalog {
    tables: Vec<Table>,
    relationships: OnceLock<Relationships>,
}

impl Catalog {
    /// Validate `tables` and compute each table's join-table flag.
    pub fn new(mut tables: Vec<Table>) -> QuarryResult<Self> {
        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            if !seen.insert(table.name.as_str()) {
                return Err(QuarryError::catalog(format!("duplicate table '{}'", table.name)));
            }
            for fk in &table.foreign_keys {
                if fk.columns.is_empty() {
                    return Err(QuarryError::catalog(format!(
                        "foreign key '{}' on '{}' has no columns",
                        fk.name, table.name
                    )));
                }
                if fk.columns.len() != fk.foreign_columns.len() {
                    return Err(QuarryError::catalog(format!(
                        "foreign key '{}' on '{}' pairs {} columns with {}",
                        fk.name,
                        table.name,
                        fk.columns.len(),
                        fk.foreign_columns.len()
                    )));
                }
            }
        }

        for table in &mut tables {
            table.is_join_table = is_join_table(table);
        }

        Ok(Self {
            tables,
            relationships: OnceLock::new(),
        })
    }

    pub fn from_json_str(s: &str) -> QuarryResult<Self> {
        let file: CatalogFile = serde_json::from_str(s)
            .map_err(|e| QuarryError::catalog(format!("Failed to parse catalog JSON: {}", e)))?;
        Self::new(file.tables)
    }

    pub fn from_toml_str(s: &str) -> QuarryResult<Self> {
        let file: CatalogFile = toml::from_str(s)
            .map_err(|e| QuarryError::catalog(format!("Failed to parse catalog TOML: {}", e)))?;
        Self::new(file.tables)
    }

    /// Load a `.json` or `.toml` catalog file.
    pub fn load(path: impl AsRef<Path>) -> QuarryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuarryError::catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(QuarryError::catalog(format!(
                    "unsupported catalog extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )));
            }
        };

        tracing::info!("Loaded {} tables from {}", catalog.tables.len(), path.display());
        Ok(catalog)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn join_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| t.is_join_table)
    }

    /// Relationship map, inferred once.
    pub fn relationships(&self) -> QuarryResult<&Relationships> {
        if let Some(rels) = self.relationships.get() {
            return Ok(rels);
        }
        let rels = build_relationships(&self.tables)?;
        Ok(self.relationships.get_or_init(|| rels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG: &str = r#"{
        "tables": [
            {
                "name": "users",
                "columns": [{ "name": "id", "type": "integer" }],
                "primary_key": { "name": "users_pkey", "columns": ["id"] }
            },
            {
                "name": "roles",
                "columns": [{ "name": "id", "type": "integer" }],
                "primary_key": { "name": "roles_pkey", "columns": ["id"] }
            },
            {
                "name": "user_roles",
                "columns": [
                    { "name": "user_id", "type": "integer" },
                    { "name": "role_id", "type": "integer" }
                ],
                "primary_key": { "name": "user_roles_pkey", "columns": ["user_id", "role_id"] },
                "foreign_keys": [
                    { "name": "fk_user", "columns": ["user_id"], "foreign_table": "users", "foreign_columns": ["id"] },
                    { "name": "fk_role", "columns": ["role_id"], "foreign_table": "roles", "foreign_columns": ["id"] }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_json_catalog() {
        let catalog = Catalog::from_json_str(BLOG).unwrap();
        assert_eq!(catalog.tables().len(), 3);
        let joins: Vec<&str> = catalog.join_tables().map(|t| t.name.as_str()).collect();
        assert_eq!(joins, vec!["user_roles"]);

        let rels = catalog.relationships().unwrap();
        assert_eq!(rels.get("users").len(), 1);
        assert_eq!(rels.get("users")[0].name, "fk_role");
        assert!(std::ptr::eq(rels, catalog.relationships().unwrap()));
    }

    #[test]
    fn test_toml_catalog() {
        let toml = r#"
            [[tables]]
            name = "users"
            columns = [{ name = "id", type = "integer" }]
            primary_key = { name = "users_pkey", columns = ["id"] }

            [[tables]]
            name = "posts"
            columns = [{ name = "id", type = "integer" }, { name = "user_id", type = "integer", nullable = true }]
            foreign_keys = [{ name = "fk_user", columns = ["user_id"], foreign_table = "users", foreign_columns = ["id"] }]
        "#;
        let catalog = Catalog::from_toml_str(toml).unwrap();
        assert!(catalog.table("posts").unwrap().columns[1].nullable);
        assert_eq!(catalog.relationships().unwrap().get("posts").len(), 1);
    }

    #[test]
    fn test_validation_errors() {
        let dup = vec![Table::new("a"), Table::new("a")];
        assert!(matches!(Catalog::new(dup), Err(QuarryError::Catalog(_))));

        let empty_fk = vec![Table::new("a").foreign_key("fk", &[], "b", &[])];
        assert!(Catalog::new(empty_fk).is_err());

        let uneven = vec![Table::new("a").foreign_key("fk", &["x", "y"], "b", &["id"])];
        assert!(Catalog::new(uneven).is_err());
    }

    #[test]
    fn test_join_flag_is_recomputed() {
        let mut users = Table::new("users").column("id", "integer");
        users.is_join_table = true;
        let catalog = Catalog::new(vec![users]).unwrap();
        assert!(!catalog.tables()[0].is_join_table);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(Catalog::load("catalog.yaml").is_err());
    }
}
