//! # quarry
//!
//! Composable SQL statement trees and relationship inference for generated
//! data-access layers.
//!
//! ## Building statements
//!
//! ```rust,ignore
//! use quarry::prelude::*;
//!
//! let q = select([
//!     sm::columns(["id", "email"]),
//!     sm::from("users").boxed(),
//!     sm::where_(eq("active", true)),
//!     sm::order_by("created_at").desc().boxed(),
//!     sm::limit(10),
//! ]);
//!
//! let (sql, args) = q.build(&Postgres)?;
//! // SELECT "id", "email"
//! // FROM "users"
//! // WHERE "active" = $1
//! // ORDER BY "created_at" DESC
//! // LIMIT 10
//! ```
//!
//! ## Inferring relationships
//!
//! ```rust,ignore
//! let catalog = Catalog::load("catalog.json")?;
//! let rels = catalog.relationships()?;
//! let posts = rels.find("users", "posts_user_id_fkey")?;
//! let q = related_query(posts, vec![Value::Int(7)])?;
//! ```

pub mod ast;
pub mod clause;
pub mod config;
pub mod error;
pub mod mods;
pub mod query;
pub mod relationships;
pub mod schema;
pub mod transpiler;

pub use mods::{dm, sm};

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::{BinaryOp, Expr, Value};
    pub use crate::config::QuarryConfig;
    pub use crate::error::*;
    pub use crate::mods::{Mod, QueryMod, dm, sm};
    pub use crate::query::{DeleteQuery, Query, SelectQuery, delete, select};
    pub use crate::relationships::{
        RelSide, Relationship, Relationships, build_relationships, related_query,
    };
    pub use crate::schema::{Catalog, Column, Constraint, ForeignKey, Table};
    pub use crate::transpiler::{Dialect, DialectKind, Express, MySql, Postgres, Sqlite};
}
