//! # runtara-query
//!
//! A schema-driven SQL statement assembler.
//!
//! A `Query` is bound to one table through a model, started as a `SELECT`,
//! `UPDATE`, `INSERT`, `DELETE` or raw statement, and filled section by section
//! through chained calls. `create()` checks the sections against the statement
//! type and returns either plain SQL or SQL with the values to bind.
//!
//! ## Features
//!
//! - **Model-driven selects**: Column lists come from the model, with aliases
//! - **Section policy**: Each statement type declares required and forbidden sections
//! - **Bound writes**: `set_values` produces `?` placeholders plus ordered values
//! - **Inline filters**: Where clauses render numbers, strings and JSON as literals
//! - **Pivot filters**: Subquery helper for many-to-many lookups
//!
//! ## Quick Start
//!
//! ```rust
//! use runtara_query::{ColumnDefinition, Model, Query, Statement};
//! use serde_json::json;
//!
//! let users = Model::new(
//!     "User",
//!     "users",
//!     vec![
//!         ColumnDefinition::new("id"),
//!         ColumnDefinition::new("first_name").alias("firstName"),
//!     ],
//! );
//!
//! let select = Query::new(&users)
//!     .select()
//!     .where_eq("age", 18)
//!     .where_eq("status", "active")
//!     .order_by("id")
//!     .paginate(2, 10)
//!     .create()?;
//!
//! assert_eq!(
//!     select.sql(),
//!     "SELECT users.id, users.first_name AS firstName FROM users \
//!      WHERE age = 18 AND status = \"active\" ORDER BY id ASC LIMIT 10, 10"
//! );
//!
//! let insert = Query::new(&users)
//!     .insert()
//!     .set_values([("first_name", json!("Al")), ("tags", json!(["a", "b"]))])
//!     .create()?;
//!
//! assert_eq!(
//!     insert,
//!     Statement::Parameterized(
//!         "INSERT INTO users (first_name, tags) VALUES (?, ?)".to_string(),
//!         vec![json!("Al"), json!("[\"a\",\"b\"]")],
//!     )
//! );
//! # Ok::<(), runtara_query::QueryError>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use runtara_query::QueryConfig;
//!
//! let config = QueryConfig::builder()
//!     .strict_sections(true)       // Reject sections the statement never uses
//!     .validate_identifiers(true)  // Check table and assigned column names
//!     .build();
//! ```
//!
//! ## Safety
//!
//! Values given to `set_values` are bound as parameters. Values given to the
//! where helpers are quoted and inlined, and identifiers are written as-is
//! unless identifier validation is enabled.

pub mod config;
pub mod error;
pub mod query;
pub mod schema;
pub mod sql;
pub mod types;

// Re-export main types for convenience
pub use config::{QueryConfig, QueryConfigBuilder};
pub use error::{QueryError, Result};
pub use query::{PivotFilter, Query, SortOrder, Statement};
pub use schema::{Model, SchemaSource};
pub use sql::section::{Section, StatementType};
pub use types::ColumnDefinition;
