//! # Prowl
//!
//! A fluent query builder for SQLite and PostgreSQL where filters, sorts and
//! projections are spelled as pseudo-methods (`is_name`, `asc_created`,
//! `gte_day`) and resolved against a declared schema.
//!
//! ## Quick Start
//!
//! ```no_run
//! use prowl::prelude::*;
//! use prowl::rusqlite::SqliteStorage;
//!
//! #[derive(FromRow)]
//! struct User {
//!     #[prowl(rename = "_id")]
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! # async fn run() -> prowl::Result<()> {
//! let storage = SqliteStorage::open_in_memory()?;
//! storage.execute_batch(
//!     "CREATE TABLE users (_id INTEGER PRIMARY KEY, name TEXT, email TEXT)",
//! )?;
//!
//! let users = TableSchema::new("users")
//!     .with_primary_key("_id", FieldType::Integer)
//!     .with_field("name", FieldType::Text)
//!     .with_field("email", FieldType::Text);
//!
//! let db = Executor::new(storage, Config::default());
//! db.query(&users).set_field("name", "Ada")?.insert().await?;
//!
//! let mut rows = db
//!     .query(&users)
//!     .call("startswith_name", ["A"])?
//!     .call("desc_pk", Vec::<Value>::new())?
//!     .limit(10)?
//!     .get::<User>()
//!     .await?;
//! while let Some(user) = rows.next().await? {
//!     println!("{} {}", user.id, user.name);
//! }
//! # Ok(()) }
//! ```
//!
//! ## Database Support
//!
//! | Database   | Driver         | Feature Flag     |
//! |------------|----------------|------------------|
//! | SQLite     | rusqlite       | `rusqlite`       |
//! | PostgreSQL | tokio-postgres | `tokio-postgres` |

/// Result type for prowl operations
pub use prowl_core::error::Result;

/// Database dialect enum
pub use prowl_core::Dialect;

/// Error types
pub mod error {
    pub use prowl_core::error::{ExecutionErrorKind, ProwlError};
}

/// Core types shared by every driver: schema, values, builder, compiler,
/// executor and iterators.
pub mod core {
    pub use prowl_core::*;
}

/// Derive `FromRow` for structs hydrated from result rows.
pub use prowl_macros::FromRow;

#[cfg(feature = "rusqlite")]
pub mod rusqlite;

#[cfg(feature = "tokio-postgres")]
pub mod tokio_postgres;

/// Common imports.
///
/// ```
/// use prowl::prelude::*;
/// ```
pub mod prelude {
    pub use prowl_core::config::Config;
    pub use prowl_core::executor::Executor;
    pub use prowl_core::iter::{ChunkedIterator, IterState, ResultIterator};
    pub use prowl_core::query::{DatePart, Direction, Operator, Query};
    pub use prowl_core::row::{FromRow, Row};
    pub use prowl_core::schema::{Field, FieldType, Schema, TableSchema};
    pub use prowl_core::value::{FromValue, Value};
    pub use prowl_core::{Dialect, ProwlError};
    pub use prowl_macros::FromRow;
}
