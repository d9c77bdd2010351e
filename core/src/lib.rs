//! Core of the `prowl` query builder: value model, schema seam, builder,
//! compiler, executor and result iterators.
//!
//! Drivers live in the `prowl` facade crate; this crate only defines the
//! [`storage::Storage`] seam they implement.

pub mod compile;
pub mod config;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod iter;
pub mod query;
pub mod row;
pub mod schema;
pub mod sql;
pub mod storage;
mod tracing;
pub mod value;

pub use compile::Compiler;
pub use config::Config;
pub use dialect::Dialect;
pub use error::{ExecutionErrorKind, ProwlError, Result};
pub use executor::Executor;
pub use iter::{ChunkedIterator, IterState, ResultIterator};
pub use query::{DatePart, Direction, Operator, Query, WILDCARD};
pub use row::{FromRow, Row};
pub use schema::{Field, FieldType, Schema, TableSchema};
pub use sql::{SQL, SQLChunk, Statement, Token};
pub use storage::{RowSource, Storage};
pub use value::{FromValue, Value};
