//! Query building.
//!
//! A [`Query`] accumulates [`Predicate`]s, [`Sort`]s, [`Bounds`] and a
//! projection through chained calls. Detached queries only compile; queries
//! bound to an [`Executor`](crate::executor::Executor) also run (see the
//! terminal methods in `terminal.rs`).

mod bounds;
mod builder;
mod predicate;
pub mod resolve;
mod sort;
mod terminal;
mod verb;

pub use bounds::Bounds;
pub use builder::{Query, QueryState, RawSql, Selection, WILDCARD};
pub use predicate::Predicate;
pub use sort::{Direction, Sort};
pub use verb::{Arity, DatePart, Operator, VERBS, Verb};
