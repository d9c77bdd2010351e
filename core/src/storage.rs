//! Storage collaborator seam.
//!
//! Drivers implement [`Storage`] for a connection or pool handle and
//! [`RowSource`] for the cursor a fetch returns.

use core::future::Future;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::row::Row;
use crate::sql::Statement;

pub trait Storage: Send + Sync {
    type Source: RowSource;

    fn dialect(&self) -> Dialect;

    /// Runs a row-returning statement.
    ///
    /// `limit_hint` is the most rows the caller will pull; drivers that
    /// buffer may stop there.
    fn fetch(
        &self,
        statement: &Statement,
        limit_hint: Option<u64>,
    ) -> impl Future<Output = Result<Self::Source>> + Send;

    /// Runs a statement for its side effects, returning the affected row count.
    fn execute(&self, statement: &Statement) -> impl Future<Output = Result<u64>> + Send;
}

/// An open cursor.
///
/// [`ResultIterator`](crate::iter::ResultIterator) calls `release` exactly
/// once, on exhaustion, close, error or drop.
pub trait RowSource: Send {
    fn next_row(&mut self) -> impl Future<Output = Result<Option<Row>>> + Send;

    fn release(self);
}
