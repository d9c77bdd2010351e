//! Executor configuration.

use crate::dialect::Dialect;

/// Default page size for [`ChunkedIterator`](crate::iter::ChunkedIterator).
pub const DEFAULT_CHUNK_LIMIT: u64 = 5000;

/// Settings passed to [`Executor::new`](crate::executor::Executor::new).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Overrides the dialect reported by the storage driver.
    pub dialect: Option<Dialect>,
    /// Rows per query when walking a whole result set.
    pub chunk_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: None,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }
}

impl Config {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Zero is treated as one.
    pub fn with_chunk_limit(mut self, chunk_limit: u64) -> Self {
        self.chunk_limit = chunk_limit.max(1);
        self
    }
}
