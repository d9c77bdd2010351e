//! Runs compiled statements against a [`Storage`].

use crate::config::Config;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::Query;
use crate::schema::Schema;
use crate::sql::Statement;
use crate::storage::Storage;

/// Owns a storage handle and the configuration queries run with.
#[derive(Debug, Clone)]
pub struct Executor<S> {
    storage: S,
    config: Config,
}

impl<S: Storage> Executor<S> {
    pub fn new(storage: S, config: Config) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect.unwrap_or_else(|| self.storage.dialect())
    }

    /// Starts a query on `schema`, bound to this executor.
    pub fn query<'q>(&'q self, schema: &'q dyn Schema) -> Query<'q, &'q Self> {
        Query::new(schema, self.dialect()).bind(self)
    }

    /// Runs a row-returning statement. Errors are returned as the driver
    /// reported them, without retrying.
    pub async fn fetch(&self, statement: &Statement, limit_hint: Option<u64>) -> Result<S::Source> {
        crate::prowl_trace_query!(statement.sql(), statement.params().len());
        self.storage.fetch(statement, limit_hint).await
    }

    pub async fn execute(&self, statement: &Statement) -> Result<u64> {
        crate::prowl_trace_query!(statement.sql(), statement.params().len());
        self.storage.execute(statement).await
    }
}
