//! Async PostgreSQL driver using [`tokio_postgres`].
//!
//! ```no_run
//! use prowl::prelude::*;
//! use prowl::tokio_postgres::PostgresStorage;
//!
//! # async fn run() -> prowl::Result<()> {
//! let storage = PostgresStorage::connect("host=localhost user=postgres").await?;
//! let users = TableSchema::new("users").with_primary_key("_id", FieldType::Integer);
//!
//! let db = Executor::new(storage, Config::default());
//! let total = db.query(&users).count().await?;
//! # Ok(()) }
//! ```

use std::pin::Pin;
use std::sync::Arc;

use futures_util::TryStreamExt;

use prowl_core::dialect::Dialect;
use prowl_core::error::Result;
use prowl_core::row::Row;
use prowl_core::sql::Statement;
use prowl_core::storage::{RowSource, Storage};
use prowl_core::value::value_at;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, RowStream};

/// Storage backed by a [`tokio_postgres::Client`].
///
/// The client is stored behind an [`Arc`], making the storage cheaply
/// cloneable for sharing across tasks.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    client: Arc<Client>,
}

impl PostgresStorage {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Connects without TLS and drives the connection on a spawned task.
    pub async fn connect(config: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(config, NoTls).await?;
        tokio::spawn(async move {
            if let Err(_err) = connection.await {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %_err, "prowl.postgres connection closed");
            }
        });
        Ok(Self::new(client))
    }

    #[inline]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn param_refs(statement: &Statement) -> Vec<&(dyn ToSql + Sync)> {
    statement
        .params()
        .iter()
        .map(|p| p as &(dyn ToSql + Sync))
        .collect()
}

impl Storage for PostgresStorage {
    type Source = PostgresRows;

    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    async fn fetch(&self, statement: &Statement, limit_hint: Option<u64>) -> Result<PostgresRows> {
        let stream = self
            .client
            .query_raw(statement.sql(), statement.params())
            .await?;
        Ok(PostgresRows {
            stream: Box::pin(stream),
            columns: None,
            remaining: limit_hint,
        })
    }

    async fn execute(&self, statement: &Statement) -> Result<u64> {
        let params = param_refs(statement);
        Ok(self.client.execute(statement.sql(), &params).await?)
    }
}

/// A live result stream; each `next_row` decodes one row off the wire.
///
/// Rows are never buffered past the connection's own read buffer. Releasing
/// drops the stream; the connection discards whatever the server still
/// sends for it.
pub struct PostgresRows {
    stream: Pin<Box<RowStream>>,
    columns: Option<Arc<[String]>>,
    remaining: Option<u64>,
}

impl RowSource for PostgresRows {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }
        let Some(row) = self.stream.try_next().await? else {
            return Ok(None);
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }

        let columns = self
            .columns
            .get_or_insert_with(|| row.columns().iter().map(|c| c.name().to_owned()).collect())
            .clone();
        let values = (0..columns.len())
            .map(|idx| value_at(&row, idx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Row::new(columns, values)))
    }

    fn release(self) {
        drop(self.stream);
    }
}
