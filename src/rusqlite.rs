//! SQLite driver using [`rusqlite`].
//!
//! ```no_run
//! use prowl::prelude::*;
//! use prowl::rusqlite::SqliteStorage;
//!
//! # async fn run() -> prowl::Result<()> {
//! let storage = SqliteStorage::open_in_memory()?;
//! storage.execute_batch("CREATE TABLE users (_id INTEGER PRIMARY KEY, name TEXT)")?;
//!
//! let users = TableSchema::new("users")
//!     .with_primary_key("_id", FieldType::Integer)
//!     .with_field("name", FieldType::Text);
//!
//! let db = Executor::new(storage, Config::default());
//! db.query(&users).set_field("name", "ada")?.insert().await?;
//! let names: Vec<String> = db
//!     .query(&users)
//!     .select(["name"])?
//!     .get()
//!     .await?
//!     .collect_all()
//!     .await?;
//! # Ok(()) }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use prowl_core::dialect::Dialect;
use prowl_core::error::{ExecutionErrorKind, ProwlError, Result};
use prowl_core::row::Row;
use prowl_core::sql::Statement;
use prowl_core::storage::{RowSource, Storage};
use prowl_core::value::Value;
use rusqlite::{Connection, params_from_iter};
use tokio::sync::{mpsc, oneshot};

/// Upper bound on rows a cursor reads ahead of its consumer.
const READ_AHEAD: usize = 64;

/// Storage backed by a single [`rusqlite::Connection`].
///
/// The connection sits behind an `Arc<Mutex<_>>`, so clones share it. Queries
/// step on tokio's blocking pool; an open cursor holds the connection until
/// it is exhausted or released, so a connection serves one cursor at a time.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Runs one or more `;`-separated statements without parameters.
    ///
    /// Blocks the calling thread; meant for schema setup.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        lock(&self.conn)?.execute_batch(sql)?;
        Ok(())
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| {
        ProwlError::execution(
            ExecutionErrorKind::Other,
            None,
            "sqlite connection mutex poisoned",
        )
    })
}

fn worker_stopped() -> ProwlError {
    ProwlError::execution(ExecutionErrorKind::Other, None, "sqlite worker stopped")
}

/// Steps `statement` and feeds decoded rows into `tx`.
///
/// `ready` fires once the statement is prepared and bound, so the caller of
/// `fetch` sees preparation errors directly. Stops early when the receiver
/// is gone or `limit_hint` rows were sent.
fn stream_rows(
    conn: &Mutex<Connection>,
    statement: &Statement,
    limit_hint: Option<u64>,
    ready: &mut Option<oneshot::Sender<Result<()>>>,
    tx: &mpsc::Sender<Result<Row>>,
) -> Result<()> {
    let conn = lock(conn)?;
    let mut stmt = conn.prepare(statement.sql())?;
    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let mut rows = stmt.query(params_from_iter(statement.params()))?;

    if let Some(ready) = ready.take()
        && ready.send(Ok(())).is_err()
    {
        return Ok(());
    }

    let mut sent = 0u64;
    while limit_hint.is_none_or(|hint| sent < hint)
        && let Some(row) = rows.next()?
    {
        let values = (0..columns.len())
            .map(|idx| row.get_ref(idx).map(Value::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if tx.blocking_send(Ok(Row::new(columns.clone(), values))).is_err() {
            break;
        }
        sent += 1;
    }
    Ok(())
}

impl Storage for SqliteStorage {
    type Source = SqliteRows;

    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    async fn fetch(&self, statement: &Statement, limit_hint: Option<u64>) -> Result<SqliteRows> {
        let capacity = limit_hint.map_or(READ_AHEAD, |hint| {
            usize::try_from(hint).map_or(READ_AHEAD, |hint| hint.clamp(1, READ_AHEAD))
        });
        let (tx, rx) = mpsc::channel(capacity);
        let (ready_tx, ready_rx) = oneshot::channel();
        let conn = self.conn.clone();
        let statement = statement.clone();

        tokio::task::spawn_blocking(move || {
            let mut ready = Some(ready_tx);
            if let Err(err) = stream_rows(&conn, &statement, limit_hint, &mut ready, &tx) {
                match ready.take() {
                    Some(ready) => {
                        let _ = ready.send(Err(err));
                    }
                    None => {
                        let _ = tx.blocking_send(Err(err));
                    }
                }
            }
        });

        ready_rx.await.map_err(|_| worker_stopped())??;
        Ok(SqliteRows { rx })
    }

    async fn execute(&self, statement: &Statement) -> Result<u64> {
        let conn = self.conn.clone();
        let statement = statement.clone();
        tokio::task::spawn_blocking(move || {
            let conn = lock(&conn)?;
            let affected = conn.execute(statement.sql(), params_from_iter(statement.params()))?;
            Ok(affected as u64)
        })
        .await
        .map_err(|_| worker_stopped())?
    }
}

/// Rows streamed from a blocking worker through a bounded channel.
///
/// Dropping or releasing the cursor closes the channel, which stops the
/// worker at its next send and frees the connection.
#[derive(Debug)]
pub struct SqliteRows {
    rx: mpsc::Receiver<Result<Row>>,
}

impl RowSource for SqliteRows {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        self.rx.recv().await.transpose()
    }

    fn release(mut self) {
        self.rx.close();
    }
}
