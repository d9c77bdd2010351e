//! Result iterator lifecycle against an in-memory fake storage that counts
//! cursor acquire / release.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use futures_util::StreamExt;
use prowl_core::dialect::Dialect;
use prowl_core::error::{ExecutionErrorKind, ProwlError, Result};
use prowl_core::executor::Executor;
use prowl_core::iter::IterState;
use prowl_core::row::Row;
use prowl_core::schema::{FieldType, TableSchema};
use prowl_core::sql::Statement;
use prowl_core::storage::{RowSource, Storage};
use prowl_core::value::Value;
use prowl_core::Config;

#[derive(Default)]
struct Counters {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

struct FakeStorage {
    rows: Vec<i64>,
    /// Index of the row whose fetch fails, if any
    fail_at: Option<usize>,
    /// Index of the row whose fetch never completes, if any
    stall_at: Option<usize>,
    counters: Arc<Counters>,
    statements: Mutex<Vec<Statement>>,
}

impl FakeStorage {
    fn new(n: i64) -> Self {
        Self {
            rows: (1..=n).collect(),
            fail_at: None,
            stall_at: None,
            counters: Arc::default(),
            statements: Mutex::default(),
        }
    }

    fn acquired(&self) -> usize {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    fn last_sql(&self) -> String {
        self.statements.lock().unwrap().last().unwrap().sql().to_string()
    }
}

/// Parses `OFFSET n` out of the rendered SQL.
fn offset_of(sql: &str) -> usize {
    sql.split_once("OFFSET ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

struct FakeRows {
    rows: std::vec::IntoIter<i64>,
    position: usize,
    fail_at: Option<usize>,
    stall_at: Option<usize>,
    counters: Arc<Counters>,
}

impl RowSource for FakeRows {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        if self.stall_at == Some(self.position) {
            futures_util::future::pending::<()>().await;
        }
        if self.fail_at == Some(self.position) {
            return Err(ProwlError::execution(
                ExecutionErrorKind::Connectivity,
                Some("08006".into()),
                "connection lost",
            ));
        }
        self.position += 1;
        Ok(self
            .rows
            .next()
            .map(|v| Row::new(Arc::from(vec!["_id".to_string()]), vec![Value::Integer(v)])))
    }

    fn release(self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl Storage for FakeStorage {
    type Source = FakeRows;

    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    async fn fetch(&self, statement: &Statement, limit_hint: Option<u64>) -> Result<FakeRows> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        self.statements.lock().unwrap().push(statement.clone());
        let skip = offset_of(statement.sql());
        let take = limit_hint.map_or(usize::MAX, |n| n as usize);
        let rows: Vec<i64> = self.rows.iter().copied().skip(skip).take(take).collect();
        Ok(FakeRows {
            rows: rows.into_iter(),
            position: 0,
            fail_at: self.fail_at,
            stall_at: self.stall_at,
            counters: self.counters.clone(),
        })
    }

    async fn execute(&self, statement: &Statement) -> Result<u64> {
        self.statements.lock().unwrap().push(statement.clone());
        Ok(0)
    }
}

fn schema() -> TableSchema {
    TableSchema::new("foo").with_primary_key("_id", FieldType::Integer)
}

#[tokio::test]
async fn exactly_limit_rows_has_no_more() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(3), Config::default());
    let s = schema();
    let mut it = exec.query(&s).limit(3)?.get::<i64>().await?;
    assert_eq!(it.collect_all().await?, vec![1, 2, 3]);
    assert!(!it.has_more());
    assert!(exec.storage().last_sql().ends_with("LIMIT 4"));
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn one_extra_row_sets_has_more() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(4), Config::default());
    let s = schema();
    let mut it = exec.query(&s).limit(3)?.get::<i64>().await?;
    assert_eq!(it.collect_all().await?, vec![1, 2, 3]);
    assert!(it.has_more());
    assert_eq!(it.yielded(), 3);
    assert_eq!(it.state(), IterState::Exhausted);
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn without_limit_streams_everything() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(7), Config::default());
    let s = schema();
    let mut it = exec.query(&s).get::<i64>().await?;
    assert_eq!(it.collect_all().await?.len(), 7);
    assert!(!it.has_more());
    Ok(())
}

#[tokio::test]
async fn close_mid_stream_releases_once() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(10), Config::default());
    let s = schema();
    let mut it = exec.query(&s).get::<i64>().await?;
    assert_eq!(it.state(), IterState::Fresh);
    assert_eq!(it.next().await?, Some(1));
    assert_eq!(it.state(), IterState::Streaming);

    it.close();
    it.close();
    assert!(matches!(it.next().await, Err(ProwlError::IteratorClosed)));
    drop(it);

    assert_eq!(exec.storage().acquired(), 1);
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn drop_releases_unfinished_cursor() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(10), Config::default());
    let s = schema();
    {
        let mut it = exec.query(&s).get::<i64>().await?;
        it.next().await?;
    }
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn cancelled_pull_then_drop_releases_once() -> Result<()> {
    let mut storage = FakeStorage::new(5);
    storage.stall_at = Some(1);
    let exec = Executor::new(storage, Config::default());
    let s = schema();
    {
        let mut it = exec.query(&s).get::<i64>().await?;
        assert_eq!(it.next().await?, Some(1));
        let pull = tokio::time::timeout(Duration::from_millis(20), it.next()).await;
        assert!(pull.is_err());
        assert_eq!(exec.storage().released(), 0);
    }
    assert_eq!(exec.storage().acquired(), 1);
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn storage_error_fails_the_iterator() -> Result<()> {
    let mut storage = FakeStorage::new(5);
    storage.fail_at = Some(2);
    let exec = Executor::new(storage, Config::default());
    let s = schema();
    let mut it = exec.query(&s).get::<i64>().await?;

    assert_eq!(it.next().await?, Some(1));
    assert_eq!(it.next().await?, Some(2));
    let err = it.next().await.unwrap_err();
    assert_eq!(err.code(), Some("08006"));
    assert_eq!(err.execution_kind(), Some(ExecutionErrorKind::Connectivity));
    assert_eq!(it.state(), IterState::Failed);
    assert!(matches!(it.next().await, Err(ProwlError::IteratorFailed)));
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn lookahead_error_surfaces_on_next_pull() -> Result<()> {
    let mut storage = FakeStorage::new(5);
    storage.fail_at = Some(2);
    let exec = Executor::new(storage, Config::default());
    let s = schema();
    let mut it = exec.query(&s).limit(2)?.get::<i64>().await?;

    assert_eq!(it.next().await?, Some(1));
    assert_eq!(it.next().await?, Some(2));
    assert!(matches!(
        it.next().await,
        Err(ProwlError::QueryExecution { .. })
    ));
    assert!(matches!(it.next().await, Err(ProwlError::IteratorFailed)));
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn stream_adapter_stops_after_error() -> Result<()> {
    let mut storage = FakeStorage::new(5);
    storage.fail_at = Some(1);
    let exec = Executor::new(storage, Config::default());
    let s = schema();
    let it = exec.query(&s).get::<i64>().await?;

    let items: Vec<Result<i64>> = it.into_stream().collect().await;
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(1)));
    assert!(items[1].is_err());
    assert_eq!(exec.storage().released(), 1);
    Ok(())
}

#[tokio::test]
async fn chunked_iterator_walks_every_page() -> Result<()> {
    let exec = Executor::new(
        FakeStorage::new(7),
        Config::default().with_chunk_limit(3),
    );
    let s = schema();
    let mut all = exec.query(&s).all::<i64>();
    assert_eq!(all.collect_all().await?, (1..=7).collect::<Vec<_>>());

    let storage = exec.storage();
    assert_eq!(storage.acquired(), 3);
    assert_eq!(storage.released(), 3);
    let offsets: Vec<usize> = storage
        .statements
        .lock()
        .unwrap()
        .iter()
        .map(|s| offset_of(s.sql()))
        .collect();
    assert_eq!(offsets, vec![0, 3, 6]);
    Ok(())
}

#[tokio::test]
async fn chunked_iterator_starts_at_query_offset() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(6), Config::default());
    let s = schema();
    let mut all = exec.query(&s).limit(2)?.offset(3).all::<i64>();
    assert_eq!(all.chunk_limit(), 2);
    assert_eq!(all.collect_all().await?, vec![4, 5, 6]);
    Ok(())
}

#[tokio::test]
async fn count_one_and_has() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(3), Config::default());
    let s = schema();
    let q = exec.query(&s).gt_field("pk", 0)?;

    assert_eq!(q.one::<i64>().await?, Some(1));
    assert!(exec.storage().last_sql().ends_with("LIMIT 1"));
    assert!(q.has().await?);

    // the fake returns the first stored id as the count
    assert_eq!(q.count().await?, 1);
    assert!(
        exec.storage()
            .last_sql()
            .starts_with(r#"SELECT count(*) AS ct FROM "foo" WHERE "_id" > ?"#)
    );
    assert_eq!(exec.storage().acquired(), exec.storage().released());
    Ok(())
}

#[tokio::test]
async fn values_require_a_selection() -> Result<()> {
    let exec = Executor::new(FakeStorage::new(3), Config::default());
    let s = schema();
    assert!(matches!(
        exec.query(&s).values().await,
        Err(ProwlError::NoSelection)
    ));
    let mut values = exec.query(&s).select(["pk"])?.values().await?;
    assert_eq!(values.next().await?, Some(vec![Value::Integer(1)]));
    Ok(())
}
