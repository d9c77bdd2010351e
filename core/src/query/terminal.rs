//! Terminal calls on a query bound to an [`Executor`].

use crate::compile::Window;
use crate::error::{ProwlError, Result};
use crate::executor::Executor;
use crate::iter::{ChunkedIterator, ResultIterator};
use crate::query::Query;
use crate::row::FromRow;
use crate::storage::Storage;
use crate::value::{FromValue, Value};

impl<'q, S: Storage> Query<'q, &'q Executor<S>> {
    pub fn executor(&self) -> &'q Executor<S> {
        self.exec
    }

    /// Runs the query and returns a lazy iterator over hydrated rows.
    ///
    /// With a limit, one extra row is requested so the iterator can report
    /// [`has_more`](ResultIterator::has_more). A raw statement runs verbatim
    /// and never reports more rows.
    pub async fn get<T: FromRow>(&self) -> Result<ResultIterator<S::Source, T>> {
        if self.state.raw.is_some() {
            let statement = self.compiler().select(&self.state);
            let source = self.exec.fetch(&statement, None).await?;
            return Ok(ResultIterator::new(source, None));
        }

        let limit = self.state.bounds.limit();
        let statement = self.compiler().select_window(&self.state, Window::Lookahead);
        let hint = limit.map(|l| l.saturating_add(1));
        let source = self.exec.fetch(&statement, hint).await?;
        Ok(ResultIterator::new(source, limit))
    }

    /// First matching row, honouring the offset.
    pub async fn one<T: FromRow>(&self) -> Result<Option<T>> {
        let statement = self.compiler().select_window(&self.state, Window::One);
        let source = self.exec.fetch(&statement, Some(1)).await?;
        let mut rows = ResultIterator::<_, T>::new(source, None);
        let first = rows.next().await?;
        rows.close();
        Ok(first)
    }

    /// Number of matching rows. Sorts and bounds do not apply.
    pub async fn count(&self) -> Result<u64> {
        let statement = self.compiler().count(&self.state);
        let source = self.exec.fetch(&statement, Some(1)).await?;
        let mut rows = ResultIterator::<_, Value>::new(source, None);
        let count = rows.next().await?;
        rows.close();
        match count {
            Some(value) => u64::from_value(value),
            None => Ok(0),
        }
    }

    pub async fn has(&self) -> Result<bool> {
        Ok(self.one::<Vec<Value>>().await?.is_some())
    }

    /// Iterator over the selected fields' values, in selection order.
    pub async fn values(&self) -> Result<ResultIterator<S::Source, Vec<Value>>> {
        if self.state.raw.is_none() && self.state.selection.is_empty() {
            return Err(ProwlError::NoSelection);
        }
        self.get().await
    }

    /// First row of [`values`](Query::values), hydrated as `T`.
    ///
    /// With a single selected field a scalar `T` reads that field directly;
    /// `Vec<Value>` keeps the whole tuple.
    pub async fn value<T: FromRow>(&self) -> Result<Option<T>> {
        if self.state.raw.is_none() && self.state.selection.is_empty() {
            return Err(ProwlError::NoSelection);
        }
        self.one().await
    }

    fn select_pk(&self) -> Result<Self> {
        let pk = self.schema.require_primary_key()?.name.clone();
        self.clone().reset_select().select([pk])
    }

    /// Primary keys of the matching rows.
    pub async fn pks(&self) -> Result<ResultIterator<S::Source, Value>> {
        self.select_pk()?.get().await
    }

    pub async fn pk(&self) -> Result<Option<Value>> {
        self.select_pk()?.one().await
    }

    /// Row whose primary key is `pk`.
    pub async fn get_pk<T: FromRow>(&self, pk: impl Into<Value>) -> Result<Option<T>> {
        self.schema.require_primary_key()?;
        self.clone().is_field("pk", pk)?.one().await
    }

    /// Rows whose primary key is one of `pks`.
    pub async fn get_pks<T, I>(&self, pks: I) -> Result<ResultIterator<S::Source, T>>
    where
        T: FromRow,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.schema.require_primary_key()?;
        self.clone().in_field("pk", pks)?.get().await
    }

    /// Lowest primary key first.
    pub async fn first<T: FromRow>(&self) -> Result<Option<T>> {
        self.schema.require_primary_key()?;
        self.clone().asc_field("pk")?.one().await
    }

    /// Highest primary key first.
    pub async fn last<T: FromRow>(&self) -> Result<Option<T>> {
        self.schema.require_primary_key()?;
        self.clone().desc_field("pk")?.one().await
    }

    /// Every matching row, fetched in chunks of the query's limit or the
    /// configured chunk limit.
    pub fn all<T: FromRow>(&self) -> ChunkedIterator<'q, S, T> {
        let chunk = self
            .state
            .bounds
            .limit()
            .unwrap_or(self.exec.config().chunk_limit);
        ChunkedIterator::new(self.clone(), chunk)
    }

    /// Inserts the assigned fields, returning the new primary key when the
    /// schema declares one.
    pub async fn insert(&self) -> Result<Option<Value>> {
        let statement = self.compiler().insert(&self.state)?;
        if self.schema.primary_key().is_none() {
            self.exec.execute(&statement).await?;
            return Ok(None);
        }
        let source = self.exec.fetch(&statement, Some(1)).await?;
        let mut rows = ResultIterator::<_, Value>::new(source, None);
        let pk = rows.next().await?;
        rows.close();
        Ok(pk)
    }

    /// Applies the assigned fields to every matching row.
    pub async fn update(&self) -> Result<u64> {
        let statement = self.compiler().update(&self.state)?;
        self.exec.execute(&statement).await
    }

    /// Deletes every matching row.
    pub async fn delete(&self) -> Result<u64> {
        let statement = self.compiler().delete(&self.state);
        self.exec.execute(&statement).await
    }
}
