use crate::error::Result;
use crate::executor::Executor;
use crate::iter::ResultIterator;
use crate::query::Query;
use crate::row::FromRow;
use crate::storage::Storage;

/// Walks every row matching a query, `chunk` rows per statement.
///
/// Each chunk is a separate bounded query starting where the previous one
/// ended; iteration stops at the first chunk that reports no more rows.
pub struct ChunkedIterator<'q, S: Storage, T> {
    query: Query<'q, &'q Executor<S>>,
    chunk: u64,
    offset: u64,
    current: Option<ResultIterator<S::Source, T>>,
    done: bool,
}

impl<'q, S: Storage, T: FromRow> ChunkedIterator<'q, S, T> {
    pub(crate) fn new(query: Query<'q, &'q Executor<S>>, chunk: u64) -> Self {
        let offset = query.state.bounds.offset().unwrap_or(0);
        Self {
            query,
            chunk: chunk.max(1),
            offset,
            current: None,
            done: false,
        }
    }

    pub fn chunk_limit(&self) -> u64 {
        self.chunk
    }

    /// Offset of the chunk currently being read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.next().await? {
                    return Ok(Some(item));
                }
                let more = current.has_more();
                self.current = None;
                if !more {
                    self.done = true;
                } else {
                    self.offset += self.chunk;
                }
            }

            if self.done {
                return Ok(None);
            }

            let page = self
                .query
                .clone()
                .limit(self.chunk)?
                .offset(self.offset);
            self.current = Some(page.get::<T>().await?);
        }
    }

    /// Stops iterating and releases the open chunk, if any.
    pub fn close(&mut self) {
        if let Some(mut current) = self.current.take() {
            current.close();
        }
        self.done = true;
    }

    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}
