//! Lazy result iteration.

mod chunked;

pub use chunked::ChunkedIterator;

use core::marker::PhantomData;

use futures_util::Stream;

use crate::error::{ProwlError, Result};
use crate::row::FromRow;
use crate::storage::RowSource;

/// Lifecycle of a [`ResultIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// Created, nothing pulled yet
    Fresh,
    /// At least one row pulled
    Streaming,
    /// Source drained (or the limit reached)
    Exhausted,
    /// Closed by the caller before exhaustion
    Closed,
    /// A storage or mapping error was returned
    Failed,
}

/// Pull-based iterator over a row source, hydrating one row per
/// [`next`](ResultIterator::next).
///
/// With a limit, the source was asked for one row more than the limit. That
/// extra row is read right after the limit-th row is yielded, only to set
/// [`has_more`](ResultIterator::has_more), and is never returned.
///
/// The source is released exactly once: on exhaustion, [`close`], the first
/// error, or drop. Dropping an in-flight `next()` future and then the
/// iterator therefore releases the cursor too.
///
/// [`close`]: ResultIterator::close
pub struct ResultIterator<R: RowSource, T> {
    source: Option<R>,
    state: IterState,
    limit: Option<u64>,
    yielded: u64,
    has_more: bool,
    pending_error: Option<ProwlError>,
    _marker: PhantomData<fn() -> T>,
}

impl<R: RowSource, T> core::fmt::Debug for ResultIterator<R, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResultIterator")
            .field("state", &self.state)
            .field("limit", &self.limit)
            .field("yielded", &self.yielded)
            .field("has_more", &self.has_more)
            .finish()
    }
}

impl<R: RowSource, T: FromRow> ResultIterator<R, T> {
    pub fn new(source: R, limit: Option<u64>) -> Self {
        Self {
            source: Some(source),
            state: IterState::Fresh,
            limit,
            yielded: 0,
            has_more: false,
            pending_error: None,
            _marker: PhantomData,
        }
    }

    pub fn state(&self) -> IterState {
        self.state
    }

    /// Whether rows beyond the limit exist. Known once the limit-th row has
    /// been pulled; always false without a limit.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Rows returned so far.
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Pulls the next row.
    ///
    /// Returns `Ok(None)` once exhausted. After [`close`](Self::close) every
    /// pull fails with [`ProwlError::IteratorClosed`]; after an error with
    /// [`ProwlError::IteratorFailed`].
    pub async fn next(&mut self) -> Result<Option<T>> {
        match self.state {
            IterState::Closed => return Err(ProwlError::IteratorClosed),
            IterState::Failed => {
                return Err(self.pending_error.take().unwrap_or(ProwlError::IteratorFailed));
            }
            IterState::Exhausted => return Ok(None),
            IterState::Fresh => self.state = IterState::Streaming,
            IterState::Streaming => {}
        }

        let Some(source) = self.source.as_mut() else {
            self.state = IterState::Exhausted;
            return Ok(None);
        };

        let row = match source.next_row().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                self.finish(IterState::Exhausted);
                return Ok(None);
            }
            Err(err) => {
                self.finish(IterState::Failed);
                return Err(err);
            }
        };

        let item = match T::from_row(row) {
            Ok(item) => item,
            Err(err) => {
                self.finish(IterState::Failed);
                return Err(err);
            }
        };
        self.yielded += 1;

        if self.limit.is_some_and(|limit| self.yielded >= limit) {
            self.read_lookahead().await;
        }
        Ok(Some(item))
    }

    /// Reads the row past the limit. A failure here is kept and returned by
    /// the next pull so the row already hydrated is not lost.
    async fn read_lookahead(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.next_row().await {
            Ok(extra) => {
                self.has_more = extra.is_some();
                self.finish(IterState::Exhausted);
            }
            Err(err) => {
                self.pending_error = Some(err);
                self.finish(IterState::Failed);
            }
        }
    }

    /// Releases the cursor early. Later pulls fail with
    /// [`ProwlError::IteratorClosed`]. Closing a finished iterator is a no-op.
    pub fn close(&mut self) {
        if matches!(self.state, IterState::Fresh | IterState::Streaming) {
            self.finish(IterState::Closed);
        }
    }

    /// Drains the remaining rows.
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Adapts the iterator to a [`Stream`]. The stream ends after the first
    /// error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        futures_util::stream::unfold(self, |mut it| async move {
            if it.is_done() {
                return None;
            }
            match it.next().await {
                Ok(Some(item)) => Some((Ok(item), it)),
                Ok(None) => None,
                Err(err) => Some((Err(err), it)),
            }
        })
    }

    fn is_done(&self) -> bool {
        match self.state {
            IterState::Exhausted | IterState::Closed => true,
            IterState::Failed => self.pending_error.is_none(),
            IterState::Fresh | IterState::Streaming => false,
        }
    }
}

impl<R: RowSource, T> ResultIterator<R, T> {
    fn finish(&mut self, state: IterState) {
        self.state = state;
        if let Some(source) = self.source.take() {
            crate::prowl_trace_iter!("release", self.yielded);
            source.release();
        }
    }
}

impl<R: RowSource, T> Drop for ResultIterator<R, T> {
    fn drop(&mut self) {
        if let Some(source) = self.source.take() {
            crate::prowl_trace_iter!("drop", self.yielded);
            source.release();
        }
    }
}
