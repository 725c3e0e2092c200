//! Replaying role: serve captured responses with no live backend.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::format::{self, CassetteEntry, RequestDescriptor, ResponseRecord, Row, Scalar};
use crate::error::TapeError;
use crate::ports::cursor::{CursorFuture, SqlCursor};
use crate::ports::store::CassetteStore;

/// Cursor answering query calls from a previously captured cassette.
///
/// The cassette is loaded once, lazily, into a pending pool that shrinks by
/// one entry per matched request. Repeated identical requests therefore
/// resolve to their captured responses in original capture order. A request
/// with no remaining match is drift and fails hard.
pub struct ReplayingCursor {
    store: Arc<dyn CassetteStore>,
    source: PathBuf,
    /// Pending pool; `None` until the cassette is loaded.
    pending: Option<Vec<CassetteEntry>>,
    /// Response selected by the last successful `execute`.
    response: Option<ResponseRecord>,
}

impl ReplayingCursor {
    /// Creates a replaying cursor for the cassette at `source`.
    ///
    /// Pure: the cassette is loaded lazily on the first `execute`.
    #[must_use]
    pub fn new(store: Arc<dyn CassetteStore>, source: impl Into<PathBuf>) -> Self {
        Self { store, source: source.into(), pending: None, response: None }
    }

    /// Loads and decodes the cassette into the pending pool. Idempotent.
    ///
    /// `pending` is assigned only after both the read and the decode have
    /// completed, so a caller cancelled mid-load leaves the cursor in the
    /// "not yet loaded" state and a retry reloads cleanly.
    async fn load(&mut self) -> Result<(), TapeError> {
        if self.pending.is_some() {
            return Ok(());
        }
        let text = self.store.read(&self.source).await?;
        let entries = format::decode_stream(&text)?;
        debug!(path = %self.source.display(), entries = entries.len(), "cassette loaded");
        self.pending = Some(entries);
        Ok(())
    }

    async fn replay(
        &mut self,
        query: &str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> Result<(), TapeError> {
        self.load().await?;
        let request = RequestDescriptor { query: query.to_string(), params, prepare, binary };
        let pending = self.pending.as_mut().expect("pool populated by load");
        // First structurally-equal entry wins; consuming it exposes the next
        // duplicate to the next call, preserving capture order.
        match pending.iter().position(|entry| entry.request == request) {
            Some(index) => {
                let entry = pending.remove(index);
                debug!(query, index, remaining = pending.len(), "replay match");
                self.response = Some(entry.response);
                Ok(())
            }
            None => Err(TapeError::Drift { request }),
        }
    }

    fn current_rows(&mut self) -> Result<&mut Vec<Row>, TapeError> {
        match self.response.as_mut() {
            None => Err(TapeError::Usage("no response loaded; execute a query first")),
            Some(ResponseRecord::NoResult) => Err(TapeError::Usage(
                "the last replayed statement produced no result set",
            )),
            Some(ResponseRecord::Rows(rows)) => Ok(rows),
        }
    }
}

impl SqlCursor for ReplayingCursor {
    fn execute<'a>(
        &'a mut self,
        query: &'a str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> CursorFuture<'a, ()> {
        Box::pin(self.replay(query, params, prepare, binary))
    }

    fn fetch_all(&mut self) -> CursorFuture<'_, Vec<Row>> {
        Box::pin(async move {
            let rows = self.current_rows()?;
            Ok(std::mem::take(rows))
        })
    }

    fn fetch_one(&mut self) -> CursorFuture<'_, Option<Row>> {
        Box::pin(async move {
            let rows = self.current_rows()?;
            if rows.is_empty() {
                Ok(None)
            } else {
                Ok(Some(rows.remove(0)))
            }
        })
    }
}

/// Pass-through connection shell.
///
/// Holds no cassette state of its own; every `cursor` call hands back a
/// fresh [`ReplayingCursor`] owning its own pending pool.
pub struct ReplayingConnection {
    store: Arc<dyn CassetteStore>,
    source: PathBuf,
}

impl ReplayingConnection {
    /// Creates a connection shell for the cassette at `source`.
    #[must_use]
    pub fn new(store: Arc<dyn CassetteStore>, source: impl Into<PathBuf>) -> Self {
        Self { store, source: source.into() }
    }

    /// Hands back a fresh replaying cursor.
    #[must_use]
    pub fn cursor(&self) -> ReplayingCursor {
        ReplayingCursor::new(Arc::clone(&self.store), self.source.clone())
    }

    /// Creates a cursor and executes `query` on it in one step.
    ///
    /// # Errors
    ///
    /// Fails with a drift error if the cassette holds no matching entry.
    pub async fn execute(
        &self,
        query: &str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> Result<ReplayingCursor, TapeError> {
        let mut cursor = self.cursor();
        cursor.execute(query, params, prepare, binary).await?;
        Ok(cursor)
    }

    /// Transactions do not exist during replay; committing is a no-op.
    pub async fn commit(&self) {}

    /// Closing is a no-op; the shell holds no live resources.
    pub async fn close(&self) {}
}

/// Pass-through pool shell.
///
/// Acquiring always yields a fresh [`ReplayingConnection`]; releasing is
/// dropping it.
pub struct ReplayingPool {
    store: Arc<dyn CassetteStore>,
    source: PathBuf,
}

impl ReplayingPool {
    /// Creates a pool shell for the cassette at `source`.
    #[must_use]
    pub fn new(store: Arc<dyn CassetteStore>, source: impl Into<PathBuf>) -> Self {
        Self { store, source: source.into() }
    }

    /// Opening is a no-op; there is nothing to warm up.
    pub async fn open(&self) {}

    /// Closing is a no-op.
    pub async fn close(&self) {}

    /// Hands back a connection shell.
    pub async fn acquire(&self) -> ReplayingConnection {
        ReplayingConnection::new(Arc::clone(&self.store), self.source.clone())
    }
}

/// Replay stand-in triple for the host glue: cursor, connection, pool.
///
/// Pure: no file is touched until a cursor's first `execute`.
#[must_use]
pub fn stand_ins(
    store: Arc<dyn CassetteStore>,
    source: impl Into<PathBuf>,
) -> (ReplayingCursor, ReplayingConnection, ReplayingPool) {
    let source = source.into();
    (
        ReplayingCursor::new(Arc::clone(&store), source.clone()),
        ReplayingConnection::new(Arc::clone(&store), source.clone()),
        ReplayingPool::new(store, source),
    )
}
