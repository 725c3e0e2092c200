//! Live-driver port the recording role delegates to.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::cassette::format::{Row, Scalar};

/// Boxed future type alias used by [`BackendCursor`] to keep the trait dyn-compatible.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// Errors raised by a live backend driver.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The last executed statement produced no result set.
    ///
    /// The one condition the recorder recovers from locally: the captured
    /// response becomes `NoResult` instead of the error propagating.
    #[error("the last operation didn't produce a result")]
    NoResultSet,

    /// Any other driver-reported failure; always propagated unchanged.
    #[error("backend: {0}")]
    Execution(String),
}

/// Driver-call boundary for executing statements against a live database.
///
/// Implementations buffer the full result set of the last statement;
/// `seek_absolute` repositions the read cursor within that buffer. Reading
/// from a statement that produced no result set yields
/// [`BackendError::NoResultSet`].
pub trait BackendCursor: Send {
    /// Executes a query or command against the live backend.
    fn execute<'a>(
        &'a mut self,
        query: &'a str,
        params: Option<&'a [Scalar]>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> BackendFuture<'a, ()>;

    /// Returns every row from the current read position to the end.
    fn fetch_all(&mut self) -> BackendFuture<'_, Vec<Row>>;

    /// Returns the row at the current read position, or `None` at the end.
    fn fetch_one(&mut self) -> BackendFuture<'_, Option<Row>>;

    /// Moves the read cursor to an absolute row index.
    fn seek_absolute(&mut self, index: usize) -> BackendFuture<'_, ()>;
}
