//! Shared cursor capability interface for both record and replay roles.

use std::future::{self, Future};
use std::pin::Pin;

use crate::cassette::format::{Row, Scalar};
use crate::error::TapeError;

/// Boxed future type alias used by [`SqlCursor`] to keep the trait dyn-compatible.
pub type CursorFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, TapeError>> + Send + 'a>>;

fn unsupported<'a, T: Send + 'a>(op: &'static str) -> CursorFuture<'a, T> {
    Box::pin(future::ready(Err(TapeError::Unsupported(op))))
}

/// The one cursor interface the host glue installs into a test session,
/// backed by either the recording or the replaying implementation.
///
/// The captured semantics are restricted to single-statement, fully-buffered
/// query/response pairs; the default methods below reject everything outside
/// that shape for both roles, regardless of live-backend support.
pub trait SqlCursor: Send {
    /// Executes a query or command.
    fn execute<'a>(
        &'a mut self,
        query: &'a str,
        params: Option<Vec<Scalar>>,
        prepare: Option<bool>,
        binary: Option<bool>,
    ) -> CursorFuture<'a, ()>;

    /// Returns all remaining rows of the current result and empties it.
    fn fetch_all(&mut self) -> CursorFuture<'_, Vec<Row>>;

    /// Returns and removes the next remaining row, or `None` when no rows remain.
    fn fetch_one(&mut self) -> CursorFuture<'_, Option<Row>>;

    /// Batched execution; fails unconditionally.
    fn execute_many<'a>(
        &'a mut self,
        _query: &'a str,
        _params_seq: &'a [Vec<Scalar>],
    ) -> CursorFuture<'a, ()> {
        unsupported("execute_many")
    }

    /// Row-streaming execution; fails unconditionally.
    fn stream<'a>(
        &'a mut self,
        _query: &'a str,
        _params: Option<Vec<Scalar>>,
    ) -> CursorFuture<'a, ()> {
        unsupported("stream")
    }

    /// Bounded-size fetch; fails unconditionally.
    fn fetch_many(&mut self, _size: usize) -> CursorFuture<'_, Vec<Row>> {
        unsupported("fetch_many")
    }

    /// Manual row iteration; fails unconditionally.
    fn next_row(&mut self) -> CursorFuture<'_, Option<Row>> {
        unsupported("next_row")
    }
}
