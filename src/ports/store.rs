//! Capability port for cassette file I/O.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use thiserror::Error;

/// Boxed future type alias used by [`CassetteStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// A failed store operation, keeping the path and the underlying I/O error.
#[derive(Debug, Error)]
#[error("{} {}: {}", .op, .path.display(), .source)]
pub struct StoreError {
    /// Operation that failed (`"read"`, `"append"`, ...).
    pub op: &'static str,
    /// Path the operation targeted.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}

impl StoreError {
    /// Wraps an I/O error with the failing operation and path.
    #[must_use]
    pub fn new(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self { op, path: path.to_path_buf(), source }
    }

    /// Whether the underlying error was a missing file or directory.
    ///
    /// The session finalizer uses this to tell "nothing was captured" apart
    /// from a real failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

/// Substitutable file-I/O backend for cassette storage.
///
/// Every operation is a suspension point. Implementations live in
/// `src/adapters/store/`; the engine never touches the filesystem directly.
pub trait CassetteStore: Send + Sync {
    /// Reads the entire file at `path` as UTF-8 text.
    fn read<'a>(&'a self, path: &'a Path) -> StoreFuture<'a, String>;

    /// Appends `data` to the file at `path`, creating the file if absent.
    ///
    /// The data must land as one atomic write so that a fragment is either
    /// fully present or fully absent, never truncated.
    fn append<'a>(&'a self, path: &'a Path, data: &'a str) -> StoreFuture<'a, ()>;

    /// Creates the directory at `path` together with missing parents.
    fn make_dirs<'a>(&'a self, path: &'a Path, exist_ok: bool) -> StoreFuture<'a, ()>;

    /// Deletes the file at `path`.
    fn delete<'a>(&'a self, path: &'a Path, missing_ok: bool) -> StoreFuture<'a, ()>;

    /// Atomically renames `from` onto `to`, replacing any existing file.
    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> StoreFuture<'a, ()>;
}
