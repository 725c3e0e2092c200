//! Thread-offloaded store: blocking I/O on the tokio blocking pool.

use std::io;
use std::path::Path;

use super::{append_sync, delete_sync, make_dirs_sync, read_sync, rename_sync};
use crate::ports::store::{CassetteStore, StoreError, StoreFuture};

/// Store backend that offloads each operation via `tokio::task::spawn_blocking`.
///
/// An offloaded append runs to completion even when the awaiting task is
/// aborted, so fragments stay whole under cancellation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnBlockingStore;

async fn offload<T, F>(op: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result,
        Err(join) => Err(StoreError::new(
            "offload",
            Path::new("<blocking pool>"),
            io::Error::other(join),
        )),
    }
}

impl CassetteStore for SpawnBlockingStore {
    fn read<'a>(&'a self, path: &'a Path) -> StoreFuture<'a, String> {
        let path = path.to_path_buf();
        Box::pin(offload(move || {
            read_sync(&path).map_err(|e| StoreError::new("read", &path, e))
        }))
    }

    fn append<'a>(&'a self, path: &'a Path, data: &'a str) -> StoreFuture<'a, ()> {
        let path = path.to_path_buf();
        let data = data.to_string();
        Box::pin(offload(move || {
            append_sync(&path, &data).map_err(|e| StoreError::new("append", &path, e))
        }))
    }

    fn make_dirs<'a>(&'a self, path: &'a Path, exist_ok: bool) -> StoreFuture<'a, ()> {
        let path = path.to_path_buf();
        Box::pin(offload(move || {
            make_dirs_sync(&path, exist_ok).map_err(|e| StoreError::new("make_dirs", &path, e))
        }))
    }

    fn delete<'a>(&'a self, path: &'a Path, missing_ok: bool) -> StoreFuture<'a, ()> {
        let path = path.to_path_buf();
        Box::pin(offload(move || {
            delete_sync(&path, missing_ok).map_err(|e| StoreError::new("delete", &path, e))
        }))
    }

    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> StoreFuture<'a, ()> {
        let from = from.to_path_buf();
        let to = to.to_path_buf();
        Box::pin(offload(move || {
            rename_sync(&from, &to).map_err(|e| StoreError::new("rename", &from, e))
        }))
    }
}
