//! Inline blocking store: `std::fs` calls performed directly in the future.

use std::future;
use std::path::Path;

use super::{append_sync, delete_sync, make_dirs_sync, read_sync, rename_sync};
use crate::ports::store::{CassetteStore, StoreError, StoreFuture};

/// Store backend that blocks the running task's thread for each operation.
///
/// The simplest backend; adequate for test workloads where cassettes are
/// small and contention is nil.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingStore;

impl CassetteStore for BlockingStore {
    fn read<'a>(&'a self, path: &'a Path) -> StoreFuture<'a, String> {
        Box::pin(future::ready(
            read_sync(path).map_err(|e| StoreError::new("read", path, e)),
        ))
    }

    fn append<'a>(&'a self, path: &'a Path, data: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(future::ready(
            append_sync(path, data).map_err(|e| StoreError::new("append", path, e)),
        ))
    }

    fn make_dirs<'a>(&'a self, path: &'a Path, exist_ok: bool) -> StoreFuture<'a, ()> {
        Box::pin(future::ready(
            make_dirs_sync(path, exist_ok).map_err(|e| StoreError::new("make_dirs", path, e)),
        ))
    }

    fn delete<'a>(&'a self, path: &'a Path, missing_ok: bool) -> StoreFuture<'a, ()> {
        Box::pin(future::ready(
            delete_sync(path, missing_ok).map_err(|e| StoreError::new("delete", path, e)),
        ))
    }

    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> StoreFuture<'a, ()> {
        Box::pin(future::ready(
            rename_sync(from, to).map_err(|e| StoreError::new("rename", from, e)),
        ))
    }
}
