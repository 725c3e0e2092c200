//! Native asynchronous store backed by `tokio::fs`.

use std::io;
use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::ports::store::{CassetteStore, StoreError, StoreFuture};

/// Store backend using tokio's asynchronous filesystem primitives.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFsStore;

impl CassetteStore for TokioFsStore {
    fn read<'a>(&'a self, path: &'a Path) -> StoreFuture<'a, String> {
        Box::pin(async move {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| StoreError::new("read", path, e))
        })
    }

    fn append<'a>(&'a self, path: &'a Path, data: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await
                .map_err(|e| StoreError::new("append", path, e))?;
            // One buffered write per fragment; flush explicitly because
            // tokio files do not flush on drop.
            file.write_all(data.as_bytes())
                .await
                .map_err(|e| StoreError::new("append", path, e))?;
            file.flush().await.map_err(|e| StoreError::new("append", path, e))
        })
    }

    fn make_dirs<'a>(&'a self, path: &'a Path, exist_ok: bool) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            if !exist_ok {
                match tokio::fs::metadata(path).await {
                    Ok(_) => {
                        return Err(StoreError::new(
                            "make_dirs",
                            path,
                            io::Error::new(
                                io::ErrorKind::AlreadyExists,
                                format!("{} already exists", path.display()),
                            ),
                        ));
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StoreError::new("make_dirs", path, e)),
                }
            }
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| StoreError::new("make_dirs", path, e))
        })
    }

    fn delete<'a>(&'a self, path: &'a Path, missing_ok: bool) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            match tokio::fs::remove_file(path).await {
                Ok(()) => Ok(()),
                Err(e) if missing_ok && e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::new("delete", path, e)),
            }
        })
    }

    fn rename<'a>(&'a self, from: &'a Path, to: &'a Path) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            tokio::fs::rename(from, to)
                .await
                .map_err(|e| StoreError::new("rename", from, e))
        })
    }
}
