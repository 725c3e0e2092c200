//! Store adapters implementing the cassette I/O capability.
//!
//! Three interchangeable backends: inline blocking I/O, thread-offloaded
//! blocking I/O, and native asynchronous I/O. All of them preserve the
//! append contract — one fragment, one write call.

pub mod blocking;
pub mod spawn_blocking;
pub mod tokio_fs;

pub use blocking::BlockingStore;
pub use spawn_blocking::SpawnBlockingStore;
pub use tokio_fs::TokioFsStore;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

pub(crate) fn read_sync(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Appends `data` with a single write call; the fragment is never split.
pub(crate) fn append_sync(path: &Path, data: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(data.as_bytes())
}

pub(crate) fn make_dirs_sync(path: &Path, exist_ok: bool) -> io::Result<()> {
    if !exist_ok && path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        ));
    }
    std::fs::create_dir_all(path)
}

pub(crate) fn delete_sync(path: &Path, missing_ok: bool) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if missing_ok && e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

pub(crate) fn rename_sync(from: &Path, to: &Path) -> io::Result<()> {
    std::fs::rename(from, to)
}
