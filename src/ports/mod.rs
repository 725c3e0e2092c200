//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the engine core and a substitutable
//! collaborator: cassette file storage, the live database driver, and the
//! cursor surface installed into test sessions. Store implementations live
//! in `src/adapters/`; the cursor roles live in `src/cassette/`.

pub mod backend;
pub mod cursor;
pub mod store;

pub use backend::{BackendCursor, BackendError, BackendFuture};
pub use cursor::{CursorFuture, SqlCursor};
pub use store::{CassetteStore, StoreError, StoreFuture};
