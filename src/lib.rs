//! Record-once, replay-forever cassettes for SQL query traffic in tests.
//!
//! A test suite records real database-query traffic through a
//! [`RecordingCursor`] once, then replays it deterministically with a
//! [`ReplayingCursor`] and no live backend. Cassettes are append-only YAML
//! sequences: each captured entry is a self-contained fragment, so a
//! cancelled or crashed capture never corrupts what was already written,
//! and a [`CaptureSession`] promotes the staged file onto the canonical
//! path only when a session completes cleanly.

pub mod adapters;
pub mod cassette;
pub mod error;
pub mod ports;

pub use cassette::config::SessionMode;
pub use cassette::format::{CassetteEntry, RequestDescriptor, ResponseRecord, Row, Scalar};
pub use cassette::player::{stand_ins, ReplayingConnection, ReplayingCursor, ReplayingPool};
pub use cassette::recorder::RecordingCursor;
pub use cassette::session::CaptureSession;
pub use error::TapeError;
