//! Capture-session lifecycle: staging appends, atomic promotion.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::config;
use super::recorder::RecordingCursor;
use crate::error::TapeError;
use crate::ports::backend::BackendCursor;
use crate::ports::store::CassetteStore;

/// Owns one capture session's staging resource.
///
/// All appends target a staging sibling of the canonical cassette path, so
/// the canonical file only ever changes through [`CaptureSession::finish`] —
/// as a whole or not at all. An abandoned session (test run interrupted
/// before finalization) leaves its staging file behind; the next session
/// for the same path discards it in [`CaptureSession::begin`] before any
/// new append, so stale partial data is never mistaken for fresh output.
pub struct CaptureSession {
    store: Arc<dyn CassetteStore>,
    canonical: PathBuf,
    staging: PathBuf,
}

impl CaptureSession {
    /// Starts a capture session targeting `canonical`.
    ///
    /// Deletes any stale staging resource left by a previously abandoned
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if the stale staging file cannot be removed.
    pub async fn begin(
        store: Arc<dyn CassetteStore>,
        canonical: impl Into<PathBuf>,
    ) -> Result<Self, TapeError> {
        let canonical = canonical.into();
        let staging = config::staging_path(&canonical);
        store.delete(&staging, true).await?;
        debug!(staging = %staging.display(), "capture session started");
        Ok(Self { store, canonical, staging })
    }

    /// Canonical cassette path this session will promote to.
    #[must_use]
    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    /// Staging path appends land on until the session finishes.
    #[must_use]
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Recording-cursor factory for this session.
    ///
    /// Pure: the staging file is only touched once the cursor captures its
    /// first completed query.
    #[must_use]
    pub fn cursor(&self, backend: Box<dyn BackendCursor>) -> RecordingCursor {
        RecordingCursor::new(backend, Arc::clone(&self.store), self.staging.clone())
    }

    /// Promotes the staging resource onto the canonical path.
    ///
    /// Call only when the owning session ran to clean completion. The
    /// rename is atomic: the canonical cassette appears as a whole or not
    /// at all. Returns the canonical path, or `None` when the session
    /// captured nothing and no staging file was ever created.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails for any reason other than a
    /// missing staging file.
    pub async fn finish(self) -> Result<Option<PathBuf>, TapeError> {
        match self.store.rename(&self.staging, &self.canonical).await {
            Ok(()) => {
                debug!(path = %self.canonical.display(), "cassette finalized");
                Ok(Some(self.canonical))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
