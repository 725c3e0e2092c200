//! Session-mode selection and the cassette path convention.

use std::path::{Path, PathBuf};

/// Which role the host glue installs for one test session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Execute against the live backend and capture a new cassette.
    Record,
    /// Serve responses from an existing cassette with no live backend.
    Replay,
}

impl SessionMode {
    /// Decision rule for the host glue: record when rewriting or when no
    /// cassette exists yet, replay otherwise.
    #[must_use]
    pub fn select(rewrite: bool, cassette_exists: bool) -> Self {
        if rewrite || !cassette_exists {
            Self::Record
        } else {
            Self::Replay
        }
    }
}

/// Canonical cassette path for one test identity.
///
/// The `.sql.yml` suffix keeps database cassettes apart from other
/// recordings sharing the same directory.
#[must_use]
pub fn cassette_path(dir: &Path, test_name: &str) -> PathBuf {
    dir.join(format!("{test_name}.sql.yml"))
}

/// Staging sibling of a canonical cassette path.
///
/// Appends land here during capture; the canonical path only ever changes
/// through the finalizer's atomic rename.
#[must_use]
pub fn staging_path(canonical: &Path) -> PathBuf {
    canonical.with_extension("tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_always_records() {
        assert_eq!(SessionMode::select(true, true), SessionMode::Record);
        assert_eq!(SessionMode::select(true, false), SessionMode::Record);
    }

    #[test]
    fn missing_cassette_records_existing_replays() {
        assert_eq!(SessionMode::select(false, false), SessionMode::Record);
        assert_eq!(SessionMode::select(false, true), SessionMode::Replay);
    }

    #[test]
    fn paths_share_a_stem() {
        let canonical = cassette_path(Path::new("tests/cassettes"), "test_orders");
        assert_eq!(canonical, Path::new("tests/cassettes/test_orders.sql.yml"));
        assert_eq!(
            staging_path(&canonical),
            Path::new("tests/cassettes/test_orders.sql.tmp")
        );
    }
}
