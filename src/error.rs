//! Error taxonomy shared by the recording and replaying roles.

use thiserror::Error;

use crate::cassette::format::RequestDescriptor;
use crate::ports::backend::BackendError;
use crate::ports::store::StoreError;

/// Errors surfaced by the cassette engine.
///
/// Replay failures (`Drift`, `Usage`) are deliberately distinct from backend
/// failures so a maintainer can tell "the database rejected this" apart from
/// "the cassette is stale".
#[derive(Debug, Error)]
pub enum TapeError {
    /// No remaining cassette entry matches the incoming request.
    ///
    /// Fatal for the current test: the cassette no longer corresponds to
    /// the code path exercising it and must be re-recorded.
    #[error("no matching response in cassette for query {:?}", .request.query)]
    Drift {
        /// The request that failed to match.
        request: RequestDescriptor,
    },

    /// The cursor was used out of order (e.g. fetch before a match).
    #[error("cursor misuse: {0}")]
    Usage(&'static str),

    /// The invoked operation is outside the captured semantics.
    ///
    /// Batched execution, row streaming, bounded fetches, and manual
    /// iteration fail unconditionally under both roles.
    #[error("operation `{0}` is not supported under record/replay")]
    Unsupported(&'static str),

    /// Entry serialization or cassette parsing failed.
    #[error("cassette codec: {0}")]
    Codec(#[from] serde_yaml::Error),

    /// A capability-store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The live backend reported a failure; propagated unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
