//! Error types for the identifier generation service.
//!
//! Components return typed errors; only the orchestrator decides retry
//! versus fail-fast and translates errors into the caller-facing response
//! shape. [`Error::is_transient`] drives that classification.

use std::sync::{MutexGuard, PoisonError};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All failure modes of the identifier generation service.
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested count is zero or exceeds the configured maximum.
    ///
    /// Fatal: surfaced immediately, never retried.
    #[error("invalid count {count}: must be between 1 and {max}")]
    InvalidCount { count: usize, max: usize },

    /// The backing store could not be reached or timed out.
    ///
    /// Transient: subject to the retry policy.
    #[error("store unavailable: {context}")]
    StoreUnavailable { context: String },

    /// The uniqueness check for a series code failed at the store.
    ///
    /// Transient: the candidate code is discarded, never accepted unchecked.
    #[error("series uniqueness check failed: {context}")]
    UniquenessCheckFailed { context: String },

    /// A series code could not be drawn without collision within the
    /// configured draw limit.
    #[error("series draw limit reached after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },

    /// A transient failure persisted through every retry attempt.
    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<Error> },
}

impl Error {
    /// Returns `true` for failures worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::StoreUnavailable { .. } | Error::UniquenessCheckFailed { .. }
        )
    }
}

// A poisoned lock means another caller panicked mid-operation; to callers
// this is indistinguishable from the store being down.
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Error::StoreUnavailable {
            context: "store lock poisoned".into(),
        }
    }
}
