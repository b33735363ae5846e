//! Error types for tidelock.
//!
//! Uses thiserror for derive macros. Store adapter errors are surfaced to
//! the caller unmodified: the core cannot tell a transient store fault
//! from a legitimate contention signal, so it never retries them.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by an [`ObjectStore`](crate::store::ObjectStore) adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The named object does not exist in the store.
    #[error("object '{0}' does not exist")]
    NotFound(String),

    /// An I/O failure from a filesystem-backed adapter.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other adapter-specific failure (network stores, permissions
    /// expressed by the backend, quota).
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means the object is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Main error type for lock operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// The acquisition deadline elapsed without confirmed ownership.
    #[error("timed out after {waited:?} waiting for lock on '{resource}'")]
    Timeout {
        /// The logical resource the lock guards.
        resource: String,
        /// Wall-clock time spent in the acquisition loop.
        waited: Duration,
    },

    /// A store adapter error, passed through unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LockError {
    /// Whether this error is an acquisition timeout (as opposed to a store
    /// fault). Lets callers back off or alert without matching variants.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LockError::Timeout { .. })
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_error_names_the_resource() {
        let err = LockError::Timeout {
            resource: "jobs/nightly".to_string(),
            waited: Duration::from_secs(5),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains("jobs/nightly"));
    }

    #[test]
    fn store_error_passes_through_unmodified() {
        let store_err = StoreError::Backend("permission denied by bucket policy".to_string());
        let err = LockError::from(store_err);
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "permission denied by bucket policy");
    }

    #[test]
    fn not_found_is_distinguishable() {
        let err = StoreError::NotFound("jobs/nightly.lock".to_string());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("jobs/nightly.lock"));

        let io = StoreError::Io(std::io::Error::other("disk on fire"));
        assert!(!io.is_not_found());
    }
}
