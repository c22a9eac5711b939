//! Repository error types
//!
//! Errors pass through to the service layer untranslated; mapping to a
//! transport representation happens at the HTTP boundary.

use letterboard_store::StoreError;
use std::time::Duration;

/// Repository layer failure
///
/// Shape validation is structural at this layer: a [`Tile`] that exists is
/// well-formed, so the wire boundary rejects malformed records before they
/// can reach a setter here.
///
/// [`Tile`]: letterboard_model::Tile
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Index out of range or collection never seeded
    #[error("no tile at index {index}")]
    NotFound {
        /// The requested sequence position
        index: usize,
    },
    /// Store failure, propagated with its raw cause
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Bounded store call that overran its budget
    #[error("store call exceeded {}ms", .waited.as_millis())]
    Timeout {
        /// The budget that was exceeded
        waited: Duration,
    },
    /// Stored document that no longer deserializes into the model
    #[error("stored document `{key}` is malformed: {reason}")]
    Corrupt {
        /// Document key
        key: String,
        /// Deserialization failure detail
        reason: String,
    },
}

impl RepoError {
    /// Whether this failure maps to a client-visible "not found"
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
