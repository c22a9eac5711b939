//! Service error types

use letterboard_model::ValidationError;
use letterboard_repo::RepoError;

/// Failure while handling a service request
///
/// Repository errors pass through untranslated; the HTTP boundary maps
/// them to a transport representation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed request input, rejected before any store call
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Repository failure (not found, store, timeout, corrupt document)
    #[error(transparent)]
    Repo(#[from] RepoError),
    /// Read of a board that was never seeded
    #[error("board has not been seeded")]
    NotSeeded,
}
