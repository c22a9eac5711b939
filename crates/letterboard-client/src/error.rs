//! Client error types

use letterboard_service::ServiceError;

/// Failure inside a client session
///
/// Transport failures during polling and drag release are caught by the
/// session loop, logged, and never crash the session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A second drag was started while one is in flight
    #[error("a drag is already in progress")]
    DragInProgress,
    /// Drag operation without an active drag
    #[error("no drag in progress")]
    NoActiveDrag,
    /// Tile id not present in local view state
    #[error("unknown tile id {0}")]
    UnknownTile(u32),
    /// Tile id never observed in a server snapshot, so no index to address
    #[error("tile id {0} is not in the last synchronized snapshot")]
    NotSynchronized(u32),
    /// HTTP transport failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Unexpected HTTP status from the service
    #[error("unexpected response status {0}")]
    Status(u16),
    /// In-process transport failure
    #[error(transparent)]
    Service(#[from] ServiceError),
}
