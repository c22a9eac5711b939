//! Letterboard Client Reconciliation
//!
//! Per-viewer synchronization against the shared board:
//! - **Reconciler**: pure session state machine (`Idle` / `Dragging`) that
//!   merges polled snapshots while preserving the in-flight drag
//! - **Transport**: switchable backend seam, HTTP (reqwest) or in-process
//! - **Session**: the polling loop itself, bounded-latency refresh with
//!   swallowed-and-logged failures
//!
//! The protocol is last-write-wins at the field level; a session's local
//! optimistic state is never rolled back on a failed update. The next
//! successful poll corrects any divergence.

#![warn(missing_docs)]

pub mod error;
pub mod reconcile;
pub mod session;
pub mod transport;

// Re-exports
pub use error::ClientError;
pub use reconcile::{DragState, Reconciler, TileUpdate};
pub use session::{Session, SessionConfig};
pub use transport::{HttpTransport, LocalTransport, Transport};
