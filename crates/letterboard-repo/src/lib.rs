//! Letterboard Tile Repository
//!
//! Typed accessor over a [`DocumentStore`](letterboard_store::DocumentStore):
//! whole-collection read/write, single-record read, and the two partial
//! updates the synchronization protocol is built on (position-only,
//! transform-only).
//!
//! Partial updates address records by *sequence position*, not by `id`.
//! The repository exposes no insert or delete, so the persisted order never
//! changes after seeding and index addressing stays safe by construction.

#![warn(missing_docs)]

pub mod error;
pub mod repository;

// Re-exports
pub use error::RepoError;
pub use repository::{RepoConfig, TileRepository, WriteMode, BOARD_KEY, LETTERS_KEY};
