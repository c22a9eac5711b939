//! Letterboard Synchronization Service
//!
//! Stateless request handling between polling clients and the tile
//! repository:
//! - **BoardService**: seed-once initialization, reads, authorized partial updates
//! - **http**: warp route surface with permissive CORS and error mapping
//!
//! The update protocol never replaces a whole record from a client
//! proposal: only the position and transform fields are consulted, so
//! creation-time fields (`color`, `fontSize`) always survive updates.

#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod service;

// Re-exports
pub use error::ServiceError;
pub use http::routes;
pub use service::BoardService;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
