//! Letterboard Document Store
//!
//! Key/value store over whole JSON documents with field-path addressing.
//!
//! # Overview
//!
//! The store layer provides:
//! - **FieldPath**: dot/bracket paths into a JSON document (`letters[3].style.left`)
//! - **DocumentStore**: async get/set of whole documents and single fields
//! - **MemoryStore**: in-process implementation with per-document write serialization
//!
//! Field-path writes replace one nested field without transmitting the rest
//! of the document. The store serializes individual field writes but makes no
//! ordering promise across separate calls; multi-field consistency is the
//! caller's concern (see `letterboard-repo`).
//!
//! # Example
//!
//! ```rust
//! use letterboard_store::FieldPath;
//! use std::str::FromStr;
//!
//! let path = FieldPath::from_str("letters[3].style.left").unwrap();
//! assert_eq!(path.to_string(), "letters[3].style.left");
//! ```

#![warn(missing_docs)]

pub mod memory;
pub mod path;
pub mod store;

// Re-exports
pub use memory::MemoryStore;
pub use path::{FieldPath, FieldPathError, PathWriteError, Segment};
pub use store::{DocumentStore, StoreError};
