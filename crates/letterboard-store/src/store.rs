//! Document store contract
//!
//! Whole-document and field-path access to named JSON documents. No retry
//! policy lives at this layer; callers decide what a failed call means.

use crate::path::FieldPath;
use async_trait::async_trait;
use serde_json::Value;

/// Store layer failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Field write addressed to a document that does not exist
    #[error("document `{key}` does not exist")]
    MissingDocument {
        /// The absent document key
        key: String,
    },
    /// Path that cannot be addressed within the document
    #[error("path `{path}` not addressable in `{key}`: {reason}")]
    BadPath {
        /// Document key
        key: String,
        /// The offending path
        path: FieldPath,
        /// Why the path could not be addressed
        reason: String,
    },
    /// Backend cannot apply several field writes as one operation
    #[error("store backend does not support batched field writes")]
    BatchUnsupported,
    /// Underlying store I/O or protocol failure
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Async key/value store of JSON documents with field-path addressing
///
/// Implementations serialize individual field-path writes per document, but
/// make no atomicity promise across separate calls. `set_path_batch` is the
/// single-call escape hatch for callers that need a multi-field write to
/// land as one operation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a whole document. `None` if the key was never written.
    async fn get_whole(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace (or create) a whole document.
    async fn set_whole(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Read one field. `None` if the document is absent or the path does
    /// not resolve.
    async fn get_path(&self, key: &str, path: &FieldPath) -> Result<Option<Value>, StoreError>;

    /// Replace one field of an existing document.
    async fn set_path(&self, key: &str, path: &FieldPath, value: Value) -> Result<(), StoreError>;

    /// Apply several field writes to one document as a single serialized
    /// operation, all-or-nothing.
    async fn set_path_batch(
        &self,
        key: &str,
        writes: &[(FieldPath, Value)],
    ) -> Result<(), StoreError>;

    /// Create the document only if the key is absent. Returns whether the
    /// document was created. Atomic with respect to concurrent callers.
    async fn create_if_absent(&self, key: &str, value: Value) -> Result<bool, StoreError>;
}
