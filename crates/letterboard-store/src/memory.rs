//! In-memory document store
//!
//! Backing map is a [`DashMap`]; an exclusive reference to a document's
//! entry serializes writes to that document, which is the only consistency
//! the store contract promises.

use crate::path::FieldPath;
use crate::store::{DocumentStore, StoreError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;

/// In-process [`DocumentStore`] over a concurrent map
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: DashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store holds no documents
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_whole(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.get(key).map(|doc| doc.value().clone()))
    }

    async fn set_whole(&self, key: &str, value: Value) -> Result<(), StoreError> {
        tracing::trace!(key, "set whole document");
        self.docs.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_path(&self, key: &str, path: &FieldPath) -> Result<Option<Value>, StoreError> {
        match self.docs.get(key) {
            None => Ok(None),
            Some(doc) => Ok(path.resolve(doc.value()).cloned()),
        }
    }

    async fn set_path(&self, key: &str, path: &FieldPath, value: Value) -> Result<(), StoreError> {
        tracing::trace!(key, %path, "set field");
        let mut doc = self
            .docs
            .get_mut(key)
            .ok_or_else(|| StoreError::MissingDocument {
                key: key.to_string(),
            })?;
        path.write_into(doc.value_mut(), value)
            .map_err(|e| StoreError::BadPath {
                key: key.to_string(),
                path: path.clone(),
                reason: e.to_string(),
            })
    }

    async fn set_path_batch(
        &self,
        key: &str,
        writes: &[(FieldPath, Value)],
    ) -> Result<(), StoreError> {
        tracing::trace!(key, count = writes.len(), "set field batch");
        let mut doc = self
            .docs
            .get_mut(key)
            .ok_or_else(|| StoreError::MissingDocument {
                key: key.to_string(),
            })?;
        // Stage on a copy so a failing write leaves the document untouched.
        let mut staged = doc.value().clone();
        for (path, value) in writes {
            path.write_into(&mut staged, value.clone())
                .map_err(|e| StoreError::BadPath {
                    key: key.to_string(),
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
        }
        *doc.value_mut() = staged;
        Ok(())
    }

    async fn create_if_absent(&self, key: &str, value: Value) -> Result<bool, StoreError> {
        match self.docs.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                tracing::debug!(key, "created document");
                slot.insert(value);
                Ok(true)
            }
        }
    }
}
