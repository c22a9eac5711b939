//! Tile repository
//!
//! Bridges the typed model to the field-path store. Every store call is
//! bounded by a configurable timeout; a call that overruns surfaces as
//! [`RepoError::Timeout`] rather than hanging a request. No retries happen
//! here; retry policy belongs to callers.

use crate::error::RepoError;
use letterboard_model::{StyleMap, Tile};
use letterboard_store::{DocumentStore, FieldPath, StoreError};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Document key of the tile collection
pub const LETTERS_KEY: &str = "letters";
/// Document key of the shared board style
pub const BOARD_KEY: &str = "board";

/// How a logical two-field update reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Two independent sequential field writes. A reader between them can
    /// observe a half-updated pair (old `top`, new `left`). That window
    /// is part of the protocol's observable behavior; this is the default.
    #[default]
    Sequential,
    /// One batched store operation; both fields land together.
    Batched,
}

/// Repository configuration
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// Write mode for the two-field partial updates
    pub write_mode: WriteMode,
    /// Upper bound for any single store call
    pub store_timeout: Duration,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::default(),
            store_timeout: Duration::from_secs(30),
        }
    }
}

/// Typed accessor over the `letters` and `board` documents
///
/// Records are addressed by sequence position. Shape validation is
/// structural: a [`Tile`] that exists is well-formed, so setters here never
/// see a malformed record. The wire boundary rejects those first.
#[derive(Debug)]
pub struct TileRepository<S> {
    store: Arc<S>,
    config: RepoConfig,
}

impl<S> Clone for TileRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore> TileRepository<S> {
    /// Create a repository with default configuration
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, RepoConfig::default())
    }

    /// Create a repository with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(store: Arc<S>, config: RepoConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Read the whole tile collection. `None` if never seeded.
    pub async fn get_all(&self) -> Result<Option<Vec<Tile>>, RepoError> {
        let value = self.bounded(self.store.get_whole(LETTERS_KEY)).await?;
        match value {
            None => Ok(None),
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(|e| corrupt(LETTERS_KEY, &e)),
        }
    }

    /// Replace the whole tile collection. Seed-time and test use only.
    pub async fn set_all(&self, tiles: &[Tile]) -> Result<(), RepoError> {
        let value = serde_json::to_value(tiles).map_err(|e| corrupt(LETTERS_KEY, &e))?;
        self.bounded(self.store.set_whole(LETTERS_KEY, value)).await?;
        Ok(())
    }

    /// Read one tile by sequence position
    pub async fn get_one(&self, index: usize) -> Result<Tile, RepoError> {
        let path = FieldPath::root().index(index);
        let value = self.bounded(self.store.get_path(LETTERS_KEY, &path)).await?;
        match value {
            None => Err(RepoError::NotFound { index }),
            Some(v) => serde_json::from_value(v).map_err(|e| corrupt(LETTERS_KEY, &e)),
        }
    }

    /// Replace one tile by sequence position
    ///
    /// The slot must exist; callers check with
    /// [`get_one`](Self::get_one) first when the index is untrusted.
    pub async fn set_one(&self, index: usize, tile: &Tile) -> Result<(), RepoError> {
        let path = FieldPath::root().index(index);
        let value = serde_json::to_value(tile).map_err(|e| corrupt(LETTERS_KEY, &e))?;
        self.bounded(self.store.set_path(LETTERS_KEY, &path, value))
            .await?;
        Ok(())
    }

    /// Update only `style.left` and `style.top` of one tile
    ///
    /// In [`WriteMode::Sequential`] this is two independent field writes,
    /// not an atomic pair; the half-updated window between them is part of
    /// the protocol's observable behavior.
    pub async fn update_position(
        &self,
        index: usize,
        left: &str,
        top: &str,
    ) -> Result<(), RepoError> {
        tracing::debug!(index, left, top, "update position");
        self.apply_pair([
            (style_field(index, "left"), json!(left)),
            (style_field(index, "top"), json!(top)),
        ])
        .await
    }

    /// Update only `style.transform` and `style.transformOrigin` of one tile
    ///
    /// Same two-write pattern as [`update_position`](Self::update_position).
    pub async fn update_transform(
        &self,
        index: usize,
        transform: &str,
        transform_origin: &str,
    ) -> Result<(), RepoError> {
        tracing::debug!(index, "update transform");
        self.apply_pair([
            (style_field(index, "transform"), json!(transform)),
            (style_field(index, "transformOrigin"), json!(transform_origin)),
        ])
        .await
    }

    /// Read the shared board style. `None` if never seeded.
    pub async fn get_board(&self) -> Result<Option<StyleMap>, RepoError> {
        let value = self.bounded(self.store.get_whole(BOARD_KEY)).await?;
        match value {
            None => Ok(None),
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(|e| corrupt(BOARD_KEY, &e)),
        }
    }

    /// Replace the shared board style
    pub async fn set_board(&self, style: &StyleMap) -> Result<(), RepoError> {
        let value = serde_json::to_value(style).map_err(|e| corrupt(BOARD_KEY, &e))?;
        self.bounded(self.store.set_whole(BOARD_KEY, value)).await?;
        Ok(())
    }

    /// Create the board document only if absent. Returns whether this
    /// caller created it. The atomic create is the seed-once guard.
    pub async fn create_board_if_absent(&self, style: &StyleMap) -> Result<bool, RepoError> {
        let value = serde_json::to_value(style).map_err(|e| corrupt(BOARD_KEY, &e))?;
        let created = self
            .bounded(self.store.create_if_absent(BOARD_KEY, value))
            .await?;
        Ok(created)
    }

    async fn apply_pair(&self, writes: [(FieldPath, Value); 2]) -> Result<(), RepoError> {
        match self.config.write_mode {
            WriteMode::Sequential => {
                for (path, value) in writes {
                    self.bounded(self.store.set_path(LETTERS_KEY, &path, value))
                        .await?;
                }
                Ok(())
            }
            WriteMode::Batched => {
                self.bounded(self.store.set_path_batch(LETTERS_KEY, &writes))
                    .await?;
                Ok(())
            }
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, RepoError> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => result.map_err(RepoError::from),
            Err(_) => Err(RepoError::Timeout {
                waited: self.config.store_timeout,
            }),
        }
    }
}

fn style_field(index: usize, field: &str) -> FieldPath {
    FieldPath::root().index(index).child("style").child(field)
}

fn corrupt(key: &str, err: &serde_json::Error) -> RepoError {
    RepoError::Corrupt {
        key: key.to_string(),
        reason: err.to_string(),
    }
}
