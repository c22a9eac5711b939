//! Board service
//!
//! Bridges client requests to the repository: seeds initial data exactly
//! once, serves reads, and authorizes/applies partial writes.

use crate::error::ServiceError;
use letterboard_model::{seed, StyleMap, Tile, ValidationError};
use letterboard_repo::TileRepository;
use letterboard_store::DocumentStore;
use tokio::sync::OnceCell;

/// Stateless request handler over one shared board
///
/// Cheap to share behind an `Arc`; holds no per-request state. The only
/// cross-request coordination is the seed-once cell.
#[derive(Debug)]
pub struct BoardService<S> {
    repo: TileRepository<S>,
    seeded: OnceCell<()>,
}

impl<S: DocumentStore> BoardService<S> {
    /// Create a service over a repository
    #[inline]
    #[must_use]
    pub fn new(repo: TileRepository<S>) -> Self {
        Self {
            repo,
            seeded: OnceCell::new(),
        }
    }

    /// The underlying repository
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &TileRepository<S> {
        &self.repo
    }

    /// Seed the board and tile set if no board document exists yet
    ///
    /// Exactly-once under concurrent first callers: the per-process cell
    /// collapses local racers, and the store-level atomic create guards
    /// against other service instances. Re-runs are no-ops.
    pub async fn ensure_seeded(&self) -> Result<(), ServiceError> {
        self.seeded.get_or_try_init(|| self.seed_once()).await?;
        Ok(())
    }

    async fn seed_once(&self) -> Result<(), ServiceError> {
        if self.repo.get_board().await?.is_some() {
            tracing::debug!("board already seeded");
            return Ok(());
        }
        let data = {
            let mut rng = rand::thread_rng();
            seed::generate(&mut rng)
        };
        // The existence check above is only a fast path; the atomic
        // create decides who actually seeds.
        if self.repo.create_board_if_absent(&data.board).await? {
            self.repo.set_all(&data.tiles).await?;
            tracing::info!(tiles = data.tiles.len(), "seeded board");
        }
        Ok(())
    }

    /// All tiles in sequence order. Empty if the collection is absent.
    pub async fn list_tiles(&self) -> Result<Vec<Tile>, ServiceError> {
        Ok(self.repo.get_all().await?.unwrap_or_default())
    }

    /// One tile by sequence position
    pub async fn tile(&self, index: usize) -> Result<Tile, ServiceError> {
        Ok(self.repo.get_one(index).await?)
    }

    /// The shared board frame style
    pub async fn board_style(&self) -> Result<StyleMap, ServiceError> {
        self.repo.get_board().await?.ok_or(ServiceError::NotSeeded)
    }

    /// Apply a client proposal to the tile at `index`
    ///
    /// Only the proposal's position and transform fields are consulted.
    /// This is a partial update, never a whole-record overwrite, so every
    /// other stored field survives from the prior state. Returns the
    /// post-update record re-read from the store, which may differ from
    /// an echo of the proposal if another writer interleaved.
    pub async fn update_tile(&self, index: usize, proposal: &Tile) -> Result<Tile, ServiceError> {
        let style = &proposal.style;
        let left = require(style.left.as_deref(), "style.left")?;
        let top = require(style.top.as_deref(), "style.top")?;
        let transform = require(style.transform.as_deref(), "style.transform")?;
        let origin = require(style.transform_origin.as_deref(), "style.transformOrigin")?;

        // Authorize before the first write: an out-of-range index must
        // fail as not-found with the store untouched.
        self.repo.get_one(index).await?;

        self.repo.update_position(index, left, top).await?;
        self.repo.update_transform(index, transform, origin).await?;

        let updated = self.repo.get_one(index).await?;
        tracing::debug!(index, id = updated.id, "tile updated");
        Ok(updated)
    }
}

fn require<'a>(field: Option<&'a str>, name: &'static str) -> Result<&'a str, ValidationError> {
    field.ok_or(ValidationError::MissingField(name))
}
