//! Polling session
//!
//! One [`Session`] per viewer: a bounded-latency refresh loop plus the
//! drag lifecycle. Poll and update failures are logged and swallowed;
//! the session never crashes, and local optimistic state is never rolled
//! back. Divergence self-corrects on the next successful poll.

use crate::error::ClientError;
use crate::reconcile::Reconciler;
use crate::transport::Transport;
use letterboard_model::{StyleMap, Tile};
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;

/// Session tuning
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interval between snapshot polls
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
        }
    }
}

/// One viewer's connection to the shared board
#[derive(Debug)]
pub struct Session<T> {
    transport: T,
    state: Mutex<Reconciler>,
    config: SessionConfig,
}

impl<T: Transport> Session<T> {
    /// Create a session with the default 2000 ms poll interval
    #[inline]
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create a session with explicit tuning
    #[inline]
    #[must_use]
    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            state: Mutex::new(Reconciler::new()),
            config,
        }
    }

    /// Initial mount: fetch board style and the first snapshot
    pub async fn initialize(&self) -> Result<(), ClientError> {
        let board = self.transport.fetch_board().await?;
        let tiles = self.transport.fetch_tiles().await?;
        let mut state = self.state.lock().await;
        state.set_board(board);
        state.apply_snapshot(tiles);
        Ok(())
    }

    /// One refresh: fetch the snapshot and merge it
    ///
    /// A failed fetch leaves local state untouched.
    pub async fn poll_once(&self) {
        match self.transport.fetch_tiles().await {
            Ok(tiles) => {
                let mut state = self.state.lock().await;
                state.apply_snapshot(tiles);
                tracing::trace!(tiles = state.tiles().len(), "snapshot merged");
            }
            Err(e) => tracing::warn!(error = %e, "poll failed; keeping local state"),
        }
    }

    /// Run the polling loop until `shutdown` flips to true
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_once().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("session loop stopped");
                        return;
                    }
                }
            }
        }
    }

    /// Take exclusive local ownership of a tile
    pub async fn begin_drag(&self, id: u32) -> Result<(), ClientError> {
        self.state.lock().await.begin_drag(id)
    }

    /// Move the dragged tile locally
    pub async fn drag_to(&self, left: &str, top: &str) -> Result<(), ClientError> {
        self.state.lock().await.drag_to(left, top)
    }

    /// Release the drag and send the partial update
    ///
    /// Ownership is released before the network round-trip; a transport
    /// failure is logged, not surfaced, and the optimistic local position
    /// stands until a later poll corrects it.
    pub async fn release_drag(
        &self,
        transform: &str,
        transform_origin: &str,
    ) -> Result<(), ClientError> {
        let update = self
            .state
            .lock()
            .await
            .end_drag(transform, transform_origin)?;

        match self.transport.put_tile(update.index, &update.tile).await {
            Ok(canonical) => {
                tracing::debug!(index = update.index, id = canonical.id, "update acknowledged");
            }
            Err(e) => {
                tracing::error!(index = update.index, error = %e, "update failed; local state kept");
            }
        }
        Ok(())
    }

    /// Snapshot of the local tile view (z-order, last on top)
    pub async fn tiles(&self) -> Vec<Tile> {
        self.state.lock().await.tiles().to_vec()
    }

    /// The shared board style as last fetched
    pub async fn board(&self) -> StyleMap {
        self.state.lock().await.board().clone()
    }
}
