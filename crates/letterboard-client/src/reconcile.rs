//! Session state machine
//!
//! Pure view-state logic, no I/O: everything here is synchronous and
//! testable without a transport. The session owns at most one drag at a
//! time; while a drag is active, snapshot merges preserve that tile's
//! local style so polling never yanks it out from under the cursor.

use crate::error::ClientError;
use letterboard_model::{StyleMap, Tile};

/// Exclusive-ownership tag for the one tile a session may drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in flight; snapshots overwrite everything
    #[default]
    Idle,
    /// One tile under local control; merges skip its style
    Dragging {
        /// Id of the dragged tile
        id: u32,
    },
}

/// The partial update produced by releasing a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileUpdate {
    /// Sequence position to address, from the last server snapshot
    pub index: usize,
    /// The proposal carrying the final position and transform fields
    pub tile: Tile,
}

/// Local view state of one viewer session
///
/// `tiles` is the local z-order: later entries render on top. The server
/// sequence order is tracked separately, because partial updates address
/// records by position in the *persisted* sequence, not by local stacking.
#[derive(Debug, Default)]
pub struct Reconciler {
    tiles: Vec<Tile>,
    board: StyleMap,
    server_order: Vec<u32>,
    drag: DragState,
}

impl Reconciler {
    /// Fresh session state: no tiles, no drag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Local tiles in z-order (last on top)
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The shared board frame style
    #[inline]
    #[must_use]
    pub fn board(&self) -> &StyleMap {
        &self.board
    }

    /// Current drag ownership
    #[inline]
    #[must_use]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Replace the board style
    #[inline]
    pub fn set_board(&mut self, board: StyleMap) {
        self.board = board;
    }

    /// Merge a freshly polled snapshot into local state
    ///
    /// The snapshot wins everywhere except the tile currently being
    /// dragged: that tile keeps its local style and stays on top of the
    /// z-order. Identity is matched by id, never by position.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Tile>) {
        self.server_order = snapshot.iter().map(|t| t.id).collect();

        let DragState::Dragging { id } = self.drag else {
            self.tiles = snapshot;
            return;
        };

        let local_style = self
            .tiles
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.style.clone());

        let mut merged = snapshot;
        if let (Some(style), Some(pos)) = (local_style, merged.iter().position(|t| t.id == id)) {
            let mut dragged = merged.remove(pos);
            dragged.style = style;
            merged.push(dragged);
        }
        self.tiles = merged;
    }

    /// Take exclusive local ownership of a tile and raise it to the top
    pub fn begin_drag(&mut self, id: u32) -> Result<(), ClientError> {
        if let DragState::Dragging { .. } = self.drag {
            return Err(ClientError::DragInProgress);
        }
        let pos = self
            .tiles
            .iter()
            .position(|t| t.id == id)
            .ok_or(ClientError::UnknownTile(id))?;
        let tile = self.tiles.remove(pos);
        self.tiles.push(tile);
        self.drag = DragState::Dragging { id };
        Ok(())
    }

    /// Move the dragged tile locally
    pub fn drag_to(&mut self, left: &str, top: &str) -> Result<(), ClientError> {
        let DragState::Dragging { id } = self.drag else {
            return Err(ClientError::NoActiveDrag);
        };
        let tile = self
            .tiles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::UnknownTile(id))?;
        tile.style.set_position(left, top);
        Ok(())
    }

    /// Finish the drag and produce the partial update to send
    ///
    /// Ownership is released unconditionally: whatever happens to the
    /// update on the wire, polling resumes normal overwrite behavior.
    pub fn end_drag(
        &mut self,
        transform: &str,
        transform_origin: &str,
    ) -> Result<TileUpdate, ClientError> {
        let DragState::Dragging { id } = self.drag else {
            return Err(ClientError::NoActiveDrag);
        };
        self.drag = DragState::Idle;

        let tile = self
            .tiles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ClientError::UnknownTile(id))?;
        tile.style.set_transform(transform, transform_origin);
        let tile = tile.clone();

        let index = self
            .server_order
            .iter()
            .position(|&other| other == id)
            .ok_or(ClientError::NotSynchronized(id))?;

        Ok(TileUpdate { index, tile })
    }
}
