//! Tile records

use crate::error::ValidationError;
use crate::style::StyleMap;
use serde::{Deserialize, Serialize};

/// One letter tile: stable identity, character value, style state
///
/// # Invariants
/// - `id` is assigned at seed time, unique, and never reused
/// - `value` is exactly one character (structural via `char`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identity, immutable after creation
    pub id: u32,
    /// The letter on the tile
    pub value: char,
    /// Current style state
    pub style: StyleMap,
}

impl Tile {
    /// Create a tile
    #[inline]
    #[must_use]
    pub fn new(id: u32, value: char, style: StyleMap) -> Self {
        Self { id, value, style }
    }

    /// Create a tile from a wire-shaped value string
    ///
    /// Rejects anything but a single-character string, mirroring the
    /// fail-fast contract of the update protocol.
    pub fn from_parts(id: u32, value: &str, style: StyleMap) -> Result<Self, ValidationError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self::new(id, c, style)),
            _ => Err(ValidationError::ValueNotSingleChar(value.to_string())),
        }
    }
}
