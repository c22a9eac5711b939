//! Letterboard Data Model
//!
//! Shared record types for the letter-tile board:
//! - **StyleMap**: sparse style record (camelCase wire form, absent means absent)
//! - **Tile**: one letter's identity, character value, and style state
//! - **seed**: one-time generation of the initial board and tile set
//!
//! The single-character tile value is structural (`char`), so a well-typed
//! `Tile` is a valid tile; wire input that does not fit fails at
//! deserialization and surfaces as a [`ValidationError`] at the boundary.

#![warn(missing_docs)]

pub mod error;
pub mod seed;
pub mod style;
pub mod tile;

// Re-exports
pub use error::ValidationError;
pub use seed::{SeedData, LETTER_FREQUENCIES, TILE_COLORS, TILE_COUNT};
pub use style::StyleMap;
pub use tile::Tile;
