//! Seed data generation
//!
//! One-time generation of the board style and the 100-tile set. The letter
//! multiset and per-letter counts are fixed; only positions and colors are
//! random, so tests assert on counts and membership, never on coordinates.

use crate::style::StyleMap;
use crate::tile::Tile;
use rand::seq::SliceRandom;
use rand::Rng;

/// Letter frequencies of the fixed tile multiset (scrabble distribution)
pub const LETTER_FREQUENCIES: [(char, usize); 26] = [
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 4),
    ('E', 12),
    ('F', 2),
    ('G', 3),
    ('H', 2),
    ('I', 9),
    ('J', 1),
    ('K', 1),
    ('L', 4),
    ('M', 2),
    ('N', 6),
    ('O', 8),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 4),
    ('T', 6),
    ('U', 4),
    ('V', 2),
    ('W', 2),
    ('X', 1),
    ('Y', 2),
    ('Z', 1),
];

/// Total tiles produced by one seed
pub const TILE_COUNT: usize = 100;

/// Color palette tiles are drawn from
pub const TILE_COLORS: [&str; 6] = ["red", "blue", "yellow", "green", "purple", "orange"];

/// Positions land in `[0, 9)` em on both axes
const POSITION_RANGE_EM: f64 = 9.0;

/// Everything one seed produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    /// The shared board frame style
    pub board: StyleMap,
    /// The full tile set, ids `0..TILE_COUNT`
    pub tiles: Vec<Tile>,
}

/// The fixed board frame style
#[must_use]
pub fn board_style() -> StyleMap {
    StyleMap {
        background_color: Some("#ccc".into()),
        border: Some("1px solid #000".into()),
        font_size: Some("2em".into()),
        width: Some("20em".into()),
        height: Some("20em".into()),
        position: Some("relative".into()),
        margin: Some("0 auto".into()),
        box_shadow: Some("0px 0px 32px -10px #000".into()),
        ..StyleMap::default()
    }
}

/// Generate the tile set: fixed letters, random position and color
pub fn generate_tiles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TILE_COUNT);
    let mut id = 0u32;
    for (letter, count) in LETTER_FREQUENCIES {
        for _ in 0..count {
            let style = StyleMap {
                left: Some(random_em(rng)),
                top: Some(random_em(rng)),
                color: Some(TILE_COLORS.choose(rng).copied().unwrap_or(TILE_COLORS[0]).to_string()),
                font_size: Some("2em".into()),
                ..StyleMap::default()
            };
            tiles.push(Tile::new(id, letter, style));
            id += 1;
        }
    }
    tiles
}

/// Generate a complete seed data set
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> SeedData {
    SeedData {
        board: board_style(),
        tiles: generate_tiles(rng),
    }
}

fn random_em<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}em", rng.gen_range(0.0..POSITION_RANGE_EM))
}
