//! Testing utilities for the letterboard workspace
//!
//! Shared fixtures used by repository, service, and client tests: a
//! small known tile collection and the standard board style.

#![allow(missing_docs)]

use letterboard_model::{StyleMap, Tile};

/// Board style used across integration tests.
pub fn board_fixture() -> StyleMap {
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

/// A seeded-looking tile with position, color, and font size set.
pub fn tile_fixture(id: u32, value: char, left: &str, top: &str, color: &str) -> Tile {
    Tile::new(
        id,
        value,
        StyleMap {
            left: Some(left.into()),
            top: Some(top.into()),
            color: Some(color.into()),
            font_size: Some("2em".into()),
            ..StyleMap::default()
        },
    )
}

/// Three tiles A, B, C at known positions.
pub fn three_tiles() -> Vec<Tile> {
    vec![
        tile_fixture(0, 'A', "2.5832553069857456em", "2.1461631702754715em", "blue"),
        tile_fixture(1, 'B', "1.2603961005315016em", "4.984990593571006em", "purple"),
        tile_fixture(2, 'C', "8.162745940899018em", "7.113235340583489em", "yellow"),
    ]
}
