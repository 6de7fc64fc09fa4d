//! Shared helpers for the integration suite.

use acq_pyramid::{Tile, TileIndex};

/// Tile edge length used throughout the suite. Small enough to keep merges
/// cheap, large enough to exercise quadrant placement.
pub const TILE: u32 = 8;

/// A solid zoom-0 tile at a grid position (slice/timepoint/channel 0).
pub fn solid_tile(col: i32, row: i32, value: u8) -> Tile {
    Tile::solid(TileIndex::at_level0(col, row, 0, 0, 0), TILE, TILE, value)
}

/// The index of a derived tile at a coarser zoom level.
pub fn coarse_index(zoom: i32, col: i32, row: i32) -> TileIndex {
    TileIndex::new(zoom, col, row, 0, 0, 0)
}
