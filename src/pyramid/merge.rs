//! Downsampling merge of sibling tiles.
//!
//! One tile at zoom level z-1 covers the same pixel dimensions as four
//! sibling tiles at level z: each child shrinks 2x and lands in one quadrant
//! of the parent. Downsampling averages each 2x2 pixel block of a child into
//! a single parent pixel, rounded to nearest.
//!
//! # Partial Merges
//!
//! During a live acquisition the grid fills in incrementally, so any subset
//! of the four siblings may be absent. An absent child leaves its quadrant at
//! the background value (0). The result is deterministic for a given present
//! subset; re-merging unchanged inputs is bit-identical.

use bytes::Bytes;

use crate::tile::{Tile, TileIndex};

/// Background value for quadrants whose child tile has not arrived yet.
const BACKGROUND: u8 = 0;

/// Merge up to four sibling tiles into their parent tile.
///
/// `children` is indexed by quadrant (top-left, top-right, bottom-left,
/// bottom-right, see [`TileIndex::quadrant`]); all present children must have
/// dimensions `tile_width` x `tile_height`. The parent tile has the same
/// dimensions. At least one child must be present; the engine never calls
/// this with an all-absent set, and an all-absent set simply yields a
/// background tile.
pub fn merge_quad(
    parent: TileIndex,
    children: [Option<&Tile>; 4],
    tile_width: u32,
    tile_height: u32,
) -> Tile {
    let w = tile_width as usize;
    let h = tile_height as usize;
    let half_w = w / 2;
    let half_h = h / 2;

    let mut out = vec![BACKGROUND; w * h];

    for (quadrant, child) in children.iter().enumerate() {
        let Some(child) = child else { continue };

        // Quadrant origin in the parent buffer
        let ox = (quadrant % 2) * half_w;
        let oy = (quadrant / 2) * half_h;

        let src = child.pixels();
        for y in 0..half_h {
            let row0 = (y * 2) * w;
            let row1 = (y * 2 + 1) * w;
            let dst_row = (oy + y) * w + ox;
            for x in 0..half_w {
                let a = src[row0 + x * 2] as u32;
                let b = src[row0 + x * 2 + 1] as u32;
                let c = src[row1 + x * 2] as u32;
                let d = src[row1 + x * 2 + 1] as u32;
                out[dst_row + x] = ((a + b + c + d + 2) / 4) as u8;
            }
        }
    }

    Tile::from_parts(parent, tile_width, tile_height, Bytes::from(out))
}

// =============================================================================
// Tests
// =============================================================================
