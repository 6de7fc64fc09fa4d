//! Flat preview rendering of a single pyramid level.
//!
//! Stitches every tile of one zoom level (for one slice/timepoint/channel
//! triple) into a single grayscale image. This is a diagnostic surface for
//! the demo binary and tests, not a display pipeline; real renderers consume
//! snapshots directly via [`crate::PyramidMutator::current_snapshot`].

use image::GrayImage;

use super::engine::Pyramid;

/// Stitch one zoom level into a single image.
///
/// Tiles are placed on a canvas spanning the bounding box of the populated
/// grid positions whose slice, timepoint, and channel match the arguments;
/// gaps stay black. Returns `None` when no tile at that level matches.
pub fn compose_level(
    pyramid: &Pyramid,
    zoom: i32,
    slice: i32,
    timepoint: i32,
    channel: i32,
) -> Option<GrayImage> {
    let level = pyramid.level(zoom)?;
    let tiles: Vec<_> = level
        .iter()
        .filter(|(k, _)| k.slice == slice && k.timepoint == timepoint && k.channel == channel)
        .collect();
    if tiles.is_empty() {
        return None;
    }

    let min_col = tiles.iter().map(|(k, _)| k.col).min()?;
    let max_col = tiles.iter().map(|(k, _)| k.col).max()?;
    let min_row = tiles.iter().map(|(k, _)| k.row).min()?;
    let max_row = tiles.iter().map(|(k, _)| k.row).max()?;

    let tw = pyramid.tile_width();
    let th = pyramid.tile_height();
    let width = (max_col - min_col + 1) as u32 * tw;
    let height = (max_row - min_row + 1) as u32 * th;

    let mut canvas = GrayImage::new(width, height);
    for (key, tile) in tiles {
        let ox = (key.col - min_col) as u32 * tw;
        let oy = (key.row - min_row) as u32 * th;
        for y in 0..th {
            for x in 0..tw {
                canvas.put_pixel(ox + x, oy + y, image::Luma([tile.pixel(x, y)]));
            }
        }
    }
    Some(canvas)
}

// =============================================================================
// Tests
// =============================================================================
