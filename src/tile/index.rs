//! Multi-dimensional tile addressing.
//!
//! Every tile produced during an acquisition is identified by a [`TileIndex`]:
//! a zoom level plus five acquisition coordinates (grid column, grid row,
//! slice, timepoint, channel). Zoom level 0 is native resolution; negative
//! zoom levels are progressively coarser, each step halving linear resolution.
//!
//! # Coordinate Derivation
//!
//! Only the zoom axis is ever derived. Walking one level coarser halves the
//! grid column and row by floor division (`div_euclid`), which rounds toward
//! negative infinity. This matters for acquisitions that grow the grid in
//! all directions from the starting position: column -3 has parent column -2,
//! not -1. Slice, timepoint, and channel propagate unchanged.

// =============================================================================
// GridKey
// =============================================================================

/// The five non-zoom coordinates of a tile.
///
/// Within one zoom level of the pyramid, a `GridKey` uniquely identifies a
/// tile. It is the key type of the per-level tile maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    /// Grid column (may be negative)
    pub col: i32,

    /// Grid row (may be negative)
    pub row: i32,

    /// Z-slice index
    pub slice: i32,

    /// Timepoint index
    pub timepoint: i32,

    /// Channel index
    pub channel: i32,
}

// =============================================================================
// TileIndex
// =============================================================================

/// Unique identifier for one tile in the pyramid.
///
/// Zoom level 0 is full resolution; negative zoom levels are coarser. The
/// grid column and row halve (floor division) at each coarser level; the
/// remaining coordinates are supplied by the producer and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Zoom level (0 = full resolution, negative = coarser)
    pub zoom: i32,

    /// Grid column (may be negative)
    pub col: i32,

    /// Grid row (may be negative)
    pub row: i32,

    /// Z-slice index
    pub slice: i32,

    /// Timepoint index
    pub timepoint: i32,

    /// Channel index
    pub channel: i32,
}

impl TileIndex {
    /// Create a tile index with an explicit zoom level.
    pub fn new(zoom: i32, col: i32, row: i32, slice: i32, timepoint: i32, channel: i32) -> Self {
        Self {
            zoom,
            col,
            row,
            slice,
            timepoint,
            channel,
        }
    }

    /// Create a full-resolution (zoom 0) tile index.
    pub fn at_level0(col: i32, row: i32, slice: i32, timepoint: i32, channel: i32) -> Self {
        Self::new(0, col, row, slice, timepoint, channel)
    }

    /// The same index retagged with a different zoom level.
    pub fn with_zoom(self, zoom: i32) -> Self {
        Self { zoom, ..self }
    }

    /// The index of this tile's parent, one zoom level coarser.
    ///
    /// Column and row floor-divide by 2 (round toward negative infinity);
    /// slice, timepoint, and channel are unchanged.
    pub fn parent(&self) -> Self {
        Self {
            zoom: self.zoom - 1,
            col: self.col.div_euclid(2),
            row: self.row.div_euclid(2),
            ..*self
        }
    }

    /// The four child indices one zoom level finer, in quadrant order.
    ///
    /// The returned array is indexed by [`Self::quadrant`]: top-left,
    /// top-right, bottom-left, bottom-right.
    pub fn children(&self) -> [Self; 4] {
        let make = |dx: i32, dy: i32| Self {
            zoom: self.zoom + 1,
            col: self.col * 2 + dx,
            row: self.row * 2 + dy,
            ..*self
        };
        [make(0, 0), make(1, 0), make(0, 1), make(1, 1)]
    }

    /// Which quadrant of its parent this tile occupies (0..4).
    ///
    /// Computed from column/row parity using `rem_euclid`, so negative
    /// coordinates land in the correct quadrant.
    pub fn quadrant(&self) -> usize {
        (self.row.rem_euclid(2) * 2 + self.col.rem_euclid(2)) as usize
    }

    /// The within-level lookup key (drops the zoom axis).
    pub fn grid_key(&self) -> GridKey {
        GridKey {
            col: self.col,
            row: self.row,
            slice: self.slice,
            timepoint: self.timepoint,
            channel: self.channel,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
