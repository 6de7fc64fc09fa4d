//! Tile value types.
//!
//! This module defines how tiles are addressed and stored:
//!
//! - [`TileIndex`]: six-axis tile address (zoom, column, row, slice,
//!   timepoint, channel)
//! - [`GridKey`]: the five non-zoom axes, used as the per-level map key
//! - [`Tile`]: an immutable grayscale pixel buffer tagged with its index
//!
//! Tiles are plain values. All pyramid bookkeeping lives in
//! [`crate::pyramid`]; producers only need to construct tiles at zoom 0 with
//! whatever acquisition coordinates their hardware reports.

mod buffer;
mod index;

pub use buffer::Tile;
pub use index::{GridKey, TileIndex};
