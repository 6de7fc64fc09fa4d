//! Immutable tile pixel buffers.
//!
//! A [`Tile`] pairs a [`TileIndex`] with an 8-bit grayscale pixel buffer.
//! The buffer is a [`Bytes`] value, so cloning a tile is cheap (reference
//! count bump) and a tile's content can never change after construction.
//! A logically "updated" tile is a new `Tile` value replacing the old map
//! entry in the pyramid.

use bytes::Bytes;

use super::index::TileIndex;

/// An immutable grayscale tile.
///
/// Pixels are stored row-major with stride equal to the width, one byte per
/// pixel. The buffer length always equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    index: TileIndex,
    width: u32,
    height: u32,
    pixels: Bytes,
}

impl Tile {
    /// Create a tile from a raw pixel buffer.
    ///
    /// Returns `None` if the buffer length does not match `width * height`.
    pub fn from_raw(index: TileIndex, width: u32, height: u32, pixels: Bytes) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            index,
            width,
            height,
            pixels,
        })
    }

    /// Create a tile filled with a single gray value.
    pub fn solid(index: TileIndex, width: u32, height: u32, value: u8) -> Self {
        Self {
            index,
            width,
            height,
            pixels: Bytes::from(vec![value; (width as usize) * (height as usize)]),
        }
    }

    /// Internal constructor for buffers whose length is known to be correct.
    pub(crate) fn from_parts(index: TileIndex, width: u32, height: u32, pixels: Bytes) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            index,
            width,
            height,
            pixels,
        }
    }

    /// The same tile retagged with a different index.
    pub(crate) fn retag(self, index: TileIndex) -> Self {
        Self { index, ..self }
    }

    /// The index this tile was produced at.
    pub fn index(&self) -> TileIndex {
        self.index
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel buffer (row-major, stride == width).
    pub fn pixels(&self) -> &Bytes {
        &self.pixels
    }

    /// Read one pixel. Coordinates must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

// =============================================================================
// Tests
// =============================================================================
