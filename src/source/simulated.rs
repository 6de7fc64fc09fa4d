//! Deterministic synthetic tile producer.

use async_trait::async_trait;

use crate::tile::{Tile, TileIndex};

use super::TileSource;

/// Sweeps a rectangular grid region in row-major order, producing one solid
/// tile per position.
///
/// Tile values are derived from the index, so a given region always produces
/// the same sequence — test runs and demo runs are reproducible.
pub struct SimulatedSource {
    tile_width: u32,
    tile_height: u32,
    col_start: i32,
    cols: i32,
    row_start: i32,
    rows: i32,
    slice: i32,
    timepoint: i32,
    channel: i32,
    cursor: i32,
}

impl SimulatedSource {
    /// A source covering `cols` x `rows` grid positions starting at
    /// (`col_start`, `row_start`), on slice 0, timepoint 0, channel 0.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        col_start: i32,
        cols: i32,
        row_start: i32,
        rows: i32,
    ) -> Self {
        Self {
            tile_width,
            tile_height,
            col_start,
            cols,
            row_start,
            rows,
            slice: 0,
            timepoint: 0,
            channel: 0,
            cursor: 0,
        }
    }

    /// The same region on a different channel.
    pub fn with_channel(mut self, channel: i32) -> Self {
        self.channel = channel;
        self
    }

    /// Total number of tiles this source will produce.
    pub fn remaining(&self) -> usize {
        (self.cols * self.rows - self.cursor).max(0) as usize
    }

    /// Deterministic gray value for a grid position.
    fn value_at(col: i32, row: i32) -> u8 {
        (64 + (col * 37 + row * 91).rem_euclid(128)) as u8
    }
}

#[async_trait]
impl TileSource for SimulatedSource {
    async fn next_tile(&mut self) -> Option<Tile> {
        if self.cursor >= self.cols * self.rows {
            return None;
        }
        let col = self.col_start + self.cursor % self.cols;
        let row = self.row_start + self.cursor / self.cols;
        self.cursor += 1;

        let index = TileIndex::at_level0(col, row, self.slice, self.timepoint, self.channel);
        Some(Tile::solid(
            index,
            self.tile_width,
            self.tile_height,
            Self::value_at(col, row),
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
