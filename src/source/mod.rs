//! Tile producers.
//!
//! A [`TileSource`] is an opaque, possibly infinite producer of
//! full-resolution tiles — the boundary where camera/stage hardware plugs
//! in. The core never dictates how tiles are produced, only that each one
//! arrives with a complete, valid index.
//!
//! [`SimulatedSource`] is the crate's built-in producer: it sweeps a grid
//! region with deterministic synthetic tiles, driving the demo binary and
//! the concurrency tests without hardware.

mod simulated;

use async_trait::async_trait;

use crate::tile::Tile;

pub use simulated::SimulatedSource;

/// An asynchronous producer of full-resolution tiles.
#[async_trait]
pub trait TileSource: Send {
    /// Produce the next tile, or `None` when the source is exhausted.
    async fn next_tile(&mut self) -> Option<Tile>;
}
