//! # acq-pyramid
//!
//! A live tile pyramid engine for streaming microscope acquisitions.
//!
//! A running acquisition keeps delivering full-resolution image tiles, each
//! tagged with a multi-dimensional index (grid position, slice, timepoint,
//! channel). This library stores them in a multi-zoom pyramid, derives
//! coarser levels incrementally by merging and downsampling sibling tiles,
//! and keeps the whole structure readable by a renderer at any moment —
//! without locks that would stall acquisition or expose a torn view.
//!
//! ## Features
//!
//! - **Incremental downsampling**: each inserted tile updates every coarser
//!   zoom level it contributes to; already-seen data is never re-scanned
//! - **Partial merges**: coarser tiles form as soon as any child arrives and
//!   refine as the grid fills in
//! - **Single-writer, many readers**: all mutation is serialized through one
//!   worker; readers get immutable snapshots through an atomic pointer swap
//! - **Negative grid coordinates**: acquisitions may grow in any direction;
//!   coarser coordinates floor-divide correctly
//! - **Stage calibration**: affine stage/pixel transforms, persisted per
//!   pixel-size configuration
//!
//! ## Architecture
//!
//! - [`tile`] - Tile addressing and immutable pixel buffers
//! - [`pyramid`] - Pyramid engine, merge function, and mutator
//! - [`transform`] - Affine stage/pixel transforms and their persistence
//! - [`source`] - Tile producer trait and simulated acquisition source
//! - [`config`] - CLI configuration for the demo binary
//!
//! ## Example
//!
//! ```
//! use acq_pyramid::{PyramidMutator, Tile, TileIndex};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Pyramid with 64x64 tiles, derived down to zoom -4
//!     let mutator = PyramidMutator::new(-4, 64, 64, 256);
//!
//!     // Producers submit full-resolution tiles as they are captured
//!     let submitter = mutator.submitter();
//!     let tile = Tile::solid(TileIndex::at_level0(0, 0, 0, 0, 0), 64, 64, 128);
//!     submitter.submit(tile).await.unwrap();
//!
//!     // A renderer reads the latest snapshot whenever it wants, lock-free
//!     let snapshot = mutator.current_snapshot();
//!     let _ = snapshot.level_len(0);
//!
//!     // Drain and inspect the final pyramid
//!     let pyramid = mutator.shutdown().await;
//!     assert_eq!(pyramid.level_len(0), 1);
//! }
//! ```

pub mod config;
pub mod error;
pub mod pyramid;
pub mod source;
pub mod tile;
pub mod transform;

// Re-export commonly used types
pub use config::Config;
pub use error::{StoreError, SubmitError, TransformError};
pub use pyramid::{
    compose_level, merge_quad, Pyramid, PyramidMutator, TileSubmitter, DEFAULT_MIN_ZOOM,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_TILE_SIZE,
};
pub use source::{SimulatedSource, TileSource};
pub use tile::{GridKey, Tile, TileIndex};
pub use transform::{
    transform_key, JsonTransformStore, MemoryTransformStore, StageTransform, TransformStore,
};
