//! The tile pyramid engine and its single-writer mutation layer.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  submit()   ┌──────────────────────────────────────┐
//! │ producer 1 │────────────►│            PyramidMutator            │
//! ├────────────┤             │  ┌─────────┐      ┌───────────────┐  │
//! │ producer 2 │────────────►│  │ bounded │ ───► │ worker task   │  │
//! ├────────────┤             │  │  queue  │      │ insert + merge│  │
//! │    ...     │────────────►│  └─────────┘      └───────┬───────┘  │
//! └────────────┘             │                           │ publish  │
//!                            │                   ┌───────▼───────┐  │
//!      current_snapshot() ◄──┼───────────────────│    ArcSwap    │  │
//!                            │                   └───────────────┘  │
//!                            └──────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Pyramid`]: persistent multi-level tile index; `insert`/`propagate`
//!   return new values and never mutate their input
//! - [`merge_quad`]: deterministic 2x2 downsampling merge, tolerant of
//!   absent siblings
//! - [`PyramidMutator`]: bounded queue + single worker serializing all
//!   mutation, publishing snapshots through an atomic pointer swap
//! - [`TileSubmitter`]: cloneable producer-side submission handle
//! - [`compose_level`]: diagnostic stitching of one level into a flat image

mod engine;
mod merge;
mod mutator;
mod preview;

pub use engine::{Pyramid, DEFAULT_MIN_ZOOM, DEFAULT_TILE_SIZE};
pub use merge::merge_quad;
pub use mutator::{PyramidMutator, TileSubmitter, DEFAULT_QUEUE_CAPACITY};
pub use preview::compose_level;
