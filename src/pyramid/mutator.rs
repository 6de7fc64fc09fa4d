//! Serialized pyramid mutation and lock-free snapshot publication.
//!
//! Any number of producers may submit tiles concurrently, but two racing
//! `insert` calls on the same base snapshot would lose one of the updates
//! (last writer wins on the whole structure, not just the touched key). The
//! mutator prevents this by funnelling every insertion through one bounded
//! queue drained by a single worker task: dequeue, insert on the latest
//! snapshot, publish the result, repeat. No two insertions are ever applied
//! concurrently, so the engine itself needs no locks.
//!
//! # Reading
//!
//! [`PyramidMutator::current_snapshot`] is an [`ArcSwap`] load: wait-free,
//! safe from any thread, and always a fully-formed pyramid. Readers that hold
//! onto a snapshot keep it alive for as long as they need it; newer
//! publications never invalidate it.
//!
//! # Backpressure
//!
//! The queue is bounded. [`TileSubmitter::submit`] waits for capacity;
//! [`TileSubmitter::try_submit`] surfaces a full queue as
//! [`SubmitError::QueueFull`]. Tiles are never silently dropped, preserving
//! the invariant that zoom 0 contains every delivered tile.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use super::engine::Pyramid;
use crate::error::SubmitError;
use crate::tile::Tile;

/// Default bound on the submission queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

// =============================================================================
// TileSubmitter
// =============================================================================

/// Cloneable producer-side handle for submitting tiles.
///
/// Each acquisition producer holds its own submitter; submissions from one
/// producer are applied in submission order (FIFO per producer). Validation
/// happens here, at the boundary, so the engine only ever sees well-formed
/// input.
#[derive(Clone)]
pub struct TileSubmitter {
    tx: mpsc::Sender<Tile>,
    min_zoom: i32,
    tile_width: u32,
    tile_height: u32,
    capacity: usize,
}

impl TileSubmitter {
    /// Enqueue a tile, waiting if the queue is at capacity.
    ///
    /// Returns as soon as the tile is enqueued; the insertion itself is
    /// applied asynchronously by the worker.
    pub async fn submit(&self, tile: Tile) -> Result<(), SubmitError> {
        self.validate(&tile)?;
        self.tx.send(tile).await.map_err(|_| SubmitError::Closed)
    }

    /// Enqueue a tile without waiting.
    ///
    /// A full queue is reported as [`SubmitError::QueueFull`] so the producer
    /// can apply its own backpressure policy.
    pub fn try_submit(&self, tile: Tile) -> Result<(), SubmitError> {
        self.validate(&tile)?;
        self.tx.try_send(tile).map_err(|e| match e {
            TrySendError::Full(_) => SubmitError::QueueFull {
                capacity: self.capacity,
            },
            TrySendError::Closed(_) => SubmitError::Closed,
        })
    }

    /// Reject malformed tiles before they reach the engine.
    fn validate(&self, tile: &Tile) -> Result<(), SubmitError> {
        let zoom = tile.index().zoom;
        if zoom > 0 || zoom < self.min_zoom {
            return Err(SubmitError::ZoomOutOfBounds {
                zoom,
                min_zoom: self.min_zoom,
            });
        }
        if tile.width() != self.tile_width || tile.height() != self.tile_height {
            return Err(SubmitError::TileSizeMismatch {
                width: tile.width(),
                height: tile.height(),
                expected_width: self.tile_width,
                expected_height: self.tile_height,
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_channel(tx: mpsc::Sender<Tile>, pyramid: &Pyramid, capacity: usize) -> Self {
        Self {
            tx,
            min_zoom: pyramid.min_zoom(),
            tile_width: pyramid.tile_width(),
            tile_height: pyramid.tile_height(),
            capacity,
        }
    }
}

// =============================================================================
// PyramidMutator
// =============================================================================

/// Single-writer pyramid owner: one queue, one worker, many readers.
///
/// # Example
///
/// ```
/// use acq_pyramid::{PyramidMutator, Tile, TileIndex};
///
/// #[tokio::main]
/// async fn main() {
///     let mutator = PyramidMutator::new(-4, 64, 64, 128);
///
///     let tile = Tile::solid(TileIndex::at_level0(0, 0, 0, 0, 0), 64, 64, 180);
///     mutator.submit(tile).await.unwrap();
///
///     // Renderers read the latest snapshot at any time, lock-free
///     let _snapshot = mutator.current_snapshot();
///
///     // Draining returns the final state
///     let pyramid = mutator.shutdown().await;
///     assert_eq!(pyramid.level_len(0), 1);
/// }
/// ```
pub struct PyramidMutator {
    submitter: TileSubmitter,
    snapshot: Arc<ArcSwap<Pyramid>>,
    worker: JoinHandle<()>,
    close_tx: oneshot::Sender<()>,
}

impl PyramidMutator {
    /// Start a mutator over an empty pyramid.
    ///
    /// Spawns the worker task on the current tokio runtime. `queue_capacity`
    /// bounds the number of tiles waiting to be applied.
    pub fn new(min_zoom: i32, tile_width: u32, tile_height: u32, queue_capacity: usize) -> Self {
        Self::with_pyramid(
            Pyramid::new(min_zoom, tile_width, tile_height),
            queue_capacity,
        )
    }

    /// Start a mutator from an existing pyramid value.
    pub fn with_pyramid(initial: Pyramid, queue_capacity: usize) -> Self {
        let min_zoom = initial.min_zoom();
        let tile_width = initial.tile_width();
        let tile_height = initial.tile_height();

        let initial = Arc::new(initial);
        let snapshot = Arc::new(ArcSwap::from(initial.clone()));
        let (tx, rx) = mpsc::channel(queue_capacity);
        let (close_tx, close_rx) = oneshot::channel();

        let worker = tokio::spawn(apply_loop(rx, close_rx, initial, snapshot.clone()));

        Self {
            submitter: TileSubmitter {
                tx,
                min_zoom,
                tile_width,
                tile_height,
                capacity: queue_capacity,
            },
            snapshot,
            worker,
            close_tx,
        }
    }

    /// A cloneable handle producers can submit tiles through.
    pub fn submitter(&self) -> TileSubmitter {
        self.submitter.clone()
    }

    /// Enqueue a tile, waiting if the queue is at capacity.
    pub async fn submit(&self, tile: Tile) -> Result<(), SubmitError> {
        self.submitter.submit(tile).await
    }

    /// Enqueue a tile without waiting; a full queue is an error.
    pub fn try_submit(&self, tile: Tile) -> Result<(), SubmitError> {
        self.submitter.try_submit(tile)
    }

    /// The most recently published snapshot.
    ///
    /// Wait-free; never observes a partially-applied insertion. Safe to call
    /// from any thread concurrently with submissions.
    pub fn current_snapshot(&self) -> Arc<Pyramid> {
        self.snapshot.load_full()
    }

    /// Close the queue, drain remaining submissions, and return the final
    /// snapshot.
    ///
    /// Outstanding [`TileSubmitter`] clones start reporting
    /// [`SubmitError::Closed`] once their sends fail.
    pub async fn shutdown(self) -> Arc<Pyramid> {
        // The worker closes the queue on this signal, drains what was
        // already enqueued, and exits.
        let _ = self.close_tx.send(());
        let _ = self.worker.await;
        self.snapshot.load_full()
    }
}

/// Worker loop: apply queued insertions strictly one at a time.
///
/// Runs until the close signal arrives (or the mutator is dropped) and the
/// queue is drained.
async fn apply_loop(
    mut rx: mpsc::Receiver<Tile>,
    mut close_rx: oneshot::Receiver<()>,
    mut latest: Arc<Pyramid>,
    published: Arc<ArcSwap<Pyramid>>,
) {
    let mut applied: u64 = 0;
    let mut closing = false;
    loop {
        tokio::select! {
            _ = &mut close_rx, if !closing => {
                // Stop accepting new sends; buffered tiles still drain below
                rx.close();
                closing = true;
            }
            maybe = rx.recv() => match maybe {
                Some(tile) => {
                    let index = tile.index();
                    latest = Arc::new(latest.insert(tile));
                    published.store(latest.clone());
                    applied += 1;
                    debug!(
                        col = index.col,
                        row = index.row,
                        slice = index.slice,
                        timepoint = index.timepoint,
                        channel = index.channel,
                        applied,
                        "applied tile insertion"
                    );
                }
                None => break,
            }
        }
    }
    debug!(applied, "mutator worker drained");
}

// =============================================================================
// Tests
// =============================================================================
