//! The multi-level tile index and its insertion/propagation algorithm.
//!
//! A [`Pyramid`] maps each zoom level to a map from [`GridKey`] to [`Tile`].
//! It is a persistent value: [`Pyramid::insert`] and [`Pyramid::propagate`]
//! return a new pyramid and never touch their input. Level maps are shared
//! via `Arc`, so a derived pyramid clones only the levels an insertion
//! actually touched (copy-on-write); everything else is a pointer copy.
//!
//! # Propagation
//!
//! Inserting a tile seeds the zoom-0 map, then walks one level at a time
//! toward the configured minimum zoom. Each step floor-divides the column
//! and row by 2 to find the parent, gathers whichever of the four sibling
//! children exist at the finer level, and merges them into the parent tile.
//! The walk always performs the full configured number of steps (a bounded
//! loop, never unbounded recursion); a step with no finer-level data is a
//! no-op. Coarser levels therefore only populate once finer data begins
//! arriving, never eagerly.
//!
//! A coarser tile may be stale relative to children that have not arrived
//! yet; partial merges are recomputed as siblings land, so the structure is
//! eventually consistent.

use std::collections::HashMap;
use std::sync::Arc;

use super::merge::merge_quad;
use crate::tile::{GridKey, Tile, TileIndex};

/// Default coarsest derived zoom level.
pub const DEFAULT_MIN_ZOOM: i32 = -8;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// An immutable multi-level tile pyramid.
///
/// Zoom level 0 holds every delivered full-resolution tile; each negative
/// level down to `min_zoom` holds tiles derived by merging and downsampling
/// the four children one level finer. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Pyramid {
    min_zoom: i32,
    tile_width: u32,
    tile_height: u32,
    levels: HashMap<i32, Arc<HashMap<GridKey, Tile>>>,
}

impl Pyramid {
    /// Create an empty pyramid.
    ///
    /// `min_zoom` is the coarsest level insertions propagate to (must be
    /// negative); tiles are `tile_width` x `tile_height` pixels.
    pub fn new(min_zoom: i32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            min_zoom,
            tile_width,
            tile_height,
            levels: HashMap::new(),
        }
    }

    /// The coarsest zoom level insertions propagate to.
    pub fn min_zoom(&self) -> i32 {
        self.min_zoom
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// The tile map for one zoom level, if any tile exists there.
    pub fn level(&self, zoom: i32) -> Option<&HashMap<GridKey, Tile>> {
        self.levels.get(&zoom).map(|m| m.as_ref())
    }

    /// Number of tiles at one zoom level.
    pub fn level_len(&self, zoom: i32) -> usize {
        self.levels.get(&zoom).map_or(0, |m| m.len())
    }

    /// Look up a single tile.
    pub fn tile(&self, index: &TileIndex) -> Option<&Tile> {
        self.levels.get(&index.zoom)?.get(&index.grid_key())
    }

    /// Total number of tiles across all levels.
    pub fn len(&self) -> usize {
        self.levels.values().map(|m| m.len()).sum()
    }

    /// Whether the pyramid holds no tiles at all.
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(|m| m.is_empty())
    }

    /// Zoom levels that currently hold at least one tile, finest first.
    pub fn populated_zooms(&self) -> Vec<i32> {
        let mut zooms: Vec<i32> = self
            .levels
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(&z, _)| z)
            .collect();
        zooms.sort_unstable_by(|a, b| b.cmp(a));
        zooms
    }

    /// Insert a full-resolution tile and propagate it to every coarser level.
    ///
    /// The tile lands in the zoom-0 map regardless of the zoom field on its
    /// index (the index is accepted for generality but an insertion is always
    /// a zoom-0 event). The walk toward `min_zoom` then rederives the parent
    /// tile at each coarser level from whichever siblings are present.
    ///
    /// Returns a new pyramid; `self` is unchanged.
    pub fn insert(&self, tile: Tile) -> Self {
        let mut next = self.clone();

        let seed = tile.index().with_zoom(0);
        next.put(seed.grid_key(), tile.retag(seed));

        let mut child = seed;
        while child.zoom > next.min_zoom {
            let parent = child.parent();
            next.derive_parent(parent);
            child = parent;
        }
        next
    }

    /// Rederive the parent of `child` one zoom level coarser.
    ///
    /// A no-op when the child's level has no tiles mapped to that parent.
    /// Deterministic: unchanged inputs produce a bit-identical parent tile.
    /// Returns a new pyramid; `self` is unchanged.
    pub fn propagate(&self, child: &TileIndex) -> Self {
        let mut next = self.clone();
        next.derive_parent(child.parent());
        next
    }

    /// Merge the children of `parent` from the finer level into its slot.
    fn derive_parent(&mut self, parent: TileIndex) {
        let child_zoom = parent.zoom + 1;
        // No finer layer at all: nothing to merge yet
        let Some(finer) = self.levels.get(&child_zoom).cloned() else {
            return;
        };

        let children = parent.children();
        let quad: [Option<&Tile>; 4] = [
            finer.get(&children[0].grid_key()),
            finer.get(&children[1].grid_key()),
            finer.get(&children[2].grid_key()),
            finer.get(&children[3].grid_key()),
        ];
        if quad.iter().all(|c| c.is_none()) {
            return;
        }

        let merged = merge_quad(parent, quad, self.tile_width, self.tile_height);
        self.put(parent.grid_key(), merged);
    }

    /// Write a tile into its level map, cloning the map only if shared.
    fn put(&mut self, key: GridKey, tile: Tile) {
        let level = self.levels.entry(tile.index().zoom).or_default();
        Arc::make_mut(level).insert(key, tile);
    }
}

// =============================================================================
// Tests
// =============================================================================
