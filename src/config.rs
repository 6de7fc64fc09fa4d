//! Configuration for the acquisition demo binary.
//!
//! All options come from command-line flags or environment variables with
//! the `ACQ_` prefix, with sensible defaults:
//!
//! - `ACQ_TILE_SIZE` - Tile edge length in pixels (default: 256)
//! - `ACQ_MIN_ZOOM` - Coarsest derived zoom level (default: -8)
//! - `ACQ_QUEUE_CAPACITY` - Bounded submission queue size (default: 1024)
//! - `ACQ_PRODUCERS` - Concurrent simulated producers (default: 4)
//! - `ACQ_TILES_PER_PRODUCER` - Tiles each producer submits (default: 64)

use std::path::PathBuf;

use clap::Parser;

use crate::pyramid::{DEFAULT_MIN_ZOOM, DEFAULT_QUEUE_CAPACITY, DEFAULT_TILE_SIZE};

/// Default number of simulated producers.
pub const DEFAULT_PRODUCERS: usize = 4;

/// Default number of tiles each producer submits.
pub const DEFAULT_TILES_PER_PRODUCER: usize = 64;

/// acq-pyramid - live tile pyramid engine demo.
///
/// Runs a simulated multi-producer acquisition through the pyramid mutator
/// and reports the resulting per-level tile counts.
#[derive(Parser, Debug, Clone)]
#[command(name = "acq-pyramid")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Pyramid Configuration
    // =========================================================================
    /// Tile edge length in pixels (must be even).
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE, env = "ACQ_TILE_SIZE")]
    pub tile_size: u32,

    /// Coarsest zoom level insertions propagate to (negative).
    #[arg(long, default_value_t = DEFAULT_MIN_ZOOM, env = "ACQ_MIN_ZOOM", allow_hyphen_values = true)]
    pub min_zoom: i32,

    /// Capacity of the bounded submission queue.
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, env = "ACQ_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    // =========================================================================
    // Simulation Configuration
    // =========================================================================
    /// Number of concurrent simulated producers.
    #[arg(long, default_value_t = DEFAULT_PRODUCERS, env = "ACQ_PRODUCERS")]
    pub producers: usize,

    /// Number of tiles each producer submits.
    #[arg(long, default_value_t = DEFAULT_TILES_PER_PRODUCER, env = "ACQ_TILES_PER_PRODUCER")]
    pub tiles_per_producer: usize,

    // =========================================================================
    // Transform Configuration
    // =========================================================================
    /// Path to the JSON stage-transform store.
    #[arg(long, env = "ACQ_TRANSFORM_STORE")]
    pub transform_store: Option<PathBuf>,

    /// Active pixel-size configuration name (selects the stored transform).
    #[arg(long, env = "ACQ_PIXEL_CONFIG")]
    pub pixel_config: Option<String>,

    // =========================================================================
    // Output Configuration
    // =========================================================================
    /// Write a PNG preview of the coarsest populated level on exit.
    #[arg(long, env = "ACQ_PREVIEW")]
    pub preview: Option<PathBuf>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size < 16 || self.tile_size > 4096 {
            return Err("tile_size must be between 16 and 4096".to_string());
        }
        if self.tile_size % 2 != 0 {
            return Err("tile_size must be even (tiles downsample 2x per level)".to_string());
        }

        if !(-32..=-1).contains(&self.min_zoom) {
            return Err("min_zoom must be between -32 and -1".to_string());
        }

        if self.queue_capacity == 0 {
            return Err("queue_capacity must be greater than 0".to_string());
        }

        if self.producers == 0 {
            return Err("producers must be greater than 0".to_string());
        }
        if self.tiles_per_producer == 0 {
            return Err("tiles_per_producer must be greater than 0".to_string());
        }

        // Transform store and pixel config only make sense together
        if self.transform_store.is_some() != self.pixel_config.is_some() {
            return Err(
                "transform-store and pixel-config must be set together. \
                 Set both --transform-store and --pixel-config, or neither"
                    .to_string(),
            );
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
