//! acq-pyramid demo binary.
//!
//! Runs a simulated multi-producer acquisition through the pyramid mutator
//! and reports the resulting per-level tile counts.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use acq_pyramid::{
    compose_level, transform_key, Config, JsonTransformStore, PyramidMutator, SimulatedSource,
    TileSource, TransformStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("acq-pyramid v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Tile size: {}x{}", config.tile_size, config.tile_size);
    info!("  Min zoom: {}", config.min_zoom);
    info!("  Queue capacity: {}", config.queue_capacity);
    info!(
        "  Simulation: {} producer(s) x {} tile(s)",
        config.producers, config.tiles_per_producer
    );

    // Load the stage calibration if one is configured
    if let (Some(path), Some(pixel_config)) = (&config.transform_store, &config.pixel_config) {
        let store = JsonTransformStore::new(path.as_path());
        match store.load(&transform_key(pixel_config)) {
            Ok(Some(transform)) => {
                info!(
                    "  Stage transform ({}): {:?}",
                    pixel_config,
                    transform.matrix()
                );
            }
            Ok(None) => {
                warn!(
                    "  No stage transform saved for pixel config '{}' in {}",
                    pixel_config,
                    path.display()
                );
            }
            Err(e) => {
                error!("Failed to load transform store: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    // One mutator, many producers
    let mutator = PyramidMutator::new(
        config.min_zoom,
        config.tile_size,
        config.tile_size,
        config.queue_capacity,
    );

    // Each producer sweeps its own row band of the grid
    let cols = config.tiles_per_producer as i32;
    let mut tasks = Vec::with_capacity(config.producers);
    for producer in 0..config.producers {
        let submitter = mutator.submitter();
        let mut source =
            SimulatedSource::new(config.tile_size, config.tile_size, 0, cols, producer as i32, 1);

        tasks.push(tokio::spawn(async move {
            let mut submitted = 0usize;
            while let Some(tile) = source.next_tile().await {
                if let Err(e) = submitter.submit(tile).await {
                    warn!("Producer {} stopping: {}", producer, e);
                    break;
                }
                submitted += 1;
            }
            debug!("Producer {} submitted {} tile(s)", producer, submitted);
            submitted
        }));
    }

    let mut total = 0usize;
    for task in tasks {
        match task.await {
            Ok(submitted) => total += submitted,
            Err(e) => {
                error!("Producer task failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let pyramid = mutator.shutdown().await;

    info!("");
    info!("Submitted {} tile(s); pyramid levels:", total);
    for zoom in pyramid.populated_zooms() {
        info!("  zoom {:>3}: {} tile(s)", zoom, pyramid.level_len(zoom));
    }

    if let Some(ref path) = config.preview {
        let coarsest = pyramid.populated_zooms().last().copied();
        match coarsest.and_then(|zoom| compose_level(&pyramid, zoom, 0, 0, 0)) {
            Some(image) => {
                if let Err(e) = image.save(path) {
                    error!("Failed to write preview {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
                info!("Preview written to {}", path.display());
            }
            None => warn!("Pyramid is empty, no preview written"),
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "acq_pyramid=debug"
    } else {
        "acq_pyramid=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
