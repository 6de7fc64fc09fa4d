//! End-to-end insertion and propagation through the mutator pipeline.

use acq_pyramid::{compose_level, PyramidMutator, SimulatedSource, TileSource};

use super::test_utils::{coarse_index, solid_tile, TILE};

#[tokio::test]
async fn test_four_siblings_merge_to_their_common_value() {
    let mutator = PyramidMutator::new(-2, TILE, TILE, 64);

    for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        mutator.submit(solid_tile(col, row, 137)).await.unwrap();
    }
    let pyramid = mutator.shutdown().await;

    // An averaging merge of four identical solid tiles reproduces the value
    let coarse = pyramid.tile(&coarse_index(-1, 0, 0)).unwrap();
    assert!(coarse.pixels().iter().all(|&p| p == 137));
}

#[tokio::test]
async fn test_lone_tile_partial_merge() {
    let mutator = PyramidMutator::new(-2, TILE, TILE, 64);
    mutator.submit(solid_tile(0, 0, 137)).await.unwrap();
    let pyramid = mutator.shutdown().await;

    // The coarse tile exists, built from the single present sibling
    let coarse = pyramid.tile(&coarse_index(-1, 0, 0)).unwrap();
    assert_eq!(coarse.pixel(0, 0), 137);
    assert_eq!(coarse.pixel(TILE - 1, TILE - 1), 0);

    // Other coarse positions remain absent
    assert!(pyramid.tile(&coarse_index(-1, 1, 0)).is_none());
    assert!(pyramid.tile(&coarse_index(-1, 0, 1)).is_none());
    assert!(pyramid.tile(&coarse_index(-1, 1, 1)).is_none());
}

#[tokio::test]
async fn test_propagation_reaches_configured_floor() {
    let mutator = PyramidMutator::new(-3, TILE, TILE, 256);

    // A 4x4 block collapses to 4 tiles at -1, 1 tile at -2 and -3
    for row in 0..4 {
        for col in 0..4 {
            mutator.submit(solid_tile(col, row, 90)).await.unwrap();
        }
    }
    let pyramid = mutator.shutdown().await;

    assert_eq!(pyramid.level_len(0), 16);
    assert_eq!(pyramid.level_len(-1), 4);
    assert_eq!(pyramid.level_len(-2), 1);
    assert_eq!(pyramid.level_len(-3), 1);

    // Fully-covered coarse tiles are solid
    let coarse = pyramid.tile(&coarse_index(-2, 0, 0)).unwrap();
    assert!(coarse.pixels().iter().all(|&p| p == 90));
}

#[tokio::test]
async fn test_negative_grid_coordinates_derive_by_floor_division() {
    let mutator = PyramidMutator::new(-2, TILE, TILE, 64);
    mutator.submit(solid_tile(-3, -3, 55)).await.unwrap();
    let pyramid = mutator.shutdown().await;

    // floor(-3/2) = -2, then floor(-2/2) = -1
    assert!(pyramid.tile(&coarse_index(-1, -2, -2)).is_some());
    assert!(pyramid.tile(&coarse_index(-2, -1, -1)).is_some());

    // Truncation toward zero would have produced these instead
    assert!(pyramid.tile(&coarse_index(-1, -1, -1)).is_none());
}

#[tokio::test]
async fn test_simulated_source_feeds_pipeline() {
    let mutator = PyramidMutator::new(-2, TILE, TILE, 64);
    let submitter = mutator.submitter();

    let mut source = SimulatedSource::new(TILE, TILE, 0, 4, 0, 2);
    while let Some(tile) = source.next_tile().await {
        submitter.submit(tile).await.unwrap();
    }
    let pyramid = mutator.shutdown().await;

    assert_eq!(pyramid.level_len(0), 8);
    assert_eq!(pyramid.level_len(-1), 2);
}

#[tokio::test]
async fn test_compose_preview_of_derived_level() {
    let mutator = PyramidMutator::new(-1, TILE, TILE, 64);
    for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        mutator.submit(solid_tile(col, row, 201)).await.unwrap();
    }
    let pyramid = mutator.shutdown().await;

    let image = compose_level(&pyramid, -1, 0, 0, 0).unwrap();
    assert_eq!(image.width(), TILE);
    assert_eq!(image.height(), TILE);
    assert!(image.pixels().all(|p| p.0[0] == 201));
}

#[tokio::test]
async fn test_resubmitted_position_refreshes_coarse_levels() {
    let mutator = PyramidMutator::new(-1, TILE, TILE, 64);
    mutator.submit(solid_tile(0, 0, 10)).await.unwrap();
    mutator.submit(solid_tile(0, 0, 250)).await.unwrap();
    let pyramid = mutator.shutdown().await;

    assert_eq!(pyramid.level_len(0), 1);
    let coarse = pyramid.tile(&coarse_index(-1, 0, 0)).unwrap();
    assert_eq!(coarse.pixel(0, 0), 250);
}
