//! Concurrency guarantees: no lost updates, consistent snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use acq_pyramid::{PyramidMutator, TileIndex};

use super::test_utils::{coarse_index, solid_tile, TILE};

#[tokio::test]
async fn test_no_lost_updates_under_concurrent_producers() {
    const PRODUCERS: i32 = 8;
    const TILES_PER_PRODUCER: i32 = 32;

    let mutator = PyramidMutator::new(-3, TILE, TILE, 64);

    // Each producer submits one full row; all indices are distinct
    let mut handles = Vec::new();
    for row in 0..PRODUCERS {
        let submitter = mutator.submitter();
        handles.push(tokio::spawn(async move {
            for col in 0..TILES_PER_PRODUCER {
                submitter.submit(solid_tile(col, row, 60)).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let pyramid = mutator.shutdown().await;

    // Exactly N x M entries, no duplicates or losses
    assert_eq!(
        pyramid.level_len(0),
        (PRODUCERS * TILES_PER_PRODUCER) as usize
    );
    for row in 0..PRODUCERS {
        for col in 0..TILES_PER_PRODUCER {
            let idx = TileIndex::at_level0(col, row, 0, 0, 0);
            assert!(pyramid.tile(&idx).is_some(), "missing tile ({col},{row})");
        }
    }
}

#[tokio::test]
async fn test_snapshots_never_move_backward_during_submission() {
    const PRODUCERS: i32 = 4;
    const TILES_PER_PRODUCER: i32 = 24;

    let mutator = Arc::new(PyramidMutator::new(-2, TILE, TILE, 32));
    let done = Arc::new(AtomicBool::new(false));

    // Reader samples the published snapshot while producers run
    let reader = {
        let mutator = mutator.clone();
        let done = done.clone();
        tokio::spawn(async move {
            let mut last_level0 = 0usize;
            let mut last_total = 0usize;
            while !done.load(Ordering::Acquire) {
                let snapshot = mutator.current_snapshot();
                let level0 = snapshot.level_len(0);
                let total = snapshot.len();
                assert!(level0 >= last_level0, "zoom-0 count went backward");
                assert!(total >= last_total, "total count went backward");
                // A derived level can only exist alongside zoom-0 data
                if total > 0 {
                    assert!(level0 > 0, "coarse tiles published without zoom-0 data");
                }
                last_level0 = level0;
                last_total = total;
                tokio::task::yield_now().await;
            }
        })
    };

    let mut producers = Vec::new();
    for row in 0..PRODUCERS {
        let submitter = mutator.submitter();
        producers.push(tokio::spawn(async move {
            for col in 0..TILES_PER_PRODUCER {
                submitter.submit(solid_tile(col, row, 77)).await.unwrap();
            }
        }));
    }
    for producer in producers {
        producer.await.unwrap();
    }

    done.store(true, Ordering::Release);
    reader.await.unwrap();

    let mutator = Arc::into_inner(mutator).unwrap();
    let pyramid = mutator.shutdown().await;
    assert_eq!(
        pyramid.level_len(0),
        (PRODUCERS * TILES_PER_PRODUCER) as usize
    );
}

#[tokio::test]
async fn test_interleaved_siblings_converge_to_full_merge() {
    // Two producers split the four siblings of one parent between them;
    // whatever the interleaving, the final coarse tile is the full merge.
    let mutator = PyramidMutator::new(-1, TILE, TILE, 8);

    let a = mutator.submitter();
    let b = mutator.submitter();
    let task_a = tokio::spawn(async move {
        a.submit(solid_tile(0, 0, 120)).await.unwrap();
        a.submit(solid_tile(1, 1, 120)).await.unwrap();
    });
    let task_b = tokio::spawn(async move {
        b.submit(solid_tile(1, 0, 120)).await.unwrap();
        b.submit(solid_tile(0, 1, 120)).await.unwrap();
    });
    task_a.await.unwrap();
    task_b.await.unwrap();

    let pyramid = mutator.shutdown().await;
    let coarse = pyramid.tile(&coarse_index(-1, 0, 0)).unwrap();
    assert!(coarse.pixels().iter().all(|&p| p == 120));
}

#[tokio::test]
async fn test_readers_keep_old_snapshots_alive() {
    let mutator = PyramidMutator::new(-1, TILE, TILE, 8);

    mutator.submit(solid_tile(0, 0, 10)).await.unwrap();
    // Let the worker catch up so the capture below is deterministic
    while mutator.current_snapshot().level_len(0) < 1 {
        tokio::task::yield_now().await;
    }
    let captured = mutator.current_snapshot();

    mutator.submit(solid_tile(1, 0, 20)).await.unwrap();
    let latest = mutator.shutdown().await;

    // The captured snapshot still reflects its point in logical time
    assert_eq!(captured.level_len(0), 1);
    assert_eq!(latest.level_len(0), 2);
}
