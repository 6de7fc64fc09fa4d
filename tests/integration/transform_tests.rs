//! Stage calibration persistence and coordinate conversion.

use nalgebra::Point2;

use acq_pyramid::{
    transform_key, JsonTransformStore, StageTransform, TransformError, TransformStore,
};

#[test]
fn test_calibration_survives_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibrations.json");

    // Calibrate: 0.325 um/pixel with a small stage offset
    let calibration = StageTransform::from_coefficients(0.325, 0.0, 0.0, 0.325, 1500.0, -820.0);
    let key = transform_key("20x-dry");

    let mut store = JsonTransformStore::new(&path);
    store.save(&key, &calibration).unwrap();

    // A later session reopens the store by the same pixel-config key
    let reopened = JsonTransformStore::new(&path);
    let loaded = reopened.load(&key).unwrap().unwrap();
    assert_eq!(loaded, calibration);

    // And converts coordinates identically
    let pixel = Point2::new(2048.0, 1024.0);
    assert_eq!(loaded.to_stage(pixel), calibration.to_stage(pixel));
}

#[test]
fn test_stage_position_maps_back_to_pixel_space() {
    let calibration = StageTransform::from_coefficients(0.5, 0.0, 0.0, 0.5, 100.0, 200.0);

    let stage = calibration.to_stage(Point2::new(512.0, 512.0));
    assert_eq!(stage, Point2::new(356.0, 456.0));

    let pixel = calibration.to_pixel(stage).unwrap();
    assert!((pixel.x - 512.0).abs() < 1e-9);
    assert!((pixel.y - 512.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_calibration_is_reported_not_defaulted() {
    // A zero pixel size collapses the map; inversion must fail loudly
    let broken = StageTransform::from_pixel_size(0.0);
    let result = broken.to_pixel(Point2::new(10.0, 10.0));
    assert!(matches!(result, Err(TransformError::NonInvertible)));
}

#[test]
fn test_distinct_pixel_configs_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonTransformStore::new(dir.path().join("calibrations.json"));

    let low = StageTransform::from_pixel_size(0.65);
    let high = StageTransform::from_pixel_size(0.1625);
    store.save(&transform_key("10x"), &low).unwrap();
    store.save(&transform_key("40x"), &high).unwrap();

    assert_eq!(store.load(&transform_key("10x")).unwrap(), Some(low));
    assert_eq!(store.load(&transform_key("40x")).unwrap(), Some(high));
}
