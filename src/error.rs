use thiserror::Error;

/// Errors surfaced to producers at the submission boundary.
///
/// The pyramid engine itself is pure and never fails; all validation happens
/// here before a tile reaches it.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// The index's zoom level is outside the configured pyramid bounds.
    #[error("zoom level {zoom} outside configured bounds ({min_zoom}..=0)")]
    ZoomOutOfBounds { zoom: i32, min_zoom: i32 },

    /// The tile's pixel dimensions don't match the pyramid's tile size.
    #[error("tile is {width}x{height}, pyramid expects {expected_width}x{expected_height}")]
    TileSizeMismatch {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// The bounded submission queue is full (backpressure signal).
    #[error("submission queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// The mutator has been shut down; no further submissions are accepted.
    #[error("mutator is shut down")]
    Closed,
}

/// Errors from stage/pixel coordinate conversion.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// The affine matrix is singular; pixel coordinates cannot be recovered.
    ///
    /// This indicates a bad calibration, not a retryable runtime condition.
    #[error("affine transform is not invertible")]
    NonInvertible,
}

/// Errors from the transform persistence store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Underlying I/O failure reading or writing the store.
    #[error("store I/O error: {0}")]
    Io(String),

    /// The stored data could not be serialized or deserialized.
    #[error("store serialization error: {0}")]
    Serialization(String),
}
