//! Affine stage/pixel coordinate conversion.
//!
//! The stage moves in physical units (micrometers); tiles are addressed in
//! pixels. A [`StageTransform`] is the affine map between the two spaces,
//! produced by calibration and owned externally; the pyramid only consults
//! it when translating stage positions into grid coordinates.

use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Affine map from pixel space to stage space.
///
/// Stored as a 3x3 homogeneous matrix with affine bottom row. The forward
/// direction ([`Self::to_stage`]) always succeeds; the inverse direction
/// ([`Self::to_pixel`]) fails on a singular matrix, which callers treat as a
/// calibration error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransform {
    matrix: Matrix3<f64>,
}

impl StageTransform {
    /// The identity map (pixel space == stage space).
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Build from the six affine coefficients:
    ///
    /// ```text
    /// | a  b  tx |
    /// | c  d  ty |
    /// | 0  0  1  |
    /// ```
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(a, b, tx, c, d, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Uniform-scale calibration: one pixel spans `pixel_size_um` micrometers.
    pub fn from_pixel_size(pixel_size_um: f64) -> Self {
        Self::from_coefficients(pixel_size_um, 0.0, 0.0, pixel_size_um, 0.0, 0.0)
    }

    /// The underlying homogeneous matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Map a pixel-space point to stage space.
    pub fn to_stage(&self, pixel: Point2<f64>) -> Point2<f64> {
        apply(&self.matrix, pixel)
    }

    /// Map a stage-space point back to pixel space.
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] when the matrix is singular. This is
    /// a configuration error, never silently defaulted.
    pub fn to_pixel(&self, stage: Point2<f64>) -> Result<Point2<f64>, TransformError> {
        let inverse = self
            .matrix
            .try_inverse()
            .ok_or(TransformError::NonInvertible)?;
        Ok(apply(&inverse, stage))
    }
}

/// Apply a homogeneous 3x3 matrix to a 2D point (affine: w stays 1).
fn apply(m: &Matrix3<f64>, p: Point2<f64>) -> Point2<f64> {
    let v = m * Vector3::new(p.x, p.y, 1.0);
    Point2::new(v.x, v.y)
}

// =============================================================================
// Tests
// =============================================================================
