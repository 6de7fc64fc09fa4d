//! Stage/pixel coordinate transforms and their persistence.
//!
//! - [`StageTransform`]: affine pixel-to-stage map with a fallible inverse
//! - [`TransformStore`]: opaque keyed load/save surface, with in-memory and
//!   JSON-file implementations
//! - [`transform_key`]: derives the store key from the active pixel-size
//!   configuration name

mod affine;
mod store;

pub use affine::StageTransform;
pub use store::{transform_key, JsonTransformStore, MemoryTransformStore, TransformStore};
