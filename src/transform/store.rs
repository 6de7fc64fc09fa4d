//! Keyed persistence for stage transforms.
//!
//! Calibrations are saved per pixel-size configuration: switching objectives
//! switches the active configuration name, and [`transform_key`] derives the
//! store key from it. The store itself is an opaque key-value surface — the
//! pyramid core only needs `load` and `save`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::affine::StageTransform;

/// Derive the store key for a pixel-size configuration name.
pub fn transform_key(pixel_config: &str) -> String {
    format!("affine-transform/{pixel_config}")
}

/// Opaque keyed storage for stage transforms.
pub trait TransformStore {
    /// Load the transform saved under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<StageTransform>, StoreError>;

    /// Save `transform` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, transform: &StageTransform) -> Result<(), StoreError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Volatile store, useful for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransformStore {
    entries: HashMap<String, StageTransform>,
}

impl MemoryTransformStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransformStore for MemoryTransformStore {
    fn load(&self, key: &str) -> Result<Option<StageTransform>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, transform: &StageTransform) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), transform.clone());
        Ok(())
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// File-backed store: one JSON object mapping keys to transforms.
///
/// The whole file is read on `load` and rewritten on `save`; calibrations
/// are tiny and change rarely, so this keeps the format human-inspectable.
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonTransformStore {
    path: PathBuf,
}

impl JsonTransformStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, StageTransform>, StoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn write_all(&self, entries: &HashMap<String, StageTransform>) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, data).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl TransformStore for JsonTransformStore {
    fn load(&self, key: &str) -> Result<Option<StageTransform>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, transform: &StageTransform) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), transform.clone());
        self.write_all(&entries)
    }
}

// =============================================================================
// Tests
// =============================================================================
