//! Canonical AOI feature collection.
//!
//! [`FeatureStore`] owns the ordered list of features and is the only thing
//! that mutates it. Every mutating operation writes the whole collection to
//! the injected [`BlobStore`] afterwards. Write failures are logged and never
//! undo the in-memory change: the in-memory list stays authoritative for the
//! session.

mod persistence;
mod record;
mod sources;

#[cfg(test)]
mod tests;

pub use persistence::{BlobStore, MemoryBlobStore};
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::FileBlobStore;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorageBlobStore;
pub use record::{FeatureRecord, GeometryEntry, from_json, to_json};
pub use sources::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};

use crate::color_utils::{self, ColorPicker};
use crate::error::AoiError;
use crate::geo_math::Bounds;
use crate::model::{AoiFeature, Coordinate, FeatureKind, FeaturePatch, Geometry};

/// Default storage key for the feature collection.
pub const DEFAULT_STORAGE_KEY: &str = "aoi-features";

/// Ordered, persisted collection of AOI features.
pub struct FeatureStore {
    /// Features in creation order.
    features: Vec<AoiFeature>,
    /// Persistence backend.
    backend: Box<dyn BlobStore>,
    /// Key the collection is stored under.
    key: String,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    colors: ColorPicker,
}

impl std::fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureStore")
            .field("key", &self.key)
            .field("features", &self.features.len())
            .finish_non_exhaustive()
    }
}

impl FeatureStore {
    /// Create an empty store over `backend` with default sources.
    ///
    /// Nothing is read until [`load`](Self::load) is called.
    pub fn new(backend: impl BlobStore + 'static) -> Self {
        Self {
            features: Vec::new(),
            backend: Box::new(backend),
            key: DEFAULT_STORAGE_KEY.to_string(),
            ids: Box::new(UuidIds),
            clock: Box::new(SystemClock),
            colors: ColorPicker::from_time(),
        }
    }

    /// Create a store over `backend` and load the persisted collection.
    pub fn open(backend: impl BlobStore + 'static) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the id generator.
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Set the clock used for creation timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Seed the color assignment.
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.colors = ColorPicker::new(seed);
        self
    }

    /// Storage key of this store.
    pub fn key(&self) -> &str {
        &self.key
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// All features in creation order.
    pub fn features(&self) -> &[AoiFeature] {
        &self.features
    }

    /// Get a feature by id.
    pub fn get(&self, id: &str) -> Option<&AoiFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Check if a feature with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Find the topmost (most recently created) feature at a position.
    pub fn hit_test(&self, coord: &Coordinate, point_radius_m: f64) -> Option<&AoiFeature> {
        self.features
            .iter()
            .rev()
            .find(|f| f.geometry.contains(coord, point_radius_m))
    }

    /// Bounds of a single feature, for focusing the map on it.
    pub fn feature_bounds(&self, id: &str) -> Option<Bounds> {
        self.get(id).and_then(|f| f.geometry.bounds())
    }

    /// Bounds covering every feature, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.bounds())
            .reduce(|mut acc, b| {
                acc.union(&b);
                acc
            })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Validate `geometry` and append a new feature for it.
    pub fn create(&mut self, geometry: Geometry) -> Result<AoiFeature, AoiError> {
        geometry.validate()?;

        let mut id = self.ids.next_id();
        while self.contains(&id) {
            log::debug!("Generated id {} already in use, regenerating", id);
            id = self.ids.next_id();
        }

        let feature = AoiFeature {
            id,
            area: geometry.area(),
            geometry,
            name: format!("AOI {}", self.features.len() + 1),
            created_at: self.clock.now(),
            color: self.colors.next_color().to_string(),
        };
        log::info!(
            "📍 Created {} '{}' ({})",
            feature.kind().name(),
            feature.name,
            feature.id
        );

        self.features.push(feature.clone());
        self.persist();
        Ok(feature)
    }

    /// Build a geometry of `kind` from raw coordinates and create a feature.
    pub fn create_from_coordinates(
        &mut self,
        kind: FeatureKind,
        coords: &[Coordinate],
    ) -> Result<AoiFeature, AoiError> {
        let geometry = Geometry::from_coordinates(kind, coords)?;
        self.create(geometry)
    }

    /// Remove a feature. Returns false if no feature has `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.features.iter().position(|f| f.id == id) else {
            log::debug!("Remove: no feature {}", id);
            return false;
        };
        let removed = self.features.remove(index);
        log::info!("🗑️ Removed '{}' ({})", removed.name, removed.id);
        self.persist();
        true
    }

    /// Merge `patch` into the feature with `id`.
    ///
    /// Returns `Ok(false)` if no feature has `id`, whatever the patch holds.
    /// A supplied geometry must be valid and keep the feature's kind; the
    /// area is recomputed from it.
    pub fn update(&mut self, id: &str, patch: FeaturePatch) -> Result<bool, AoiError> {
        let Some(feature) = self.features.iter_mut().find(|f| f.id == id) else {
            log::debug!("Update: no feature {}", id);
            return Ok(false);
        };

        if let Some(geometry) = patch.geometry {
            geometry.validate()?;
            if geometry.kind() != feature.kind() {
                return Err(AoiError::invalid_geometry(format!(
                    "cannot change {} '{}' into a {}",
                    feature.kind().name(),
                    feature.id,
                    geometry.kind().name()
                )));
            }
            feature.set_geometry(geometry);
        }
        if let Some(name) = patch.name {
            feature.name = name;
        }
        log::info!("✏️ Updated '{}' ({})", feature.name, feature.id);

        self.persist();
        Ok(true)
    }

    /// Rename a feature. Returns false if no feature has `id`.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> bool {
        // A name-only patch never fails validation
        self.update(id, FeaturePatch::new().name(name))
            .unwrap_or(false)
    }

    /// Remove every feature.
    pub fn clear(&mut self) {
        log::info!("🗑️ Cleared {} features", self.features.len());
        self.features.clear();
        self.persist();
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Missing or unparsable data gives an empty collection. Stored records
    /// with invalid geometry are dropped; corrupt colors are reassigned.
    pub fn load(&mut self) -> &[AoiFeature] {
        self.features = self.read_persisted();
        log::info!("Loaded {} features from '{}'", self.features.len(), self.key);
        &self.features
    }

    fn read_persisted(&mut self) -> Vec<AoiFeature> {
        let json = match self.backend.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read stored features: {}", e);
                return Vec::new();
            }
        };

        let records = match from_json(&json) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Failed to parse stored features: {}", e);
                return Vec::new();
            }
        };

        let mut features: Vec<AoiFeature> = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            let mut feature = match record.into_feature() {
                Ok(feature) => feature,
                Err(e) => {
                    log::warn!("Dropping stored feature {}: {}", id, e);
                    continue;
                }
            };
            if features.iter().any(|f| f.id == feature.id) {
                log::warn!("Dropping stored feature with duplicate id {}", feature.id);
                continue;
            }
            if color_utils::parse_hex(&feature.color).is_none() {
                log::warn!("Feature {} has invalid color '{}'", feature.id, feature.color);
                feature.color = self.colors.next_color().to_string();
            }
            features.push(feature);
        }
        features
    }

    /// Write the collection to the backend, logging failures.
    fn persist(&mut self) {
        let json = match to_json(&self.features) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize features: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.write(&self.key, &json) {
            log::warn!("Failed to persist {} features: {}", self.features.len(), e);
        }
    }
}
