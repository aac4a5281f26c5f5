//! Scenario tests for the feature store.
//!
//! These tests drive the store through an in-memory backend with a fixed
//! clock and sequential ids, so every generated field is predictable.


use chrono::{TimeZone, Utc};

use super::{BlobStore, FeatureStore, FixedClock, MemoryBlobStore, SequentialIds};
use crate::error::PersistenceError;
use crate::model::Coordinate;

/// Shorthand for a coordinate.
fn c(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

/// Store with deterministic sources over a shared in-memory backend.
fn test_store(backend: &MemoryBlobStore) -> FeatureStore {
    FeatureStore::new(backend.clone())
        .with_ids(SequentialIds::new("aoi"))
        .with_clock(FixedClock(
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        ))
        .with_color_seed(3)
}

/// Backend whose reads and writes always fail.
struct FailingBlobStore;

impl BlobStore for FailingBlobStore {
    fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(PersistenceError::Storage("read refused".to_string()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Storage("quota exceeded".to_string()))
    }
}
