//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

use crate::error::AoiError;

/// A latitude/longitude pair in degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`, the plain-pair layout used in
/// persisted feature records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, AoiError> {
        let coord = Self::new(lat, lng);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(AoiError::invalid_geometry(format!(
                "coordinate ({lat}, {lng}) is outside [-90, 90] x [-180, 180]"
            )))
        }
    }

    /// Check that both components are finite and within the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}
