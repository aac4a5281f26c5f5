//! Persisted representation of features.
//!
//! Records are plain JSON objects with coordinates as `{lat, lng}` pairs:
//!
//! ```json
//! [{"id": "aoi-1", "kind": "polygon",
//!   "geometry": [{"lat": 52.5, "lng": 13.4}, ...],
//!   "name": "AOI 1", "createdAt": "2024-05-01T10:00:00Z",
//!   "color": "#3b82f6", "area": 1234.5}]
//! ```
//!
//! Points store a single pair instead of a list, and `area` is omitted for
//! them. Older data used `type` and `coordinates` as field names; both are
//! accepted when reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AoiError;
use crate::model::{AoiFeature, Coordinate, FeatureKind, Geometry};

/// One persisted feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: FeatureKind,
    #[serde(alias = "coordinates")]
    pub geometry: GeometryEntry,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

/// Geometry as stored: a single pair or a sequence of pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeometryEntry {
    Single(Coordinate),
    Many(Vec<Coordinate>),
}

impl From<&Geometry> for GeometryEntry {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(c) => GeometryEntry::Single(*c),
            other => GeometryEntry::Many(other.coordinates().to_vec()),
        }
    }
}

impl GeometryEntry {
    fn coordinates(&self) -> &[Coordinate] {
        match self {
            GeometryEntry::Single(c) => std::slice::from_ref(c),
            GeometryEntry::Many(coords) => coords,
        }
    }
}

impl From<&AoiFeature> for FeatureRecord {
    fn from(feature: &AoiFeature) -> Self {
        Self {
            id: feature.id.clone(),
            kind: feature.kind(),
            geometry: GeometryEntry::from(&feature.geometry),
            name: feature.name.clone(),
            created_at: feature.created_at,
            color: feature.color.clone(),
            area: feature.area,
        }
    }
}

impl FeatureRecord {
    /// Rebuild the feature, validating geometry for the recorded kind.
    ///
    /// The area is recomputed from the geometry rather than trusted.
    pub fn into_feature(self) -> Result<AoiFeature, AoiError> {
        let geometry = Geometry::from_coordinates(self.kind, self.geometry.coordinates())?;
        Ok(AoiFeature {
            id: self.id,
            area: geometry.area(),
            geometry,
            name: self.name,
            created_at: self.created_at,
            color: self.color,
        })
    }
}

/// Serialize a feature collection to the persisted JSON layout.
pub fn to_json(features: &[AoiFeature]) -> Result<String, serde_json::Error> {
    let records: Vec<FeatureRecord> = features.iter().map(FeatureRecord::from).collect();
    serde_json::to_string(&records)
}

/// Parse the persisted JSON layout into records.
///
/// Fails only if the blob is not a JSON array. Array entries that are not
/// well-formed records are skipped with a warning.
pub fn from_json(json: &str) -> Result<Vec<FeatureRecord>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping malformed stored feature #{}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_feature() -> AoiFeature {
        let geometry = Geometry::Point(Coordinate::new(48.85, 2.35));
        AoiFeature {
            id: "aoi-1".to_string(),
            area: geometry.area(),
            geometry,
            name: "AOI 1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            color: "#3b82f6".to_string(),
        }
    }

    #[test]
    fn test_point_record_layout() {
        let json = to_json(&[sample_feature()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value[0];

        assert_eq!(record["kind"], "point");
        assert_eq!(record["geometry"]["lat"], 48.85);
        assert_eq!(record["createdAt"], "2024-05-01T10:00:00Z");
        assert!(record.get("area").is_none());
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r##"[{
            "id": "aoi-1700000000000-abc123xyz",
            "type": "rectangle",
            "coordinates": [{"lat": 1.0, "lng": 2.0}, {"lat": 1.5, "lng": 2.5}],
            "name": "AOI 1",
            "createdAt": "2023-11-14T22:13:20.000Z",
            "color": "#10b981",
            "area": 0
        }]"##;
        let records = from_json(json).unwrap();
        assert_eq!(records.len(), 1);

        let feature = records.into_iter().next().unwrap().into_feature().unwrap();
        assert_eq!(feature.kind(), FeatureKind::Rectangle);
        // Area is recomputed, not taken from the record
        assert!(feature.area.unwrap() > 0.0);
    }

    #[test]
    fn test_skips_malformed_entries() {
        let json = r##"[
            {"id": "bad"},
            {"id": "ok", "kind": "point", "geometry": {"lat": 0.0, "lng": 0.0},
             "name": "AOI 1", "createdAt": "2024-01-01T00:00:00Z", "color": "#ef4444"}
        ]"##;
        let records = from_json(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok");
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(from_json("{\"id\": 1}").is_err());
        assert!(from_json("not json").is_err());
    }

    #[test]
    fn test_kind_cardinality_checked_on_rebuild() {
        let mut record = FeatureRecord::from(&sample_feature());
        record.kind = FeatureKind::Polygon;
        assert!(record.into_feature().is_err());
    }
}
