//! AOI feature types and geometry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AoiError;
use crate::geo_math::{self, Bounds};
use crate::model::Coordinate;

/// Unique identifier for a feature.
pub type FeatureId = String;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Number of corners stored for a rectangle.
pub const RECTANGLE_CORNERS: usize = 2;

/// The shape kind of a feature. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Point,
    Polygon,
    Rectangle,
}

impl FeatureKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Point => "Point",
            FeatureKind::Polygon => "Polygon",
            FeatureKind::Rectangle => "Rectangle",
        }
    }
}

/// Coordinate data of a feature, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single marker position.
    Point(Coordinate),
    /// Boundary walk in drawing order; the last vertex connects to the first.
    Polygon(Vec<Coordinate>),
    /// Two opposite corners of a lat/lon aligned box.
    Rectangle([Coordinate; RECTANGLE_CORNERS]),
}

impl Geometry {
    /// Build a geometry of `kind` from a raw coordinate list.
    ///
    /// Fails when the number of coordinates does not fit the kind or when any
    /// coordinate is invalid.
    pub fn from_coordinates(kind: FeatureKind, coords: &[Coordinate]) -> Result<Self, AoiError> {
        let geometry = match (kind, coords) {
            (FeatureKind::Point, [c]) => Geometry::Point(*c),
            (FeatureKind::Point, _) => {
                return Err(AoiError::invalid_geometry(format!(
                    "point needs exactly 1 coordinate, got {}",
                    coords.len()
                )));
            }
            (FeatureKind::Rectangle, [a, b]) => Geometry::Rectangle([*a, *b]),
            (FeatureKind::Rectangle, _) => {
                return Err(AoiError::invalid_geometry(format!(
                    "rectangle needs exactly {} corners, got {}",
                    RECTANGLE_CORNERS,
                    coords.len()
                )));
            }
            (FeatureKind::Polygon, _) => Geometry::Polygon(coords.to_vec()),
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Get the kind of this geometry.
    pub fn kind(&self) -> FeatureKind {
        match self {
            Geometry::Point(_) => FeatureKind::Point,
            Geometry::Polygon(_) => FeatureKind::Polygon,
            Geometry::Rectangle(_) => FeatureKind::Rectangle,
        }
    }

    /// All coordinates in storage order.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(c) => std::slice::from_ref(c),
            Geometry::Polygon(vertices) => vertices,
            Geometry::Rectangle(corners) => corners,
        }
    }

    /// Check cardinality and coordinate validity.
    pub fn validate(&self) -> Result<(), AoiError> {
        if let Geometry::Polygon(vertices) = self {
            if vertices.len() < MIN_POLYGON_VERTICES {
                return Err(AoiError::invalid_geometry(format!(
                    "polygon needs at least {} vertices, got {}",
                    MIN_POLYGON_VERTICES,
                    vertices.len()
                )));
            }
        }
        if let Some(bad) = self.coordinates().iter().find(|c| !c.is_valid()) {
            return Err(AoiError::invalid_geometry(format!(
                "coordinate ({}, {}) is not a valid position",
                bad.lat, bad.lng
            )));
        }
        Ok(())
    }

    /// Area in square meters, `None` for points.
    pub fn area(&self) -> Option<f64> {
        geo_math::geometry_area(self)
    }

    /// Move the vertex at `index` to `coord`.
    ///
    /// Points only have index 0 and rectangles indices 0 and 1.
    /// Returns false if the index does not exist.
    pub fn set_vertex(&mut self, index: usize, coord: Coordinate) -> bool {
        let slot = match self {
            Geometry::Point(c) if index == 0 => Some(c),
            Geometry::Point(_) => None,
            Geometry::Polygon(vertices) => vertices.get_mut(index),
            Geometry::Rectangle(corners) => corners.get_mut(index),
        };
        match slot {
            Some(slot) => {
                *slot = coord;
                true
            }
            None => false,
        }
    }

    /// Bounding box of all coordinates.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_coordinates(self.coordinates())
    }

    /// Check if a position hits this geometry.
    ///
    /// Points are hit within `point_radius_m` meters; polygons use ray casting
    /// in lat/lon space; rectangles test their box.
    pub fn contains(&self, coord: &Coordinate, point_radius_m: f64) -> bool {
        match self {
            Geometry::Point(p) => geo_math::distance_m(p, coord) <= point_radius_m,
            Geometry::Rectangle([a, b]) => Bounds::from_corners(a, b).contains(coord),
            Geometry::Polygon(vertices) => {
                if vertices.len() < MIN_POLYGON_VERTICES {
                    return false;
                }
                let (x, y) = (coord.lng, coord.lat);
                let mut inside = false;
                let mut j = vertices.len() - 1;
                for i in 0..vertices.len() {
                    let (xi, yi) = (vertices[i].lng, vertices[i].lat);
                    let (xj, yj) = (vertices[j].lng, vertices[j].lat);
                    if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                        inside = !inside;
                    }
                    j = i;
                }
                inside
            }
        }
    }
}

/// A stored Area of Interest.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiFeature {
    /// Unique identifier.
    pub id: FeatureId,
    /// The shape geometry.
    pub geometry: Geometry,
    /// User-editable display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Display color as `#rrggbb`.
    pub color: String,
    /// Area in square meters (absent for points).
    pub area: Option<f64>,
}

impl AoiFeature {
    /// Get the kind of this feature.
    pub fn kind(&self) -> FeatureKind {
        self.geometry.kind()
    }

    /// Replace the geometry and recompute the area.
    pub(crate) fn set_geometry(&mut self, geometry: Geometry) {
        self.area = geometry.area();
        self.geometry = geometry;
    }
}

/// Partial update for a feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturePatch {
    /// New display name.
    pub name: Option<String>,
    /// New geometry (must keep the feature's kind).
    pub geometry: Option<Geometry>,
}

impl FeaturePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new geometry.
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_from_coordinates_cardinality() {
        assert!(Geometry::from_coordinates(FeatureKind::Point, &[c(1.0, 1.0)]).is_ok());
        assert!(Geometry::from_coordinates(FeatureKind::Point, &[]).is_err());
        assert!(
            Geometry::from_coordinates(FeatureKind::Polygon, &[c(0.0, 0.0), c(1.0, 1.0)]).is_err()
        );
        assert!(
            Geometry::from_coordinates(
                FeatureKind::Rectangle,
                &[c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)]
            )
            .is_err()
        );
        let rect =
            Geometry::from_coordinates(FeatureKind::Rectangle, &[c(0.0, 0.0), c(1.0, 1.0)]).unwrap();
        assert_eq!(rect.kind(), FeatureKind::Rectangle);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let poly = Geometry::Polygon(vec![c(0.0, 0.0), c(f64::NAN, 1.0), c(1.0, 1.0)]);
        assert!(matches!(poly.validate(), Err(AoiError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_set_vertex_bounds() {
        let mut point = Geometry::Point(c(0.0, 0.0));
        assert!(point.set_vertex(0, c(1.0, 2.0)));
        assert!(!point.set_vertex(1, c(1.0, 2.0)));
        assert_eq!(point, Geometry::Point(c(1.0, 2.0)));

        let mut rect = Geometry::Rectangle([c(0.0, 0.0), c(1.0, 1.0)]);
        assert!(rect.set_vertex(1, c(2.0, 2.0)));
        assert!(!rect.set_vertex(2, c(2.0, 2.0)));

        let mut poly = Geometry::Polygon(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
        assert!(poly.set_vertex(2, c(1.0, 0.5)));
        assert_eq!(poly.coordinates()[2], c(1.0, 0.5));
    }

    #[test]
    fn test_polygon_contains() {
        let square = Geometry::Polygon(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(1.0, 0.0)]);
        assert!(square.contains(&c(0.5, 0.5), 0.0));
        assert!(!square.contains(&c(1.5, 0.5), 0.0));
    }

    #[test]
    fn test_rectangle_contains_with_reversed_corners() {
        let rect = Geometry::Rectangle([c(1.0, 1.0), c(0.0, 0.0)]);
        assert!(rect.contains(&c(0.5, 0.5), 0.0));
        assert!(!rect.contains(&c(-0.5, 0.5), 0.0));
    }

    #[test]
    fn test_point_contains_within_radius() {
        let point = Geometry::Point(c(0.0, 0.0));
        // ~111 m per 0.001 degree at the equator
        assert!(point.contains(&c(0.0, 0.0005), 100.0));
        assert!(!point.contains(&c(0.0, 0.002), 100.0));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FeatureKind::Rectangle).unwrap(),
            "\"rectangle\""
        );
    }
}
