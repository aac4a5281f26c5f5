//! Geometry math on the sphere.
//!
//! Area and distance use a spherical Earth of mean radius
//! [`EARTH_RADIUS_M`]. The area formula is the small-polygon spherical excess
//! approximation; it is accurate for AOIs up to a few tens of kilometers and
//! makes no geodesic guarantee. Rings crossing the antimeridian are not
//! unwrapped.

use crate::model::{Coordinate, Geometry};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Areas below this are shown in square meters.
pub const SQUARE_METER_LIMIT: f64 = 10_000.0;

/// Areas below this (and above [`SQUARE_METER_LIMIT`]) are shown in hectares.
pub const HECTARE_LIMIT: f64 = 1_000_000.0;

/// Area in square meters of the closed ring through `coords`.
///
/// Returns 0 for fewer than 3 coordinates. The result has the same magnitude
/// for either winding order and for any choice of starting vertex.
pub fn polygon_area(coords: &[Coordinate]) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }

    let n = coords.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = &coords[i];
        let b = &coords[(i + 1) % n];
        let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
        let (lng1, lng2) = (a.lng.to_radians(), b.lng.to_radians());
        sum += (lng2 - lng1) * (2.0 + lat1.sin() + lat2.sin());
    }

    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// The four-corner ring of the box spanned by two opposite corners.
pub fn rectangle_ring(a: &Coordinate, b: &Coordinate) -> [Coordinate; 4] {
    [
        Coordinate::new(a.lat, a.lng),
        Coordinate::new(a.lat, b.lng),
        Coordinate::new(b.lat, b.lng),
        Coordinate::new(b.lat, a.lng),
    ]
}

/// Derived area of a geometry, `None` for points.
pub fn geometry_area(geometry: &Geometry) -> Option<f64> {
    match geometry {
        Geometry::Point(_) => None,
        Geometry::Polygon(vertices) => Some(polygon_area(vertices)),
        Geometry::Rectangle([a, b]) => Some(polygon_area(&rectangle_ring(a, b))),
    }
}

/// Human-readable area: m² below 1 ha, hectares below 1 km², km² above.
pub fn format_area(area: f64) -> String {
    if area < SQUARE_METER_LIMIT {
        format!("{:.2} m²", area)
    } else if area < HECTARE_LIMIT {
        format!("{:.2} ha", area / SQUARE_METER_LIMIT)
    } else {
        format!("{:.2} km²", area / HECTARE_LIMIT)
    }
}

/// Great-circle (haversine) distance in meters.
pub fn distance_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// A lat/lon aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Degenerate bounds around a single position.
    pub fn at(coord: &Coordinate) -> Self {
        Self {
            south: coord.lat,
            west: coord.lng,
            north: coord.lat,
            east: coord.lng,
        }
    }

    /// Box spanned by two opposite corners, in either order.
    pub fn from_corners(a: &Coordinate, b: &Coordinate) -> Self {
        let mut bounds = Self::at(a);
        bounds.extend(b);
        bounds
    }

    /// Smallest box containing all coordinates, `None` if there are none.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut bounds = Self::at(first);
        for coord in rest {
            bounds.extend(coord);
        }
        Some(bounds)
    }

    /// Grow the box to include `coord`.
    pub fn extend(&mut self, coord: &Coordinate) {
        self.south = self.south.min(coord.lat);
        self.north = self.north.max(coord.lat);
        self.west = self.west.min(coord.lng);
        self.east = self.east.max(coord.lng);
    }

    /// Grow the box to include another box.
    pub fn union(&mut self, other: &Bounds) {
        self.extend(&Coordinate::new(other.south, other.west));
        self.extend(&Coordinate::new(other.north, other.east));
    }

    /// Check if a position lies inside or on the edge.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat >= self.south
            && coord.lat <= self.north
            && coord.lng >= self.west
            && coord.lng <= self.east
    }

    /// Center of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}
