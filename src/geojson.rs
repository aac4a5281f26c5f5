//! Conversion of GeoJSON outlines (e.g. geocoder search results) into AOI
//! geometries.

use serde_json::Value;

use crate::error::AoiError;
use crate::model::{Coordinate, Geometry};

/// Convert a GeoJSON `Polygon` or `MultiPolygon` geometry into a polygon.
///
/// Only the exterior ring of the first polygon is used. Positions are
/// `[lon, lat]`; a closing vertex equal to the first one is dropped.
pub fn outline_to_geometry(value: &Value) -> Result<Geometry, AoiError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AoiError::invalid_geometry("GeoJSON geometry has no type"))?;
    let coordinates = value
        .get("coordinates")
        .ok_or_else(|| AoiError::invalid_geometry("GeoJSON geometry has no coordinates"))?;

    let ring = match kind {
        "Polygon" => coordinates.get(0),
        "MultiPolygon" => coordinates.get(0).and_then(|polygon| polygon.get(0)),
        other => {
            return Err(AoiError::invalid_geometry(format!(
                "unsupported outline type {}",
                other
            )));
        }
    }
    .and_then(Value::as_array)
    .ok_or_else(|| AoiError::invalid_geometry("outline has no exterior ring"))?;

    let mut points = ring
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let geometry = Geometry::Polygon(points);
    geometry.validate()?;
    Ok(geometry)
}

fn parse_position(position: &Value) -> Result<Coordinate, AoiError> {
    let pair = position.as_array().filter(|p| p.len() >= 2);
    let (Some(lng), Some(lat)) = (
        pair.and_then(|p| p[0].as_f64()),
        pair.and_then(|p| p[1].as_f64()),
    ) else {
        return Err(AoiError::invalid_geometry(format!(
            "invalid GeoJSON position {}",
            position
        )));
    };
    Coordinate::try_new(lat, lng)
}
