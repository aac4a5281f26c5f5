//! Data models for AOI features.

mod coordinate;
mod feature;

pub use coordinate::Coordinate;
pub use feature::{
    AoiFeature, FeatureId, FeatureKind, FeaturePatch, Geometry, MIN_POLYGON_VERTICES,
    RECTANGLE_CORNERS,
};
