//! AOI Sketch - Area of Interest drawing and editing core
//!
//! Map-agnostic state machines for drawing points, polygons and rectangles on
//! a map, editing their vertices, and persisting them with geodesic areas.

pub mod color_utils;
pub mod config;
pub mod editor;
pub mod error;
pub mod geo_math;
pub mod geojson;
pub mod model;
pub mod rate_limit;
pub mod session;
pub mod store;

pub use config::{AppConfig, ConfigError, LogLevel};
pub use editor::{AoiEditor, FeatureClick};
pub use error::{AoiError, PersistenceError};
pub use geo_math::{Bounds, format_area, polygon_area};
pub use model::{AoiFeature, Coordinate, FeatureId, FeatureKind, FeaturePatch, Geometry};
pub use session::{DrawingMode, DrawingSession, EditSession};
pub use store::FeatureStore;
