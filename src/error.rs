//! Error types for AOI operations.

use thiserror::Error;

/// Errors reported to the caller of a feature store or session operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AoiError {
    /// Geometry violates the cardinality or coordinate contract for its kind
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of the violation
        message: String,
    },
}

impl AoiError {
    /// Create an invalid geometry error with a message.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }
}

/// Errors raised by blob store backends.
///
/// The feature store logs these and carries on with its in-memory state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    Storage(String),
}
