//! Error types for geovec

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeovecError {
    // Argument errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // Collaborator errors
    #[error("Reprojection from {from} to {to} failed: {reason}")]
    Projection { from: String, to: String, reason: String },

    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Operation '{operation}' is not supported for {geometry_type} geometries")]
    UnsupportedOperation { operation: String, geometry_type: String },

    // Format errors
    #[error("Invalid GeoJSON: {reason}")]
    InvalidGeoJson { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeovecError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        GeovecError::InvalidArgument { reason: reason.into() }
    }
}

impl From<std::convert::Infallible> for GeovecError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, GeovecError>;
