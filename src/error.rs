//! Error types for the snowmap application.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the application.

use thiserror::Error;

/// The main error type for snowmap operations.
#[derive(Error, Debug)]
pub enum SnowmapError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// GeoJSON parsing errors
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Legend/image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Convenience type alias for Results with SnowmapError
pub type Result<T> = std::result::Result<T, SnowmapError>;
