//! Error types for galactic.
//!
//! Generation and orbit propagation never fail: numeric degeneracies are
//! clamped where they occur. The errors here cover the fallible edges of the
//! crate, namely loading configuration files and exporting generated data.

use std::fmt;

/// Errors that can occur while validating or loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A numeric field is outside its valid range.
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable description of the constraint.
        reason: &'static str,
    },
    /// Failed to parse a JSON configuration.
    Parse(serde_json::Error),
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidField { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::InvalidField { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Errors that can occur when exporting generated data for a renderer.
#[derive(Debug)]
pub enum ExportError {
    /// Failed to encode a gradient image.
    Image(image::ImageError),
    /// Failed to serialize a snapshot.
    Json(serde_json::Error),
    /// Failed to write output to disk.
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Image(e) => write!(f, "Failed to encode texture: {}", e),
            ExportError::Json(e) => write!(f, "Failed to serialize snapshot: {}", e),
            ExportError::Io(e) => write!(f, "Failed to write export: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Image(e) => Some(e),
            ExportError::Json(e) => Some(e),
            ExportError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}
