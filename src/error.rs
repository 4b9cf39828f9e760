//! Error types
//!
//! Only configuration can fail. A missing drawing surface is not an error:
//! it produces a disabled simulator instead.

use std::fmt;

/// A color string that is not `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected #RRGGBB", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// Rejected field configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Palette has no colors to sample from
    EmptyPalette,
    /// A range has min > max or a non-positive bound where one is required
    InvalidRange { field: &'static str, min: f32, max: f32 },
    /// A probability outside [0, 1]
    InvalidProbability { field: &'static str, value: f32 },
    /// A factor or distance that must be positive (or within bounds) is not
    InvalidValue { field: &'static str, value: f32 },
    /// Reference resolution is not strictly positive on both axes
    ZeroReferenceArea,
    /// JSON could not be parsed
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPalette => write!(f, "palette must contain at least one color"),
            ConfigError::InvalidRange { field, min, max } => {
                write!(f, "invalid range for {}: {}..{}", field, min, max)
            }
            ConfigError::InvalidProbability { field, value } => {
                write!(f, "{} must be within [0, 1], got {}", field, value)
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "invalid value for {}: {}", field, value)
            }
            ConfigError::ZeroReferenceArea => {
                write!(f, "reference resolution must have a positive width and height")
            }
            ConfigError::Json(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
