//! Error types for geotrie.

use thiserror::Error;

/// Coordinate axis named in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    /// Inclusive valid interval for this axis.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Axis::Longitude => (-180.0, 180.0),
            Axis::Latitude => (-90.0, 90.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Longitude => f.write_str("longitude"),
            Axis::Latitude => f.write_str("latitude"),
        }
    }
}

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoTrieError {
    /// A supplied code contains a symbol outside the alphabet, or a delete
    /// targets a code with no live entry.
    #[error("invalid hash: {0:?}")]
    InvalidHash(String),

    #[error("invalid geohash symbol: {0:?}")]
    InvalidSymbol(char),

    #[error("{axis} out of range [{}, {}]: {value}", .axis.bounds().0, .axis.bounds().1)]
    OutOfRange { axis: Axis, value: f64 },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GeoTrieError>;
