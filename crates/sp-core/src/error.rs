//! Error type for coordinate construction and parsing.
//!
//! The graph store and the search engine define their own error enums
//! (`GraphError`, `SearchError`); this one only covers values built by the
//! caller layer from user-supplied text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate ({lat}, {lon}) is outside the valid latitude/longitude range")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("parse error: {0}")]
    Parse(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
