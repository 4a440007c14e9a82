//! Error types for the travel logistics engine.

use crate::logistics::{TransportMode, TripCategory};
use thiserror::Error;

/// Errors surfaced by the library API.
///
/// Geocoding problems never appear here: the resolver degrades
/// them to missing coordinates instead of failing the request.
#[derive(Debug, Error)]
pub enum TravelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A (category, mode) pair the classifier never produces.
    #[error("{mode} is not a valid transport mode for a {category} trip")]
    IncompatibleMode {
        category: TripCategory,
        mode: TransportMode,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TravelError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}
