//! Error types for sattrack

use thiserror::Error;

/// Main error type for tracking operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Orbital element text could not be parsed
    #[error("Invalid element set: {0}")]
    Parse(String),

    /// The propagator broke down for the requested time
    #[error("Propagation failed at {minutes} min after epoch: {reason}")]
    Propagation { minutes: f64, reason: String },

    /// Inputs that leave a transform undefined (coincident points, non-finite values)
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The session has no satellite loaded
    #[error("No satellite loaded")]
    NotLoaded,

    /// Periodic tracking is already running
    #[error("Tracking already active")]
    AlreadyTracking,

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for tracking operations
pub type Result<T> = std::result::Result<T, Error>;
