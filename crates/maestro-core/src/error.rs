//! Error types for Maestro.

use thiserror::Error;

/// Error type for the file, configuration and parsing boundaries of the engine.
///
/// Editing decisions never produce this type; they return their own structured
/// outcomes (see `maestro_timeline::MoveError` and `EditError`).
#[derive(Error, Debug)]
pub enum MaestroError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timecode '{input}': {reason}")]
    InvalidTimecode { input: String, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Maestro operations.
pub type Result<T> = std::result::Result<T, MaestroError>;
