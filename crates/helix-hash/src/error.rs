//! Error types for helix-hash.

use thiserror::Error;

/// Result type for hashing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input was not exactly one digest long.
    #[error("invalid input: expected {expected} bytes, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    /// Input was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The process-wide seed was already installed.
    #[error("sierpinski seed already installed")]
    SeedAlreadyInstalled,

    /// A configuration value could not be parsed.
    #[error("invalid config {key}={value}")]
    InvalidConfig { key: &'static str, value: String },
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHex(e.to_string())
    }
}
