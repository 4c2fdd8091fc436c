//! Error types for helix-pattern.

use thiserror::Error;

/// Result type for pattern lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the pattern engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A pattern set must contain at least one weight.
    #[error("configuration error: pattern set is empty")]
    Configuration,
}
