//! Error types for helix-consensus.

use thiserror::Error;

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while scoring a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Metrics violate the calculator's domain (division by zero, log of zero,
    /// or a clock that did not advance).
    #[error("invalid metrics: {reason}")]
    InvalidMetrics { reason: &'static str },

    /// A pattern set was empty.
    #[error(transparent)]
    Pattern(#[from] helix_pattern::Error),
}
