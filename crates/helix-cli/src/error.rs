//! Error types for the helix CLI.

use thiserror::Error;

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing arguments.
    #[error("{0}")]
    Usage(String),

    #[error("invalid config {key}={value}")]
    Config { key: &'static str, value: String },

    #[error(transparent)]
    Consensus(#[from] helix_consensus::Error),

    #[error(transparent)]
    Hash(#[from] helix_hash::Error),

    #[error(transparent)]
    Topology(#[from] helix_topology::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }
}
