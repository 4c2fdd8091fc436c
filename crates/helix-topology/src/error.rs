//! Error types for helix-topology.

use thiserror::Error;

use crate::NodeId;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the topology service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A caller-supplied value is outside the domain (e.g. a negative id).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced node is not part of the topology.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node has already joined.
    #[error("node {0} already joined")]
    DuplicateNode(NodeId),

    /// A configuration value could not be parsed.
    #[error("invalid config {key}={value}")]
    InvalidConfig { key: &'static str, value: String },
}
