//! Node identifiers.

use crate::error::{Error, Result};

/// A network node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<NodeId> for u64 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Ids from signed sources (JSON, FFI) are rejected when negative.
impl TryFrom<i64> for NodeId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| Error::InvalidInput(format!("negative node id {value}")))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_conversion() {
        assert_eq!(NodeId::try_from(0i64), Ok(NodeId(0)));
        assert_eq!(NodeId::try_from(i64::MAX), Ok(NodeId(i64::MAX as u64)));
        assert!(matches!(NodeId::try_from(-1i64), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn ordering_follows_value() {
        assert!(NodeId(3) < NodeId(10));
        assert_eq!(u64::from(NodeId::new(7)), 7);
        assert_eq!(NodeId::from(7).to_string(), "7");
    }
}
