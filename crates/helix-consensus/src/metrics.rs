//! Per-candidate block counters.

use crate::error::{Error, Result};

/// Counters supplied by the block validation layer for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockMetrics {
    /// Block height (≥ 1)
    pub height: u64,
    /// Transactions observed so far
    pub tx_count: u64,
    /// Active nodes in the network (≥ 1)
    pub active_nodes: u64,
    /// Current timestamp in seconds
    pub current_time: u64,
    /// Genesis timestamp in seconds (< current_time)
    pub genesis_time: u64,
}

impl BlockMetrics {
    pub const fn new(
        height: u64,
        tx_count: u64,
        active_nodes: u64,
        current_time: u64,
        genesis_time: u64,
    ) -> Self {
        Self {
            height,
            tx_count,
            active_nodes,
            current_time,
            genesis_time,
        }
    }

    /// Reject inputs that would divide by zero or take log2(0).
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 {
            return Err(Error::InvalidMetrics { reason: "height must be at least 1" });
        }
        if self.active_nodes == 0 {
            return Err(Error::InvalidMetrics { reason: "active node count must be at least 1" });
        }
        if self.current_time <= self.genesis_time {
            return Err(Error::InvalidMetrics {
                reason: "current time must be after genesis time",
            });
        }
        Ok(())
    }

    /// Seconds elapsed since genesis. Only meaningful after [`BlockMetrics::validate`].
    pub const fn elapsed(&self) -> u64 {
        self.current_time.saturating_sub(self.genesis_time)
    }
}
