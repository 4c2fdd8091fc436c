//! Proof-of-work difficulty retargeting from observed block times.

use crate::smart_rate::TARGET_BLOCK_TIME;

/// Largest factor a single retarget may move difficulty, either way.
pub const MAX_ADJUSTMENT_FACTOR: f64 = 4.0;

/// Block-time samples per retarget.
pub const DEFAULT_ADJUSTMENT_INTERVAL: u64 = 2016;

/// Scales difficulty by expected over actual elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyAdjuster {
    /// Seconds per block the network aims for
    pub target_block_time: u64,
    /// Samples required before difficulty moves
    pub adjustment_interval: u64,
}

impl Default for DifficultyAdjuster {
    fn default() -> Self {
        Self::new(TARGET_BLOCK_TIME as u64, DEFAULT_ADJUSTMENT_INTERVAL)
    }
}

impl DifficultyAdjuster {
    /// An interval of zero is treated as one.
    pub const fn new(target_block_time: u64, adjustment_interval: u64) -> Self {
        Self {
            target_block_time,
            adjustment_interval: if adjustment_interval == 0 { 1 } else { adjustment_interval },
        }
    }

    /// Next difficulty given per-block times in seconds, oldest first.
    ///
    /// Below `adjustment_interval` samples the difficulty is returned
    /// unchanged. Otherwise the latest `adjustment_interval` samples are
    /// compared against the target, the factor is clamped to
    /// `[1/4, 4]`, and the result never drops below 1.
    pub fn calculate_new_difficulty(&self, current: u64, block_times: &[u64]) -> u64 {
        let interval = self.adjustment_interval;
        if (block_times.len() as u64) < interval {
            return current;
        }

        let window = &block_times[block_times.len() - interval as usize..];
        let expected = self.target_block_time.saturating_mul(interval) as f64;
        let actual = window.iter().fold(0u64, |acc, &t| acc.saturating_add(t)) as f64;

        // actual == 0 gives +inf, which the clamp turns into the maximum raise
        let factor = (expected / actual).clamp(1.0 / MAX_ADJUSTMENT_FACTOR, MAX_ADJUSTMENT_FACTOR);
        let next = ((current as f64 * factor).round() as u64).max(1);

        tracing::debug!(current, next, factor, "difficulty retargeted");
        next
    }

    /// Whether a block time is plausible: positive and under ten targets.
    pub fn validate_block_time(&self, block_time: u64) -> bool {
        block_time > 0 && block_time < self.target_block_time.saturating_mul(10)
    }
}
