//! Smart Rate Consensus Scoring
//!
//! Converts block and network counters into a single contribution score used
//! to weight mining rewards and rank competing block candidates.
//!
//! # Smart Rate
//!
//! Four sub-metrics are computed from [`BlockMetrics`]:
//!
//! | Metric | Meaning | Normaliser |
//! |--------|---------|------------|
//! | VER | vortex energy rate | 5000 |
//! | FCS | fractal contribution score | 100 |
//! | MEI | mathematical efficiency index | 100 |
//! | NHF | network harmony factor | 100 |
//!
//! Each is clamped into `[0, 1]` and combined as a weighted geometric mean
//! with weights 0.35 / 0.25 / 0.25 / 0.15, then scaled by 1000 and the
//! per-height multiplier `[1.0, 1.2, 1.4, 1.8, 1.7, 1.5]`.
//!
//! # Determinism
//!
//! Every node must arrive at a bit-identical score for the same metrics. All
//! arithmetic is IEEE-754 `f64` in a fixed operation order, and the
//! calculator holds no mutable state.

mod difficulty;
mod error;
mod metrics;
mod ranking;
mod reward;
mod smart_rate;

pub use difficulty::{DifficultyAdjuster, DEFAULT_ADJUSTMENT_INTERVAL, MAX_ADJUSTMENT_FACTOR};
pub use error::{Error, Result};
pub use metrics::BlockMetrics;
pub use ranking::{rank_candidates, RankedCandidate};
pub use reward::{estimate_daily_reward, RewardDistribution, RewardSchedule, RewardTier};
pub use smart_rate::{SmartRateCalculator, SmartRateResult};

/// Score one candidate with the standard patterns.
pub fn smart_rate(metrics: &BlockMetrics) -> Result<SmartRateResult> {
    SmartRateCalculator::standard().compute(metrics)
}
