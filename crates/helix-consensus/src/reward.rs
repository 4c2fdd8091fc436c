//! Reward weighting and the halving schedule.
//!
//! Rewards are stored as integer hundredths of a coin, so the initial
//! 6.25-coin block reward is `625`.

/// Daily reward per unit of smart rate before tiering.
pub const BASE_REWARD_PER_UNIT: f64 = 600.0;

/// Reward tier selected by a smart rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardTier {
    /// smart rate ≤ 50
    Reduced,
    /// 50 < smart rate ≤ 100
    Standard,
    /// smart rate > 100
    Bonus,
}

impl RewardTier {
    pub fn for_smart_rate(smart_rate: f64) -> Self {
        if smart_rate > 100.0 {
            RewardTier::Bonus
        } else if smart_rate > 50.0 {
            RewardTier::Standard
        } else {
            RewardTier::Reduced
        }
    }

    pub const fn multiplier(&self) -> f64 {
        match self {
            RewardTier::Reduced => 0.8,
            RewardTier::Standard => 1.0,
            RewardTier::Bonus => 1.2,
        }
    }
}

/// Expected daily reward for a sustained smart rate.
pub fn estimate_daily_reward(smart_rate: f64) -> f64 {
    smart_rate * BASE_REWARD_PER_UNIT * RewardTier::for_smart_rate(smart_rate).multiplier()
}

/// Split of one block's reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardDistribution {
    pub miner_reward: u128,
    pub ecosystem_reward: u128,
    pub total_reward: u128,
    pub halving_epoch: u32,
    pub blocks_until_halving: u64,
}

/// Halving block reward schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSchedule {
    /// Reward of the first epoch
    pub initial_reward: u64,
    /// Blocks per epoch (two years of 5-second blocks)
    pub halving_interval: u64,
    /// Epochs after which issuance stops
    pub max_halvings: u32,
    /// Percentage of every reward set aside for the ecosystem
    pub ecosystem_percentage: u8,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            initial_reward: 625,
            halving_interval: 12_614_400,
            max_halvings: 32,
            ecosystem_percentage: 10,
        }
    }
}

impl RewardSchedule {
    fn epoch_reward(&self, epoch: u64) -> u128 {
        if epoch >= self.max_halvings as u64 || epoch >= u64::BITS as u64 {
            0
        } else {
            (self.initial_reward >> epoch) as u128
        }
    }

    /// Reward for the block at `height`.
    pub fn reward_at(&self, height: u64) -> RewardDistribution {
        let epoch = height / self.halving_interval.max(1);
        let halving_epoch = u32::try_from(epoch).unwrap_or(u32::MAX);

        if halving_epoch >= self.max_halvings {
            return RewardDistribution {
                miner_reward: 0,
                ecosystem_reward: 0,
                total_reward: 0,
                halving_epoch,
                blocks_until_halving: 0,
            };
        }

        let total_reward = self.epoch_reward(epoch);
        let ecosystem_reward = total_reward * self.ecosystem_percentage as u128 / 100;
        RewardDistribution {
            miner_reward: total_reward - ecosystem_reward,
            ecosystem_reward,
            total_reward,
            halving_epoch,
            blocks_until_halving: self.halving_interval - height % self.halving_interval.max(1),
        }
    }

    /// Total issued by blocks `1..=height`.
    pub fn total_issued_through(&self, height: u64) -> u128 {
        let interval = self.halving_interval.max(1);
        let mut total = 0u128;
        let mut epoch = 0u64;
        let mut remaining = height;
        while remaining > 0 && epoch < self.max_halvings as u64 {
            let blocks = remaining.min(interval);
            total += self.epoch_reward(epoch) * blocks as u128;
            remaining -= blocks;
            epoch += 1;
        }
        total
    }

    /// Everything the schedule will ever issue.
    pub fn max_supply(&self) -> u128 {
        (0..self.max_halvings as u64)
            .map(|epoch| self.epoch_reward(epoch) * self.halving_interval as u128)
            .sum()
    }
}
