//! Topology configuration.

use crate::error::{Error, Result};
use crate::links::LinkPolicy;

/// Runtime topology parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TopologyConfig {
    /// How `join` picks neighbours for a new node
    pub link_policy: LinkPolicy,
}

impl TopologyConfig {
    /// Defaults overridden by `HELIX_LINK_RADIUS`: a non-negative distance,
    /// or `manual` to disable automatic linking.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TopologyConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        const KEY: &str = "HELIX_LINK_RADIUS";

        let link_policy = match lookup(KEY) {
            None => LinkPolicy::default(),
            Some(value) => parse_policy(value.trim())
                .ok_or(Error::InvalidConfig { key: KEY, value })?,
        };
        Ok(Self { link_policy })
    }
}

fn parse_policy(value: &str) -> Option<LinkPolicy> {
    if value.eq_ignore_ascii_case("manual") {
        return Some(LinkPolicy::Manual);
    }
    let radius: f64 = value.parse().ok()?;
    (radius.is_finite() && radius >= 0.0).then_some(LinkPolicy::Proximity { radius })
}
