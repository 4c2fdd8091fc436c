//! CLI configuration, assembled from the library configs.

use helix_hash::HashConfig;
use helix_topology::TopologyConfig;

use crate::error::{Error, Result};

/// Genesis timestamp of the network, 2022-01-01T00:00:00Z.
pub const DEFAULT_GENESIS_TIME: u64 = 1_640_995_200;

/// Default log directive when `HELIX_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "helix=info,warn";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub hash: HashConfig,
    pub topology: TopologyConfig,
    /// Used by `smart-rate` when no genesis time is given
    pub genesis_time: u64,
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            hash: HashConfig::default(),
            topology: TopologyConfig::default(),
            genesis_time: DEFAULT_GENESIS_TIME,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let genesis_time = match lookup("HELIX_GENESIS_TIME") {
            None => DEFAULT_GENESIS_TIME,
            Some(value) => value.trim().parse().map_err(|_| Error::Config {
                key: "HELIX_GENESIS_TIME",
                value,
            })?,
        };

        Ok(Self {
            hash: HashConfig::from_lookup(&lookup)?,
            topology: TopologyConfig::from_lookup(&lookup)?,
            genesis_time,
            log_filter: lookup(helix_logging::LOG_ENV)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_topology::LinkPolicy;

    #[test]
    fn defaults() {
        let config = CliConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.genesis_time, 1_640_995_200);
    }

    #[test]
    fn collects_every_layer() {
        let config = CliConfig::from_lookup(|key| match key {
            "HELIX_GENESIS_TIME" => Some("100".into()),
            "HELIX_FRACTAL_LEVEL" => Some("5".into()),
            "HELIX_LINK_RADIUS" => Some("manual".into()),
            "HELIX_LOG" => Some("debug".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.genesis_time, 100);
        assert_eq!(config.hash.fractal_level, 5);
        assert_eq!(config.topology.link_policy, LinkPolicy::Manual);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn bad_layer_value_surfaces() {
        let err = CliConfig::from_lookup(|key| (key == "HELIX_MAX_NONCE").then(|| "-3".into()));
        assert!(matches!(err, Err(Error::Hash(helix_hash::Error::InvalidConfig { .. }))));

        let err = CliConfig::from_lookup(|key| (key == "HELIX_GENESIS_TIME").then(|| "soon".into()));
        assert!(matches!(err, Err(Error::Config { key: "HELIX_GENESIS_TIME", .. })));
    }
}
