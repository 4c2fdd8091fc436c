//! Hashing configuration.

use crate::error::{Error, Result};

/// Runtime hashing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    /// Transform levels applied per block hash
    pub fractal_level: u32,
    /// Leading zero bytes required by proof-of-work
    pub pow_difficulty: u32,
    /// Upper bound on the nonce search
    pub max_nonce: u64,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            fractal_level: 3,
            pow_difficulty: 1,
            max_nonce: 1_000_000,
        }
    }
}

impl HashConfig {
    /// Defaults overridden by `HELIX_FRACTAL_LEVEL`, `HELIX_POW_DIFFICULTY`
    /// and `HELIX_MAX_NONCE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HashConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            fractal_level: parse_or(&lookup, "HELIX_FRACTAL_LEVEL", defaults.fractal_level)?,
            pow_difficulty: parse_or(&lookup, "HELIX_POW_DIFFICULTY", defaults.pow_difficulty)?,
            max_nonce: parse_or(&lookup, "HELIX_MAX_NONCE", defaults.max_nonce)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = HashConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, HashConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = HashConfig::from_lookup(|key| match key {
            "HELIX_FRACTAL_LEVEL" => Some("7".into()),
            "HELIX_MAX_NONCE" => Some(" 42 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.fractal_level, 7);
        assert_eq!(config.pow_difficulty, 1);
        assert_eq!(config.max_nonce, 42);
    }

    #[test]
    fn bad_value_is_an_error() {
        let err = HashConfig::from_lookup(|key| {
            (key == "HELIX_POW_DIFFICULTY").then(|| "lots".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfig { key: "HELIX_POW_DIFFICULTY", value: "lots".into() }
        );
    }
}
