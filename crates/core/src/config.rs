//! Runtime configuration.
//!
//! Values come from `BLOCKFALL_*` environment variables with defaults matching
//! the classic timings. Unlike a silent fallback, a value that is present but
//! malformed is reported as an error.

use thiserror::Error;

use crate::types::{HORIZONTAL_REPEAT_MS, SOFT_DROP_REPEAT_MS, TICK_MS};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";
pub const ENV_REPEAT_MS: &str = "BLOCKFALL_REPEAT_MS";
pub const ENV_SOFT_DROP_MS: &str = "BLOCKFALL_SOFT_DROP_MS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the uniform piece source
    pub seed: u32,
    /// Driver frame interval
    pub tick_ms: u32,
    /// Minimum spacing of held left/right steps
    pub horizontal_repeat_ms: u32,
    /// Minimum spacing of held soft-drop steps
    pub soft_drop_repeat_ms: u32,
    /// Where binaries write `tracing` output, if anywhere
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_ms: TICK_MS,
            horizontal_repeat_ms: HORIZONTAL_REPEAT_MS,
            soft_drop_repeat_ms: SOFT_DROP_REPEAT_MS,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value lookup, falling back to defaults for absent keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = parse_u32(&lookup, ENV_SEED)?.unwrap_or(defaults.seed);
        let tick_ms = parse_u32(&lookup, ENV_TICK_MS)?.unwrap_or(defaults.tick_ms);
        if tick_ms == 0 {
            return Err(ConfigError::Zero { key: ENV_TICK_MS });
        }
        let horizontal_repeat_ms =
            parse_u32(&lookup, ENV_REPEAT_MS)?.unwrap_or(defaults.horizontal_repeat_ms);
        let soft_drop_repeat_ms =
            parse_u32(&lookup, ENV_SOFT_DROP_MS)?.unwrap_or(defaults.soft_drop_repeat_ms);

        let log_path = lookup(ENV_LOG_PATH)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            seed,
            tick_ms,
            horizontal_repeat_ms,
            soft_drop_repeat_ms,
            log_path,
        })
    }
}

fn parse_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u32>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = GameConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.horizontal_repeat_ms, 100);
        assert_eq!(config.soft_drop_repeat_ms, 50);
    }

    #[test]
    fn values_override_defaults() {
        let config = GameConfig::from_lookup(lookup_from(&[
            (ENV_SEED, "42"),
            (ENV_TICK_MS, " 10 "),
            (ENV_REPEAT_MS, "120"),
            (ENV_LOG_PATH, "/tmp/blockfall.log"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_ms, 10);
        assert_eq!(config.horizontal_repeat_ms, 120);
        assert_eq!(config.soft_drop_repeat_ms, 50);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.log"));
    }

    #[test]
    fn blank_log_path_is_none() {
        let config = GameConfig::from_lookup(lookup_from(&[(ENV_LOG_PATH, "   ")])).unwrap();
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = GameConfig::from_lookup(lookup_from(&[(ENV_SEED, "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_SEED,
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn zero_tick_is_rejected() {
        let err = GameConfig::from_lookup(lookup_from(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { key: ENV_TICK_MS });
    }
}
