//! Configuration loading and typed config structures for the feed.
//!
//! The canonical configuration lives in `signalgrid-config.yaml` at the
//! project root. Every field has a default matching the documented feed
//! behavior (3-second tick, 256-message broadcast buffer), so a missing
//! file or a partial file is always usable.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level feed configuration.
///
/// Mirrors the structure of `signalgrid-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// World-level settings (name, drift seed, tick timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Broadcast channel settings.
    #[serde(default)]
    pub channel: ChannelConfig,
}

impl FeedConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if it is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yml::from_str(&contents)?;
        Ok(config)
    }
}

/// World-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Display name for the simulated network.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for the drift RNG. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Interval between drift ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Broadcast channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelConfig {
    /// Capacity of the snapshot broadcast channel.
    ///
    /// A subscriber that falls more than this many snapshots behind
    /// skips ahead to the newest one.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

fn default_world_name() -> String {
    String::from("nairobi-cbd")
}

const fn default_tick_interval_ms() -> u64 {
    3_000
}

const fn default_broadcast_capacity() -> usize {
    256
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_behavior() {
        let config = FeedConfig::default();
        assert_eq!(config.world.tick_interval_ms, 3_000);
        assert_eq!(config.world.seed, None);
        assert_eq!(config.channel.broadcast_capacity, 256);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: FeedConfig = serde_yml::from_str("world:\n  seed: 42\n").unwrap();
        assert_eq!(config.world.seed, Some(42));
        assert_eq!(config.world.tick_interval_ms, 3_000);
        assert_eq!(config.channel.broadcast_capacity, 256);
    }

    #[test]
    fn full_yaml_overrides_everything() {
        let yaml = "world:\n  name: test-grid\n  seed: 7\n  tick_interval_ms: 250\nchannel:\n  broadcast_capacity: 8\n";
        let config: FeedConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.world.name, "test-grid");
        assert_eq!(config.world.tick_interval_ms, 250);
        assert_eq!(config.channel.broadcast_capacity, 8);
    }
}
