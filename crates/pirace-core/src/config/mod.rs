//! Race configuration
//!
//! Stored as YAML; every field has a default so partial files load fine.
//!
//! ```yaml
//! digit_target: 6
//! tick_ms: 10
//! yield_policy:
//!   every: 1000
//!   sleep_us: 0
//! display:
//!   refresh_ms: 100
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pirace_core::config::{default_config_path, load_config, RaceConfig};
//!
//! let config: RaceConfig = load_config(&default_config_path()).sanitized();
//! ```

mod io;
mod paths;

pub use io::{load_config, save_config};
pub use paths::default_config_path;

use crate::producer::YieldPolicy;
use crate::types::{DEFAULT_DIGIT_TARGET, MAX_DIGIT_TARGET, MIN_DIGIT_TARGET};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controller tick period bounds in milliseconds
pub const MIN_TICK_MS: u64 = 1;
pub const MAX_TICK_MS: u64 = 100;
pub const DEFAULT_TICK_MS: u64 = 10;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Initial digit target (1-10)
    pub digit_target: u32,
    /// Controller tick period in milliseconds
    pub tick_ms: u64,
    /// Producer yield cadence
    pub yield_policy: YieldPolicy,
    /// Display settings
    pub display: DisplayConfig,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            digit_target: DEFAULT_DIGIT_TARGET,
            tick_ms: DEFAULT_TICK_MS,
            yield_policy: YieldPolicy::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl RaceConfig {
    /// Clamp every field into its accepted range
    pub fn sanitized(mut self) -> Self {
        self.digit_target = self.digit_target.clamp(MIN_DIGIT_TARGET, MAX_DIGIT_TARGET);
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        self.yield_policy.every = self.yield_policy.every.max(1);
        self.display.refresh_ms = self.display.refresh_ms.max(self.tick_ms);
        self
    }

    /// Controller tick period
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Display configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minimum time between terminal redraws in milliseconds
    pub refresh_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { refresh_ms: 100 }
    }
}

impl DisplayConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: RaceConfig = serde_yaml::from_str("digit_target: 8\n").unwrap();
        assert_eq!(config.digit_target, 8);
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(config.yield_policy, YieldPolicy::default());
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let config = RaceConfig {
            digit_target: 25,
            tick_ms: 0,
            yield_policy: YieldPolicy { every: 0, sleep_us: 5 },
            display: DisplayConfig { refresh_ms: 0 },
        }
        .sanitized();

        assert_eq!(config.digit_target, MAX_DIGIT_TARGET);
        assert_eq!(config.tick_ms, MIN_TICK_MS);
        assert_eq!(config.yield_policy.every, 1);
        assert_eq!(config.display.refresh_ms, MIN_TICK_MS);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = RaceConfig {
            digit_target: 4,
            tick_ms: 5,
            ..Default::default()
        };
        save_config(&config, &path).unwrap();

        let loaded: RaceConfig = load_config(&path);
        assert_eq!(loaded, config);
    }
}
