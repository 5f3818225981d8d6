//! Match configuration.
//!
//! Built in code with the `with_*` methods or loaded from TOML:
//!
//! ```toml
//! turn_timeout_ticks = 15
//! tick_millis = 1000
//! max_consecutive_sixes = 3
//! seed = 42
//! bot_delay_millis = 1000
//! ```
//!
//! Missing keys fall back to [`MatchConfig::default`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Rules and pacing parameters for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Countdown per await-roll / await-move phase, in ticks.
    pub turn_timeout_ticks: u32,

    /// Wall-clock length of one tick for the async runtime.
    pub tick_millis: u64,

    /// Sixes in a row that force the turn to pass.
    pub max_consecutive_sixes: u8,

    /// Seed for the dice RNG. Same seed and same commands replay the match.
    pub seed: u64,

    /// Delay before a bot acts. Presentation only; the bot's command is an
    /// ordinary command once submitted.
    pub bot_delay_millis: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            turn_timeout_ticks: 15,
            tick_millis: 1000,
            max_consecutive_sixes: 3,
            seed: 42,
            bot_delay_millis: 1000,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would stall or short-circuit a match. Builders do
    /// not validate; `from_toml_str` and `runtime::spawn_match` do.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_timeout_ticks == 0 {
            return Err(ConfigError::Invalid("turn_timeout_ticks must be positive"));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::Invalid("tick_millis must be positive"));
        }
        if self.max_consecutive_sixes == 0 {
            return Err(ConfigError::Invalid("max_consecutive_sixes must be at least 1"));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_turn_timeout(mut self, ticks: u32) -> Self {
        self.turn_timeout_ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_tick_millis(mut self, millis: u64) -> Self {
        self.tick_millis = millis;
        self
    }

    #[must_use]
    pub fn with_bot_delay(mut self, millis: u64) -> Self {
        self.bot_delay_millis = millis;
        self
    }

    /// Wall-clock length of a full turn countdown.
    #[must_use]
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_millis(self.tick_millis.saturating_mul(u64::from(self.turn_timeout_ticks)))
    }

    #[must_use]
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_millis)
    }
}
