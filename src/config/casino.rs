//! Casino configuration loading from config.toml
//!
//! Table limits and the finished-session reap delay live in a TOML file so
//! operators can tune them without recompiling. Every field has a default,
//! and a missing config file falls back to defaults entirely.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Casino settings from config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct CasinoConfig {
    /// Smallest accepted blackjack bet
    #[serde(default = "default_min_bet")]
    pub min_bet: i64,
    /// Largest accepted blackjack bet
    #[serde(default = "default_max_bet")]
    pub max_bet: i64,
    /// How long a finished game stays on the table before reaping, seconds
    #[serde(default = "default_reap_delay_secs")]
    pub reap_delay_secs: u64,
}

const fn default_min_bet() -> i64 {
    5_000
}

const fn default_max_bet() -> i64 {
    500_000
}

const fn default_reap_delay_secs() -> u64 {
    120
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            min_bet: default_min_bet(),
            max_bet: default_max_bet(),
            reap_delay_secs: default_reap_delay_secs(),
        }
    }
}

impl CasinoConfig {
    /// The reap delay as a [`Duration`].
    #[must_use]
    pub const fn reap_delay(&self) -> Duration {
        Duration::from_secs(self.reap_delay_secs)
    }
}

/// Loads casino configuration from a TOML file
///
/// # Errors
/// Returns an error if the file exists but cannot be read, the TOML syntax
/// is invalid, or a field has the wrong type.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CasinoConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads casino configuration from the default location (./config.toml),
/// falling back to defaults when the file does not exist.
pub fn load_default_config() -> Result<CasinoConfig> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        tracing::info!("No config.toml found, using default casino settings");
        Ok(CasinoConfig::default())
    }
}
