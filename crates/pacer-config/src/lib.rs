//! # pacer-config
//!
//! Layered configuration loading for Pacer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PACER_*` prefix, `__` as separator)
//! 2. Project-level `.pacer/config.toml`
//! 3. User-level `~/.config/pacer/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PACER_ORACLE__API_KEY` -> `oracle.api_key`,
//! `PACER_RANKING__CACHE_TTL_SECS` -> `ranking.cache_ttl_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use pacer_config::PacerConfig;
//!
//! let config = PacerConfig::load_with_dotenv().expect("config");
//!
//! if config.oracle.is_configured() {
//!     println!("Ranking with model {}", config.oracle.model);
//! }
//! ```

mod error;
mod general;
mod oracle;
mod ranking;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use oracle::OracleConfig;
pub use ranking::RankingConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PacerConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PacerConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse, and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory before building the figment.
    /// This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pacer/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PACER_").split("__"))
    }

    /// Reject values the rest of the system cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ranking.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ranking.cache_ttl_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.oracle.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "oracle.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.oracle.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "oracle.temperature".to_string(),
                reason: format!("{} is outside 0.0..=2.0", self.oracle.temperature),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pacer").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PacerConfig::default();
        assert!(!config.oracle.is_configured());
        assert_eq!(config.ranking.cache_ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = PacerConfig::figment();
        let config: PacerConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.ranking.min_active_tasks, 2);
        assert_eq!(config.general.default_limit, 50);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = PacerConfig::default();
        config.ranking.cache_ttl_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "ranking.cache_ttl_secs"
        ));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = PacerConfig::default();
        config.oracle.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}
