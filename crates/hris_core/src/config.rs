//! Layered configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `<config_dir>/hris/config.toml`
//! 3. An explicit config file (`--config`)
//! 4. Environment variables prefixed `HRIS_`, with `__` separating sections
//!    (`HRIS_BACKEND__SESSION_TTL_SECS` -> `backend.session_ttl_secs`)

use crate::logging::{default_log_level, normalize_level};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "hris";
const ENV_PREFIX: &str = "HRIS_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),
    #[error("config file `{0}` does not exist")]
    MissingFile(PathBuf),
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    pub database_path: PathBuf,
    pub session_ttl_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_path: data_dir().join("hris.sqlite3"),
            session_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: data_dir().join("logs"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HrisConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HrisConfig {
    /// Loads and validates configuration from every source.
    ///
    /// # Errors
    /// - [`ConfigError::MissingFile`] when `explicit` is given but absent.
    /// - [`ConfigError::Figment`] on malformed files or mistyped values.
    /// - [`ConfigError::InvalidValue`] when a loaded value is out of range.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Provider chain used by [`HrisConfig::load`].
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "backend.database_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.backend.session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.session_ttl_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        normalize_level(&self.logging.level).map_err(|reason| ConfigError::InvalidValue {
            field: "logging.level",
            reason,
        })?;
        Ok(())
    }
}

/// Path of the user-level config file.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HrisConfig};

    #[test]
    fn defaults_validate() {
        let config = HrisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.session_ttl_secs, 3600);
        assert!(config.backend.database_path.ends_with("hris/hris.sqlite3"));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = HrisConfig::default();
        config.backend.session_ttl_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "backend.session_ttl_secs",
                ..
            })
        ));
    }
}
