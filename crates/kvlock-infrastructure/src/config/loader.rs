//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use kvlock_domain::constants::{KEY_SEPARATOR, LOCK_MAX_WAIT_MS, LOCK_MIN_TTL_MS};
use kvlock_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

use super::StoreProvider;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix, nested with `__`
    ///    (e.g., `KVLOCK_STORE__URI`)
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) => {
                if !config_path.exists() {
                    log_config_loaded(config_path, false);
                    return Err(Error::configuration(format!(
                        "Configuration file not found: {}",
                        config_path.display()
                    )));
                }
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_namespace_config(config)?;
    validate_store_config(config)?;
    validate_lock_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_namespace_part(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::configuration(format!("namespace.{field} cannot be empty")));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(Error::configuration(format!(
            "namespace.{field} cannot contain '{KEY_SEPARATOR}': {value}"
        )));
    }
    Ok(())
}

fn validate_namespace_config(config: &AppConfig) -> Result<()> {
    validate_namespace_part("environment", &config.namespace.environment)?;
    validate_namespace_part("application_name", &config.namespace.application_name)
}

fn validate_store_config(config: &AppConfig) -> Result<()> {
    if config.store.provider == StoreProvider::Redis && config.store.uri.trim().is_empty() {
        return Err(Error::configuration(
            "store.uri is required when the redis provider is selected",
        ));
    }
    if config.store.connection_timeout_ms == 0 || config.store.response_timeout_ms == 0 {
        return Err(Error::configuration(
            "store.connection_timeout_ms and store.response_timeout_ms must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_lock_config(config: &AppConfig) -> Result<()> {
    let timeout = config.lock.default_timeout_ms;
    if timeout == 0 || timeout > LOCK_MAX_WAIT_MS {
        return Err(Error::configuration(format!(
            "lock.default_timeout_ms must be in (0, {LOCK_MAX_WAIT_MS}], got {timeout}"
        )));
    }
    if config.lock.default_ttl_ms < LOCK_MIN_TTL_MS {
        return Err(Error::configuration(format!(
            "lock.default_ttl_ms must be at least {LOCK_MIN_TTL_MS}, got {}",
            config.lock.default_ttl_ms
        )));
    }
    Ok(())
}
