//! Configuration loading utilities

use crate::Settings;
use locale_shim_common::ShimError;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Explicit configuration file path
pub const CONFIG_PATH_VAR: &str = "LOCALE_SHIM_CONFIG";

/// Files looked up in the working directory when no path is given
const DEFAULT_CONFIG_FILES: [&str; 2] = ["locale-shim.yaml", "locale-shim.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for ShimError {
    fn from(err: ConfigError) -> Self {
        ShimError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a YAML file, apply environment overrides, and validate
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Self::load_from_file_with(path, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::load_from_file`] with a custom variable lookup
    pub fn load_from_file_with<P, F>(path: P, lookup: F) -> Result<Settings, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        debug!("Read configuration from {}", path.display());
        Self::finish(settings, lookup)
    }

    /// Parse YAML text, apply overrides from `lookup`, and validate
    pub fn load_from_str_with<F>(content: &str, lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings: Settings = serde_yaml::from_str(content)?;
        Self::finish(settings, lookup)
    }

    /// Load configuration from `LOCALE_SHIM_CONFIG`, a default file in the
    /// working directory, or built-in defaults, then apply environment overrides.
    pub fn load() -> Result<Settings, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_from_file(path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().find(|file| Path::new(file).exists()) {
            return Self::load_from_file(path);
        }

        info!("No configuration file found, using defaults");
        Self::finish(Settings::default(), |var| env::var(var).ok())
    }

    fn finish<F>(mut settings: Settings, lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_env_overrides(&mut settings, lookup)?;
        settings.validate_all()?;
        Ok(settings)
    }

    /// Apply environment variable overrides read through `lookup`
    pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("PUBLIC_URL") {
            settings.assets.public_base_path = base;
        }

        if let Some(locales) = lookup("LOCALE_SHIM_LOCALES") {
            settings.assets.locales = locales
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(timeout) = lookup("LOCALE_SHIM_HTTP_TIMEOUT") {
            settings.http.timeout_secs = timeout.parse().map_err(|e| ConfigError::EnvParse {
                var: "LOCALE_SHIM_HTTP_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(retries) = lookup("LOCALE_SHIM_HTTP_RETRIES") {
            settings.http.max_retries = retries.parse().map_err(|e| ConfigError::EnvParse {
                var: "LOCALE_SHIM_HTTP_RETRIES".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(level) = lookup("LOCALE_SHIM_LOG_LEVEL") {
            settings.logging.level = level;
        }

        Ok(())
    }
}
