//! Application configuration structures

use locale_shim_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// Where locale resources are published and which ones to load
    #[validate]
    pub assets: AssetsConfig,

    /// HTTP fetching behaviour
    #[validate]
    pub http: HttpConfig,

    /// Fluent bundle options
    pub bundle: BundleConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Locale asset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AssetsConfig {
    /// Public asset base path: an http(s) URL or a local directory.
    /// Resources are read from `<public_base_path>/locale/<code>.ftl`.
    #[validate(custom(function = "crate::validation::validate_base_path", message = "Base path must be a directory or a valid http(s) URL"))]
    pub public_base_path: String,

    /// Locale codes to load, in negotiation order
    #[validate(
        length(min = 1, message = "At least one locale is required"),
        custom(function = "crate::validation::validate_locales")
    )]
    pub locales: Vec<String>,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_secs: u64,

    /// Idle connections kept per host
    #[validate(range(min = 1, max = 100, message = "Pool size must be between 1 and 100"))]
    pub max_idle_per_host: u32,

    /// Retries for transient failures (5xx, timeouts, connect errors)
    #[validate(range(max = 10, message = "Max retries cannot exceed 10"))]
    pub max_retries: u32,
}

/// Fluent bundle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Wrap placeables in Unicode isolation marks
    pub use_isolating: bool,
}

impl Settings {
    /// Validate every section
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }

    /// Whether resources are fetched over HTTP rather than read from disk
    pub fn is_remote(&self) -> bool {
        let base = self.assets.public_base_path.as_str();
        base.starts_with("http://") || base.starts_with("https://")
    }
}
