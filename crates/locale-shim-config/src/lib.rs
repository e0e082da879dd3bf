//! Configuration management for locale-shim
//!
//! Settings come from a YAML file (see [`ConfigLoader::load`]), are
//! overridden by environment variables, and are validated before use.

#![warn(clippy::all)]

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use defaults::DEFAULT_LOCALES;
pub use loader::{ConfigError, ConfigLoader, CONFIG_PATH_VAR};
pub use settings::{AssetsConfig, BundleConfig, HttpConfig, Settings};
