//! Default values for every configuration section.

use crate::settings::*;
use locale_shim_common::LoggingConfig;

/// Locales loaded when nothing else is configured
pub use locale_shim_i18n::DEFAULT_LOCALES;

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets: AssetsConfig::default(),
            http: HttpConfig::default(),
            bundle: BundleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_base_path: String::new(),
            locales: DEFAULT_LOCALES.iter().map(|code| (*code).to_string()).collect(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_idle_per_host: 10,
            max_retries: 0,
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self { use_isolating: false }
    }
}
