//! Application-wide error types using thiserror.

use locale_shim_common::ShimError;
use locale_shim_config::ConfigError;
use locale_shim_i18n::L10nError;
use std::sync::Arc;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Localization failed to load or format.
    #[error("Localization error: {0}")]
    Localization(Arc<L10nError>),

    /// Shared infrastructure error (logging setup, I/O).
    #[error(transparent)]
    Shim(#[from] ShimError),

    /// The provider was used outside a tokio runtime.
    #[error("No tokio runtime available: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

impl From<L10nError> for AppError {
    fn from(err: L10nError) -> Self {
        Self::Localization(Arc::new(err))
    }
}

impl From<Arc<L10nError>> for AppError {
    fn from(err: Arc<L10nError>) -> Self {
        Self::Localization(err)
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
