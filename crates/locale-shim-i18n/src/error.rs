//! Error types for localization operations

use locale_shim_common::ShimError;
use thiserror::Error;

/// Errors that can occur while loading or using localization resources
#[derive(Error, Debug)]
pub enum L10nError {
    /// A locale code is not a valid language identifier
    #[error("Invalid locale code: '{0}'")]
    InvalidLocale(String),

    /// The aggregate builder was asked for zero locales
    #[error("No locales requested")]
    NoLocales,

    /// Transport or HTTP failure retrieving a locale file
    #[error("Failed to fetch resource for locale '{locale}' from {url}{}", status_suffix(.status))]
    ResourceFetch {
        locale: String,
        url: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Fetched body is not valid Fluent syntax
    #[error("Failed to parse Fluent resource for locale '{locale}': {errors:?}")]
    ResourceParse { locale: String, errors: Vec<String> },

    /// The fetched resource holds no messages or terms
    #[error("FluentResource for locale '{locale}' not found")]
    MissingResource { locale: String },

    /// Adding a resource to its bundle failed
    #[error("Failed to create bundle for locale '{locale}': {errors:?}")]
    BundleCreation { locale: String, errors: Vec<String> },

    /// Message not found in any bundle
    #[error("Message not found: {id}")]
    MessageNotFound { id: String },

    /// Formatting a message reported errors
    #[error("Failed to format message '{id}': {errors:?}")]
    MessageFormat { id: String, errors: Vec<String> },

    /// The load was cancelled before it completed
    #[error("Localization load was cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl L10nError {
    /// Fetch failure carrying an HTTP status and no underlying error
    pub fn fetch_status(locale: impl Into<String>, url: impl Into<String>, status: u16) -> Self {
        Self::ResourceFetch {
            locale: locale.into(),
            url: url.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Fetch failure caused by an underlying transport or I/O error
    pub fn fetch_with_source(
        locale: impl Into<String>,
        url: impl Into<String>,
        status: Option<u16>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ResourceFetch {
            locale: locale.into(),
            url: url.into(),
            status,
            source: Some(Box::new(source)),
        }
    }

    /// Locale this error is about, if any
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::ResourceFetch { locale, .. }
            | Self::ResourceParse { locale, .. }
            | Self::MissingResource { locale }
            | Self::BundleCreation { locale, .. } => Some(locale),
            Self::InvalidLocale(code) => Some(code),
            _ => None,
        }
    }

    /// HTTP status of a fetch failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ResourceFetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether retrying the same fetch could succeed: transport errors and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ResourceFetch { status: None, .. } => true,
            Self::ResourceFetch { status: Some(code), .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Result type for localization operations
pub type L10nResult<T> = Result<T, L10nError>;

impl From<L10nError> for ShimError {
    fn from(err: L10nError) -> Self {
        let locale = err.locale().map(str::to_string);
        ShimError::localization_with_source(err.to_string(), locale, err)
    }
}
