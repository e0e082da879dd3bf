//! # locale-shim i18n
//!
//! Fetches Fluent locale resources and aggregates them into a
//! [`LocalizationContext`]. It includes:
//!
//! - Locale code validation and the `<base>/locale/<code>.ftl` path convention
//! - HTTP and filesystem resource fetchers
//! - Concurrent, all-or-nothing context building
//! - A DOM-free markup parser for rich-text messages
//!
//! # Example
//!
//! ```rust,no_run
//! use locale_shim_i18n::{HttpFetcherConfig, LocaleResourceLoader};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = LocaleResourceLoader::from_base("https://example.com", &HttpFetcherConfig::default())?;
//! let l10n = loader.build_default_context().await?;
//!
//! println!("{}", l10n.get_string("hello", None, None));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod context;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod locale;
pub mod markup;
pub mod resource;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bundle::LocaleBundle;
pub use context::{LocalizationContext, MarkupParser};
pub use error::{L10nError, L10nResult};
pub use fetch::{fetcher_for_base, FsFetcher, HttpFetcher, HttpFetcherConfig, ResourceFetcher};
pub use loader::{ContextBuilder, LoaderOptions, LocaleResourceLoader};
pub use locale::{default_locales, parse_locales, resource_url, LocaleCode, DEFAULT_LOCALES};
pub use markup::{parse_markup, MarkupNode};

// Re-export commonly used Fluent types
pub use fluent_bundle::{FluentArgs, FluentValue};
