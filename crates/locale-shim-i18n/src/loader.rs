//! Locale resource loading and context aggregation

use crate::bundle::LocaleBundle;
use crate::context::{LocalizationContext, MarkupParser};
use crate::error::{L10nError, L10nResult};
use crate::fetch::{fetcher_for_base, HttpFetcherConfig, ResourceFetcher};
use crate::locale::{default_locales, LocaleCode};
use crate::markup::parse_markup;
use crate::resource::{ensure_present, parse_resource};
use async_trait::async_trait;
use fluent_bundle::FluentResource;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Anything that can produce a [`LocalizationContext`] for a list of locales
#[async_trait]
pub trait ContextBuilder: Send + Sync {
    /// Build a context for `locales`, all or nothing
    async fn build(&self, locales: &[LocaleCode]) -> L10nResult<LocalizationContext>;
}

/// Options applied to every context the loader builds
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Wrap placeables in Unicode isolation marks (default: false)
    pub use_isolating: bool,
    /// Parser injected into the context for rich-text messages
    pub markup_parser: MarkupParser,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            use_isolating: false,
            markup_parser: parse_markup,
        }
    }
}

/// Fetches `.ftl` resources and aggregates them into a [`LocalizationContext`]
#[derive(Debug, Clone)]
pub struct LocaleResourceLoader {
    fetcher: Arc<dyn ResourceFetcher>,
    options: LoaderOptions,
}

impl LocaleResourceLoader {
    /// Create a loader over any fetcher
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            fetcher,
            options: LoaderOptions::default(),
        }
    }

    /// Create a loader for a public base path (URL or directory)
    pub fn from_base(base: &str, http: &HttpFetcherConfig) -> L10nResult<Self> {
        Ok(Self::new(fetcher_for_base(base, http)?))
    }

    /// Replace the loader options
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch and parse the resource for one locale
    #[instrument(skip(self), fields(locale = %locale))]
    pub async fn fetch_resource(&self, locale: &LocaleCode) -> L10nResult<Arc<FluentResource>> {
        let body = self.fetcher.fetch(locale).await?;
        debug!("Fetched {} bytes from {}", body.len(), self.fetcher.location(locale));
        parse_resource(locale, body)
    }

    /// Fetch every locale concurrently and aggregate one bundle per locale, in order.
    ///
    /// Any single failure fails the whole build; no partial context is returned.
    #[instrument(skip(self, locales), fields(count = locales.len()))]
    pub async fn build_context(&self, locales: &[LocaleCode]) -> L10nResult<LocalizationContext> {
        if locales.is_empty() {
            return Err(L10nError::NoLocales);
        }

        let resources = try_join_all(locales.iter().map(|locale| self.fetch_resource(locale)))
            .await
            .map_err(|e| {
                error!("Localization load aborted: {}", e);
                e
            })?;

        let bundles = locales
            .iter()
            .zip(resources)
            .map(|(locale, resource)| {
                ensure_present(locale, &resource)?;
                LocaleBundle::new(locale.clone(), resource, self.options.use_isolating)
            })
            .collect::<L10nResult<Vec<_>>>()?;

        info!(
            "Built localization context for [{}]",
            locales.iter().map(LocaleCode::as_str).collect::<Vec<_>>().join(", ")
        );
        Ok(LocalizationContext::new(bundles, self.options.markup_parser))
    }

    /// Build a context for the default locales, `["en", "es"]`
    pub async fn build_default_context(&self) -> L10nResult<LocalizationContext> {
        self.build_context(&default_locales()).await
    }
}

#[async_trait]
impl ContextBuilder for LocaleResourceLoader {
    async fn build(&self, locales: &[LocaleCode]) -> L10nResult<LocalizationContext> {
        self.build_context(locales).await
    }
}
