//! Resource fetchers: where `.ftl` bodies come from
//!
//! A [`ResourceFetcher`] turns a locale code into the raw text of its
//! resource file. [`HttpFetcher`] serves the usual case of a public asset
//! URL; [`FsFetcher`] reads the same layout from a local directory.

use crate::error::{L10nError, L10nResult};
use crate::locale::{resource_url, LocaleCode};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;
use tracing::{debug, instrument, warn};
use url::Url;

/// Source of raw Fluent resource text for a locale
#[async_trait]
pub trait ResourceFetcher: Send + Sync + fmt::Debug {
    /// Where the resource for `locale` lives (URL or file path)
    fn location(&self, locale: &LocaleCode) -> String;

    /// Fetch the raw body of the resource for `locale`
    async fn fetch(&self, locale: &LocaleCode) -> L10nResult<String>;
}

/// Configuration for [`HttpFetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFetcherConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Connection pool max idle connections per host (default: 10)
    pub max_idle_per_host: usize,
    /// Retry attempts for transient failures (default: 0, no retry)
    pub max_retries: usize,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_idle_per_host: 10,
            max_retries: 0,
        }
    }
}

impl HttpFetcherConfig {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, max_idle_per_host: usize) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self
    }

    /// Set the maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Fetches resources over HTTP from `<base>/locale/<code>.ftl`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: String,
    config: HttpFetcherConfig,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base`, which must be an absolute http(s) URL
    pub fn new(base: impl Into<String>, config: HttpFetcherConfig) -> L10nResult<Self> {
        let base = base.into();
        Url::parse(&base).map_err(|e| L10nError::Client(format!("invalid base URL '{base}': {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| L10nError::Client(e.to_string()))?;

        Ok(Self { client, base, config })
    }

    async fn fetch_once(&self, locale: &LocaleCode, url: &str) -> L10nResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request for {} failed: {}", url, e);
            L10nError::fetch_with_source(locale.as_str(), url, e.status().map(|s| s.as_u16()), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request for {} returned {}", url, status);
            return Err(L10nError::fetch_status(locale.as_str(), url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| L10nError::fetch_with_source(locale.as_str(), url, Some(status.as_u16()), e))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    fn location(&self, locale: &LocaleCode) -> String {
        resource_url(&self.base, locale)
    }

    #[instrument(skip(self), fields(locale = %locale))]
    async fn fetch(&self, locale: &LocaleCode) -> L10nResult<String> {
        let url = self.location(locale);
        let url = url.as_str();
        debug!("Fetching {}", url);

        let strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.config.max_retries);

        RetryIf::start(
            strategy,
            move || self.fetch_once(locale, url),
            |err: &L10nError| err.is_transient(),
        )
        .await
    }
}

/// Reads resources from `<root>/locale/<code>.ftl` on the local filesystem
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, locale: &LocaleCode) -> PathBuf {
        self.root.join(crate::locale::LOCALE_DIR).join(locale.resource_file())
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    fn location(&self, locale: &LocaleCode) -> String {
        self.path_for(locale).to_string_lossy().into_owned()
    }

    #[instrument(skip(self), fields(locale = %locale))]
    async fn fetch(&self, locale: &LocaleCode) -> L10nResult<String> {
        let path = self.path_for(locale);
        debug!("Reading {:?}", path);

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            let location = path.to_string_lossy().into_owned();
            warn!("Failed to read {}: {}", location, e);
            let status = (e.kind() == ErrorKind::NotFound).then_some(404);
            L10nError::fetch_with_source(locale.as_str(), location, status, e)
        })
    }
}

/// Pick a fetcher for a public base path.
///
/// `http://` and `https://` bases are fetched over the network; anything
/// else is treated as a directory (an empty base means the working directory).
pub fn fetcher_for_base(base: &str, http: &HttpFetcherConfig) -> L10nResult<Arc<dyn ResourceFetcher>> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(Arc::new(HttpFetcher::new(base, http.clone())?))
    } else if base.is_empty() {
        Ok(Arc::new(FsFetcher::new(".")))
    } else {
        Ok(Arc::new(FsFetcher::new(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = HttpFetcherConfig::default()
            .with_timeout(5)
            .with_pool_size(2)
            .with_max_retries(3);

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_idle_per_host, 2);
        assert_eq!(config.max_retries, 3);
        assert_eq!(HttpFetcherConfig::default().max_retries, 0);
    }

    #[test]
    fn test_http_location() {
        let fetcher = HttpFetcher::new("https://example.com/static/", HttpFetcherConfig::default()).unwrap();
        let es = LocaleCode::parse("es").unwrap();
        assert_eq!(fetcher.location(&es), "https://example.com/static/locale/es.ftl");
    }

    #[test]
    fn test_http_fetcher_rejects_relative_base() {
        assert!(matches!(HttpFetcher::new("/static", HttpFetcherConfig::default()), Err(L10nError::Client(_))));
    }

    #[test]
    fn test_fs_location() {
        let fetcher = FsFetcher::new("/srv/public");
        let en = LocaleCode::parse("en").unwrap();
        assert_eq!(
            PathBuf::from(fetcher.location(&en)),
            PathBuf::from("/srv/public/locale/en.ftl")
        );
    }

    #[tokio::test]
    async fn test_fs_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path());
        let fr = LocaleCode::parse("fr").unwrap();

        let err = fetcher.fetch(&fr).await.unwrap_err();
        assert!(matches!(err, L10nError::ResourceFetch { .. }));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.locale(), Some("fr"));
    }

    #[test]
    fn test_fetcher_for_base() {
        let http = HttpFetcherConfig::default();
        let en = LocaleCode::parse("en").unwrap();

        let remote = fetcher_for_base("http://localhost:3000", &http).unwrap();
        assert_eq!(remote.location(&en), "http://localhost:3000/locale/en.ftl");

        let local = fetcher_for_base("public", &http).unwrap();
        assert_eq!(PathBuf::from(local.location(&en)), PathBuf::from("public/locale/en.ftl"));
    }
}
