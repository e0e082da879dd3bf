//! Fixtures for tests: an in-memory fetcher and sample resources.

use crate::error::{L10nError, L10nResult};
use crate::fetch::ResourceFetcher;
use crate::locale::{resource_url, LocaleCode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// English sample resource
pub const EN_FTL: &str = r#"
hello = Hello!
welcome = Welcome, { $name }!
item-count = You have { $count ->
    [one] { $count } item
   *[other] { $count } items
}
terms = Accept the <b>terms</b>
"#;

/// Spanish sample resource
pub const ES_FTL: &str = r#"
hello = ¡Hola!
welcome = ¡Bienvenido, { $name }!
item-count = Tienes { $count ->
    [one] { $count } elemento
   *[other] { $count } elementos
}
only-es = Solo en español
"#;

/// A body that is not valid Fluent
pub const INVALID_FTL: &str = "hello = { $name\nthis line is not fluent\n";

/// Serves resources from memory and records every fetch
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, String>,
    statuses: HashMap<String, u16>,
    delay: Option<Duration>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    /// An empty fetcher; every locale answers 404
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `locale`
    pub fn with_resource(mut self, locale: &str, body: &str) -> Self {
        self.resources.insert(locale.to_string(), body.to_string());
        self
    }

    /// Answer `status` for `locale`
    pub fn with_status(mut self, locale: &str, status: u16) -> Self {
        self.statuses.insert(locale.to_string(), status);
        self
    }

    /// Sleep before answering each fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep before answering fetches for `locale` only
    pub fn with_delay_for(mut self, locale: &str, delay: Duration) -> Self {
        self.delays.insert(locale.to_string(), delay);
        self
    }

    /// Number of fetches issued so far
    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locales fetched so far, in call order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    fn location(&self, locale: &LocaleCode) -> String {
        resource_url("memory:", locale)
    }

    async fn fetch(&self, locale: &LocaleCode) -> L10nResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locale.as_str().to_string());

        if let Some(delay) = self.delays.get(locale.as_str()).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.statuses.get(locale.as_str()) {
            return Err(L10nError::fetch_status(locale.as_str(), self.location(locale), *status));
        }

        self.resources
            .get(locale.as_str())
            .cloned()
            .ok_or_else(|| L10nError::fetch_status(locale.as_str(), self.location(locale), 404))
    }
}
