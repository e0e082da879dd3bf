//! Provider lifecycle tests: one-shot loading, failure, and cancellation.

use async_trait::async_trait;
use locale_shim_app::{AppError, LocalizationConsumer, LocalizationProvider, ProviderState};
use locale_shim_common::test_utils::init_test_logging;
use locale_shim_i18n::testing::{MemoryFetcher, EN_FTL, ES_FTL};
use locale_shim_i18n::{
    parse_locales, ContextBuilder, L10nError, L10nResult, LocaleCode, LocaleResourceLoader, LocalizationContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_test::{assert_err, assert_ok};

#[derive(Debug)]
struct CountingBuilder {
    loader: LocaleResourceLoader,
    calls: AtomicUsize,
}

impl CountingBuilder {
    fn new(fetcher: MemoryFetcher) -> Arc<Self> {
        Arc::new(Self {
            loader: LocaleResourceLoader::new(Arc::new(fetcher)),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContextBuilder for CountingBuilder {
    async fn build(&self, locales: &[LocaleCode]) -> L10nResult<LocalizationContext> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.loader.build_context(locales).await
    }
}

fn status_view(l10n: &LocalizationConsumer) -> String {
    match l10n.context() {
        Some(ctx) => ctx.get_string("hello", None, None),
        None => "loading".to_string(),
    }
}

fn full_fetcher() -> MemoryFetcher {
    MemoryFetcher::new().with_resource("en", EN_FTL).with_resource("es", ES_FTL)
}

#[tokio::test]
async fn test_builder_runs_once() {
    init_test_logging();
    let builder = CountingBuilder::new(full_fetcher());
    let provider = LocalizationProvider::new(status_view, builder.clone());

    assert!(provider.state().is_uninitialized());
    assert_eq!(provider.render().unwrap(), "loading");
    assert!(provider.is_mounted());
    assert!(!provider.mount().unwrap());
    for _ in 0..5 {
        provider.render().unwrap();
    }

    let ctx = assert_ok!(provider.consumer().ready().await);
    assert_eq!(ctx.len(), 2);
    assert_eq!(provider.render().unwrap(), "Hello!");
    assert!(!provider.mount().unwrap());
    provider.render().unwrap();

    assert_eq!(builder.calls(), 1);
}

#[tokio::test]
async fn test_default_locales_are_loaded() {
    let builder = CountingBuilder::new(full_fetcher());
    let provider = LocalizationProvider::new(status_view, builder);
    let codes: Vec<&str> = provider.locales().iter().map(LocaleCode::as_str).collect();
    assert_eq!(codes, vec!["en", "es"]);

    assert!(provider.mount().unwrap());
    let ctx = provider.consumer().ready().await.unwrap();
    assert_eq!(ctx.bundles()[1].locale().as_str(), "es");
}

#[tokio::test]
async fn test_missing_locale_never_becomes_ready() {
    init_test_logging();
    let builder = CountingBuilder::new(MemoryFetcher::new().with_resource("en", EN_FTL));
    let provider = LocalizationProvider::new(status_view, builder.clone())
        .with_locales(parse_locales(["en", "fr"]).unwrap());

    provider.mount().unwrap();
    let err = assert_err!(provider.consumer().ready().await);

    assert!(matches!(*err, L10nError::ResourceFetch { ref locale, status: Some(404), .. } if locale == "fr"));
    assert!(matches!(provider.state(), ProviderState::Failed(_)));
    assert!(provider.state().context().is_none());
    assert_eq!(provider.render().unwrap(), "loading");
    assert_eq!(builder.calls(), 1);
}

#[tokio::test]
async fn test_unmount_cancels_load() {
    let fetcher = full_fetcher().with_delay(Duration::from_secs(30));
    let builder = CountingBuilder::new(fetcher);
    let provider = LocalizationProvider::new(status_view, builder);
    let consumer = provider.consumer();

    assert!(provider.mount().unwrap());
    provider.unmount();
    timeout(Duration::from_secs(5), provider.join()).await.unwrap();

    assert!(provider.state().is_uninitialized());
    let err = consumer.ready().await.unwrap_err();
    assert!(matches!(*err, L10nError::Cancelled));
    assert!(!provider.mount().unwrap());
}

#[tokio::test]
async fn test_drop_cancels_load() {
    let fetcher = full_fetcher().with_delay(Duration::from_secs(30));
    let provider = LocalizationProvider::new(status_view, CountingBuilder::new(fetcher));
    let consumer = provider.consumer();

    provider.mount().unwrap();
    drop(provider);

    let result = timeout(Duration::from_secs(5), consumer.ready()).await.unwrap();
    assert!(matches!(*result.unwrap_err(), L10nError::Cancelled));
    assert!(consumer.state().is_uninitialized());
}

#[tokio::test]
async fn test_ready_after_completion_survives_unmount() {
    let provider = LocalizationProvider::new(status_view, CountingBuilder::new(full_fetcher()));
    provider.mount().unwrap();
    provider.join().await;
    provider.unmount();

    assert!(provider.state().is_ready());
    assert_ok!(provider.consumer().ready().await);
}

#[tokio::test]
async fn test_ready_waits_for_a_later_mount() {
    let provider = LocalizationProvider::new(status_view, CountingBuilder::new(full_fetcher()));
    let consumer = provider.consumer();

    assert_err!(timeout(Duration::from_millis(50), consumer.ready()).await);

    let waiting = tokio::spawn(async move { consumer.ready().await });
    provider.mount().unwrap();

    let ctx = timeout(Duration::from_secs(5), waiting).await.unwrap().unwrap().unwrap();
    assert_eq!(ctx.get_string("hello", None, None), "Hello!");
}

#[test]
fn test_mount_requires_runtime() {
    let provider = LocalizationProvider::new(status_view, CountingBuilder::new(full_fetcher()));
    assert!(matches!(provider.mount(), Err(AppError::Runtime(_))));
    assert!(!provider.is_mounted());
}
