//! End-to-end rendering through `App`.

use locale_shim_app::{App, LocalizationConsumer, LocalizationProvider, Page, ProviderState, View};
use locale_shim_common::test_utils::{create_temp_dir, write_fixture};
use locale_shim_config::Settings;
use locale_shim_i18n::testing::{MemoryFetcher, EN_FTL, ES_FTL};
use locale_shim_i18n::LocaleResourceLoader;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingView {
    renders: AtomicUsize,
}

impl View for CountingView {
    fn render(&self, l10n: &LocalizationConsumer) -> String {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if l10n.context().is_some() {
            "ready".to_string()
        } else {
            "pending".to_string()
        }
    }
}

fn loader(fetcher: MemoryFetcher) -> Arc<LocaleResourceLoader> {
    Arc::new(LocaleResourceLoader::new(Arc::new(fetcher)))
}

#[tokio::test]
async fn test_run_renders_twice() {
    let fetcher = MemoryFetcher::new().with_resource("en", EN_FTL).with_resource("es", ES_FTL);
    let app = App::new(LocalizationProvider::new(CountingView::default(), loader(fetcher)));

    let outcome = app.run().await.unwrap();

    assert_eq!(outcome.frames(), ["pending", "ready"]);
    assert!(outcome.state.is_ready());
    assert_eq!(app.provider().child().renders.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_run_reports_failure() {
    let fetcher = MemoryFetcher::new().with_resource("en", EN_FTL);
    let app = App::new(LocalizationProvider::new(Page::new(["hello"]), loader(fetcher)));

    let outcome = app.run().await.unwrap();

    assert_eq!(outcome.initial, "[hello]");
    assert_eq!(outcome.settled, "[hello]");
    assert!(matches!(outcome.state, ProviderState::Failed(_)));
}

#[tokio::test]
async fn test_page_renders_messages() {
    let fetcher = MemoryFetcher::new().with_resource("en", EN_FTL).with_resource("es", ES_FTL);
    let page = Page::new(["hello", "welcome", "terms", "only-es", "missing"]).with_arg("name", "Ana");
    let app = App::new(LocalizationProvider::new(page, loader(fetcher)));

    let outcome = app.run().await.unwrap();

    assert_eq!(outcome.initial, "[hello]\n[welcome]\n[terms]\n[only-es]\n[missing]");
    assert_eq!(
        outcome.settled,
        "Hello!\nWelcome, Ana!\nAccept the terms\nSolo en español\nmissing"
    );
}

#[tokio::test]
async fn test_from_settings_reads_directory() {
    let dir = create_temp_dir();
    write_fixture(dir.path(), "locale/es.ftl", ES_FTL);

    let mut settings = Settings::default();
    settings.assets.public_base_path = dir.path().display().to_string();
    settings.assets.locales = vec!["es".to_string()];

    let app = App::from_settings(&settings, Page::new(["hello"])).unwrap();
    let outcome = app.run().await.unwrap();

    assert_eq!(outcome.settled, "¡Hola!");
}

#[test]
fn test_from_settings_rejects_bad_locale() {
    let mut settings = Settings::default();
    settings.assets.locales = vec!["??".to_string()];
    assert!(App::from_settings(&settings, Page::new(["hello"])).is_err());
}
