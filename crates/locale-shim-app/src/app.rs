//! Top-level application wrapper

use crate::error::AppResult;
use crate::provider::{LocalizationProvider, ProviderState};
use crate::view::View;
use locale_shim_config::Settings;
use locale_shim_i18n::{parse_locales, HttpFetcherConfig, LoaderOptions, LocaleResourceLoader};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Frames produced by [`App::run`] and the state the provider settled in
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Output rendered before the context was available
    pub initial: String,
    /// Output rendered after the load finished
    pub settled: String,
    /// Final provider state
    pub state: ProviderState,
}

impl RunOutcome {
    /// Both frames, in render order
    pub fn frames(&self) -> [&str; 2] {
        [&self.initial, &self.settled]
    }
}

/// Root of the view tree, wrapping it in a [`LocalizationProvider`]
#[derive(Debug)]
pub struct App<V> {
    provider: LocalizationProvider<V>,
}

impl<V: View> App<V> {
    /// Wrap an existing provider
    pub fn new(provider: LocalizationProvider<V>) -> Self {
        Self { provider }
    }

    /// Build the loader and provider described by `settings` around `root`
    pub fn from_settings(settings: &Settings, root: V) -> AppResult<Self> {
        let http = HttpFetcherConfig::default()
            .with_timeout(settings.http.timeout_secs)
            .with_pool_size(settings.http.max_idle_per_host as usize)
            .with_max_retries(settings.http.max_retries as usize);

        let loader = LocaleResourceLoader::from_base(&settings.assets.public_base_path, &http)?.with_options(
            LoaderOptions {
                use_isolating: settings.bundle.use_isolating,
                ..LoaderOptions::default()
            },
        );
        let locales = parse_locales(&settings.assets.locales)?;

        Ok(Self::new(
            LocalizationProvider::new(root, Arc::new(loader)).with_locales(locales),
        ))
    }

    /// The provider wrapping the root view
    pub fn provider(&self) -> &LocalizationProvider<V> {
        &self.provider
    }

    /// Render once uninitialized, wait for the load to settle, render once more
    #[instrument(skip(self))]
    pub async fn run(&self) -> AppResult<RunOutcome> {
        let initial = self.provider.render()?;

        match self.provider.consumer().ready().await {
            Ok(ctx) => info!("Rendering with {} locale(s)", ctx.len()),
            Err(e) => warn!("Rendering without translations: {}", e),
        }

        let settled = self.provider.render()?;
        Ok(RunOutcome {
            initial,
            settled,
            state: self.provider.state(),
        })
    }
}
