//! Localization provider: one-shot context loading for a view tree.
//!
//! A [`LocalizationProvider`] wraps a single child view. The first
//! [`mount`](LocalizationProvider::mount) spawns one task that builds the
//! [`LocalizationContext`]; every later mount or render reuses it. The
//! outcome is published through a `watch` channel, so any number of
//! [`LocalizationConsumer`]s observe the same state without locking.
//!
//! State moves `Uninitialized -> Ready` or `Uninitialized -> Failed`, once.

use crate::error::AppResult;
use crate::view::View;
use locale_shim_i18n::{default_locales, ContextBuilder, L10nError, LocaleCode, LocalizationContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Loading state of a provider
#[derive(Debug, Clone, Default)]
pub enum ProviderState {
    /// Nothing loaded yet; views render without translations
    #[default]
    Uninitialized,
    /// The context was built
    Ready(Arc<LocalizationContext>),
    /// The build failed; the provider will not retry
    Failed(Arc<L10nError>),
}

impl ProviderState {
    /// Whether the load has not finished yet
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    /// Whether the context is available
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The context, if ready
    pub fn context(&self) -> Option<Arc<LocalizationContext>> {
        match self {
            Self::Ready(ctx) => Some(Arc::clone(ctx)),
            _ => None,
        }
    }
}

/// Read side of a provider, handed to every view it renders
#[derive(Debug, Clone)]
pub struct LocalizationConsumer {
    state: watch::Receiver<ProviderState>,
    cancel: CancellationToken,
}

impl LocalizationConsumer {
    /// Snapshot of the current state
    pub fn state(&self) -> ProviderState {
        self.state.borrow().clone()
    }

    /// The context, or `None` while uninitialized or after a failure
    pub fn context(&self) -> Option<Arc<LocalizationContext>> {
        self.state.borrow().context()
    }

    /// Wait until the provider has been mounted and its load has settled.
    ///
    /// A consumer taken before [`LocalizationProvider::mount`] keeps waiting
    /// until some later mount settles the state. Returns
    /// [`L10nError::Cancelled`] if the provider is unmounted or dropped first.
    pub async fn ready(&self) -> Result<Arc<LocalizationContext>, Arc<L10nError>> {
        let mut state = self.state.clone();

        let settled = tokio::select! {
            biased;
            settled = state.wait_for(|s| !s.is_uninitialized()) => settled.map(|s| s.clone()).ok(),
            () = self.cancel.cancelled() => None,
        };

        match settled {
            Some(ProviderState::Ready(ctx)) => Ok(ctx),
            Some(ProviderState::Failed(err)) => Err(err),
            _ => Err(Arc::new(L10nError::Cancelled)),
        }
    }
}

/// Loads the localization context once and propagates it to a child view
pub struct LocalizationProvider<V> {
    child: V,
    builder: Arc<dyn ContextBuilder>,
    locales: Vec<LocaleCode>,
    state: Arc<watch::Sender<ProviderState>>,
    mounted: AtomicBool,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<V: View> LocalizationProvider<V> {
    /// Wrap `child`, loading the default locales through `builder`
    pub fn new(child: V, builder: Arc<dyn ContextBuilder>) -> Self {
        let (state, _) = watch::channel(ProviderState::Uninitialized);
        Self {
            child,
            builder,
            locales: default_locales(),
            state: Arc::new(state),
            mounted: AtomicBool::new(false),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    /// Load `locales` instead of the defaults
    pub fn with_locales(mut self, locales: Vec<LocaleCode>) -> Self {
        self.locales = locales;
        self
    }

    /// The wrapped view
    pub fn child(&self) -> &V {
        &self.child
    }

    /// Locales this provider loads
    pub fn locales(&self) -> &[LocaleCode] {
        &self.locales
    }

    /// Current state
    pub fn state(&self) -> ProviderState {
        self.state.borrow().clone()
    }

    /// A new read handle on the provider state
    pub fn consumer(&self) -> LocalizationConsumer {
        LocalizationConsumer {
            state: self.state.subscribe(),
            cancel: self.cancel.clone(),
        }
    }

    /// Start loading the context. Only the first call does anything; it
    /// returns `true` when it spawned the load.
    pub fn mount(&self) -> AppResult<bool> {
        if self.cancel.is_cancelled() {
            return Ok(false);
        }
        let runtime = tokio::runtime::Handle::try_current()?;
        if self.mounted.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        let builder = Arc::clone(&self.builder);
        let locales = self.locales.clone();
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();

        debug!("Mounting localization provider for {} locale(s)", locales.len());
        let handle = runtime.spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!("Localization load cancelled");
                }
                result = builder.build(&locales) => {
                    let next = match result {
                        Ok(ctx) => {
                            info!("Localization ready with {} bundle(s)", ctx.len());
                            ProviderState::Ready(Arc::new(ctx))
                        }
                        Err(e) => {
                            error!("Failed to load localization: {}", e);
                            ProviderState::Failed(Arc::new(e))
                        }
                    };
                    state.send_if_modified(|current| {
                        if current.is_uninitialized() {
                            *current = next;
                            true
                        } else {
                            false
                        }
                    });
                }
            }
        });

        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(true)
    }

    /// Mount if needed, then render the child with the current state
    pub fn render(&self) -> AppResult<String> {
        self.mount()?;
        Ok(self.child.render(&self.consumer()))
    }

    /// Cancel an in-flight load. A provider cannot be mounted again afterwards.
    pub fn unmount(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Unmounting localization provider");
            self.cancel.cancel();
        }
    }

    /// Whether [`mount`](Self::mount) has started a load
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Wait for the spawned load task to exit, if any
    pub async fn join(&self) {
        let handle = self.task.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Localization task ended abnormally: {}", e);
            }
        }
    }
}

impl<V> Drop for LocalizationProvider<V> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<V> std::fmt::Debug for LocalizationProvider<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationProvider")
            .field("locales", &self.locales)
            .field("state", &*self.state.borrow())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
