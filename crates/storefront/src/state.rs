//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{Backend, BackendError, TeesClient};
use crate::config::StorefrontConfig;
use crate::middleware::page::PageStore;
use crate::middleware::session::SESSION_IDLE;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The backend is injected so
/// tests can substitute a fake; page-loads live in memory alongside it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: Arc<dyn Backend>,
    pages: PageStore,
}

impl AppState {
    /// Create application state talking to the configured drops backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let backend = TeesClient::new(&config.backend)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Create application state around an existing backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                pages: PageStore::new(SESSION_IDLE),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the drops backend.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.inner.backend)
    }

    /// View states of live page-loads.
    #[must_use]
    pub fn pages(&self) -> &PageStore {
        &self.inner.pages
    }
}
