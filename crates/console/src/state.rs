//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::db::KvStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration and
/// the agent key-value store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    store: Arc<dyn KvStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ConsoleConfig, store: Arc<dyn KvStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the console configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Get a reference to the agent key-value store.
    #[must_use]
    pub fn store(&self) -> &dyn KvStore {
        self.inner.store.as_ref()
    }
}
