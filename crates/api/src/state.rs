//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::db::DocumentStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the document store gateway.
pub struct AppState<S> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: ApiConfig,
    store: S,
}

// Manual impl: a derive would require `S: Clone` only to clone the `Arc`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `store` - Document store gateway shared by every request
    #[must_use]
    pub fn new(config: ApiConfig, store: S) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Deadline applied to every store operation.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.inner.config.store_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    #[test]
    fn test_clones_share_the_store() {
        let config = ApiConfig {
            store_timeout: Duration::from_secs(2),
            ..ApiConfig::default()
        };
        let state = AppState::new(config, InMemoryStore::new());
        let clone = state.clone();

        assert_eq!(clone.store_timeout(), Duration::from_secs(2));
        assert_eq!(clone.config().database, "stockroom");
        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
    }
}
