//! Application state for the leave engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::cache::LeaveCache;
use crate::config::ConfigLoader;
use crate::store::LeaveStore;

/// Shared application state.
///
/// Holds the loaded policy configuration, the persistence seam and the
/// invalidation cache. The cache lives here rather than in module-level
/// state, so two engines in one process never share versions.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn LeaveStore>,
    cache: LeaveCache,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: Arc<dyn LeaveStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            cache: LeaveCache::new(),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the persistence seam.
    pub fn store(&self) -> &dyn LeaveStore {
        self.store.as_ref()
    }

    /// Returns the invalidation cache.
    pub fn cache(&self) -> &LeaveCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
