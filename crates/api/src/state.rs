//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::OrderLifecycle;
use crate::store::StorageSelector;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the storage selector, the order lifecycle and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    storage: StorageSelector,
    orders: OrderLifecycle,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool, if a database is configured
    #[must_use]
    pub fn new(config: ApiConfig, pool: Option<PgPool>) -> Self {
        let storage = StorageSelector::new(pool, config.db_timeout);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                orders: OrderLifecycle::new(),
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the storage selector.
    #[must_use]
    pub fn storage(&self) -> &StorageSelector {
        &self.inner.storage
    }

    /// Get a reference to the order lifecycle manager.
    #[must_use]
    pub fn orders(&self) -> &OrderLifecycle {
        &self.inner.orders
    }
}
