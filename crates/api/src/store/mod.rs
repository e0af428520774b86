//! Storage selection between `PostgreSQL` and the in-memory fallback.
//!
//! Every request asks [`StorageSelector::select`] for a [`Storage`]. The
//! selector checks the pool on each call, so a database that comes back (or
//! goes away) is picked up by the next request. Handlers only ever talk to
//! the returned `Storage`; they never branch on which path is active.
//!
//! ```text
//! handler ──> StorageSelector::select() ──┬─> Storage::Durable ─> db::*Repository
//!                                         └─> Storage::Memory  ─> MemoryStore
//! ```

pub mod memory;
pub mod repositories;

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use sqlx::PgPool;

pub use memory::MemoryStore;
pub use repositories::{OrderStore, ProductStore, SubscriberStore};

/// Which storage path served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// `PostgreSQL`.
    Durable,
    /// In-process fallback collections.
    Memory,
}

impl StorageMode {
    /// Label reported by the health endpoint.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Durable => "Connected",
            Self::Memory => "Using Memory",
        }
    }
}

const MODE_UNKNOWN: u8 = 0;
const MODE_DURABLE: u8 = 1;
const MODE_MEMORY: u8 = 2;

/// Decides per call whether the durable store is reachable.
#[derive(Debug)]
pub struct StorageSelector {
    pool: Option<PgPool>,
    memory: MemoryStore,
    timeout: Duration,
    /// Last observed mode; only used to log transitions.
    last_mode: AtomicU8,
}

impl StorageSelector {
    /// Create a selector over an optional pool and a fresh fallback store.
    ///
    /// `timeout` bounds both the reachability check and every durable call.
    #[must_use]
    pub fn new(pool: Option<PgPool>, timeout: Duration) -> Self {
        Self {
            pool,
            memory: MemoryStore::new(),
            timeout,
            last_mode: AtomicU8::new(MODE_UNKNOWN),
        }
    }

    /// Create a selector that always serves from memory.
    #[must_use]
    pub fn memory_only() -> Self {
        Self::new(None, Duration::from_secs(1))
    }

    /// The in-memory fallback store.
    #[must_use]
    pub const fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// The configured pool, reachable or not.
    #[must_use]
    pub const fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Whether the durable store answers right now.
    ///
    /// Never errors and never waits longer than the configured timeout.
    pub async fn is_durable_available(&self) -> bool {
        let available = match &self.pool {
            Some(pool) if !pool.is_closed() => {
                matches!(
                    tokio::time::timeout(self.timeout, pool.acquire()).await,
                    Ok(Ok(_))
                )
            }
            _ => false,
        };

        if self.pool.is_some() {
            self.record_mode(available);
        }
        available
    }

    /// Pick the storage path for the current request.
    pub async fn select(&self) -> Storage<'_> {
        if self.is_durable_available().await
            && let Some(pool) = &self.pool
        {
            return Storage::Durable {
                pool,
                timeout: self.timeout,
            };
        }
        Storage::Memory(&self.memory)
    }

    fn record_mode(&self, durable: bool) {
        let mode = if durable { MODE_DURABLE } else { MODE_MEMORY };
        let previous = self.last_mode.swap(mode, Ordering::Relaxed);
        if previous == mode {
            return;
        }

        if durable {
            tracing::info!("Durable store reachable; serving from PostgreSQL");
        } else {
            tracing::warn!(
                timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                "Durable store unreachable; serving from in-memory fallback"
            );
        }
    }
}

/// The storage path chosen for one request.
#[derive(Debug, Clone, Copy)]
pub enum Storage<'a> {
    /// `PostgreSQL`, with the bound applied to each call.
    Durable { pool: &'a PgPool, timeout: Duration },
    /// In-process fallback collections.
    Memory(&'a MemoryStore),
}

impl<'a> Storage<'a> {
    /// Which path this is.
    #[must_use]
    pub const fn mode(&self) -> StorageMode {
        match self {
            Self::Durable { .. } => StorageMode::Durable,
            Self::Memory(_) => StorageMode::Memory,
        }
    }

    /// Product repository on this path.
    #[must_use]
    pub const fn products(self) -> ProductStore<'a> {
        ProductStore::new(self)
    }

    /// Subscriber repository on this path.
    #[must_use]
    pub const fn subscribers(self) -> SubscriberStore<'a> {
        SubscriberStore::new(self)
    }

    /// Order repository on this path.
    #[must_use]
    pub const fn orders(self) -> OrderStore<'a> {
        OrderStore::new(self)
    }
}
