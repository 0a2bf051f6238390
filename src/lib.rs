// ============================================================================
// vaultsync Library
// ============================================================================

pub mod cache;
pub mod core;
pub mod entity;
pub mod identity;
pub mod store;
pub mod sync;

// Re-export main types for convenience
pub use crate::cache::LocalCache;
pub use crate::core::{OwnerId, Record, RecordId, Result, SyncError};
pub use crate::entity::Entity;
pub use crate::identity::{IdentityProvider, Session, StaticIdentity};
pub use crate::store::{DeleteOutcome, MemoryStore, RecordStore, RestStore, StoreConfig};
pub use crate::sync::{
    IconKind, StatusIndicator, SyncCoordinator, SyncOptions, SyncStatus, indicator,
};

use std::path::Path;
use std::sync::Arc;

// ============================================================================
// High-level Client API
// ============================================================================

/// Entry point wiring the record store, identity provider, and cache root
/// together, handing out one coordinator per record category.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vaultsync::entity::Vehicle;
/// use vaultsync::{MemoryStore, OwnerId, Session, StaticIdentity, SyncClient};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = Arc::new(StaticIdentity::signed_in(Session::new(OwnerId::new("u-1"))));
/// let cache_dir = tempfile::tempdir()?;
/// let client = SyncClient::with_store(Arc::new(MemoryStore::new()), identity, cache_dir.path())?;
///
/// let vehicles = client.coordinator::<Vehicle>();
/// vehicles.start().await;
/// vehicles
///     .mutate(|list| {
///         list.push(Vehicle {
///             make: Some("Honda".to_string()),
///             ..Default::default()
///         });
///     })
///     .await;
/// vehicles.flush().await;
/// # Ok(())
/// # }
/// ```
pub struct SyncClient {
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityProvider>,
    cache: LocalCache,
    options: SyncOptions,
}

impl SyncClient {
    /// Connects to a hosted REST record store.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use vaultsync::{StaticIdentity, StoreConfig, SyncClient};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StoreConfig::new("https://project.example.co", "api-key");
    /// let client = SyncClient::connect(config, Arc::new(StaticIdentity::new()), "/var/cache/vault")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect(
        config: StoreConfig,
        identity: Arc<dyn IdentityProvider>,
        cache_root: impl AsRef<Path>,
    ) -> Result<Self> {
        let store = Arc::new(RestStore::new(config)?);
        Self::with_store(store, identity, cache_root)
    }

    /// Wires an explicit store implementation, e.g. a [`MemoryStore`] in
    /// tests or a purely local deployment.
    pub fn with_store(
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityProvider>,
        cache_root: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self {
            store,
            identity,
            cache: LocalCache::open(cache_root)?,
            options: SyncOptions::default(),
        })
    }

    /// Replaces the default coordinator options.
    pub fn options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds a coordinator for one record category, sharing the client's
    /// store, identity provider, and cache.
    pub fn coordinator<E: Entity>(&self) -> SyncCoordinator<E> {
        SyncCoordinator::new(
            Arc::clone(&self.store),
            Arc::clone(&self.identity),
            self.cache.clone(),
            self.options.clone(),
        )
    }
}
