//! Sync coordinator: keeps a locally cached collection synchronized with
//! its remote table.
//!
//! Reads happen on `start`, writes are optimistic-local plus a debounced
//! push of the entire collection, and each record is routed to insert or
//! update by the presence of its id. There is no merge: the last write
//! from any client wins at collection granularity.

pub mod debounce;
pub mod status;

pub use debounce::Debouncer;
pub use status::{IconKind, StatusIndicator, SyncStatus, indicator};

use crate::cache::LocalCache;
use crate::core::{OwnerId, Record, RecordId, Result, SyncError};
use crate::entity::Entity;
use crate::identity::IdentityProvider;
use crate::store::{DeleteOutcome, RecordStore};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;

/// Quiet window after the last mutation before a push is issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(2000);

/// Coordinator tuning knobs.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Debounce window for pushes.
    pub debounce_window: Duration,
    /// Whether a failed initial fetch keeps the possibly-stale cache
    /// instead of clearing it.
    pub preserve_cache_on_fetch_error: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce_window: DEBOUNCE_WINDOW,
            preserve_cache_on_fetch_error: true,
        }
    }
}

struct CollectionState<E> {
    owner: Option<OwnerId>,
    records: Vec<E>,
}

struct Inner<E: Entity> {
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityProvider>,
    cache: LocalCache,
    options: SyncOptions,
    state: RwLock<CollectionState<E>>,
    status_tx: watch::Sender<SyncStatus>,
    debounce: Debouncer,
    /// Serializes pushes so two batches for the same collection can never
    /// overlap, even when a push outlives the debounce window.
    push_lock: Mutex<()>,
}

impl<E: Entity> Inner<E> {
    fn set_status(&self, status: SyncStatus) {
        // Must land even with no subscriber; a plain send drops the value
        // when every receiver is gone.
        self.status_tx.send_replace(status);
    }

    fn write_cache(&self, records: &Vec<E>) {
        // A cache-write failure must not fail a sync.
        if let Err(e) = self.cache.write(E::CACHE_KEY, records) {
            log::warn!("cache write for '{}' failed: {e}", E::CACHE_KEY);
        }
    }

    /// Mount sequence: load the cached collection, then, with an owner,
    /// overwrite it from the remote table.
    async fn mount(&self, owner: Option<OwnerId>) -> SyncStatus {
        self.debounce.cancel();
        let cached: Vec<E> = self.cache.read(E::CACHE_KEY, Vec::new());

        let Some(owner) = owner else {
            let mut state = self.state.write().await;
            state.owner = None;
            state.records = cached;
            self.set_status(SyncStatus::Offline);
            return SyncStatus::Offline;
        };

        {
            let mut state = self.state.write().await;
            state.owner = Some(owner.clone());
            state.records = cached;
        }

        match self.store.fetch_all(E::TABLE, &owner).await {
            Ok(rows) => {
                // Server data overwrites the cache even when empty.
                let fetched: Vec<E> = rows.iter().map(E::from_record).collect();
                self.write_cache(&fetched);
                self.state.write().await.records = fetched;
                self.set_status(SyncStatus::Synced);
                SyncStatus::Synced
            }
            Err(e) => {
                log::warn!("initial fetch for '{}' failed: {e}", E::TABLE);
                if !self.options.preserve_cache_on_fetch_error {
                    let empty: Vec<E> = Vec::new();
                    self.write_cache(&empty);
                    self.state.write().await.records = empty;
                }
                self.set_status(SyncStatus::Error);
                SyncStatus::Error
            }
        }
    }

    /// Pushes the entire current collection. On failure the optimistic
    /// local change stays in place; local and remote may diverge until the
    /// next successful write.
    async fn push(&self) {
        let _guard = self.push_lock.lock().await;

        let (owner, items) = {
            let state = self.state.read().await;
            (state.owner.clone(), state.records.clone())
        };
        let Some(owner) = owner else {
            self.set_status(SyncStatus::Offline);
            return;
        };

        self.set_status(SyncStatus::Syncing);
        let records: Vec<Record> = items.iter().map(Entity::to_record).collect();
        let had_inserts = records.iter().any(|record| record.id().is_none());

        match self.store.upsert_many(E::TABLE, records, &owner).await {
            Ok(()) => {
                if had_inserts {
                    self.reconcile_ids(&owner).await;
                }
                self.set_status(SyncStatus::Synced);
            }
            Err(e) => {
                log::warn!("push for '{}' failed: {e}", E::TABLE);
                self.set_status(SyncStatus::Error);
            }
        }
    }

    /// After a push that inserted new records, re-fetch so the
    /// server-assigned ids land in the local collection; otherwise the next
    /// push would insert those records a second time.
    async fn reconcile_ids(&self, owner: &OwnerId) {
        if self.debounce.is_pending() {
            // Another push is already queued; its own reconciliation will
            // pick the ids up without clobbering the newer local state.
            return;
        }
        match self.store.fetch_all(E::TABLE, owner).await {
            Ok(rows) => {
                let fetched: Vec<E> = rows.iter().map(E::from_record).collect();
                self.write_cache(&fetched);
                self.state.write().await.records = fetched;
            }
            Err(e) => {
                log::debug!("id reconciliation fetch for '{}' failed: {e}", E::TABLE);
            }
        }
    }
}

/// Orchestrates one synced collection: reads on `start`, debounced pushes
/// on mutation, explicit deletes, and status reporting.
///
/// Both ports are explicit constructor dependencies so tests can
/// substitute fakes.
pub struct SyncCoordinator<E: Entity> {
    inner: Arc<Inner<E>>,
    session_watcher: StdMutex<Option<JoinHandle<()>>>,
}

impl<E: Entity> SyncCoordinator<E> {
    pub fn new(
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityProvider>,
        cache: LocalCache,
        options: SyncOptions,
    ) -> Self {
        let (status_tx, _rx) = watch::channel(SyncStatus::Offline);
        let debounce = Debouncer::new(options.debounce_window);
        Self {
            inner: Arc::new(Inner {
                store,
                identity,
                cache,
                options,
                state: RwLock::new(CollectionState {
                    owner: None,
                    records: Vec::new(),
                }),
                status_tx,
                debounce,
                push_lock: Mutex::new(()),
            }),
            session_watcher: StdMutex::new(None),
        }
    }

    /// Resolves the current owner, runs the mount sequence, and begins
    /// following session changes. An identity switch cancels any pending
    /// debounced write scheduled under the previous owner and re-runs the
    /// mount sequence for the new one.
    pub async fn start(&self) -> SyncStatus {
        // Subscribe before resolving the session; a change landing during
        // the initial mount must be delivered, not marked already-seen.
        let mut sessions = self.inner.identity.subscribe();
        let owner = {
            let session = sessions.borrow_and_update();
            session.as_ref().map(|s| s.owner.clone())
        };
        let status = self.inner.mount(owner).await;

        let inner = Arc::clone(&self.inner);
        let watcher = tokio::spawn(async move {
            while sessions.changed().await.is_ok() {
                let owner = {
                    let session = sessions.borrow_and_update();
                    session.as_ref().map(|s| s.owner.clone())
                };
                log::info!(
                    "session changed for '{}', remounting as {:?}",
                    E::TABLE,
                    owner.as_ref().map(OwnerId::as_str)
                );
                inner.mount(owner).await;
            }
        });
        if let Some(previous) = self.lock_watcher().replace(watcher) {
            previous.abort();
        }
        status
    }

    /// Cancels the pending debounced write and stops following session
    /// changes. The cached collection stays usable.
    pub fn stop(&self) {
        self.inner.debounce.cancel();
        if let Some(watcher) = self.lock_watcher().take() {
            watcher.abort();
        }
    }

    /// Snapshot of the cached collection.
    pub async fn records(&self) -> Vec<E> {
        self.inner.state.read().await.records.clone()
    }

    /// Applies an optimistic local mutation, persists it to the cache, and
    /// schedules the debounced push of the entire collection. Without an
    /// owner the mutation stays purely local.
    pub async fn mutate<F>(&self, mutation: F)
    where
        F: FnOnce(&mut Vec<E>),
    {
        let has_owner = {
            let mut state = self.inner.state.write().await;
            mutation(&mut state.records);
            self.inner.write_cache(&state.records);
            state.owner.is_some()
        };

        if !has_owner {
            self.inner.set_status(SyncStatus::Offline);
            return;
        }

        let inner = Arc::clone(&self.inner);
        self.inner.debounce.schedule(async move {
            inner.push().await;
        });
    }

    /// Runs any pending push immediately instead of waiting out the
    /// debounce window. No-op when signed out.
    pub async fn flush(&self) {
        self.inner.debounce.cancel();
        let has_owner = self.inner.state.read().await.owner.is_some();
        if has_owner {
            self.inner.push().await;
        }
    }

    /// Deletes one record remotely (filtered by id and owner), then drops
    /// it from the cached collection. Deletes are immediate, not debounced.
    pub async fn delete(&self, id: &RecordId) -> Result<DeleteOutcome> {
        let owner = self
            .inner
            .state
            .read()
            .await
            .owner
            .clone()
            .ok_or(SyncError::AuthRequired)?;

        let outcome = self.inner.store.delete_one(E::TABLE, id, &owner).await?;

        let mut state = self.inner.state.write().await;
        state.records.retain(|record| record.id() != Some(id));
        self.inner.write_cache(&state.records);
        Ok(outcome)
    }

    /// Subscribes to status transitions.
    pub fn status(&self) -> watch::Receiver<SyncStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Current status.
    pub fn current_status(&self) -> SyncStatus {
        *self.inner.status_tx.borrow()
    }

    /// Display tuple for the current status.
    pub fn status_indicator(&self) -> StatusIndicator {
        indicator(self.current_status())
    }

    fn lock_watcher(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.session_watcher
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<E: Entity> Drop for SyncCoordinator<E> {
    fn drop(&mut self) {
        self.stop();
    }
}
