//! In-process implementation of the record store port.
//!
//! Behaves like the hosted table store: rows carry server-assigned ids and
//! timestamps, reads and writes are filtered by owner, and an update that
//! matches zero rows succeeds without touching anything. Used as the
//! substitutable store in tests and embeddable as a purely local backend.

use crate::core::{OwnerId, Record, RecordId, Result, SyncError};
use crate::store::{DeleteOutcome, RecordStore, prepare_for_write, require_owner};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Per-operation call counters, for asserting on traffic in tests.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub fetches: usize,
    pub inserts: usize,
    pub updates: usize,
    pub deletes: usize,
    /// Number of `upsert_many` invocations (batches, not rows).
    pub write_batches: usize,
}

#[derive(Default)]
struct Counters {
    fetches: AtomicUsize,
    inserts: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    write_batches: AtomicUsize,
}

/// In-memory record store keyed by table name.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Record>>>,
    counters: Counters,
    fail_fetches: AtomicBool,
    fail_upserts: AtomicBool,
    fetch_delay: std::sync::Mutex<Option<std::time::Duration>>,
    upsert_delay: std::sync::Mutex<Option<std::time::Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `fetch_all` fail until cleared.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `upsert_many` fail until cleared.
    pub fn fail_upserts(&self, fail: bool) {
        self.fail_upserts.store(fail, Ordering::SeqCst);
    }

    /// Holds every subsequent `fetch_all` for `delay` before it returns,
    /// simulating a slow read.
    pub fn set_fetch_delay(&self, delay: Option<std::time::Duration>) {
        *self
            .fetch_delay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = delay;
    }

    /// Holds every subsequent `upsert_many` for `delay` before it lands,
    /// simulating a slow in-flight write.
    pub fn set_upsert_delay(&self, delay: Option<std::time::Duration>) {
        *self
            .upsert_delay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = delay;
    }

    /// Seeds a row directly, assigning a server id, bypassing owner checks.
    pub async fn seed(&self, table: &str, mut record: Record) -> RecordId {
        let id = RecordId::new(uuid::Uuid::new_v4().to_string());
        record.set_id(&id);
        Self::stamp_timestamps(&mut record, true);
        self.tables
            .lock()
            .await
            .entry(table.to_string())
            .or_default()
            .push(record);
        id
    }

    /// Snapshot of every row in `table`, regardless of owner.
    pub async fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Current call counters.
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            fetches: self.counters.fetches.load(Ordering::SeqCst),
            inserts: self.counters.inserts.load(Ordering::SeqCst),
            updates: self.counters.updates.load(Ordering::SeqCst),
            deletes: self.counters.deletes.load(Ordering::SeqCst),
            write_batches: self.counters.write_batches.load(Ordering::SeqCst),
        }
    }

    fn stamp_timestamps(record: &mut Record, created: bool) {
        let now = chrono::Utc::now().to_rfc3339();
        if created {
            record.set("created_at", now.clone());
        }
        record.set("updated_at", now);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self, table: &str, owner: &OwnerId) -> Result<Vec<Record>> {
        require_owner(owner)?;
        self.counters.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(SyncError::Transport("injected fetch failure".to_string()));
        }
        let delay = *self
            .fetch_delay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let tables = self.tables.lock().await;
        let rows = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.owner().as_ref() == Some(owner))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn upsert_many(&self, table: &str, records: Vec<Record>, owner: &OwnerId) -> Result<()> {
        require_owner(owner)?;
        self.counters.write_batches.fetch_add(1, Ordering::SeqCst);
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(SyncError::Transport("injected upsert failure".to_string()));
        }
        let delay = *self
            .upsert_delay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();

        for record in records {
            let mut prepared = prepare_for_write(record, owner);
            match prepared.id() {
                Some(id) => {
                    self.counters.updates.fetch_add(1, Ordering::SeqCst);
                    // Update filtered by id AND owner; zero matched rows is
                    // not an error, it just changes nothing.
                    if let Some(existing) = rows.iter_mut().find(|row| {
                        row.id().as_ref() == Some(&id) && row.owner().as_ref() == Some(owner)
                    }) {
                        if let Some(created) = existing.get("created_at").cloned() {
                            prepared.set("created_at", created);
                        }
                        Self::stamp_timestamps(&mut prepared, false);
                        *existing = prepared;
                    }
                }
                None => {
                    self.counters.inserts.fetch_add(1, Ordering::SeqCst);
                    let id = RecordId::new(uuid::Uuid::new_v4().to_string());
                    prepared.set_id(&id);
                    Self::stamp_timestamps(&mut prepared, true);
                    rows.push(prepared);
                }
            }
        }
        Ok(())
    }

    async fn delete_one(
        &self,
        table: &str,
        id: &RecordId,
        owner: &OwnerId,
    ) -> Result<DeleteOutcome> {
        require_owner(owner)?;
        self.counters.deletes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(DeleteOutcome::NotFound);
        };
        let before = rows.len();
        rows.retain(|row| {
            !(row.id().as_ref() == Some(id) && row.owner().as_ref() == Some(owner))
        });
        if rows.len() < before {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}
