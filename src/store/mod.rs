//! Remote record store: the port the sync layer talks to and its two
//! implementations (REST-backed and in-memory).

pub mod config;
pub mod memory;
pub mod rest;

pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::core::{OwnerId, Record, RecordId, Result, SyncError};
use async_trait::async_trait;

/// Explicit result of a delete: the underlying filter matching zero rows
/// is reported as `NotFound` instead of silently succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row matching both id and owner was removed.
    Deleted,
    /// No row matched the id/owner pair; nothing changed.
    NotFound,
}

/// Four-operation interface to a named remote table, always filtered by
/// owner.
///
/// Implementations never panic across this boundary; every failure comes
/// back as a [`SyncError`] so callers can render non-fatal error state.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns all records whose owner column equals `owner`. Empty vec,
    /// never an error, when the owner has no rows.
    async fn fetch_all(&self, table: &str, owner: &OwnerId) -> Result<Vec<Record>>;

    /// Writes the full collection: per record, strips server-managed
    /// timestamps, stamps `owner`, then issues an update filtered by id and
    /// owner when `id` is present, otherwise an insert.
    ///
    /// All constituent operations run concurrently. The call reports
    /// failure only after every operation has completed or failed, via
    /// [`SyncError::PartialWrite`]. Successful members are not rolled back.
    async fn upsert_many(&self, table: &str, records: Vec<Record>, owner: &OwnerId) -> Result<()>;

    /// Deletes the row matching both `id` and `owner`.
    async fn delete_one(&self, table: &str, id: &RecordId, owner: &OwnerId)
    -> Result<DeleteOutcome>;
}

/// Rejects calls made without a resolved owner before any network I/O.
pub(crate) fn require_owner(owner: &OwnerId) -> Result<()> {
    if owner.is_empty() {
        return Err(SyncError::AuthRequired);
    }
    Ok(())
}

/// Shared pre-write step: server-managed columns removed, owner stamped.
pub(crate) fn prepare_for_write(mut record: Record, owner: &OwnerId) -> Record {
    record.strip_server_fields();
    record.set_owner(owner);
    record
}
