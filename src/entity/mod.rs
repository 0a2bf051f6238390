//! Domain entities and their remote-row mappings.
//!
//! Each category of the vault maps to one remote table. The DTO <-> domain
//! conversion for a table is defined exactly once, on the entity type,
//! instead of being re-derived wherever the collection is consumed.

pub mod document;
pub mod education;
pub mod employment;
pub mod medical;
pub mod personal;
pub mod vehicle;

pub use document::Document;
pub use education::EducationEntry;
pub use employment::EmploymentEntry;
pub use medical::MedicalRecord;
pub use personal::PersonalInfo;
pub use vehicle::{MaintenanceRecord, Vehicle};

use crate::core::{Record, RecordId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// One synced record category.
///
/// `TABLE` names the remote table, `CACHE_KEY` the local cache entry the
/// collection lives under. `to_record`/`from_record` are the single place
/// where column naming is decided; `from_record` defaults missing or
/// unexpected columns instead of erroring, mirroring the cache's
/// availability-over-correctness stance.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const TABLE: &'static str;
    const CACHE_KEY: &'static str;

    fn id(&self) -> Option<&RecordId>;
    fn set_id(&mut self, id: RecordId);

    fn to_record(&self) -> Record;
    fn from_record(record: &Record) -> Self;
}

/// Writes an optional text column; `None` becomes an explicit null so an
/// update can clear the remote value.
pub(crate) fn put_text(record: &mut Record, column: &str, value: &Option<String>) {
    match value {
        Some(text) => record.set(column, text.clone()),
        None => record.set(column, JsonValue::Null),
    }
}

/// Reads an optional text column.
pub(crate) fn take_text(record: &Record, column: &str) -> Option<String> {
    record.get_str(column).map(str::to_string)
}

/// Writes the id column only when the entity already has one; an absent id
/// is what routes the record to insert.
pub(crate) fn put_id(record: &mut Record, id: Option<&RecordId>) {
    if let Some(id) = id {
        record.set_id(id);
    }
}
