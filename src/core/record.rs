use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;

/// Column name carrying the server-assigned row identifier.
pub const ID_COLUMN: &str = "id";

/// Column name carrying the owner identifier; every read and write is
/// scoped by this column.
pub const OWNER_COLUMN: &str = "user_id";

/// Columns maintained by the remote store's defaults/triggers. They are
/// stripped before any write so the server side stays authoritative.
pub const SERVER_MANAGED_COLUMNS: &[&str] = &["created_at", "updated_at"];

/// Opaque row identifier assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the authenticated actor that owns a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier means no actor was resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One owned row: a flat mapping of column names to JSON values.
///
/// A record with no `id` has been created client-side and not yet
/// persisted; once the remote store assigns an identifier the record is
/// routed to update instead of insert. Routing is decided solely by the
/// presence of `id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: JsonMap<String, JsonValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the server-assigned identifier, if any.
    pub fn id(&self) -> Option<RecordId> {
        match self.fields.get(ID_COLUMN) {
            Some(JsonValue::String(id)) if !id.is_empty() => Some(RecordId::new(id.clone())),
            _ => None,
        }
    }

    pub fn set_id(&mut self, id: &RecordId) {
        self.fields
            .insert(ID_COLUMN.to_string(), JsonValue::String(id.as_str().to_string()));
    }

    /// Returns the owner identifier, if stamped.
    pub fn owner(&self) -> Option<OwnerId> {
        match self.fields.get(OWNER_COLUMN) {
            Some(JsonValue::String(owner)) if !owner.is_empty() => {
                Some(OwnerId::new(owner.clone()))
            }
            _ => None,
        }
    }

    /// Stamps the owner column, overwriting any previous value.
    pub fn set_owner(&mut self, owner: &OwnerId) {
        self.fields.insert(
            OWNER_COLUMN.to_string(),
            JsonValue::String(owner.as_str().to_string()),
        );
    }

    /// Removes server-managed timestamp columns so the store's own
    /// defaults/triggers apply on write.
    pub fn strip_server_fields(&mut self) {
        for column in SERVER_MANAGED_COLUMNS {
            self.fields.remove(*column);
        }
    }

    /// Sets a column value.
    pub fn set(&mut self, column: &str, value: impl Into<JsonValue>) {
        self.fields.insert(column.to_string(), value.into());
    }

    /// Returns a column value, if present and non-null.
    pub fn get(&self, column: &str) -> Option<&JsonValue> {
        match self.fields.get(column) {
            Some(JsonValue::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Returns a column as a string slice, if present and textual.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(JsonValue::as_str)
    }

    /// Returns a column as a bool, if present and boolean.
    pub fn get_bool(&self, column: &str) -> Option<bool> {
        self.get(column).and_then(JsonValue::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_presence_decides_routing_side() {
        let mut record = Record::new();
        assert!(record.id().is_none());

        record.set_id(&RecordId::new("r-1"));
        assert_eq!(record.id().unwrap().as_str(), "r-1");
    }

    #[test]
    fn test_empty_id_counts_as_absent() {
        let mut record = Record::new();
        record.set(ID_COLUMN, "");
        assert!(record.id().is_none());
    }

    #[test]
    fn test_strip_server_fields() {
        let mut record = Record::new();
        record.set("name", "Alice");
        record.set("created_at", "2024-01-01T00:00:00Z");
        record.set("updated_at", "2024-01-02T00:00:00Z");

        record.strip_server_fields();

        assert_eq!(record.get_str("name"), Some("Alice"));
        assert!(record.get("created_at").is_none());
        assert!(record.get("updated_at").is_none());
    }

    #[test]
    fn test_set_owner_overwrites() {
        let mut record = Record::new();
        record.set_owner(&OwnerId::new("owner-a"));
        record.set_owner(&OwnerId::new("owner-b"));
        assert_eq!(record.owner().unwrap().as_str(), "owner-b");
    }

    #[test]
    fn test_serde_transparent_object() {
        let record: Record =
            serde_json::from_value(json!({"id": "r-1", "name": "Alice", "user_id": "u-1"}))
                .unwrap();
        assert_eq!(record.id().unwrap().as_str(), "r-1");
        assert_eq!(record.owner().unwrap().as_str(), "u-1");

        let round = serde_json::to_value(&record).unwrap();
        assert_eq!(round["name"], json!("Alice"));
    }

    #[test]
    fn test_null_column_reads_as_absent() {
        let record: Record = serde_json::from_value(json!({"name": null})).unwrap();
        assert!(record.get("name").is_none());
        assert!(record.get_str("name").is_none());
    }
}
