use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One employment entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmploymentEntry {
    pub id: Option<RecordId>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
}

impl Entity for EmploymentEntry {
    const TABLE: &'static str = "employment";
    const CACHE_KEY: &'static str = "user-employment";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        put_text(&mut record, "company", &self.company);
        put_text(&mut record, "position", &self.position);
        put_text(&mut record, "start_date", &self.start_date);
        put_text(&mut record, "end_date", &self.end_date);
        record.set("is_current", JsonValue::Bool(self.is_current));
        put_text(&mut record, "description", &self.description);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            company: take_text(record, "company"),
            position: take_text(record, "position"),
            start_date: take_text(record, "start_date"),
            end_date: take_text(record, "end_date"),
            is_current: record.get_bool("is_current").unwrap_or(false),
            description: take_text(record, "description"),
        }
    }
}
