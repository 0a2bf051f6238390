use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};

/// One medical record entry (visit, test result, vaccination, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Option<RecordId>,
    pub record_type: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub institution: Option<String>,
    pub doctor: Option<String>,
}

impl Entity for MedicalRecord {
    const TABLE: &'static str = "medical_records";
    const CACHE_KEY: &'static str = "user-medical-records";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        put_text(&mut record, "record_type", &self.record_type);
        put_text(&mut record, "description", &self.description);
        put_text(&mut record, "date", &self.date);
        put_text(&mut record, "institution", &self.institution);
        put_text(&mut record, "doctor", &self.doctor);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            record_type: take_text(record, "record_type"),
            description: take_text(record, "description"),
            date: take_text(record, "date"),
            institution: take_text(record, "institution"),
            doctor: take_text(record, "doctor"),
        }
    }
}
