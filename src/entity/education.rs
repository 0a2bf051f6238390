use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};

/// One education entry (a degree or course of study).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Option<RecordId>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub institution: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub gpa: Option<String>,
}

impl Entity for EducationEntry {
    const TABLE: &'static str = "education";
    const CACHE_KEY: &'static str = "user-education";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        put_text(&mut record, "degree", &self.degree);
        put_text(&mut record, "field", &self.field);
        put_text(&mut record, "institution", &self.institution);
        put_text(&mut record, "start_year", &self.start_year);
        put_text(&mut record, "end_year", &self.end_year);
        put_text(&mut record, "gpa", &self.gpa);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            degree: take_text(record, "degree"),
            field: take_text(record, "field"),
            institution: take_text(record, "institution"),
            start_year: take_text(record, "start_year"),
            end_year: take_text(record, "end_year"),
            gpa: take_text(record, "gpa"),
        }
    }
}
