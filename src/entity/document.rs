use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};

/// One uploaded document.
///
/// The binary itself lives in the object store under an owner-prefixed
/// path; this row only carries its metadata and the retrievable URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub upload_date: Option<String>,
    pub file_size: Option<String>,
    pub file_type: Option<String>,
    pub file_url: Option<String>,
}

impl Entity for Document {
    const TABLE: &'static str = "documents";
    const CACHE_KEY: &'static str = "user-documents";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        put_text(&mut record, "name", &self.name);
        put_text(&mut record, "category", &self.category);
        put_text(&mut record, "upload_date", &self.upload_date);
        put_text(&mut record, "file_size", &self.file_size);
        put_text(&mut record, "file_type", &self.file_type);
        put_text(&mut record, "file_url", &self.file_url);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            name: take_text(record, "name"),
            category: take_text(record, "category"),
            upload_date: take_text(record, "upload_date"),
            file_size: take_text(record, "file_size"),
            file_type: take_text(record, "file_type"),
            file_url: take_text(record, "file_url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let doc = Document {
            id: Some(RecordId::new("d-1")),
            name: Some("passport.pdf".to_string()),
            category: Some("identity".to_string()),
            upload_date: Some("2024-06-01".to_string()),
            file_size: Some("1.2 MB".to_string()),
            file_type: Some("application/pdf".to_string()),
            file_url: Some("https://files.example.co/u-1/passport.pdf".to_string()),
        };
        assert_eq!(Document::from_record(&doc.to_record()), doc);
    }
}
