use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};

/// The single personal-information sheet of a vault owner.
///
/// All fields are free text; the source system collected them as form
/// strings (including `age`) and the remote columns are typed accordingly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub stream: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub next_phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    pub parent_name: Option<String>,
    pub relation: Option<String>,
    pub occupation: Option<String>,
}

impl Entity for PersonalInfo {
    const TABLE: &'static str = "personal_info";
    const CACHE_KEY: &'static str = "user-personal-info";

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
        put_text(&mut record, "age", &self.age);
        put_text(&mut record, "stream", &self.stream);
        put_text(&mut record, "gender", &self.gender);
        put_text(&mut record, "email", &self.email);
        put_text(&mut record, "contact_no", &self.contact_no);
        put_text(&mut record, "next_phone", &self.next_phone);
        put_text(&mut record, "country", &self.country);
        put_text(&mut record, "state", &self.state);
        put_text(&mut record, "district", &self.district);
        put_text(&mut record, "village", &self.village);
        put_text(&mut record, "parent_name", &self.parent_name);
        put_text(&mut record, "relation", &self.relation);
        put_text(&mut record, "occupation", &self.occupation);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            name: take_text(record, "name"),
            age: take_text(record, "age"),
            stream: take_text(record, "stream"),
            gender: take_text(record, "gender"),
            email: take_text(record, "email"),
            contact_no: take_text(record, "contact_no"),
            next_phone: take_text(record, "next_phone"),
            country: take_text(record, "country"),
            state: take_text(record, "state"),
            district: take_text(record, "district"),
            village: take_text(record, "village"),
            parent_name: take_text(record, "parent_name"),
            relation: take_text(record, "relation"),
            occupation: take_text(record, "occupation"),
        }
    }
}
