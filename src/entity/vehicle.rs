use crate::core::{Record, RecordId};
use crate::entity::{Entity, put_id, put_text, take_text};
use serde::{Deserialize, Serialize};

/// One vehicle owned by the actor.
///
/// The remote table calls the plate column `registration_number`; the
/// domain name is `license_plate`. That aliasing lives here and nowhere
/// else.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Option<RecordId>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub license_plate: Option<String>,
    pub insurance_expiry: Option<String>,
}

impl Entity for Vehicle {
    const TABLE: &'static str = "vehicles";
    const CACHE_KEY: &'static str = "user-vehicles";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        put_text(&mut record, "make", &self.make);
        put_text(&mut record, "model", &self.model);
        put_text(&mut record, "year", &self.year);
        put_text(&mut record, "registration_number", &self.license_plate);
        put_text(&mut record, "insurance_expiry", &self.insurance_expiry);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            make: take_text(record, "make"),
            model: take_text(record, "model"),
            year: take_text(record, "year"),
            license_plate: take_text(record, "registration_number"),
            insurance_expiry: take_text(record, "insurance_expiry"),
        }
    }
}

/// One maintenance record, tied to a vehicle by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: Option<RecordId>,
    pub vehicle_id: Option<RecordId>,
    pub date: Option<String>,
    /// Kind of service performed; the remote column is named `type`.
    pub kind: Option<String>,
    pub description: Option<String>,
    pub mileage: Option<String>,
    pub cost: Option<String>,
    pub provider: Option<String>,
}

impl Entity for MaintenanceRecord {
    const TABLE: &'static str = "maintenance_records";
    const CACHE_KEY: &'static str = "user-maintenance-records";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        put_id(&mut record, self.id.as_ref());
        if let Some(vehicle_id) = &self.vehicle_id {
            record.set("vehicle_id", vehicle_id.as_str());
        }
        put_text(&mut record, "date", &self.date);
        put_text(&mut record, "type", &self.kind);
        put_text(&mut record, "description", &self.description);
        put_text(&mut record, "mileage", &self.mileage);
        put_text(&mut record, "cost", &self.cost);
        put_text(&mut record, "provider", &self.provider);
        record
    }

    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            vehicle_id: record.get_str("vehicle_id").map(RecordId::new),
            date: take_text(record, "date"),
            kind: take_text(record, "type"),
            description: take_text(record, "description"),
            mileage: take_text(record, "mileage"),
            cost: take_text(record, "cost"),
            provider: take_text(record, "provider"),
        }
    }
}
