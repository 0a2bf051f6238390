pub mod error;
pub mod record;

pub use error::{Result, SyncError};
pub use record::{OwnerId, Record, RecordId};
