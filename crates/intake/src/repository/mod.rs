//! Persistence for accepted records and candidate identities.
//!
//! Two stores back the pipeline:
//! - a tabular record store, one row per accepted resume with a review status
//! - an identity store keyed by email, used as the duplicate baseline

mod identity;
mod rows;

pub use identity::{MemoryIdentityStore, SqliteIdentityStore};
pub use rows::{CsvRecordStore, MemoryRecordStore, ROW_DATE_FORMAT};

use crate::error::StoreError;
use crate::models::{CandidateRecord, ExistingRecord, IdentityData, RecordStatus, StoredRow};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only table of processed resumes.
pub trait RecordStore: Send {
    /// Append a row and return its serial. Serials start at 1 and increase
    /// in insertion order.
    fn append(&mut self, record: &CandidateRecord, status: RecordStatus) -> Result<u64>;

    fn read_all(&self) -> Result<Vec<StoredRow>>;

    /// Change the status of the row with `serial`. Returns false if no such row.
    fn update_status(&mut self, serial: u64, status: RecordStatus) -> Result<bool>;
}

/// Candidate identities keyed by normalized email.
pub trait IdentityStore: Send {
    fn get_by_email(&self, email: &str) -> Result<Option<ExistingRecord>>;

    /// Records whose name matches case-insensitively, oldest first.
    fn get_by_name(&self, name: &str) -> Result<Vec<ExistingRecord>>;

    /// Insert a new identity, or update the one keyed by `data.email` when
    /// `is_update` is set (bumping its application count). Returns whether a
    /// row was written.
    fn upsert(&mut self, data: &IdentityData, is_update: bool) -> Result<bool>;
}

/// Extension trait to convert rusqlite errors for missing rows to Option.
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
