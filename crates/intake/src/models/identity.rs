//! Identity-store rows used as duplicate baselines.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Format used for `last_applied_date` in the identity store.
pub const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A previously seen candidate, keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistingRecord {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub experience: String,
    pub last_applied_date: Option<NaiveDateTime>,
    pub resume_path: String,
    pub application_count: u32,
}

/// Values written by an identity-store upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityData {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub experience: String,
    pub resume_path: String,
    pub applied_at: NaiveDateTime,
}

impl IdentityData {
    pub fn applied_at_str(&self) -> String {
        self.applied_at.format(APPLIED_AT_FORMAT).to_string()
    }
}
