//! Rows of the tabular record store.

use serde::{Deserialize, Serialize};

/// Review status of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    New,
    #[serde(rename = "Re-Applicant")]
    ReApplicant,
    Reviewed,
    Shortlisted,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::ReApplicant => "Re-Applicant",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "re-applicant" | "reapplicant" | "re_applicant" => Some(Self::ReApplicant),
            "reviewed" => Some(Self::Reviewed),
            "shortlisted" => Some(Self::Shortlisted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One persisted outcome. Column names match the spreadsheet header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRow {
    #[serde(rename = "Serial")]
    pub serial: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    /// `YYYY-MM-DD`
    #[serde(rename = "DateApplied")]
    pub date_applied: String,
    #[serde(rename = "Status")]
    pub status: RecordStatus,
    #[serde(rename = "ResumePath")]
    pub resume_path: String,
}
