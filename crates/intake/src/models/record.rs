//! Candidate records produced by field extraction.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::duration::parse_years;
use crate::error::ParseError;

/// Raw output of a field extractor. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience: String,
}

impl PartialRecord {
    /// True when at least one of name, email, or phone was found.
    pub fn has_identity(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .any(|field| !field.trim().is_empty())
    }

    /// Promote to a [`CandidateRecord`] for the resume at `source`.
    ///
    /// Multi-valued email and phone fields are re-normalized so the record
    /// always carries a sorted, de-duplicated, comma-joined list.
    pub fn into_record(self, source: &Path) -> Result<CandidateRecord, ParseError> {
        if !self.has_identity() {
            return Err(ParseError::ExtractionFailed(source.display().to_string()));
        }

        let source_path = std::path::absolute(source).unwrap_or_else(|_| source.to_path_buf());

        Ok(CandidateRecord {
            name: self.name.trim().to_string(),
            email: join_sorted_unique(split_list(&self.email).map(|e| e.to_lowercase())),
            phone: join_sorted_unique(split_list(&self.phone)),
            skills: self.skills.trim().to_string(),
            experience_years: self.experience.trim().to_string(),
            source_path,
        })
    }
}

/// A candidate with at least one identifying field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub experience_years: String,
    pub source_path: PathBuf,
}

impl CandidateRecord {
    /// First email of the sorted list, trimmed and lower-cased.
    pub fn primary_email(&self) -> Option<String> {
        split_list(&self.email).next().map(|e| e.to_lowercase())
    }

    /// Numeric experience, 0 when absent or unparseable.
    pub fn experience_value(&self) -> f64 {
        parse_years(&self.experience_years)
    }
}

/// Split a comma-joined list into trimmed non-empty items.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Sort, de-duplicate, and join values with ", ".
pub fn join_sorted_unique<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}
