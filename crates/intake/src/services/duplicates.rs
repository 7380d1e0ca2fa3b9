//! Duplicate resolution for incoming candidates.
//!
//! The identity policy compares a candidate's experience against the last
//! stored baseline for the same person: more experience (beyond a tolerance)
//! means the candidate re-applied with an updated resume; anything else is a
//! duplicate to ignore. The time-window rule is the simpler check used when
//! only the record store is available.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::DuplicateConfig;
use crate::error::StoreError;
use crate::models::{parse_years, split_list, CandidateRecord, ExistingRecord, IdentityData, StoredRow};
use crate::repository::{IdentityStore, ROW_DATE_FORMAT};

/// What to do with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    New,
    ReApplicant,
    Duplicate,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::ReApplicant => "re-applicant",
            Self::Duplicate => "duplicate",
        }
    }
}

/// How the baseline record was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    Email,
    /// Name-only match; weaker than an email match.
    Name,
}

/// Identity-store write owed by a resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIdentity {
    pub data: IdentityData,
    pub is_update: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub disposition: Disposition,
    pub matched_by: Option<MatchedBy>,
    pub previous: Option<ExistingRecord>,
    /// Written by [`Resolution::commit`] once the row itself is stored.
    pub pending: Option<PendingIdentity>,
}

impl Resolution {
    fn new_candidate(pending: Option<PendingIdentity>) -> Self {
        Self {
            disposition: Disposition::New,
            matched_by: None,
            previous: None,
            pending,
        }
    }

    /// Apply the pending identity write, if any. Returns whether a row was
    /// written.
    pub fn commit(&self, store: &mut dyn IdentityStore) -> Result<bool, StoreError> {
        match &self.pending {
            Some(pending) => store.upsert(&pending.data, pending.is_update),
            None => Ok(false),
        }
    }
}

/// Identity-store backed duplicate policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateResolutionPolicy {
    tolerance_years: f64,
}

impl Default for DuplicateResolutionPolicy {
    fn default() -> Self {
        Self {
            tolerance_years: 0.5,
        }
    }
}

impl DuplicateResolutionPolicy {
    pub fn new(tolerance_years: f64) -> Self {
        Self { tolerance_years }
    }

    pub fn from_config(config: &DuplicateConfig) -> Self {
        Self::new(config.tolerance_years)
    }

    /// Classify `candidate` against `store` without writing to it.
    ///
    /// New candidates and re-applicants carry the identity write they owe in
    /// [`Resolution::pending`]; duplicates carry none.
    pub fn decide(
        &self,
        candidate: &CandidateRecord,
        store: &dyn IdentityStore,
        check_enabled: bool,
    ) -> Result<Resolution, StoreError> {
        if !check_enabled {
            return Ok(Resolution::new_candidate(None));
        }

        let email = candidate.primary_email();
        let mut baseline = match email {
            Some(ref email) => store.get_by_email(email)?.map(|r| (r, MatchedBy::Email)),
            None => None,
        };
        if baseline.is_none() && !candidate.name.trim().is_empty() {
            baseline = store
                .get_by_name(&candidate.name)?
                .into_iter()
                .next()
                .map(|r| (r, MatchedBy::Name));
            if let Some((ref record, _)) = baseline {
                debug!(
                    "Matched {} by name to stored record {}",
                    candidate.name, record.email
                );
            }
        }

        let Some((previous, matched_by)) = baseline else {
            let pending = match email {
                Some(email) => Some(PendingIdentity {
                    data: identity_data(candidate, email),
                    is_update: false,
                }),
                None => {
                    warn!(
                        "Not recording {} in identity store: no email",
                        candidate.source_path.display()
                    );
                    None
                }
            };
            return Ok(Resolution::new_candidate(pending));
        };

        let old_years = parse_years(&previous.experience);
        let new_years = candidate.experience_value();

        let (disposition, pending) = if new_years - old_years > self.tolerance_years {
            info!(
                "Re-applicant {}: experience {} -> {}",
                previous.email, old_years, new_years
            );
            // The baseline's email is the key, even when matched by name.
            let pending = PendingIdentity {
                data: identity_data(candidate, previous.email.clone()),
                is_update: true,
            };
            (Disposition::ReApplicant, Some(pending))
        } else {
            debug!(
                "Duplicate of {}: experience {} vs stored {}",
                previous.email, new_years, old_years
            );
            (Disposition::Duplicate, None)
        };

        Ok(Resolution {
            disposition,
            matched_by: Some(matched_by),
            previous: Some(previous),
            pending,
        })
    }

    /// [`decide`](Self::decide) and immediately [`commit`](Resolution::commit).
    pub fn resolve(
        &self,
        candidate: &CandidateRecord,
        store: &mut dyn IdentityStore,
        check_enabled: bool,
    ) -> Result<Resolution, StoreError> {
        let resolution = self.decide(candidate, &*store, check_enabled)?;
        resolution.commit(store)?;
        Ok(resolution)
    }
}

fn identity_data(candidate: &CandidateRecord, email: String) -> IdentityData {
    IdentityData {
        email,
        name: candidate.name.clone(),
        phone: candidate.phone.clone(),
        experience: format!("{}", candidate.experience_value()),
        resume_path: candidate.source_path.display().to_string(),
        applied_at: Local::now().naive_local(),
    }
}

/// True if `email` already applied within `window_days` of `today`.
///
/// A matching row with a missing or unparseable date also counts as a
/// duplicate. An empty email never does.
pub fn is_recent_duplicate(
    rows: &[StoredRow],
    email: &str,
    window_days: i64,
    today: NaiveDate,
) -> bool {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return false;
    }

    rows.iter()
        .filter(|row| split_list(&row.email).any(|e| e.to_lowercase() == email))
        .any(|row| {
            match NaiveDate::parse_from_str(row.date_applied.trim(), ROW_DATE_FORMAT) {
                Ok(applied) => (today - applied).num_days() <= window_days,
                Err(_) => true,
            }
        })
}
