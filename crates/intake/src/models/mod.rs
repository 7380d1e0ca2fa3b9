//! Domain models for the resume intake pipeline.

mod document;
mod duration;
mod identity;
mod record;
mod row;

pub use document::{truncate_chars, ExtractedText, FileKind, RawDocument, DEFAULT_MAX_CHARS};
pub use duration::{format_years, parse_years, DurationCandidate, DurationSource};
pub use identity::{ExistingRecord, IdentityData, APPLIED_AT_FORMAT};
pub use record::{join_sorted_unique, split_list, CandidateRecord, PartialRecord};
pub use row::{RecordStatus, StoredRow};
