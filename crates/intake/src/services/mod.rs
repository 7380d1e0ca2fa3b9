//! Pipeline services that sit between extraction and persistence.

pub mod duplicates;

pub use duplicates::{
    is_recent_duplicate, Disposition, DuplicateResolutionPolicy, MatchedBy, PendingIdentity,
    Resolution,
};
