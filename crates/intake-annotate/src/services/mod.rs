//! Recognition services.

pub mod experience;
pub mod fields;
pub mod ner;
pub mod patterns;
pub mod skills;
