//! Field recognition for resume intake.
//!
//! Turns normalized resume text into candidate fields using pattern
//! heuristics, a named-entity backend, or a local LLM, and composes that with
//! document extraction into the batch's file processor.

pub mod parser;
pub mod services;

pub use parser::ResumeParser;
pub use services::experience::ExperienceInferencer;
pub use services::fields::{build_field_extractor, BuildError, FieldExtractor};
