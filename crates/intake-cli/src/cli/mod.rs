//! Command-line interface for intake.

mod commands;
pub mod helpers;
pub mod icons;

pub use commands::{is_verbose, run};
