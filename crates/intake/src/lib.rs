//! intake - resume intake pipeline core.
//!
//! Core library exposing the data model, configuration, stores, duplicate
//! policy, and batch runner shared by the workspace crates.

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod batch;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{ParseError, StoreError};
