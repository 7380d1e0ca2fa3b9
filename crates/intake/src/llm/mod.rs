//! LLM integration for assisted field extraction.
//!
//! Uses a local LLM (via Ollama) to pull candidate fields out of resume text
//! when the heuristic extractors are not enough.

mod client;

pub use client::{parse_candidate_json, LlmCandidate, LlmClient, LlmConfig, LlmError};
