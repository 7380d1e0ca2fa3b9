//! Error types shared across the pipeline.

use thiserror::Error;

/// Per-file outcome errors. The batch runner counts these as failures and
/// moves on to the next file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No extractable content in {0}")]
    NoExtractableContent(String),

    #[error("Extraction assist unavailable: {0}")]
    AssistUnavailable(String),

    #[error("No name, email, or phone found in {0}")]
    ExtractionFailed(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Timed out after {0}s")]
    TimedOut(u64),
}

/// Errors from the record and identity stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt store: {0}")]
    Corrupt(String),
}
