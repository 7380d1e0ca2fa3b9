//! OCR backend abstraction.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Errors from OCR backends.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image handed to a backend.
#[derive(Debug, Clone, Copy)]
pub enum OcrInput<'a> {
    Path(&'a Path),
    /// Encoded image bytes; `extension` names the format (e.g. "png").
    Bytes { data: &'a [u8], extension: &'a str },
}

/// Trait for OCR backends.
pub trait OcrBackend: Send + Sync {
    /// Backend identifier for logs and status output.
    fn name(&self) -> &'static str;

    /// Check if this backend can run (binary installed, etc.).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Run OCR, reporting why it failed.
    fn try_recognize(&self, input: OcrInput<'_>) -> Result<String, OcrError>;

    /// Run OCR. Failures are logged and yield an empty string, so callers
    /// can always union the result with other text.
    fn recognize(&self, input: OcrInput<'_>) -> String {
        match self.try_recognize(input) {
            Ok(text) => text,
            Err(e) => {
                warn!("{} OCR skipped: {}", self.name(), e);
                String::new()
            }
        }
    }
}
