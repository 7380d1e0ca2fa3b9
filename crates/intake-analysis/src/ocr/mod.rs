//! OCR backends.
//!
//! Tesseract is the only engine; it is driven through its command-line
//! binary so nothing needs to be linked.

mod backend;
mod tesseract;

pub use backend::{OcrBackend, OcrError, OcrInput};
pub use tesseract::{resolve_tesseract, TesseractBackend};
