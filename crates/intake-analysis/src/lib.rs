//! Document text extraction and OCR for resume intake.

pub mod extract;
pub mod ocr;

pub use extract::{DocumentTextExtractor, ExtractionError};
pub use ocr::{OcrBackend, OcrError, OcrInput, TesseractBackend};
