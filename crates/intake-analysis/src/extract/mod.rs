//! Text extraction from resume documents.
//!
//! PDFs go through poppler's command-line tools; DOCX files are read
//! directly from their zip container. Embedded images are OCR'd and their
//! text is unioned with the native text.

mod docx;
mod pdf;
mod tools;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use intake::models::{ExtractedText, FileKind, DEFAULT_MAX_CHARS};
use intake::ParseError;

use crate::ocr::OcrBackend;

pub use tools::check_binary;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractionError> for ParseError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::UnsupportedFileType(path) => ParseError::UnsupportedFormat(path),
            other => ParseError::Document(other.to_string()),
        }
    }
}

/// Converts PDF and DOCX files into normalized text.
pub struct DocumentTextExtractor {
    ocr: Option<Arc<dyn OcrBackend>>,
    max_chars: usize,
}

impl DocumentTextExtractor {
    /// `ocr` of `None` skips embedded images entirely.
    pub fn new(ocr: Option<Arc<dyn OcrBackend>>) -> Self {
        Self {
            ocr,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Extract normalized text. A document with no recoverable text yields
    /// an empty [`ExtractedText`], not an error.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let kind = FileKind::from_path(path)
            .ok_or_else(|| ExtractionError::UnsupportedFileType(path.display().to_string()))?;

        let ocr = self.ocr.as_deref();
        let raw = match kind {
            FileKind::Pdf => pdf::extract(path, ocr)?,
            FileKind::Docx => docx::extract(path, ocr)?,
        };

        let text = ExtractedText::from_raw(&raw, self.max_chars);
        debug!(
            "Extracted {} chars from {} ({})",
            text.full_text().len(),
            path.display(),
            kind.as_str()
        );
        Ok(text)
    }

    /// Availability of the external tools extraction relies on.
    pub fn check_tools() -> Vec<(String, bool)> {
        ["pdftotext", "pdfinfo", "pdfimages"]
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let extractor = DocumentTextExtractor::new(None);
        let err = extractor.extract(Path::new("resume.rtf")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFileType(_)));
        assert!(matches!(ParseError::from(err), ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_check_tools_lists_poppler() {
        let tools = DocumentTextExtractor::check_tools();
        let names: Vec<_> = tools.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["pdftotext", "pdfinfo", "pdfimages"]);
    }
}
