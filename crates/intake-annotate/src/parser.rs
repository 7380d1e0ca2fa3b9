//! Resume parsing: document text extraction followed by field recognition.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use intake::batch::FileProcessor;
use intake::config::Config;
use intake::models::{CandidateRecord, ExtractedText, RawDocument};
use intake::ParseError;
use intake_analysis::{DocumentTextExtractor, OcrBackend, TesseractBackend};

use crate::services::fields::{build_field_extractor, BuildError, FieldExtractor};

/// Parses one resume file into a [`CandidateRecord`].
pub struct ResumeParser {
    extractor: Arc<DocumentTextExtractor>,
    fields: Arc<dyn FieldExtractor>,
}

impl ResumeParser {
    pub fn new(extractor: DocumentTextExtractor, fields: Arc<dyn FieldExtractor>) -> Self {
        Self {
            extractor: Arc::new(extractor),
            fields,
        }
    }

    /// Wire OCR, text extraction, and the configured field extractor.
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        let ocr = if config.ocr.enabled {
            let mut backend = TesseractBackend::new().with_language(&config.ocr.language);
            if let Some(ref command) = config.ocr.tesseract_path {
                backend = backend.with_command(command);
            }
            if !backend.is_available() {
                warn!("{}; embedded images will be skipped", backend.availability_hint());
            }
            Some(Arc::new(backend) as Arc<dyn OcrBackend>)
        } else {
            debug!("OCR disabled by configuration");
            None
        };

        let extractor =
            DocumentTextExtractor::new(ocr).with_max_chars(config.extraction.max_chars);
        Ok(Self::new(extractor, build_field_extractor(config)?))
    }

    pub fn fields(&self) -> &dyn FieldExtractor {
        self.fields.as_ref()
    }

    /// Extract the document's text on the blocking pool.
    pub async fn extract_text(&self, path: &Path) -> Result<ExtractedText, ParseError> {
        let document = RawDocument::new(path)?;
        let extractor = Arc::clone(&self.extractor);
        let path: PathBuf = document.path.clone();

        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(|e| ParseError::Document(format!("extraction task failed: {}", e)))?
            .map_err(ParseError::from)
    }

    pub async fn parse(&self, path: &Path) -> Result<CandidateRecord, ParseError> {
        let text = self.extract_text(path).await?;
        if text.is_empty() {
            return Err(ParseError::NoExtractableContent(path.display().to_string()));
        }

        let partial = self.fields.extract(&text).await?;
        debug!(
            path = %path.display(),
            mode = self.fields.mode().as_str(),
            has_name = !partial.name.is_empty(),
            has_email = !partial.email.is_empty(),
            "recognized fields"
        );
        partial.into_record(path)
    }
}

#[async_trait]
impl FileProcessor for ResumeParser {
    async fn process(&self, path: &Path) -> Result<CandidateRecord, ParseError> {
        self.parse(path).await
    }
}
