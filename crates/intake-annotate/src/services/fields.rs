//! Field extractors: regex-only, NER-assisted, and LLM-assisted.
//!
//! All three share the regex recognizers for whatever their assist does not
//! cover, so every variant reports contact lists and skills the same way.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use intake::config::{Config, ConfigError, ExtractionConfig, ExtractionMode};
use intake::llm::{LlmCandidate, LlmClient, LlmError};
use intake::models::{format_years, parse_years, truncate_chars, ExtractedText, PartialRecord};
use intake::ParseError;

use super::experience::ExperienceInferencer;
use super::ner::{EntityLabel, NerBackend, PatternNerBackend};
use super::patterns::{extract_emails, extract_phones, guess_name};
use super::skills::SkillVocabulary;

/// Longest person entity accepted as a candidate name.
const MAX_NER_NAME_CHARS: usize = 35;

/// Turns normalized resume text into candidate fields.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    fn mode(&self) -> ExtractionMode;

    async fn extract(&self, text: &ExtractedText) -> Result<PartialRecord, ParseError>;
}

/// Errors building an extractor from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("LLM client: {0}")]
    Llm(#[from] LlmError),
}

/// Build the extractor selected by `extraction.mode`.
pub fn build_field_extractor(config: &Config) -> Result<Arc<dyn FieldExtractor>, BuildError> {
    let skills = SkillVocabulary::new(config.skill_vocabulary()?);
    let fields = RegexFieldExtractor::from_config(&config.extraction, skills);
    debug!(
        mode = config.extraction.mode.as_str(),
        skills = fields.skills.len(),
        "building field extractor"
    );

    Ok(match config.extraction.mode {
        ExtractionMode::Regex => Arc::new(fields),
        ExtractionMode::Ner => Arc::new(
            NerFieldExtractor::new(fields, Some(Arc::new(PatternNerBackend::new())))
                .with_prefix_chars(config.extraction.ner_prefix_chars),
        ),
        ExtractionMode::Llm => {
            if !config.llm.enabled {
                warn!("Extraction mode is llm but the LLM is disabled; every file will fail");
            }
            Arc::new(LlmFieldExtractor::new(LlmClient::new(config.llm.clone())?, fields))
        }
    })
}

/// Pattern heuristics only.
pub struct RegexFieldExtractor {
    skills: SkillVocabulary,
    experience: ExperienceInferencer,
    name_scan_lines: usize,
}

impl RegexFieldExtractor {
    pub fn new(skills: SkillVocabulary) -> Self {
        Self {
            skills,
            experience: ExperienceInferencer::new(),
            name_scan_lines: 10,
        }
    }

    pub fn from_config(config: &ExtractionConfig, skills: SkillVocabulary) -> Self {
        Self::new(skills).with_name_scan_lines(config.name_scan_lines)
    }

    pub fn with_name_scan_lines(mut self, lines: usize) -> Self {
        self.name_scan_lines = lines;
        self
    }

    pub fn with_experience(mut self, experience: ExperienceInferencer) -> Self {
        self.experience = experience;
        self
    }

    fn recognize(&self, text: &ExtractedText) -> PartialRecord {
        let body = text.text();
        PartialRecord {
            name: guess_name(text.lines(), self.name_scan_lines),
            email: extract_emails(body),
            phone: extract_phones(body),
            skills: self.skills.extract(body),
            experience: self.experience.infer(body),
        }
    }
}

#[async_trait]
impl FieldExtractor for RegexFieldExtractor {
    fn mode(&self) -> ExtractionMode {
        ExtractionMode::Regex
    }

    async fn extract(&self, text: &ExtractedText) -> Result<PartialRecord, ParseError> {
        Ok(self.recognize(text))
    }
}

/// Takes the name from a NER backend, everything else from patterns.
pub struct NerFieldExtractor {
    fields: RegexFieldExtractor,
    backend: Option<Arc<dyn NerBackend>>,
    prefix_chars: usize,
}

impl NerFieldExtractor {
    pub fn new(fields: RegexFieldExtractor, backend: Option<Arc<dyn NerBackend>>) -> Self {
        Self {
            fields,
            backend,
            prefix_chars: 1000,
        }
    }

    pub fn with_prefix_chars(mut self, chars: usize) -> Self {
        self.prefix_chars = chars;
        self
    }

    fn person_name(&self, text: &ExtractedText) -> Option<String> {
        let Some(backend) = &self.backend else {
            debug!("No NER backend, using name heuristic");
            return None;
        };

        let prefix = truncate_chars(text.text(), self.prefix_chars);
        backend
            .recognize(prefix)
            .into_iter()
            .filter(|e| e.label == EntityLabel::Person)
            .map(|e| e.text.trim().to_string())
            .find(|name| {
                let tokens = name.split_whitespace().count();
                (2..=4).contains(&tokens) && name.chars().count() < MAX_NER_NAME_CHARS
            })
    }
}

#[async_trait]
impl FieldExtractor for NerFieldExtractor {
    fn mode(&self) -> ExtractionMode {
        ExtractionMode::Ner
    }

    async fn extract(&self, text: &ExtractedText) -> Result<PartialRecord, ParseError> {
        let mut record = self.fields.recognize(text);
        if let Some(name) = self.person_name(text) {
            record.name = name;
        }
        Ok(record)
    }
}

/// Asks a local LLM for identity fields and experience.
pub struct LlmFieldExtractor {
    client: LlmClient,
    fields: RegexFieldExtractor,
}

impl LlmFieldExtractor {
    pub fn new(client: LlmClient, fields: RegexFieldExtractor) -> Self {
        Self { client, fields }
    }

    /// The model's own experience estimate is kept (normalized); no pattern
    /// inference runs in this mode.
    fn merge(&self, candidate: LlmCandidate, text: &ExtractedText) -> PartialRecord {
        let experience = if candidate.experience.starts_with(|c: char| c.is_ascii_digit()) {
            format_years(parse_years(&candidate.experience))
        } else {
            String::new()
        };

        PartialRecord {
            name: candidate.name,
            email: candidate.email.to_lowercase(),
            phone: candidate.phone,
            skills: self.fields.skills.extract(text.text()),
            experience,
        }
    }
}

#[async_trait]
impl FieldExtractor for LlmFieldExtractor {
    fn mode(&self) -> ExtractionMode {
        ExtractionMode::Llm
    }

    async fn extract(&self, text: &ExtractedText) -> Result<PartialRecord, ParseError> {
        let candidate = self
            .client
            .extract_candidate(text.text())
            .await
            .map_err(|e| {
                warn!(
                    endpoint = %self.client.config().endpoint,
                    model = %self.client.config().model,
                    "LLM extraction failed: {}",
                    e
                );
                ParseError::AssistUnavailable(e.to_string())
            })?;
        Ok(self.merge(candidate, text))
    }
}
