//! Configuration for the intake pipeline.
//!
//! Every section and field has a default, so an empty or missing config file
//! is valid. Environment variables (optionally from `.env`) override file values.

mod loader;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

pub use loader::{ConfigError, CONFIG_NAME};

/// How candidate fields are recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Pattern heuristics only
    #[default]
    Regex,
    /// Named-entity recognition for the name, heuristics for the rest
    Ner,
    /// Local LLM for identity fields, heuristics for skills
    Llm,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Ner => "ner",
            Self::Llm => "llm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "regex" => Some(Self::Regex),
            "ner" | "spacy" => Some(Self::Ner),
            "llm" | "ollama" => Some(Self::Llm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub mode: ExtractionMode,
    /// Character budget for the text handed to extractors.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// How many leading lines the name heuristic inspects.
    #[serde(default = "default_name_scan_lines")]
    pub name_scan_lines: usize,
    /// Prefix of the text given to the NER backend.
    #[serde(default = "default_ner_prefix_chars")]
    pub ner_prefix_chars: usize,
    /// Skill vocabulary, matched case-insensitively.
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    /// JSON array file that replaces `skills` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_file: Option<PathBuf>,
    /// Per-file processing timeout in seconds.
    #[serde(default = "default_file_timeout_secs")]
    pub file_timeout_secs: u64,
}

fn default_max_chars() -> usize {
    crate::models::DEFAULT_MAX_CHARS
}

fn default_name_scan_lines() -> usize {
    10
}

fn default_ner_prefix_chars() -> usize {
    1000
}

pub fn default_skills() -> Vec<String> {
    ["python", "excel", "sql", "java", "aws", "linux", "docker"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_file_timeout_secs() -> u64 {
    300
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            max_chars: default_max_chars(),
            name_scan_lines: default_name_scan_lines(),
            ner_prefix_chars: default_ner_prefix_chars(),
            skills: default_skills(),
            skills_file: None,
            file_timeout_secs: default_file_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    /// OCR embedded images and scanned pages.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Explicit tesseract executable; probed when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<PathBuf>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "eng".to_string()
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tesseract_path: None,
            language: default_language(),
        }
    }
}

/// Which duplicate rule the batch applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicyKind {
    /// Compare experience against the identity store baseline.
    #[default]
    Identity,
    /// Same email within `window_days` of a stored row.
    TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub policy: DuplicatePolicyKind,
    /// Experience gain (years) needed to count as a re-application.
    #[serde(default = "default_tolerance_years")]
    pub tolerance_years: f64,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_tolerance_years() -> f64 {
    0.5
}

fn default_window_days() -> i64 {
    30
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            policy: DuplicatePolicyKind::default(),
            tolerance_years: default_tolerance_years(),
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// CSV file holding one row per accepted resume.
    #[serde(default = "default_rows_path")]
    pub rows_path: PathBuf,
    /// SQLite database holding the identity store.
    #[serde(default = "default_identity_db")]
    pub identity_db: PathBuf,
}

fn default_rows_path() -> PathBuf {
    PathBuf::from("candidates.csv")
}

fn default_identity_db() -> PathBuf {
    PathBuf::from("candidates.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            rows_path: default_rows_path(),
            identity_db: default_identity_db(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub ocr: OcrSettings,
    #[serde(default = "LlmConfig::base_default")]
    pub llm: LlmConfig,
    #[serde(default)]
    pub duplicates: DuplicateConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// File this config was read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars (in addition to the `LLM_*` set):
    /// - `TESSERACT_CMD`: tesseract executable
    /// - `INTAKE_ROWS_PATH`: record store CSV path
    /// - `INTAKE_IDENTITY_DB`: identity store database path
    pub fn with_env_overrides(mut self) -> Self {
        self.llm = self.llm.with_env_overrides();
        if let Ok(val) = std::env::var("TESSERACT_CMD") {
            if !val.is_empty() {
                self.ocr.tesseract_path = Some(PathBuf::from(val));
            }
        }
        if let Ok(val) = std::env::var("INTAKE_ROWS_PATH") {
            self.storage.rows_path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("INTAKE_IDENTITY_DB") {
            self.storage.identity_db = PathBuf::from(val);
        }
        self
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.extraction.mode, ExtractionMode::Regex);
        assert_eq!(config.extraction.max_chars, 3500);
        assert_eq!(config.extraction.skills, default_skills());
        assert!(config.ocr.enabled);
        assert!(config.duplicates.enabled);
        assert_eq!(config.duplicates.window_days, 30);
        assert_eq!(config.duplicates.tolerance_years, 0.5);
        assert_eq!(config.llm.timeout_secs, 120);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [extraction]
            mode = "ner"
            skills = ["rust", "go"]

            [duplicates]
            policy = "time_window"
            window_days = 14

            [llm]
            model = "mistral"
            "#,
        )
        .unwrap();
        assert_eq!(config.extraction.mode, ExtractionMode::Ner);
        assert_eq!(config.extraction.skills, vec!["rust", "go"]);
        assert_eq!(config.extraction.name_scan_lines, 10);
        assert_eq!(config.duplicates.policy, DuplicatePolicyKind::TimeWindow);
        assert_eq!(config.duplicates.window_days, 14);
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(ExtractionMode::from_str("LLM"), Some(ExtractionMode::Llm));
        assert_eq!(ExtractionMode::from_str("spacy"), Some(ExtractionMode::Ner));
        assert_eq!(ExtractionMode::from_str("bert"), None);
    }

    #[test]
    fn test_to_toml_reparses() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.extraction, config.extraction);
        assert_eq!(parsed.storage, config.storage);
    }
}
