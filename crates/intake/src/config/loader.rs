//! Configuration file discovery and loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Config;

/// Name `prefer` discovers config files under (`intake.toml`, `intake.json`, ...).
pub const CONFIG_NAME: &str = "intake";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to render config: {0}")]
    Serialize(String),

    #[error("Invalid skills file {path}: {message}")]
    Skills { path: PathBuf, message: String },
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path wins. Otherwise `prefer` discovers an `intake` config
    /// file in the standard locations, falling back to built-in defaults.
    /// Environment overrides are applied last in every case.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_path(path);
        }

        // prefer handles discovery; decoding stays with serde.
        match prefer::load(CONFIG_NAME).await {
            Ok(discovered) => match discovered.source_path() {
                Some(path) => {
                    tracing::debug!("Using config file: {}", path.display());
                    Self::load_from_path(path)
                }
                None => Ok(Self::default_with_env()),
            },
            Err(e) => {
                tracing::debug!("No config file found ({}), using defaults", e);
                Ok(Self::default_with_env())
            }
        }
    }

    /// Load a specific config file and apply environment overrides.
    ///
    /// `.json` files are read as JSON; anything else as TOML.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let mut config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            _ => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
        };
        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Built-in defaults with environment overrides.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// The skill vocabulary, read from `skills_file` when one is configured.
    pub fn skill_vocabulary(&self) -> Result<Vec<String>, ConfigError> {
        let Some(ref path) = self.extraction.skills_file else {
            return Ok(self.extraction.skills.clone());
        };
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str::<Vec<String>>(&contents).map_err(|e| ConfigError::Skills {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path_records_source() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ocr]\nlanguage = \"deu\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.source_path.as_deref(), Some(file.path()));
    }

    #[tokio::test]
    async fn test_explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/intake.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_explicit_path_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[duplicates]\ntolerance_years = 1.5").unwrap();
        let config = Config::load(Some(file.path())).await.unwrap();
        assert_eq!(config.duplicates.tolerance_years, 1.5);
    }

    #[test]
    fn test_json_config_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"ocr": {{"language": "fra"}}}}"#).unwrap();
        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.ocr.language, "fra");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[extraction\nmode = ").unwrap();
        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_skills_file_replaces_inline_list() {
        let mut skills = NamedTempFile::new().unwrap();
        write!(skills, r#"["Rust", "Kubernetes"]"#).unwrap();

        let mut config = Config::default();
        config.extraction.skills_file = Some(skills.path().to_path_buf());
        assert_eq!(config.skill_vocabulary().unwrap(), vec!["Rust", "Kubernetes"]);

        config.extraction.skills_file = None;
        assert_eq!(config.skill_vocabulary().unwrap(), super::super::default_skills());
    }
}
