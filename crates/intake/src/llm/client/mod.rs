//! LLM client for assisted resume field extraction.
//!
//! Supports the Ollama API for local LLM inference.

mod config;
mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::truncate_chars;

pub use config::LlmConfig;

/// Candidate fields returned by the LLM, normalized to plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LlmCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
}

/// LLM client for resume processing.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    format: &'static str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Check if the LLM service is available.
    pub async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        let url = format!("{}/api/tags", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// List available models.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.config.endpoint);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !resp.status().is_success() {
            return Err(LlmError::Api(format!("HTTP {}", resp.status())));
        }

        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Ask the model for name, email, phone, and experience.
    pub async fn extract_candidate(&self, text: &str) -> Result<LlmCandidate, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }

        let content = escape_for_prompt(truncate_chars(text, self.config.max_content_chars));
        let prompt = self
            .config
            .get_extraction_prompt()
            .replace("{content}", &content);

        debug!(
            "Requesting field extraction from {} ({} chars)",
            self.config.model,
            content.len()
        );
        let response = self.call_ollama(&prompt).await?;

        parse_candidate_json(&response).inspect_err(|e| {
            warn!("Unusable extraction response from {}: {}", self.config.model, e);
        })
    }

    /// Call Ollama API with a prompt.
    async fn call_ollama(&self, prompt: &str) -> Result<String, LlmError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            format: "json",
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama_resp: OllamaResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.config.timeout_secs)
            } else {
                LlmError::Parse(e.to_string())
            }
        })?;

        Ok(ollama_resp.response)
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.config.timeout_secs)
        } else {
            LlmError::Connection(e.to_string())
        }
    }
}

/// Escape resume text so it cannot close the quoted block in the prompt.
fn escape_for_prompt(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parse the model's reply into an [`LlmCandidate`].
///
/// Models often wrap the object in prose, so the slice from the first `{` to
/// the last `}` is decoded. Keys are matched case-insensitively; strings,
/// numbers, arrays, and nulls are all accepted as values.
pub fn parse_candidate_json(response: &str) -> Result<LlmCandidate, LlmError> {
    let start = response.find('{');
    let end = response.rfind('}');
    let slice = match (start, end) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => return Err(LlmError::Parse("no JSON object in response".to_string())),
    };

    let value: serde_json::Value =
        serde_json::from_str(slice).map_err(|e| LlmError::Parse(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| LlmError::Parse("response is not a JSON object".to_string()))?;

    let field = |key: &str| -> String {
        object
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| value_to_string(v))
            .unwrap_or_default()
    };

    Ok(LlmCandidate {
        name: field("name"),
        email: field("email"),
        phone: field("phone"),
        experience: field("experience"),
    })
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to connect to LLM service
    #[error("Connection error: {0}")]
    Connection(String),
    /// No complete response within the configured timeout
    #[error("Timed out after {0}s")]
    Timeout(u64),
    /// API returned an error
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
    /// LLM is disabled
    #[error("LLM is disabled")]
    Disabled,
}
