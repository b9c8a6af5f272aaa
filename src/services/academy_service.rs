use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::AcademyConfig;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Skill generator is not configured")]
    NotConfigured,

    #[error("Skill generator request failed: {0}")]
    Upstream(String),

    #[error("Skill generator returned an unusable document: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
    difficulty: &'a str,
}

/// Skill document as returned by the upstream generator.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSkill {
    pub topic: Option<String>,
    pub intro: String,
    pub questions: Value,
}

/// Client for the external AI service that writes skill tutorials.
#[derive(Clone)]
pub struct SkillGenerator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for SkillGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillGenerator")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl SkillGenerator {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    /// Returns `Ok(None)` when no generator URL is configured.
    pub fn from_config(config: &AcademyConfig) -> Result<Option<Self>, GeneratorError> {
        let Some(url) = config.generator_url.as_deref().filter(|u| !u.is_empty()) else {
            return Ok(None);
        };

        Self::new(
            url,
            config.generator_api_key.clone(),
            Duration::from_secs(config.generator_timeout_secs),
        )
        .map(Some)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn generate(&self, topic: &str, difficulty: &str) -> Result<GeneratedSkill, GeneratorError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { topic, difficulty });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GeneratorError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Upstream(format!("upstream responded with {}", status)));
        }

        let skill: GeneratedSkill = response
            .json()
            .await
            .map_err(|e| GeneratorError::Malformed(e.to_string()))?;

        if skill.intro.trim().is_empty() {
            return Err(GeneratorError::Malformed("empty intro".to_string()));
        }
        if !skill.questions.is_array() {
            return Err(GeneratorError::Malformed("questions is not a list".to_string()));
        }

        tracing::debug!("Generated skill for topic '{}' ({})", topic, difficulty);
        Ok(skill)
    }
}
