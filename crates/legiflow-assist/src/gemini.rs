//! Live Gemini-style HTTP backend
//!
//! One request, one response: no retries, no timeout policy, no
//! cancellation, no concurrent request coordination. Failures surface to
//! the caller as `AssistError`.

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::DraftAssistant;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// HTTP-backed drafting assistant
#[derive(Debug)]
pub struct HttpAssistant {
    config: AssistConfig,
    api_key: String,
    client: reqwest::Client,
}

impl HttpAssistant {
    /// Create a live assistant from configuration
    ///
    /// # Errors
    /// - `AssistError::MissingApiKey` if no key is configured
    pub fn new(config: AssistConfig) -> Result<Self, AssistError> {
        let api_key = config.api_key.clone().ok_or(AssistError::MissingApiKey)?;
        Ok(Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: &self.config.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
            },
        }
    }
}

#[async_trait]
impl DraftAssistant for HttpAssistant {
    async fn complete(&self, prompt: &str) -> Result<String, AssistError> {
        tracing::debug!(model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "assistant request failed");
            return Err(AssistError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AssistError::EmptyResponse)?;

        Ok(text)
    }
}
