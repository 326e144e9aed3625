//! Hosted generate-content backend (Gemini-style HTTP API)
//!
//! The system prompt travels in a dedicated `system_instruction` field,
//! separate from the turn content. History roles are preserved as
//! `user`/`model` rather than flattened into bare parts.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{Backend, BackendError, BackendId, BackendResult};
use dialagent_core::config::{GeminiConfig, GenerationConfig};
use dialagent_core::session::{ChatMessage, Role};

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationSettings,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationSettings {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Generate-content backend client
pub struct GeminiBackend {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl GeminiBackend {
    /// Create a backend from config. The API key falls back to the
    /// `GEMINI_API_KEY` then `GOOGLE_API_KEY` environment variables.
    pub fn new(config: &GeminiConfig, generation: &GenerationConfig) -> Self {
        let api_key = if config.api_key.is_empty() {
            std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .unwrap_or_default()
        } else {
            config.api_key.clone()
        };

        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }

    fn wire_role(role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> BackendResult<String> {
        if self.api_key.is_empty() {
            return Err(BackendError::Config(
                "Gemini API key not configured (set backends.gemini.api_key or GEMINI_API_KEY)"
                    .to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: history
                .iter()
                .map(|msg| Content {
                    role: Some(Self::wire_role(msg.role).to_string()),
                    parts: vec![Part {
                        text: msg.content.clone(),
                    }],
                })
                .collect(),
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            }),
            generation_config: GenerationSettings {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        debug!(
            model = %self.model,
            content_count = request.contents.len(),
            "sending generate-content request"
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if let Some(err) = result.error {
            return Err(BackendError::InvalidResponse(err.message));
        }

        result
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| BackendError::InvalidResponse("no candidates in response".to_string()))
    }

    fn id(&self) -> BackendId {
        BackendId::Gemini
    }
}
