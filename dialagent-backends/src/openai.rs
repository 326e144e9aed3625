//! Hosted chat-completion backend (OpenAI-compatible HTTP API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{
    primed_messages, ApiMessage, Backend, BackendError, BackendId, BackendResult,
};
use dialagent_core::config::{GenerationConfig, OpenAiConfig};
use dialagent_core::session::ChatMessage;

/// Chat-completion API request format
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f64,
}

/// Chat-completion API response format
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion backend client
pub struct OpenAiBackend {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiBackend {
    /// Create a backend from config. The API key falls back to the
    /// `OPENAI_API_KEY` environment variable when unset.
    pub fn new(config: &OpenAiConfig, generation: &GenerationConfig) -> Self {
        let api_key = if config.api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
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
}

#[async_trait]
impl Backend for OpenAiBackend {
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> BackendResult<String> {
        if self.api_key.is_empty() {
            return Err(BackendError::Config(
                "OpenAI API key not configured (set backends.openai.api_key or OPENAI_API_KEY)"
                    .to_string(),
            ));
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: primed_messages(system_prompt, history),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!(
            model = %self.model,
            message_count = request.messages.len(),
            "sending chat-completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Api { status, body });
        }

        let response_data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        response_data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::InvalidResponse("no choices in response".to_string()))
    }

    fn id(&self) -> BackendId {
        BackendId::OpenAi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_keeps_primer_last() {
        let request = ChatCompletionRequest {
            model: "o4-mini".to_string(),
            messages: primed_messages("persona", &[ChatMessage::user("hi")]),
            max_tokens: 4096,
            temperature: 0.7,
        };

        let json = serde_json::to_value(&request).unwrap();
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.last().unwrap()["role"], "assistant");
        assert_eq!(messages.last().unwrap()["content"], "<response>");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hello sir ji"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Hello sir ji")
        );
    }

    #[test]
    fn test_response_without_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = OpenAiConfig {
            api_key: "sk-test".to_string(),
            api_base: "https://api.example.com/v1/".to_string(),
            model: "o4-mini".to_string(),
        };
        let backend = OpenAiBackend::new(&config, &GenerationConfig::default());
        assert_eq!(backend.api_base, "https://api.example.com/v1");
    }
}
