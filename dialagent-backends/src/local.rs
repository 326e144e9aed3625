//! Locally hosted fallback backend (Ollama-compatible chat endpoint)
//!
//! Same role-tagged, primer-terminated message list as the hosted
//! chat-completion variant; generation is bounded by `max_new_tokens` and
//! leftover chat-template control tokens are stripped from the output.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{
    primed_messages, ApiMessage, Backend, BackendError, BackendId, BackendResult,
};
use dialagent_core::config::{GenerationConfig, LocalConfig};
use dialagent_core::session::ChatMessage;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ApiMessage>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
    /// Output-token budget
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Control tokens some chat templates leak into decoded output
const CONTROL_TOKENS: [&str; 4] = ["<|im_start|>", "<|im_end|>", "<|endoftext|>", "</s>"];

fn strip_control_tokens(text: &str) -> String {
    let mut cleaned = text.to_string();
    for token in CONTROL_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned
}

/// Local runtime backend client
pub struct LocalBackend {
    client: Client,
    base_url: String,
    model: String,
    max_new_tokens: u32,
    temperature: f64,
}

impl LocalBackend {
    pub fn new(config: &LocalConfig, generation: &GenerationConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_new_tokens: config.max_new_tokens,
            temperature: generation.temperature,
        }
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> BackendResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: primed_messages(system_prompt, history),
            stream: false,
            options: Options {
                temperature: self.temperature,
                num_predict: self.max_new_tokens,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!(
            model = %self.model,
            message_count = request.messages.len(),
            num_predict = self.max_new_tokens,
            "sending local chat request"
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(strip_control_tokens(&chat_response.message.content))
    }

    fn id(&self) -> BackendId {
        BackendId::Local
    }
}
