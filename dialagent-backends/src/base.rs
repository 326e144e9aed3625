//! Base trait and shared types for LLM backends

use async_trait::async_trait;
use dialagent_core::prompt::RESPONSE_START_TAG;
use dialagent_core::session::ChatMessage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for backend operations.
///
/// Any of these is fatal for the turn: it must propagate to the caller
/// rather than degrade into an empty reply, which the extractor's fallback
/// text could otherwise mask as model output.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Which provider handles a turn. A per-call parameter, never persisted;
/// it may vary turn to turn for the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendId {
    /// Primary hosted chat-completion model
    #[serde(rename = "gpt4")]
    OpenAi,
    /// Alternate hosted generate-content model
    #[serde(rename = "gemini")]
    Gemini,
    /// Locally hosted fallback runtime
    #[serde(rename = "local")]
    Local,
}

impl BackendId {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendId::OpenAi => "gpt4",
            BackendId::Gemini => "gemini",
            BackendId::Local => "local",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendId {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt4" => Ok(BackendId::OpenAi),
            "gemini" => Ok(BackendId::Gemini),
            "local" => Ok(BackendId::Local),
            other => Err(BackendError::Config(format!(
                "unknown backend selector '{}'",
                other
            ))),
        }
    }
}

/// A role/content pair in provider wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

impl ApiMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Build the ordered request payload shared by the role-tagged backends:
/// system message, full history, then a synthetic trailing assistant entry
/// containing the start marker. The trailing entry biases the model to open
/// its reply with the delimiter the extractor expects.
pub fn primed_messages(system_prompt: &str, history: &[ChatMessage]) -> Vec<ApiMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ApiMessage::new("system", system_prompt));
    for msg in history {
        messages.push(ApiMessage::new(msg.role.wire_name(), &msg.content));
    }
    messages.push(ApiMessage::new("assistant", RESPONSE_START_TAG));
    messages
}

/// Trait for LLM backends.
///
/// One implementation per provider; selection happens by registry lookup,
/// so each integration can be tested and mocked independently.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send the system prompt plus conversation history and return the
    /// provider's raw text output, before any extraction.
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
    ) -> BackendResult<String>;

    /// The identifier this backend answers to
    fn id(&self) -> BackendId;
}
