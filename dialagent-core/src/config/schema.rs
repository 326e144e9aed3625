//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for dialagent
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Session storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Backend configuration
    #[serde(default)]
    pub backends: BackendsConfig,
    /// Shared generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where per-session history files live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for session files, created on first save
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    "chat_histories".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Per-backend settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendsConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

/// Hosted chat-completion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; resolved from `OPENAI_API_KEY` when unset
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "o4-mini".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_openai_api_base(),
            model: default_openai_model(),
        }
    }
}

/// Hosted generate-content backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; resolved from `GEMINI_API_KEY` when unset
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_gemini_api_base(),
            model: default_gemini_model(),
        }
    }
}

/// Locally hosted fallback runtime (Ollama-compatible chat endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_local_base_url")]
    pub base_url: String,
    #[serde(default = "default_local_model")]
    pub model: String,
    /// Output-token budget for local generation
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

fn default_local_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_local_model() -> String {
    "qwen2.5:0.5b-instruct".to_string()
}

fn default_max_new_tokens() -> u32 {
    200
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            base_url: default_local_base_url(),
            model: default_local_model(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

/// Generation settings shared across backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Output-token ceiling for hosted backends
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.dir, "chat_histories");
        assert_eq!(config.backends.local.max_new_tokens, 200);
        assert_eq!(config.backends.openai.api_base, "https://api.openai.com/v1");
        assert!((config.generation.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"backends":{"openai":{"api_key":"sk-test"}}}"#).unwrap();
        assert_eq!(config.backends.openai.api_key, "sk-test");
        assert_eq!(config.backends.openai.model, "o4-mini");
        assert_eq!(config.logging.level, "info");
    }
}
