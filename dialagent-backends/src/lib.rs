//! LLM backend integrations for dialagent
//!
//! This crate provides the [`Backend`] trait, a registry for selecting a
//! backend by identifier, and the three provider implementations: a hosted
//! chat-completion API, a hosted generate-content API, and a locally hosted
//! Ollama-compatible runtime.

pub mod base;
pub mod gemini;
pub mod local;
pub mod openai;
pub mod registry;

pub use base::{ApiMessage, Backend, BackendError, BackendId, BackendResult};
pub use gemini::GeminiBackend;
pub use local::LocalBackend;
pub use openai::OpenAiBackend;
pub use registry::BackendRegistry;
