//! Backend registry - lookup keyed by backend identifier
//!
//! Replaces branch-per-backend dispatch: each variant is registered once
//! and selected by id, so individual integrations can be swapped for mocks
//! in tests.

use crate::base::{Backend, BackendId};
use crate::gemini::GeminiBackend;
use crate::local::LocalBackend;
use crate::openai::OpenAiBackend;
use dialagent_core::config::BackendsConfig;
use dialagent_core::config::GenerationConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available backends
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<BackendId, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Create a registry with all three standard backends built from config
    pub fn from_config(config: &BackendsConfig, generation: &GenerationConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenAiBackend::new(&config.openai, generation)));
        registry.register(Arc::new(GeminiBackend::new(&config.gemini, generation)));
        registry.register(Arc::new(LocalBackend::new(&config.local, generation)));
        registry
    }

    /// Register a backend under its own id, replacing any prior entry
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.backends.insert(backend.id(), backend);
    }

    /// Look up a backend by id
    pub fn get(&self, id: BackendId) -> Option<Arc<dyn Backend>> {
        self.backends.get(&id).cloned()
    }

    /// Ids with a registered backend
    pub fn ids(&self) -> Vec<BackendId> {
        self.backends.keys().copied().collect()
    }
}
