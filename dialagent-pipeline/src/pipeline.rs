//! The turn pipeline: session resolution, backend dispatch, extraction,
//! persistence.

use std::time::Instant;

use dialagent_backends::{BackendId, BackendRegistry};
use dialagent_core::config::Config;
use dialagent_core::prompt::SYSTEM_PROMPT;
use dialagent_core::session::{MessageStore, SessionRegistry};
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::extract::{extract, Outcome};

/// Orchestrates one conversational turn end to end.
///
/// Owns the session registry and backend registry explicitly; there is no
/// ambient module state. One `Pipeline` handles one turn at a time (it
/// takes `&mut self`), which also enforces the no-concurrent-turns
/// precondition for sessions within this context object. Callers that span
/// multiple pipelines or processes must serialize same-session turns
/// themselves.
pub struct Pipeline {
    sessions: SessionRegistry,
    backends: BackendRegistry,
    system_prompt: String,
}

impl Pipeline {
    /// Create a pipeline from its parts
    pub fn new(
        sessions: SessionRegistry,
        backends: BackendRegistry,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            backends,
            system_prompt: system_prompt.into(),
        }
    }

    /// Create a pipeline from loaded configuration, with the built-in
    /// system prompt and all standard backends
    pub fn from_config(config: &Config) -> Self {
        let store = MessageStore::new(&config.storage.dir);
        let sessions = SessionRegistry::new(store);
        let backends = BackendRegistry::from_config(&config.backends, &config.generation);
        Self::new(sessions, backends, SYSTEM_PROMPT)
    }

    /// Run one turn: append the user message, dispatch to the selected
    /// backend, extract the reply, append it, persist the full history,
    /// and return the reply text.
    ///
    /// On backend failure the turn aborts, the error propagates, and the
    /// just-appended user message is rolled back from memory so the cached
    /// and persisted histories stay consistent: a failed turn leaves no
    /// trace.
    pub async fn run_turn(
        &mut self,
        session_id: &str,
        user_text: &str,
        backend_id: BackendId,
    ) -> Result<String> {
        let backend = self
            .backends
            .get(backend_id)
            .ok_or(PipelineError::UnknownBackend(backend_id))?;

        let (history, prior_len) = {
            let session = self.sessions.get_or_create(session_id)?;
            let prior_len = session.len();
            session.append_user(user_text);
            (session.messages.clone(), prior_len)
        };

        let start = Instant::now();
        let raw = match backend.invoke(&self.system_prompt, &history).await {
            Ok(raw) => raw,
            Err(err) => {
                if let Ok(session) = self.sessions.get_or_create(session_id) {
                    session.truncate(prior_len);
                }
                return Err(err.into());
            }
        };
        debug!(
            session_id,
            backend = %backend_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "backend call completed"
        );

        let extracted = extract(&raw);
        if extracted.outcome == Outcome::Fallback {
            warn!(session_id, backend = %backend_id, "no usable reply in raw output");
        }

        let session = self.sessions.get_or_create(session_id)?;
        session.append_assistant(&extracted.text);
        self.sessions.persist(session_id)?;

        Ok(extracted.text)
    }

    /// The session registry, for inspection by the host
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The active system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}
