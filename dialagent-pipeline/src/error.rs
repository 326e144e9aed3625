//! Error types for turn orchestration

use dialagent_backends::{BackendError, BackendId};
use thiserror::Error;

/// Everything that can abort a turn
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Session or configuration failure (including corrupt history)
    #[error(transparent)]
    Core(#[from] dialagent_core::Error),

    /// Provider call failed; the turn aborts, nothing is persisted
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The requested backend has no registered implementation
    #[error("no backend registered for '{0}'")]
    UnknownBackend(BackendId),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
