//! Error types for dialagent

use thiserror::Error;

/// The main error type for dialagent core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A session's backing file exists but cannot be parsed. A missing file
    /// is not an error (it means an empty history); a broken one is fatal
    /// for that session so history is never silently dropped.
    #[error("history for session '{session_id}' is corrupt: {source}")]
    CorruptHistory {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Session management errors
    #[error("Session error: {0}")]
    Session(String),
}

/// A specialized Result type for dialagent core operations
pub type Result<T> = std::result::Result<T, Error>;
