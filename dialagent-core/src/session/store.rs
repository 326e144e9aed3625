//! File-backed message store
//!
//! The sole component that touches the filesystem for conversation state.
//! One JSON file per session, pretty-printed for human inspection.

use super::message::ChatMessage;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Reads and writes per-session history files
#[derive(Debug, Clone)]
pub struct MessageStore {
    /// Storage directory, created lazily on first save
    dir: PathBuf,
}

impl MessageStore {
    /// Create a store rooted at `dir`. Nothing is created on disk until
    /// the first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load a session's history. A missing file means an empty history;
    /// a file that exists but cannot be parsed is fatal for that session.
    pub fn load(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let path = self.session_path(session_id);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| Error::CorruptHistory {
            session_id: session_id.to_string(),
            source,
        })
    }

    /// Save the full ordered history, overwriting any prior content.
    /// Idempotent: the same sequence always produces identical bytes.
    pub fn save(&self, session_id: &str, messages: &[ChatMessage]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.session_path(session_id);
        let content = serde_json::to_string_pretty(messages)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// The file path for a session: `session_<id>.json`, with characters
    /// that are hostile to filesystems replaced.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        let safe_id = session_id.replace([':', '/', '\\'], "_");
        self.dir.join(format!("session_{}.json", safe_id))
    }
}
