//! In-memory session registry backed by the message store

use super::message::ChatMessage;
use super::store::MessageStore;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// A conversation session held in memory
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session key
    pub id: String,
    /// Ordered conversation history, append-only
    pub messages: Vec<ChatMessage>,
}

impl Session {
    /// Create an empty session
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Append the user's half of a turn
    pub fn append_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append the assistant's half of a turn
    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Drop messages beyond `len`, restoring the history to an earlier
    /// point. Used to unwind a turn that failed before completing.
    pub fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    /// Number of messages in the history
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Process-wide cache mapping session id to in-memory history.
///
/// Lazily populated from the [`MessageStore`] on first access. The registry
/// assumes it is the sole writer of a session's file for the process
/// lifetime: a cache hit never re-reads disk, and there is no locking.
/// Deployments that run concurrent turns for the same session must
/// serialize them externally. Entries are never evicted.
#[derive(Debug)]
pub struct SessionRegistry {
    store: MessageStore,
    cache: HashMap<String, Session>,
}

impl SessionRegistry {
    /// Create a registry over the given store
    pub fn new(store: MessageStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Get the cached session, loading it from the store on first access.
    /// A corrupt backing file propagates; it never silently becomes an
    /// empty history.
    pub fn get_or_create(&mut self, session_id: &str) -> Result<&mut Session> {
        if !self.cache.contains_key(session_id) {
            let messages = self.store.load(session_id)?;
            debug!(session_id, loaded = messages.len(), "session cached");
            let session = Session {
                id: session_id.to_string(),
                messages,
            };
            self.cache.insert(session_id.to_string(), session);
        }

        Ok(self
            .cache
            .get_mut(session_id)
            .expect("session inserted above"))
    }

    /// Get a session if it is already cached
    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.cache.get(session_id)
    }

    /// Write the cached session's full history to the store (overwrite,
    /// not append)
    pub fn persist(&self, session_id: &str) -> Result<()> {
        let session = self
            .cache
            .get(session_id)
            .ok_or_else(|| Error::Session(format!("session '{}' is not cached", session_id)))?;
        self.store.save(session_id, &session.messages)
    }

    /// The backing store
    pub fn store(&self) -> &MessageStore {
        &self.store
    }
}
