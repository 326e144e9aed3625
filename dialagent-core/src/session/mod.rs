//! Session management for conversation history
//!
//! Each session is one ongoing conversation identified by an opaque key.
//! The durable copy lives in one pretty-printed JSON file per session;
//! the registry keeps an in-memory cache for the process lifetime.

pub mod message;
pub mod registry;
pub mod store;

pub use message::{ChatMessage, Role};
pub use registry::{Session, SessionRegistry};
pub use store::MessageStore;
