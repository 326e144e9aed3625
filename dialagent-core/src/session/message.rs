//! Message data structures

use serde::{Deserialize, Serialize};

/// Who authored a message. Serialized as `"user"` / `"ai"` in session files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Assistant,
}

impl Role {
    /// Role name used on provider wire formats.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in a conversation. Append-only: never mutated or deleted
/// once added to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role, stored under the `type` key on disk
    #[serde(rename = "type")]
    pub role: Role,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format_tags() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"type":"user","content":"hi"}"#);

        let json = serde_json::to_string(&ChatMessage::assistant("hello")).unwrap();
        assert_eq!(json, r#"{"type":"ai","content":"hello"}"#);
    }

    #[test]
    fn test_round_trip() {
        let msg = ChatMessage::assistant("नमस्ते sir ji");
        let back: ChatMessage = serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Role::User.wire_name(), "user");
        assert_eq!(Role::Assistant.wire_name(), "assistant");
    }
}
