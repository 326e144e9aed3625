//! Shared system prompt and reply delimiter convention
//!
//! The prompt is a process-wide constant compiled into the binary; it is
//! combined with per-session history at call time and never varies per
//! session.

/// Marker the model is expected to open its reply with
pub const RESPONSE_START_TAG: &str = "<response>";

/// Marker closing the model's reply
pub const RESPONSE_END_TAG: &str = "</response>";

/// The fixed persona/policy instructions prepended to every model invocation
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.md");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_not_empty() {
        assert!(!SYSTEM_PROMPT.trim().is_empty());
    }

    #[test]
    fn test_prompt_names_the_delimiter() {
        assert!(SYSTEM_PROMPT.contains(RESPONSE_START_TAG));
        assert!(SYSTEM_PROMPT.contains(RESPONSE_END_TAG));
    }
}
