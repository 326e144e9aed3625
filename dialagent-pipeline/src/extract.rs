//! Response extraction
//!
//! Pure post-processing of raw model output into the clean reply text.
//! The fallback ladder is an explicit contract: strict delimiter match,
//! then prefix-only match (tolerating truncated generations), then raw
//! passthrough, then a fixed fallback when nothing usable remains.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned when the raw output is empty after all stripping
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a valid response.";

static STRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<response>(.*?)</response>").expect("valid regex"));
static PREFIX_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<response>(.*)").expect("valid regex"));
static LEADING_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^assistant[\s:\-]*").expect("valid regex"));

/// Which rung of the ladder produced the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Delimited region with both markers present
    Strict,
    /// Start marker present, end marker missing or truncated
    PrefixOnly,
    /// No markers at all; the whole input, trimmed
    Passthrough,
    /// Nothing usable remained; `FALLBACK_REPLY` was substituted
    Fallback,
}

/// Extraction result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub outcome: Outcome,
}

/// Extract the intended reply from raw model output.
///
/// Deterministic and side-effect-free. A leading `assistant` label (with
/// optional separator) is stripped from whichever rung matched.
pub fn extract(raw: &str) -> Extracted {
    let (candidate, outcome) = if let Some(captures) = STRICT.captures(raw) {
        (captures[1].trim().to_string(), Outcome::Strict)
    } else if let Some(captures) = PREFIX_ONLY.captures(raw) {
        (captures[1].trim().to_string(), Outcome::PrefixOnly)
    } else {
        (raw.trim().to_string(), Outcome::Passthrough)
    };

    let stripped = LEADING_LABEL.replace(&candidate, "").trim().to_string();

    if stripped.is_empty() {
        Extracted {
            text: FALLBACK_REPLY.to_string(),
            outcome: Outcome::Fallback,
        }
    } else {
        Extracted {
            text: stripped,
            outcome,
        }
    }
}
