//! User message validation.
//!
//! Runs before any agent is contacted. Each failed rule produces a
//! human-readable error string; the dispatcher shows the full list as one
//! assistant reply and skips the turn.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum accepted message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Any ASCII control character except newline and tab
    RE.get_or_init(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"))
}

/// Validate a user message. An empty vec means the message is acceptable.
pub fn validate_message(input: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if input.trim().is_empty() {
        errors.push("The message is empty.".to_string());
        return errors;
    }

    let chars = input.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        errors.push(format!(
            "The message is too long ({} characters, maximum {}).",
            chars, MAX_MESSAGE_CHARS
        ));
    }

    if control_chars().is_match(input) {
        errors.push("The message contains unsupported control characters.".to_string());
    }

    errors
}
