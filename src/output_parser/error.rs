//! Error types for response parsing.

/// Errors returned while turning model text into structured payloads.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The model returned nothing once fences and whitespace were removed.
    #[error("empty {artifact} response")]
    EmptyResponse {
        /// What was being parsed (`"palette"`, `"typography"`).
        artifact: &'static str,
    },

    /// The text is not valid JSON.
    #[error("Failed to parse {artifact} response: {reason}")]
    InvalidPayload {
        artifact: &'static str,
        /// The serde error message.
        reason: String,
        /// A truncated copy of the offending text (max 200 chars).
        text: String,
    },

    /// JSON passed its shape contract but failed to deserialize into the target type.
    #[error("JSON deserialization failed: {reason}")]
    DeserializationFailed {
        /// The serde error message.
        reason: String,
        /// The raw JSON string that failed deserialization.
        raw_json: String,
    },
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn test_display() {
        let err = ParseError::InvalidPayload {
            artifact: "palette",
            reason: "expected value at line 1 column 1".into(),
            text: "nope".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse palette response: expected value at line 1 column 1"
        );
    }
}
