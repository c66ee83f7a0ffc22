//! Pulling the generated text out of a response envelope.

use crate::envelope::RawEnvelope;
use crate::types::ParsedResult;

/// Extract the first candidate's text from an envelope.
///
/// Never fails: a structurally unusable envelope yields a [`ParsedResult`]
/// whose `error` names the first missing level (candidates, content,
/// parts, text). All text parts of the candidate are joined in order.
///
/// # Examples
///
/// ```
/// use design_council::envelope::{FinishIndicator, RawEnvelope};
/// use design_council::output_parser::extract;
///
/// let parsed = extract(&RawEnvelope::from_text("<div/>", FinishIndicator::Complete));
/// assert!(parsed.ok());
/// assert_eq!(parsed.code, "<div/>");
///
/// let empty = extract(&RawEnvelope::default());
/// assert_eq!(empty.error.as_deref(), Some("No candidates in response"));
/// ```
pub fn extract(envelope: &RawEnvelope) -> ParsedResult {
    let Some(candidate) = envelope.candidates.first() else {
        let blocked = envelope
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref());
        return match blocked {
            Some(reason) => {
                ParsedResult::failed(format!("No candidates in response (prompt blocked: {})", reason))
            }
            None => ParsedResult::failed("No candidates in response"),
        };
    };

    let Some(content) = candidate.content.as_ref() else {
        return ParsedResult::failed("No content in response candidate");
    };
    if content.parts.is_empty() {
        return ParsedResult::failed("No parts in response content");
    }

    let texts: Vec<&str> = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if texts.is_empty() {
        return ParsedResult::failed("No text in response parts");
    }

    ParsedResult {
        code: texts.concat(),
        error: None,
        finish_reason: candidate.finish_reason,
        usage: envelope.usage_metadata,
    }
}
