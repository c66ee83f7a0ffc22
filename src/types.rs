use crate::envelope::{FinishIndicator, UsageMetadata};
use serde::{Deserialize, Serialize};

/// Why an assembled (possibly multi-call) generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// The final attempt completed normally.
    Complete,
    /// The final attempt was stopped by safety filtering.
    Safety,
    /// The final attempt stopped for another or unreported reason.
    Other,
    /// The final attempt reported a generation error.
    Error,
    /// Output was still truncated when the continuation budget ran out.
    MaxContinuations,
    /// A later attempt failed; the text gathered before it is returned.
    Partial,
}

impl From<FinishIndicator> for FinishReason {
    fn from(indicator: FinishIndicator) -> Self {
        match indicator {
            FinishIndicator::Complete => FinishReason::Complete,
            FinishIndicator::LengthLimit => FinishReason::MaxContinuations,
            FinishIndicator::Safety => FinishReason::Safety,
            FinishIndicator::Other => FinishReason::Other,
            FinishIndicator::Error => FinishReason::Error,
        }
    }
}

/// The stitched result of one logical generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledResponse {
    /// Every successful attempt's text, concatenated in call order.
    pub text: String,
    /// How the generation ended.
    pub finish_reason: FinishReason,
    /// Token accounting summed over all successful attempts.
    pub usage: Option<UsageMetadata>,
    /// Continuation calls made after the initial one.
    pub continuations: u32,
    /// Successful API calls whose text went into `text`.
    pub attempts: u32,
}

impl AssembledResponse {
    /// Whether the text is known to be cut short.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self.finish_reason,
            FinishReason::MaxContinuations | FinishReason::Partial
        )
    }
}

/// Text pulled out of one response envelope.
///
/// Check `error` first: when it is set, `code` is empty and meaningless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// The generated text of the first candidate.
    pub code: String,
    /// What was missing from the envelope, if anything.
    pub error: Option<String>,
    /// The first candidate's finish indicator.
    pub finish_reason: FinishIndicator,
    /// Usage accounting from the envelope.
    pub usage: Option<UsageMetadata>,
}

impl ParsedResult {
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Quick check: was text extracted?
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A fenced code region and its language tag (`"text"` when untagged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

/// Generated frontend code split into the sections callers care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredOutput {
    /// The full generated text.
    pub raw_code: String,
    /// Component sources (tsx/ts/jsx/js/vue/svelte blocks) in order.
    pub components: Vec<String>,
    /// All stylesheet blocks joined by a blank line.
    pub styles: Option<String>,
    /// Helper code found under a "Utility"/"Utils"/"Helpers" heading.
    pub utilities: Option<String>,
    /// `import` lines, one per line.
    pub imports: Option<String>,
    /// Explanation found under a reasoning heading.
    pub reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_serializes_screaming_case() {
        let json = serde_json::to_string(&FinishReason::MaxContinuations).unwrap();
        assert_eq!(json, "\"MAX_CONTINUATIONS\"");
        let json = serde_json::to_string(&FinishReason::Partial).unwrap();
        assert_eq!(json, "\"PARTIAL\"");
    }

    #[test]
    fn test_finish_reason_from_indicator() {
        assert_eq!(FinishReason::from(FinishIndicator::Complete), FinishReason::Complete);
        assert_eq!(FinishReason::from(FinishIndicator::Safety), FinishReason::Safety);
        assert_eq!(
            FinishReason::from(FinishIndicator::LengthLimit),
            FinishReason::MaxContinuations
        );
    }

    #[test]
    fn test_truncation_flag() {
        let mut response = AssembledResponse {
            text: "x".into(),
            finish_reason: FinishReason::Complete,
            usage: None,
            continuations: 0,
            attempts: 1,
        };
        assert!(!response.is_truncated());
        response.finish_reason = FinishReason::Partial;
        assert!(response.is_truncated());
    }

    #[test]
    fn test_parsed_result_failed() {
        let parsed = ParsedResult::failed("No candidates in response");
        assert!(!parsed.ok());
        assert!(parsed.code.is_empty());
    }
}
