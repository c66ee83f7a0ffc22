//! Typed view of a `generateContent` response.
//!
//! Every field is optional or defaulted so that any JSON object the API
//! returns deserializes; deciding whether the envelope is usable is the
//! extractor's job (see [`output_parser::extract`](crate::output_parser::extract)).

use serde::{Deserialize, Serialize};

/// The outer response structure of a single API call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    /// Candidate answers. Only the first one is ever read.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token accounting, when the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Present when the prompt itself was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: FinishIndicator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Why the model stopped generating a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FinishIndicator {
    /// Generation completed normally (`STOP`).
    Complete,
    /// The output-length limit was hit (`MAX_TOKENS`).
    LengthLimit,
    /// Blocked by safety, recitation or content filtering.
    Safety,
    /// Any other or unreported reason.
    #[default]
    Other,
    /// The model reported a generation error.
    Error,
}

impl From<String> for FinishIndicator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STOP" => FinishIndicator::Complete,
            "MAX_TOKENS" => FinishIndicator::LengthLimit,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII"
            | "IMAGE_SAFETY" => FinishIndicator::Safety,
            "MALFORMED_FUNCTION_CALL" => FinishIndicator::Error,
            _ => FinishIndicator::Other,
        }
    }
}

impl From<FinishIndicator> for &'static str {
    fn from(indicator: FinishIndicator) -> Self {
        indicator.as_api_str()
    }
}

impl FinishIndicator {
    /// The wire value the API uses for this indicator.
    pub fn as_api_str(self) -> &'static str {
        match self {
            FinishIndicator::Complete => "STOP",
            FinishIndicator::LengthLimit => "MAX_TOKENS",
            FinishIndicator::Safety => "SAFETY",
            FinishIndicator::Other => "OTHER",
            FinishIndicator::Error => "MALFORMED_FUNCTION_CALL",
        }
    }
}

/// Token counts reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u32>,
}

impl UsageMetadata {
    /// Field-wise sum, treating a count missing on both sides as missing.
    pub fn combine(self, other: UsageMetadata) -> UsageMetadata {
        fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
            match (a, b) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(0).saturating_add(b.unwrap_or(0))),
            }
        }
        UsageMetadata {
            prompt_token_count: add(self.prompt_token_count, other.prompt_token_count),
            candidates_token_count: add(
                self.candidates_token_count,
                other.candidates_token_count,
            ),
            total_token_count: add(self.total_token_count, other.total_token_count),
        }
    }
}

impl RawEnvelope {
    /// A single-candidate envelope carrying `text`. Handy for tests and mocks.
    pub fn from_text(text: impl Into<String>, finish: FinishIndicator) -> Self {
        RawEnvelope {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                    role: Some("model".into()),
                }),
                finish_reason: finish,
            }],
            usage_metadata: None,
            prompt_feedback: None,
        }
    }

    /// Attach usage accounting.
    pub fn with_usage(mut self, usage: UsageMetadata) -> Self {
        self.usage_metadata = Some(usage);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_envelope() {
        let raw = json!({
            "candidates": [{
                "content": {"parts": [{"text": "hello"}], "role": "model"},
                "finishReason": "MAX_TOKENS",
                "index": 0
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 20,
                "totalTokenCount": 30
            },
            "modelVersion": "gemini-2.0-flash"
        });
        let envelope: RawEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.candidates.len(), 1);
        assert_eq!(envelope.candidates[0].finish_reason, FinishIndicator::LengthLimit);
        let usage = envelope.usage_metadata.unwrap();
        assert_eq!(usage.total_token_count, Some(30));
    }

    #[test]
    fn test_deserialize_empty_object() {
        let envelope: RawEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.candidates.is_empty());
        assert!(envelope.usage_metadata.is_none());
    }

    #[test]
    fn test_finish_indicator_mapping() {
        assert_eq!(FinishIndicator::from("STOP".to_string()), FinishIndicator::Complete);
        assert_eq!(
            FinishIndicator::from("MAX_TOKENS".to_string()),
            FinishIndicator::LengthLimit
        );
        assert_eq!(FinishIndicator::from("RECITATION".to_string()), FinishIndicator::Safety);
        assert_eq!(
            FinishIndicator::from("MALFORMED_FUNCTION_CALL".to_string()),
            FinishIndicator::Error
        );
        assert_eq!(
            FinishIndicator::from("FINISH_REASON_UNSPECIFIED".to_string()),
            FinishIndicator::Other
        );
    }

    #[test]
    fn test_missing_finish_reason_is_other() {
        let raw = json!({"candidates": [{"content": {"parts": [{"text": "x"}]}}]});
        let envelope: RawEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.candidates[0].finish_reason, FinishIndicator::Other);
    }

    #[test]
    fn test_usage_combine() {
        let a = UsageMetadata {
            prompt_token_count: Some(5),
            candidates_token_count: Some(100),
            total_token_count: Some(105),
        };
        let b = UsageMetadata {
            prompt_token_count: Some(7),
            candidates_token_count: None,
            total_token_count: Some(50),
        };
        let sum = a.combine(b);
        assert_eq!(sum.prompt_token_count, Some(12));
        assert_eq!(sum.candidates_token_count, Some(100));
        assert_eq!(sum.total_token_count, Some(155));
        assert_eq!(UsageMetadata::default().combine(UsageMetadata::default()), UsageMetadata::default());
    }

    #[test]
    fn test_from_text_serializes_api_names() {
        let envelope = RawEnvelope::from_text("abc", FinishIndicator::LengthLimit);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["candidates"][0]["finishReason"], "MAX_TOKENS");
        assert_eq!(value["candidates"][0]["content"]["parts"][0]["text"], "abc");
        let decoded: RawEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, envelope);
    }
}
