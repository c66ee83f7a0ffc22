//! Request builder for the `generateContent` endpoint.
//!
//! A [`GenerationRequest`] owns its prompt and a by-value copy of the
//! [`GenerationConfig`], so nothing a caller does to its own config after
//! [`build`] can reach a request that is already in flight.

use crate::config::GenerationConfig;
use serde_json::{json, Value};

/// One generation attempt's input. Continuations build a fresh request
/// rather than mutating the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Prompt text sent as the single user part.
    pub prompt: String,
    /// Generation parameters, copied from the caller's config.
    pub config: GenerationConfig,
}

/// Assemble a request from a prompt and a config.
pub fn build(prompt: &str, config: &GenerationConfig) -> GenerationRequest {
    GenerationRequest {
        prompt: prompt.to_string(),
        config: config.clone(),
    }
}

impl GenerationRequest {
    /// The JSON body for `POST …:generateContent`.
    pub fn to_body(&self) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": self.prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
                "topP": self.config.top_p,
                "topK": self.config.top_k,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape() {
        let request = build("Build a pricing card", &GenerationConfig::default());
        let body = request.to_body();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Build a pricing card");
        assert_eq!(body["generationConfig"]["temperature"], 0.7);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["generationConfig"]["topP"], 0.95);
        assert_eq!(body["generationConfig"]["topK"], 40);
        // Timeout is enforced client-side and never sent.
        assert!(body["generationConfig"].get("timeoutSeconds").is_none());
    }

    #[test]
    fn test_config_copied_by_value() {
        let mut config = GenerationConfig::default();
        let request = build("prompt", &config);

        config.temperature = 0.1;
        config.max_output_tokens = 16;

        assert_eq!(request.config.temperature, 0.7);
        assert_eq!(request.to_body()["generationConfig"]["maxOutputTokens"], 8192);
    }
}
