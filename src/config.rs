//! Generation parameters.
//!
//! [`GenerationConfig`] is passed explicitly at every call site. There is no
//! process-wide default that callers could mutate; each caller starts from
//! [`GenerationConfig::default()`] or a preset and adjusts with the
//! `with_*` builders.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling and timeout parameters for one logical generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Temperature (0.0 = deterministic, higher = more varied).
    pub temperature: f64,

    /// Maximum tokens the model may emit per API call.
    pub max_output_tokens: u32,

    /// Nucleus sampling threshold.
    pub top_p: f64,

    /// Top-k sampling cutoff.
    pub top_k: u32,

    /// Hard upper bound on a single network round trip, in seconds.
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 8192,
            top_p: 0.95,
            top_k: 40,
            timeout_seconds: 120,
        }
    }
}

impl GenerationConfig {
    /// Settings for small structured artifacts (palettes, typography):
    /// slightly warmer for variety, shorter output, shorter timeout.
    pub fn artifact() -> Self {
        Self {
            temperature: 0.8,
            max_output_tokens: 4096,
            timeout_seconds: 60,
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// The call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
