//! API key loading.
//!
//! The key is read from `GEMINI_API_KEY` and rejected loudly when it is
//! missing or too short to be real. [`ApiKey`] never prints its value in
//! `Debug` output.

use crate::error::{CouncilError, Result};
use std::fmt;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Keys shorter than this are treated as placeholders or typos.
pub const MIN_KEY_LEN: usize = 20;

/// A validated Gemini API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a key supplied directly by the caller.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(missing_key());
        }
        if key.len() < MIN_KEY_LEN {
            return Err(CouncilError::Credentials(format!(
                "{} appears to be invalid (too short)",
                API_KEY_ENV
            )));
        }
        Ok(Self(key))
    }

    /// Read and validate the key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(API_KEY_ENV) {
            Some(value) => Self::new(value),
            None => Err(missing_key()),
        }
    }

    /// The raw key, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

fn missing_key() -> CouncilError {
    CouncilError::Credentials(format!(
        "{env} environment variable not set. \
         Please set it with: export {env}='your-api-key'\n\
         Get your API key from: https://makersuite.google.com/app/apikey",
        env = API_KEY_ENV
    ))
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ApiKey({}***)", prefix)
    }
}
