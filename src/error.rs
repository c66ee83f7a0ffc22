use crate::output_parser::ParseError;
use std::fmt;
use thiserror::Error;

/// Classification of a failed generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// HTTP 4xx: malformed request or bad credentials. Never retried.
    ClientError,
    /// HTTP 5xx or a connection-level failure. Retried with backoff.
    ServerOrNetwork,
    /// The call exceeded `GenerationConfig::timeout_seconds`. Retried.
    Timeout,
    /// Anything unexpected. Fails closed: never retried.
    Unknown,
    /// Malformed response envelope or structured payload. Never retried.
    Parse,
    /// Well-formed payload with the wrong shape (item count, missing keys).
    Validation,
    /// The caller's cancellation flag was raised.
    Cancelled,
}

impl ErrorKind {
    /// Whether a failure of this kind is worth another attempt.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::ServerOrNetwork | ErrorKind::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::ClientError => "client error",
            ErrorKind::ServerOrNetwork => "server or network error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unknown => "unknown error",
            ErrorKind::Parse => "parse error",
            ErrorKind::Validation => "validation error",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// A single failed call, as produced by a [`Transport`](crate::transport::Transport)
/// and consumed by the retry policy and continuation controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct CallFailure {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description (the response body for HTTP errors).
    pub message: String,
    /// Whether the retry policy may spend another attempt on this failure.
    pub retryable: bool,
    /// HTTP status code, when the failure came from an HTTP response.
    pub status: Option<u16>,
}

impl CallFailure {
    /// Build a failure whose retryability follows from its kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: kind.is_transient(),
            status: None,
        }
    }

    /// Map an HTTP error status to a failure. 4xx is terminal, 5xx transient.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let kind = match status {
            400..=499 => ErrorKind::ClientError,
            500..=599 => ErrorKind::ServerOrNetwork,
            _ => ErrorKind::Unknown,
        };
        Self {
            status: Some(status),
            ..Self::new(kind, body)
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("Request timed out after {} seconds", seconds),
        )
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "generation was cancelled")
    }
}

/// Errors produced by the design council's high-level operations.
#[derive(Error, Debug)]
pub enum CouncilError {
    /// The generation API call failed and no usable content was produced.
    #[error("Gemini API error: {0}")]
    Call(#[from] CallFailure),

    /// The response envelope was missing a field the extractor needs.
    #[error("Malformed response: {0}")]
    Envelope(String),

    /// A structured payload (palettes, typography) could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A structured payload parsed but does not satisfy its shape contract.
    #[error("Invalid {artifact} response: {reason}")]
    Validation {
        artifact: &'static str,
        reason: String,
    },

    /// The caller's request document failed validation.
    #[error("Validation errors: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// The API key is missing or implausible.
    #[error("{0}")]
    Credentials(String),

    /// JSON (de)serialization failed at the serde level.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl CouncilError {
    /// The failure class of this error, for callers that branch on it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CouncilError::Call(failure) => failure.kind,
            CouncilError::Envelope(_) | CouncilError::Parse(_) | CouncilError::Json(_) => {
                ErrorKind::Parse
            }
            CouncilError::Validation { .. } | CouncilError::InvalidInput(_) => {
                ErrorKind::Validation
            }
            CouncilError::Credentials(_) => ErrorKind::ClientError,
            CouncilError::Other(_) => ErrorKind::Unknown,
        }
    }
}

impl From<anyhow::Error> for CouncilError {
    fn from(err: anyhow::Error) -> Self {
        CouncilError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CouncilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unauthorized = CallFailure::from_status(401, "API key not valid");
        assert_eq!(unauthorized.kind, ErrorKind::ClientError);
        assert!(!unauthorized.retryable);
        assert_eq!(unauthorized.status, Some(401));
        assert_eq!(unauthorized.message, "API key not valid");

        let unavailable = CallFailure::from_status(503, "overloaded");
        assert_eq!(unavailable.kind, ErrorKind::ServerOrNetwork);
        assert!(unavailable.retryable);

        let redirect = CallFailure::from_status(302, "moved");
        assert_eq!(redirect.kind, ErrorKind::Unknown);
        assert!(!redirect.retryable);
    }

    #[test]
    fn test_rate_limit_is_a_client_error() {
        let limited = CallFailure::from_status(429, "quota exceeded");
        assert_eq!(limited.kind, ErrorKind::ClientError);
        assert!(!limited.retryable);
    }

    #[test]
    fn test_timeout_and_cancel_retryability() {
        assert!(CallFailure::timeout(60).retryable);
        assert!(CallFailure::timeout(60).message.contains("60 seconds"));
        assert!(!CallFailure::cancelled().retryable);
        assert!(!CallFailure::new(ErrorKind::Unknown, "boom").retryable);
    }

    #[test]
    fn test_display_includes_kind() {
        let failure = CallFailure::from_status(400, "bad request");
        assert_eq!(failure.to_string(), "client error: bad request");
        let err: CouncilError = failure.into();
        assert_eq!(err.to_string(), "Gemini API error: client error: bad request");
        assert_eq!(err.kind(), ErrorKind::ClientError);
    }

    #[test]
    fn test_invalid_input_joins_reasons() {
        let err = CouncilError::InvalidInput(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation errors: a; b");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_from_anyhow() {
        let err: CouncilError = anyhow::anyhow!("wrapped").into();
        assert!(matches!(err, CouncilError::Other(ref m) if m == "wrapped"));
    }
}
