//! Transport for Google's Gemini `generateContent` endpoint.
//!
//! [`GeminiTransport`] posts the request body built by
//! [`GenerationRequest::to_body`] to
//! `{base}/v1beta/models/{model}:generateContent?key=…` and maps every
//! outcome onto [`CallOutcome`]:
//!
//! | Outcome | Kind | Retryable |
//! |---------|------|-----------|
//! | 2xx with a JSON body | success | - |
//! | 400–499 | `ClientError` (body as message) | no |
//! | 500–599, connection failure | `ServerOrNetwork` | yes |
//! | exceeded `timeout_seconds` | `Timeout` | yes |
//! | 2xx with an undecodable body | `Parse` | no |
//! | anything else | `Unknown` | no |

use super::{CallOutcome, Transport};
use crate::credentials::ApiKey;
use crate::envelope::RawEnvelope;
use crate::error::{CallFailure, ErrorKind};
use crate::request::GenerationRequest;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Transport backed by the Gemini REST API.
///
/// # Example
///
/// ```
/// use design_council::credentials::ApiKey;
/// use design_council::transport::GeminiTransport;
///
/// let key = ApiKey::new("AIzaSyEXAMPLE0123456789abcd").unwrap();
/// let transport = GeminiTransport::new(key).with_model("gemini-2.5-pro");
/// assert_eq!(transport.model(), "gemini-2.5-pro");
/// ```
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    client: Client,
    base_url: String,
    model: String,
    api_key: ApiKey,
}

impl GeminiTransport {
    /// Create a transport for the public API with the default model.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
        }
    }

    /// Point at a different host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Select the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Reuse an existing HTTP client (connection pool, proxy settings).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full endpoint URL, without the key.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build the reqwest request with the key as a query parameter.
    fn build_http_request(&self, request: &GenerationRequest) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose())])
            .header(CONTENT_TYPE, "application/json")
            .json(&request.to_body())
    }

    /// Send the request and decode the envelope. Unbounded in time; the
    /// caller wraps it in the configured timeout.
    async fn send(&self, request: &GenerationRequest) -> CallOutcome {
        let resp = self
            .build_http_request(request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.ok();
            return Err(CallFailure::from_status(
                status.as_u16(),
                error_message(status.as_u16(), body),
            ));
        }

        let bytes = resp.bytes().await.map_err(classify_reqwest_error)?;
        serde_json::from_slice::<RawEnvelope>(&bytes).map_err(|e| {
            CallFailure::new(
                ErrorKind::Parse,
                format!("Response body is not a valid envelope: {}", e),
            )
        })
    }
}

/// The response body for an HTTP error, or `HTTP {status}` when the body
/// is empty or could not be read.
fn error_message(status: u16, body: Option<String>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => format!("HTTP {}", status),
    }
}

/// Map a reqwest error onto the failure taxonomy. The URL is stripped so
/// the key query parameter never lands in a message or log line.
fn classify_reqwest_error(err: reqwest::Error) -> CallFailure {
    let err = err.without_url();
    if err.is_timeout() {
        CallFailure::new(ErrorKind::Timeout, format!("Request timed out: {}", err))
    } else if err.is_connect() || err.is_request() || err.is_body() {
        CallFailure::new(ErrorKind::ServerOrNetwork, format!("Network error: {}", err))
    } else {
        CallFailure::new(ErrorKind::Unknown, format!("Unexpected error: {}", err))
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn call(&self, request: &GenerationRequest) -> CallOutcome {
        let seconds = request.config.timeout_seconds;
        debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            timeout_seconds = seconds,
            "sending generateContent request"
        );

        let outcome = match tokio::time::timeout(request.config.timeout(), self.send(request)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(CallFailure::timeout(seconds)),
        };

        match &outcome {
            Ok(envelope) => debug!(
                candidates = envelope.candidates.len(),
                "generateContent succeeded"
            ),
            Err(failure) => warn!(
                kind = %failure.kind,
                status = ?failure.status,
                retryable = failure.retryable,
                "generateContent failed"
            ),
        }
        outcome
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
