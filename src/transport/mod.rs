//! Transport trait and the uniform call outcome.
//!
//! A [`Transport`] performs exactly one network round trip per
//! [`call`](Transport::call) and folds every way that can go wrong into a
//! [`CallFailure`]. Retrying is the [`retry`](crate::retry) module's job,
//! never the transport's.
//!
//! ```text
//! call_with_retry ──► Transport::call(&GenerationRequest) ──► CallOutcome
//!                               │
//!                    ┌──────────┴──────────┐
//!             GeminiTransport         MockTransport
//!        POST …:generateContent     scripted outcomes
//! ```

pub mod gemini;
pub mod mock;

pub use gemini::GeminiTransport;
pub use mock::MockTransport;

use crate::envelope::RawEnvelope;
use crate::error::CallFailure;
use crate::request::GenerationRequest;
use async_trait::async_trait;

/// Result of a single transport call: the decoded envelope (unvalidated)
/// or a classified failure.
pub type CallOutcome = std::result::Result<RawEnvelope, CallFailure>;

/// Abstraction over the generation API.
///
/// Implementations must be safe to share across concurrent top-level
/// generations; all per-call state lives in the caller.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round trip, bounded by `request.config.timeout_seconds`.
    async fn call(&self, request: &GenerationRequest) -> CallOutcome;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
