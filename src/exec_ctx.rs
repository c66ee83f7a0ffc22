//! Execution context shared across generation tasks.
//!
//! [`ExecCtx`] carries the transport, retry policy, continuation settings,
//! cancellation handle, and optional event handler. Build it once and pass
//! it by reference to every [`generate`](crate::generate) call.

use crate::continuation::ContinuationConfig;
use crate::credentials::ApiKey;
use crate::error::{CallFailure, Result};
use crate::events::EventHandler;
use crate::retry::RetryPolicy;
use crate::transport::{GeminiTransport, Transport};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared execution context for generation calls.
///
/// # Example
///
/// ```
/// use design_council::{ExecCtx, MockTransport};
/// use design_council::envelope::FinishIndicator;
/// use std::sync::Arc;
///
/// let mock = MockTransport::texts(&[("done", FinishIndicator::Complete)]);
/// let ctx = ExecCtx::builder(Arc::new(mock))
///     .max_attempts(5)
///     .max_continuations(2)
///     .build();
/// assert_eq!(ctx.retry.max_attempts, 5);
/// ```
pub struct ExecCtx {
    /// Where requests go.
    pub transport: Arc<dyn Transport>,
    /// Transport retry policy. Default: [`RetryPolicy::standard()`].
    pub retry: RetryPolicy,
    /// Truncation handling. Default: three continuations.
    pub continuation: ContinuationConfig,
    /// Optional cancellation flag, checked before every network attempt.
    pub cancellation: Option<Arc<AtomicBool>>,
    /// Optional event handler for lifecycle events.
    pub event_handler: Option<Arc<dyn EventHandler>>,
}

impl ExecCtx {
    /// Create a new builder around a transport.
    pub fn builder(transport: Arc<dyn Transport>) -> ExecCtxBuilder {
        ExecCtxBuilder {
            transport,
            retry: None,
            continuation: None,
            cancellation: None,
            event_handler: None,
        }
    }

    /// Builder preconfigured with a [`GeminiTransport`] for `api_key`.
    pub fn gemini(api_key: ApiKey) -> ExecCtxBuilder {
        Self::builder(Arc::new(GeminiTransport::new(api_key)))
    }

    /// Builder preconfigured with a [`GeminiTransport`] using `GEMINI_API_KEY`.
    pub fn from_env() -> Result<ExecCtxBuilder> {
        Ok(Self::gemini(ApiKey::from_env()?))
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }

    /// Return an error if cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(CallFailure::cancelled().into());
        }
        Ok(())
    }

    /// Get a reference to the cancellation AtomicBool, if set.
    pub fn cancel_flag(&self) -> Option<&AtomicBool> {
        self.cancellation.as_deref()
    }
}

impl std::fmt::Debug for ExecCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecCtx")
            .field("transport", &self.transport.name())
            .field("retry", &self.retry)
            .field("continuation", &self.continuation)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("has_event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// Builder for [`ExecCtx`].
pub struct ExecCtxBuilder {
    transport: Arc<dyn Transport>,
    retry: Option<RetryPolicy>,
    continuation: Option<ContinuationConfig>,
    cancellation: Option<Arc<AtomicBool>>,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl ExecCtxBuilder {
    /// Replace the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Set the retry policy. Default: [`RetryPolicy::standard()`].
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Override the attempt budget, keeping the 1s/2s/4s… backoff.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        let policy = self.retry.take().unwrap_or_default();
        self.retry = Some(RetryPolicy {
            max_attempts: max_attempts.max(1),
            ..policy
        });
        self
    }

    /// Set the continuation settings.
    pub fn continuation(mut self, config: ContinuationConfig) -> Self {
        self.continuation = Some(config);
        self
    }

    /// Override the continuation budget. `0` disables continuation.
    pub fn max_continuations(mut self, max_continuations: u32) -> Self {
        let config = self.continuation.take().unwrap_or_default();
        self.continuation = Some(config.with_max_continuations(max_continuations));
        self
    }

    /// Set the cancellation flag.
    pub fn cancellation(mut self, cancel: Option<Arc<AtomicBool>>) -> Self {
        self.cancellation = cancel;
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the execution context.
    pub fn build(self) -> ExecCtx {
        ExecCtx {
            transport: self.transport,
            retry: self.retry.unwrap_or_default(),
            continuation: self.continuation.unwrap_or_default(),
            cancellation: self.cancellation,
            event_handler: self.event_handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::FinishIndicator;
    use crate::error::ErrorKind;
    use crate::transport::MockTransport;

    fn mock() -> Arc<dyn Transport> {
        Arc::new(MockTransport::texts(&[("ok", FinishIndicator::Complete)]))
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ExecCtx::builder(mock()).build();
        assert_eq!(ctx.retry, RetryPolicy::standard());
        assert_eq!(ctx.continuation, ContinuationConfig::default());
        assert!(!ctx.is_cancelled());
        assert!(ctx.cancel_flag().is_none());
    }

    #[test]
    fn test_overrides() {
        let ctx = ExecCtx::builder(mock())
            .max_attempts(0)
            .max_continuations(0)
            .build();
        assert_eq!(ctx.retry.max_attempts, 1);
        assert_eq!(ctx.continuation.max_continuations, 0);
    }

    #[test]
    fn test_check_cancelled() {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = ExecCtx::builder(mock())
            .cancellation(Some(flag.clone()))
            .build();
        assert!(ctx.check_cancelled().is_ok());
        flag.store(true, Ordering::Relaxed);
        let err = ctx.check_cancelled().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_debug_names_transport() {
        let ctx = ExecCtx::builder(mock()).build();
        let debug = format!("{:?}", ctx);
        assert!(debug.contains("mock"));
        assert!(debug.contains("has_cancellation: false"));
    }
}
