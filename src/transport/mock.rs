//! Mock transport for testing without a live API.
//!
//! [`MockTransport`] returns pre-configured outcomes in order and records
//! every prompt it receives, so callers can assert on call counts and on
//! the continuation prompts the controller synthesizes.
//!
//! # Example
//!
//! ```
//! use design_council::envelope::FinishIndicator;
//! use design_council::transport::MockTransport;
//!
//! let mock = MockTransport::texts(&[
//!     ("function foo() {\n  return", FinishIndicator::LengthLimit),
//!     (" 1;\n}", FinishIndicator::Complete),
//! ]);
//! assert_eq!(mock.calls(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CallOutcome, Transport};
use crate::envelope::{FinishIndicator, RawEnvelope};
use crate::error::CallFailure;
use crate::request::GenerationRequest;

/// A test transport that returns canned outcomes in order.
///
/// Cycles back to the beginning when all outcomes have been consumed.
#[derive(Debug)]
pub struct MockTransport {
    outcomes: Vec<CallOutcome>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with the given canned outcomes.
    pub fn new(outcomes: Vec<CallOutcome>) -> Self {
        assert!(!outcomes.is_empty(), "MockTransport requires at least one outcome");
        Self {
            outcomes,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A mock that always returns the same outcome.
    pub fn fixed(outcome: CallOutcome) -> Self {
        Self::new(vec![outcome])
    }

    /// A mock returning one successful single-candidate envelope per entry.
    pub fn texts(responses: &[(&str, FinishIndicator)]) -> Self {
        Self::new(
            responses
                .iter()
                .map(|(text, finish)| Ok(RawEnvelope::from_text(*text, *finish)))
                .collect(),
        )
    }

    /// A mock that always fails the same way.
    pub fn failing(failure: CallFailure) -> Self {
        Self::fixed(Err(failure))
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn next_outcome(&self) -> CallOutcome {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.outcomes.len();
        self.outcomes[idx].clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, request: &GenerationRequest) -> CallOutcome {
        match self.prompts.lock() {
            Ok(mut prompts) => prompts.push(request.prompt.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.prompt.clone()),
        }
        self.next_outcome()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::error::ErrorKind;
    use crate::request;

    #[tokio::test]
    async fn test_mock_fixed_outcome() {
        let mock = MockTransport::texts(&[("Hello!", FinishIndicator::Complete)]);
        let req = request::build("test", &GenerationConfig::default());
        let envelope = mock.call(&req).await.unwrap();
        assert_eq!(envelope, RawEnvelope::from_text("Hello!", FinishIndicator::Complete));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_cycles_outcomes() {
        let mock = MockTransport::new(vec![
            Ok(RawEnvelope::from_text("first", FinishIndicator::Complete)),
            Err(CallFailure::from_status(500, "boom")),
        ]);
        let req = request::build("test", &GenerationConfig::default());
        assert!(mock.call(&req).await.is_ok());
        let second = mock.call(&req).await.unwrap_err();
        assert_eq!(second.kind, ErrorKind::ServerOrNetwork);
        assert!(mock.call(&req).await.is_ok()); // cycles
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let mock = MockTransport::failing(CallFailure::from_status(400, "bad"));
        let config = GenerationConfig::default();
        let _ = mock.call(&request::build("one", &config)).await;
        let _ = mock.call(&request::build("two", &config)).await;
        assert_eq!(mock.prompts(), vec!["one".to_string(), "two".to_string()]);
    }
}
