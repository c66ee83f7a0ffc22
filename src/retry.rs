//! Transport-level retry with deterministic exponential backoff.
//!
//! [`call_with_retry`] wraps a single [`Transport::call`] with at most
//! [`RetryPolicy::max_attempts`] attempts. Retryable failures (5xx,
//! connection errors, timeouts) sleep `initial_delay * multiplier^attempt`
//! between attempts: 1s, 2s, 4s, … with the standard policy. There is no
//! jitter; the delay depends on the attempt index alone.
//! Non-retryable failures (4xx, parse errors, unknown errors) return at
//! once without spending the remaining attempts.

use crate::error::CallFailure;
use crate::request::GenerationRequest;
use crate::transport::{CallOutcome, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Type alias for the callback invoked before each backoff sleep.
///
/// Arguments: `(retry_number, delay_before_retry, reason_for_retry)`.
pub type RetryCallback<'a> = Option<&'a mut (dyn FnMut(u32, Duration, &str) + Send)>;

/// Bounded-attempt retry policy.
///
/// # Example
///
/// ```
/// use design_council::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::standard();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. At least 1.
    pub max_attempts: u32,

    /// Delay after the first failed attempt. Default: 1 second.
    pub initial_delay: Duration,

    /// Factor applied per attempt. Default: 2.
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Attempts made by [`RetryPolicy::standard`].
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Up to `max_attempts` attempts (clamped to at least 1) with 1s/2s/4s… backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::from_secs(1),
            multiplier: 2,
        }
    }

    /// Three attempts, 1s then 2s between them.
    pub fn standard() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }

    /// A single attempt; failures are returned as-is.
    pub fn none() -> Self {
        Self::new(1)
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay before the retry that follows failed attempt `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(self.multiplier.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Call `transport` with bounded retry.
///
/// Returns the first success, the first non-retryable failure, or the last
/// failure once `policy.max_attempts` attempts are spent. The cancellation
/// flag is checked before every attempt, including after each sleep.
pub async fn call_with_retry(
    transport: &dyn Transport,
    request: &GenerationRequest,
    policy: &RetryPolicy,
    cancel: Option<&AtomicBool>,
    mut on_retry: RetryCallback<'_>,
) -> CallOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        if is_cancelled(cancel) {
            return Err(CallFailure::cancelled());
        }

        let failure = match transport.call(request).await {
            Ok(envelope) => return Ok(envelope),
            Err(failure) => failure,
        };

        if !failure.retryable {
            debug!(kind = %failure.kind, attempt, "non-retryable failure");
            return Err(failure);
        }
        if attempt + 1 >= max_attempts {
            warn!(kind = %failure.kind, attempts = max_attempts, "retry budget exhausted");
            return Err(failure);
        }

        let delay = policy.delay_for_attempt(attempt);
        attempt += 1;
        debug!(
            transport = transport.name(),
            retry = attempt,
            delay_ms = delay.as_millis() as u64,
            reason = %failure,
            "backing off before retry"
        );
        if let Some(ref mut cb) = on_retry {
            cb(attempt, delay, &failure.to_string());
        }
        tokio::time::sleep(delay).await;
    }
}
