//! Event hooks for generation lifecycle.
//!
//! Provides an optional, non-intrusive way to observe a generation as it
//! runs: retries, continuations, partial recovery. Implement
//! [`EventHandler`] for progress output or metrics; the crate also logs the
//! same transitions through `tracing`.

use crate::error::ErrorKind;
use crate::types::FinishReason;
use std::sync::Arc;

/// Events emitted while a generation runs.
#[derive(Debug, Clone)]
pub enum Event {
    /// A logical generation has started.
    GenerationStart {
        /// Label of the operation (e.g. `"component"`, `"palettes"`).
        name: String,
        /// Length of the initial prompt in characters.
        prompt_chars: usize,
    },
    /// A transport-level retry is about to sleep.
    TransportRetry {
        name: String,
        /// The retry attempt number (1-indexed).
        attempt: u32,
        /// Delay before this retry attempt in milliseconds.
        delay_ms: u64,
        /// Why the previous attempt failed.
        reason: String,
    },
    /// Output was truncated and a continuation call is starting.
    Continuation {
        name: String,
        /// Continuation number (1-indexed).
        continuation: u32,
        /// Characters accumulated so far.
        accumulated_chars: usize,
    },
    /// A call failed after earlier attempts produced text; that text is kept.
    PartialRecovered {
        name: String,
        kind: ErrorKind,
        accumulated_chars: usize,
    },
    /// The logical generation has finished.
    GenerationEnd {
        name: String,
        /// `None` when the generation failed outright.
        finish_reason: Option<FinishReason>,
        continuations: u32,
    },
}

/// Handler for generation lifecycle events.
///
/// # Example
///
/// ```
/// use design_council::events::{Event, EventHandler};
///
/// struct PrintHandler;
///
/// impl EventHandler for PrintHandler {
///     fn on_event(&self, event: Event) {
///         match event {
///             Event::Continuation { continuation, .. } => println!("continuing ({})", continuation),
///             Event::GenerationEnd { finish_reason, .. } => println!("done: {:?}", finish_reason),
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Called for every emitted event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// ```
/// use design_council::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::TransportRetry { attempt, .. } = event {
///         eprintln!("retry #{}", attempt);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}
