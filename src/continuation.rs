//! Transparent continuation of length-truncated output.
//!
//! A single logical generation may take several API calls. When an attempt
//! stops at the output-length limit the controller asks the model to carry
//! on from where it stopped, appending each attempt's text in call order:
//!
//! ```text
//!                 ┌──────────── LengthLimit, budget left ───────────┐
//!                 ▼                                                 │
//! Accumulating ──attempt──► (finish) ──► Continuing ──attempt──► (finish)
//!                              │                                    │
//!                              └──► Done(reason) ◄──────────────────┘
//! ```
//!
//! - a non-LengthLimit finish ends the loop with that reason;
//! - LengthLimit with the budget spent ends with `MaxContinuations`;
//! - a failure after some text was gathered ends with `Partial` and the
//!   text is returned; with no text yet the failure propagates;
//! - cancellation is a failure like any other: it ends with `Partial`
//!   when text was gathered and propagates otherwise.

use crate::config::GenerationConfig;
use crate::envelope::{FinishIndicator, UsageMetadata};
use crate::error::{CallFailure, ErrorKind};
use crate::events::{emit, Event};
use crate::exec_ctx::ExecCtx;
use crate::output_parser;
use crate::request;
use crate::retry::call_with_retry;
use crate::types::{AssembledResponse, FinishReason};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Instruction placed at the top of every continuation prompt.
pub const CONTINUATION_PREAMBLE: &str = "Your previous response was cut off because it reached the output length limit. \
Continue EXACTLY where it stopped. Do not repeat any text you already wrote, do not restart the answer, \
and do not add commentary. Output only the remaining content.";

/// Truncation handling settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationConfig {
    /// Continuation calls allowed after the initial one. Default: 3.
    pub max_continuations: u32,
    /// Characters of the original prompt repeated in each continuation prompt.
    pub prompt_excerpt_chars: usize,
    /// Approximate trailing characters of accumulated output shown to the model.
    pub tail_chars: usize,
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            max_continuations: 3,
            prompt_excerpt_chars: 1000,
            tail_chars: 500,
        }
    }
}

impl ContinuationConfig {
    /// Never continue; a truncated first attempt ends with `MaxContinuations`.
    pub fn disabled() -> Self {
        Self::default().with_max_continuations(0)
    }

    pub fn with_max_continuations(mut self, max_continuations: u32) -> Self {
        self.max_continuations = max_continuations;
        self
    }

    pub fn with_prompt_excerpt_chars(mut self, chars: usize) -> Self {
        self.prompt_excerpt_chars = chars;
        self
    }

    pub fn with_tail_chars(mut self, chars: usize) -> Self {
        self.tail_chars = chars;
        self
    }
}

/// Where the controller stands between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Initial state: no attempt has completed yet.
    Accumulating,
    /// The last attempt was truncated; another call is due.
    Continuing,
    /// Terminal.
    Done(FinishReason),
}

impl ControllerState {
    /// The state after an attempt finished with `finish`, given how many
    /// continuations have already been made.
    pub fn after_attempt(finish: FinishIndicator, continuations: u32, max_continuations: u32) -> Self {
        match finish {
            FinishIndicator::LengthLimit if continuations < max_continuations => {
                ControllerState::Continuing
            }
            FinishIndicator::LengthLimit => ControllerState::Done(FinishReason::MaxContinuations),
            other => ControllerState::Done(other.into()),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ControllerState::Done(_))
    }
}

/// First `chars` characters of `text`.
pub fn excerpt(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Roughly the last `approx_chars` characters of `text`, moved forward to
/// the next line start so the model sees whole lines.
///
/// If the window holds no line break the raw window is returned.
pub fn tail_context(text: &str, approx_chars: usize) -> &str {
    if approx_chars == 0 {
        return "";
    }
    let start = match text.char_indices().rev().nth(approx_chars - 1) {
        Some((idx, _)) => idx,
        None => return text,
    };
    if start == 0 || text[..start].ends_with('\n') {
        return &text[start..];
    }
    match text[start..].find('\n') {
        Some(offset) if start + offset + 1 < text.len() => &text[start + offset + 1..],
        _ => &text[start..],
    }
}

/// Prompt for the next continuation call.
pub fn continuation_prompt(original: &str, accumulated: &str, config: &ContinuationConfig) -> String {
    format!(
        "{}\n\n## Original Request (excerpt)\n{}\n\n## End of Your Previous Output\n{}\n\nContinue from exactly this point:",
        CONTINUATION_PREAMBLE,
        excerpt(original, config.prompt_excerpt_chars),
        tail_context(accumulated, config.tail_chars),
    )
}

fn add_usage(total: Option<UsageMetadata>, next: Option<UsageMetadata>) -> Option<UsageMetadata> {
    match (total, next) {
        (Some(a), Some(b)) => Some(a.combine(b)),
        (a, b) => a.or(b),
    }
}

/// Run one logical generation, continuing through truncation.
///
/// `name` labels log lines and events (`"component"`, `"palettes"`, …).
/// Returns the assembled text, or the failure that prevented any text from
/// being produced.
pub async fn generate_with_continuation(
    ctx: &ExecCtx,
    name: &str,
    prompt: &str,
    config: &GenerationConfig,
) -> Result<AssembledResponse, CallFailure> {
    emit(
        &ctx.event_handler,
        Event::GenerationStart {
            name: name.to_string(),
            prompt_chars: prompt.chars().count(),
        },
    );

    let handler = ctx.event_handler.clone();
    let label = name.to_string();
    let mut on_retry = move |attempt: u32, delay: Duration, reason: &str| {
        emit(
            &handler,
            Event::TransportRetry {
                name: label.clone(),
                attempt,
                delay_ms: delay.as_millis() as u64,
                reason: reason.to_string(),
            },
        );
    };

    let max_continuations = ctx.continuation.max_continuations;
    let mut state = ControllerState::Accumulating;
    let mut text = String::new();
    let mut usage: Option<UsageMetadata> = None;
    let mut continuations: u32 = 0;
    let mut attempts: u32 = 0;
    let mut req = request::build(prompt, config);

    let finish_reason = loop {
        debug!(op = name, ?state, continuations, "issuing generation attempt");

        let outcome = call_with_retry(
            ctx.transport.as_ref(),
            &req,
            &ctx.retry,
            ctx.cancel_flag(),
            Some(&mut on_retry),
        )
        .await;

        let failure = match outcome {
            Ok(envelope) => {
                let parsed = output_parser::extract(&envelope);
                match parsed.error {
                    Some(message) => CallFailure::new(ErrorKind::Parse, message),
                    None => {
                        text.push_str(&parsed.code);
                        usage = add_usage(usage, parsed.usage);
                        attempts += 1;
                        state = ControllerState::after_attempt(
                            parsed.finish_reason,
                            continuations,
                            max_continuations,
                        );
                        if let ControllerState::Done(reason) = state {
                            break reason;
                        }
                        continuations += 1;
                        info!(
                            op = name,
                            continuation = continuations,
                            accumulated_chars = text.len(),
                            "output truncated, continuing"
                        );
                        emit(
                            &ctx.event_handler,
                            Event::Continuation {
                                name: name.to_string(),
                                continuation: continuations,
                                accumulated_chars: text.len(),
                            },
                        );
                        req = request::build(
                            &continuation_prompt(prompt, &text, &ctx.continuation),
                            config,
                        );
                        continue;
                    }
                }
            }
            Err(failure) => failure,
        };

        if text.is_empty() {
            warn!(op = name, kind = %failure.kind, "generation failed");
            emit(
                &ctx.event_handler,
                Event::GenerationEnd {
                    name: name.to_string(),
                    finish_reason: None,
                    continuations,
                },
            );
            return Err(failure);
        }

        warn!(
            op = name,
            kind = %failure.kind,
            accumulated_chars = text.len(),
            "attempt failed after partial output, returning what was gathered"
        );
        emit(
            &ctx.event_handler,
            Event::PartialRecovered {
                name: name.to_string(),
                kind: failure.kind,
                accumulated_chars: text.len(),
            },
        );
        break FinishReason::Partial;
    };

    debug!(op = name, ?finish_reason, continuations, attempts, "generation finished");
    emit(
        &ctx.event_handler,
        Event::GenerationEnd {
            name: name.to_string(),
            finish_reason: Some(finish_reason),
            continuations,
        },
    );

    Ok(AssembledResponse {
        text,
        finish_reason,
        usage,
        continuations,
        attempts,
    })
}
