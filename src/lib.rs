//! # Design Council
//!
//! Resilient Gemini generation client for frontend code and design
//! artifacts: components, color palettes and typography pairings.
//!
//! A single logical generation may span several API calls. The crate
//! retries transient failures, notices when output was cut off at the
//! length limit and asks the model to continue, stitches the pieces back
//! together, and parses the result into typed values.
//!
//! ## Core Concepts
//!
//! - **[`Transport`]**: one network round trip per call, every failure
//!   classified into a [`CallFailure`]. [`GeminiTransport`] for the real
//!   API, [`MockTransport`] for tests.
//! - **[`RetryPolicy`]**: bounded attempts with 1s, 2s, 4s… backoff;
//!   client errors are never retried.
//! - **[`continuation`]**: the `Accumulating → Continuing → Done` state
//!   machine producing an [`AssembledResponse`].
//! - **[`output_parser`]**: envelope extraction, fence and section
//!   scraping, shape-checked palette and typography payloads.
//! - **[`ExecCtx`]**: transport, policies, cancellation and events for a
//!   run; built once, passed by reference.
//!
//! ## Quick Start
//!
//! ```no_run
//! use design_council::{generate_palettes, ExecCtx, MoodBrief};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ExecCtx::from_env()?.max_continuations(2).build();
//!
//!     let brief = MoodBrief::new("Warm & Cozy").with_project("pomodoro timer");
//!     let palettes = generate_palettes(&ctx, &brief).await?;
//!     for palette in &palettes.options {
//!         println!("{}: {}", palette.name, palette.colors["accent_primary"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-level use
//!
//! ```
//! use design_council::{generate_with_continuation, ExecCtx, FinishReason, GenerationConfig, MockTransport};
//! use design_council::envelope::FinishIndicator;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockTransport::texts(&[
//!     ("function foo() {\n  return", FinishIndicator::LengthLimit),
//!     (" 1;\n}", FinishIndicator::Complete),
//! ]);
//! let ctx = ExecCtx::builder(Arc::new(mock)).build();
//! let response = generate_with_continuation(&ctx, "demo", "Write foo", &GenerationConfig::default())
//!     .await
//!     .unwrap();
//! assert_eq!(response.text, "function foo() {\n  return 1;\n}");
//! assert_eq!(response.finish_reason, FinishReason::Complete);
//! # }
//! ```

pub mod config;
pub mod continuation;
pub mod credentials;
pub mod design;
pub mod envelope;
pub mod error;
pub mod events;
pub mod exec_ctx;
pub mod generate;
pub mod output_parser;
pub mod prompt;
pub mod request;
pub mod retry;
pub mod transport;
pub mod types;

pub use config::GenerationConfig;
pub use continuation::{generate_with_continuation, ContinuationConfig, ControllerState};
pub use credentials::ApiKey;
pub use design::{DesignSpec, Framework, MoodBrief};
pub use envelope::{FinishIndicator, RawEnvelope, UsageMetadata};
pub use error::{CallFailure, CouncilError, ErrorKind, Result};
pub use events::{Event, EventHandler, FnEventHandler};
pub use exec_ctx::{ExecCtx, ExecCtxBuilder};
pub use generate::{
    generate_component, generate_palettes, generate_typography, iterate_component,
    ArtifactOutput, BriefSummary, ComponentOutput,
};
pub use output_parser::{Palette, ParseError, ShapeContract, TypographyPairing};
pub use prompt::IterationRequest;
pub use request::GenerationRequest;
pub use retry::{call_with_retry, RetryPolicy};
pub use transport::{CallOutcome, GeminiTransport, MockTransport, Transport};
pub use types::{AssembledResponse, CodeBlock, FinishReason, ParsedResult, StructuredOutput};
