//! End-to-end generation tasks.
//!
//! Each task validates its request document, builds a prompt, runs the
//! continuation controller over the retrying transport, then parses the
//! assembled text into a serializable result:
//!
//! | Task | Input | Config | Output |
//! |------|-------|--------|--------|
//! | [`generate_component`] | [`DesignSpec`] | [`GenerationConfig::default()`] | [`ComponentOutput`] |
//! | [`iterate_component`] | [`IterationRequest`] | [`GenerationConfig::default()`] | [`ComponentOutput`] |
//! | [`generate_palettes`] | [`MoodBrief`] | [`GenerationConfig::artifact()`] | [`ArtifactOutput<Palette>`] |
//! | [`generate_typography`] | [`MoodBrief`] | [`GenerationConfig::artifact()`] | [`ArtifactOutput<TypographyPairing>`] |

use crate::config::GenerationConfig;
use crate::continuation::generate_with_continuation;
use crate::design::{DesignSpec, MoodBrief};
use crate::envelope::UsageMetadata;
use crate::error::Result;
use crate::exec_ctx::ExecCtx;
use crate::output_parser::{self, Palette, TypographyPairing};
use crate::prompt::{self, IterationRequest};
use crate::types::{AssembledResponse, FinishReason, StructuredOutput};
use serde::Serialize;
use tracing::info;

/// Generated component code plus summary metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentOutput {
    /// The full assembled text.
    pub code: String,
    pub finish_reason: FinishReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
    pub continuations: u32,
    /// Line count across fenced blocks.
    pub lines_of_code: usize,
    pub components_count: usize,
    pub has_styles: bool,
    pub structured: StructuredOutput,
}

impl ComponentOutput {
    fn from_response(response: AssembledResponse) -> Self {
        let structured = output_parser::structure_text(&response.text);
        Self {
            lines_of_code: output_parser::estimate_lines_of_code(&response.text),
            components_count: structured.components.len(),
            has_styles: structured.styles.is_some(),
            structured,
            code: response.text,
            finish_reason: response.finish_reason,
            usage: response.usage,
            continuations: response.continuations,
        }
    }
}

/// Echo of the brief an artifact set was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BriefSummary {
    pub mood: String,
    pub aesthetic: String,
    pub project: String,
    pub has_reference: bool,
}

impl From<&MoodBrief> for BriefSummary {
    fn from(brief: &MoodBrief) -> Self {
        Self {
            mood: brief.mood.clone(),
            aesthetic: brief.aesthetic.clone(),
            project: brief.project.clone(),
            has_reference: brief.has_reference(),
        }
    }
}

/// A validated set of design options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactOutput<T> {
    pub options: Vec<T>,
    pub input: BriefSummary,
    pub finish_reason: FinishReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
}

/// Generate frontend code for a design specification.
///
/// # Example
///
/// ```no_run
/// use design_council::{generate_component, DesignSpec, ExecCtx};
///
/// # async fn run() -> design_council::Result<()> {
/// let ctx = ExecCtx::from_env()?.build();
/// let output = generate_component(&ctx, &DesignSpec::new("A pricing table")).await?;
/// println!("{} lines across {} components", output.lines_of_code, output.components_count);
/// # Ok(())
/// # }
/// ```
pub async fn generate_component(ctx: &ExecCtx, spec: &DesignSpec) -> Result<ComponentOutput> {
    spec.ensure_valid()?;
    ctx.check_cancelled()?;

    let prompt = prompt::component_prompt(spec);
    let response =
        generate_with_continuation(ctx, "component", &prompt, &GenerationConfig::default()).await?;
    let output = ComponentOutput::from_response(response);

    info!(
        finish_reason = ?output.finish_reason,
        continuations = output.continuations,
        lines_of_code = output.lines_of_code,
        components = output.components_count,
        "component generated"
    );
    Ok(output)
}

/// Regenerate a component applying reviewer fixes.
pub async fn iterate_component(ctx: &ExecCtx, request: &IterationRequest) -> Result<ComponentOutput> {
    DesignSpec::new(request.design_spec.clone()).ensure_valid()?;
    ctx.check_cancelled()?;

    let prompt = prompt::iteration_prompt(request);
    let response =
        generate_with_continuation(ctx, "iteration", &prompt, &GenerationConfig::default()).await?;
    Ok(ComponentOutput::from_response(response))
}

/// Generate four color palettes for a mood brief.
pub async fn generate_palettes(ctx: &ExecCtx, brief: &MoodBrief) -> Result<ArtifactOutput<Palette>> {
    brief.ensure_valid()?;
    ctx.check_cancelled()?;

    let prompt = prompt::palette_prompt(brief);
    let response =
        generate_with_continuation(ctx, "palettes", &prompt, &GenerationConfig::artifact()).await?;
    let options = output_parser::parse_palettes(&response.text)?;

    info!(count = options.len(), "palettes generated");
    Ok(ArtifactOutput {
        options,
        input: brief.into(),
        finish_reason: response.finish_reason,
        usage: response.usage,
    })
}

/// Generate four typography pairings for a mood brief.
pub async fn generate_typography(
    ctx: &ExecCtx,
    brief: &MoodBrief,
) -> Result<ArtifactOutput<TypographyPairing>> {
    brief.ensure_valid()?;
    ctx.check_cancelled()?;

    let prompt = prompt::typography_prompt(brief);
    let response =
        generate_with_continuation(ctx, "typography", &prompt, &GenerationConfig::artifact())
            .await?;
    let options = output_parser::parse_typography(&response.text)?;

    info!(count = options.len(), "typography pairings generated");
    Ok(ArtifactOutput {
        options,
        input: brief.into(),
        finish_reason: response.finish_reason,
        usage: response.usage,
    })
}
