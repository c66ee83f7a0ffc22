//! Prompt construction for components, iterations, palettes and typography.
//!
//! Every builder is pure: same inputs, same prompt.

use crate::design::{DesignSpec, Framework, MoodBrief};
use crate::output_parser::REQUIRED_COLORS;

/// Create a numbered list from items (1-indexed).
pub fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create a dash-bulleted list from items.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text in a labeled section for structured prompts.
pub fn section(label: &str, content: &str) -> String {
    format!("## {}\n{}", label, content)
}

const COMPONENT_REQUIREMENTS: &str = "\
1. Generate complete, working code - no placeholders or TODOs
2. Use distinctive typography (avoid Inter, Roboto, Arial, system fonts)
3. Create a cohesive color palette with CSS variables
4. Include appropriate animations and transitions
5. Ensure accessibility (aria-labels, semantic HTML, keyboard navigation)
6. Make it responsive for mobile and desktop
7. Follow modern best practices for the framework";

const COMPONENT_OUTPUT_FORMAT: &str = "\
Return the code in clearly labeled sections:
- Main component(s)
- Styles (if separate)
- Any utility functions
- Import statements needed";

/// Prompt for a first-round component generation.
///
/// # Example
///
/// ```
/// use design_council::design::{DesignSpec, Framework};
/// use design_council::prompt::component_prompt;
///
/// let spec = DesignSpec::new("A pricing table with three tiers").with_framework(Framework::Svelte);
/// let prompt = component_prompt(&spec);
/// assert!(prompt.contains("## Framework\nsvelte"));
/// assert!(!prompt.contains("## Existing Context"));
/// ```
pub fn component_prompt(spec: &DesignSpec) -> String {
    let framework = spec.framework().unwrap_or_default();
    let mut parts = vec![
        "You are an expert frontend developer. Generate production-ready code based on the following design specification.".to_string(),
        section("Framework", framework.as_str()),
        section("Design Specification", spec.spec_text()),
    ];
    if let Some(context) = spec.context() {
        parts.push(section("Existing Context", context));
    }
    if let Some(feedback) = spec.feedback() {
        parts.push(section("Feedback to Address (from previous iteration)", feedback));
    }
    parts.push(section("Requirements", COMPONENT_REQUIREMENTS));
    parts.push(section("Output Format", COMPONENT_OUTPUT_FORMAT));
    parts.push("Generate the code now:".to_string());
    parts.join("\n\n")
}

/// Prompt for a quick component without a full specification.
pub fn simple_prompt(description: &str, framework: Framework) -> String {
    format!(
        "Generate a {} component based on this description:\n\n{}\n\n\
         Requirements:\n\
         - Production-ready code\n\
         - Distinctive typography (avoid generic fonts)\n\
         - Accessible (ARIA labels, keyboard navigation)\n\
         - Responsive design\n\
         - Well-commented code\n\n\
         Generate the code:",
        framework, description
    )
}

/// Reviewer output driving a targeted regeneration.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationRequest {
    pub design_spec: String,
    #[serde(default)]
    pub framework: Framework,
    /// Previous review score out of 10.
    pub score: f64,
    #[serde(default)]
    pub critical_fixes: Vec<String>,
    #[serde(default)]
    pub major_fixes: Vec<String>,
    /// Elements the regeneration must leave untouched.
    #[serde(default)]
    pub preserve: Vec<String>,
}

/// Prompt asking for a regeneration that applies only the listed fixes.
pub fn iteration_prompt(request: &IterationRequest) -> String {
    let critical = if request.critical_fixes.is_empty() {
        "None - all critical issues resolved".to_string()
    } else {
        numbered_list(&request.critical_fixes)
    };
    let major = if request.major_fixes.is_empty() {
        "None - all major issues resolved".to_string()
    } else {
        numbered_list(&request.major_fixes)
    };
    let preserve = if request.preserve.is_empty() {
        "- All current implementations are acceptable".to_string()
    } else {
        bullet_list(&request.preserve)
    };

    [
        format!(
            "The previous code generation scored {}/10. Apply these specific fixes:",
            request.score
        ),
        section("Critical Fixes (must address)", &critical),
        section("Major Fixes (should address)", &major),
        section("Preserve (do not change)", &preserve),
        section("Original Design Specification", &request.design_spec),
        section("Framework", request.framework.as_str()),
        "IMPORTANT: Only make the changes listed above. The rest of the code is correct and should remain unchanged.".to_string(),
        "Regenerate with these fixes applied:".to_string(),
    ]
    .join("\n\n")
}

fn design_context(brief: &MoodBrief) -> String {
    section(
        "Design Context",
        &format!(
            "- **Mood**: {}\n- **Aesthetic**: {}\n- **Project**: {}",
            brief.mood, brief.aesthetic, brief.project
        ),
    )
}

/// Prompt for four palette options as bare JSON.
pub fn palette_prompt(brief: &MoodBrief) -> String {
    let approach = match brief.reference_colors.as_deref() {
        Some(colors) if !colors.is_empty() => section(
            "Reference Colors (User Provided)",
            &format!(
                "The user provided these colors as inspiration: {}\n\n\
                 Generate variations based on these colors:\n\
                 - **Option 1**: Closest match to the reference colors\n\
                 - **Options 2-4**: Creative variations that keep the same mood but explore different directions",
                colors.join(", ")
            ),
        ),
        _ => section(
            "Generation Approach",
            "No reference colors were provided. Generate 4 distinct palettes that all fit the mood and aesthetic, each with its own character:\n\
             - **Option 1**: The most classic, safe choice for this mood\n\
             - **Option 2**: A bolder, more vibrant interpretation\n\
             - **Option 3**: A subtle, sophisticated variation\n\
             - **Option 4**: An unexpected take that still fits the mood",
        ),
    };

    let roles = REQUIRED_COLORS
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>();
    let example_colors = REQUIRED_COLORS
        .iter()
        .map(|role| format!("        \"{}\": \"#HEXCODE\"", role))
        .collect::<Vec<_>>()
        .join(",\n");

    [
        format!(
            "You are a professional UI/UX designer creating color palettes for a {}.",
            brief.project
        ),
        design_context(brief),
        approach,
        section(
            "Task",
            &format!(
                "Generate exactly 4 color palette options. Each palette must define all {} color roles:\n{}",
                REQUIRED_COLORS.len(),
                numbered_list(&roles)
            ),
        ),
        section(
            "Output Format",
            &format!(
                "Return ONLY valid JSON in this exact structure (no markdown, no explanation):\n\n\
                 {{\n  \"palettes\": [\n    {{\n      \"name\": \"Palette Name\",\n      \
                 \"description\": \"Brief description of this palette's character\",\n      \
                 \"colors\": {{\n{}\n      }}\n    }}\n  ]\n}}",
                example_colors
            ),
        ),
        section(
            "Design Guidelines",
            "- Ensure sufficient contrast ratios (WCAG AA minimum)\n\
             - Background colors should work together without harsh transitions\n\
             - Accent colors should stand out against backgrounds\n\
             - Text colors must be readable on their backgrounds\n\
             - Names should be evocative (e.g. \"Warm Sunset\", \"Nordic Frost\")",
        ),
        "Generate the 4 palettes now. Output ONLY the JSON, no other text.".to_string(),
    ]
    .join("\n\n")
}

/// Prompt for four typography pairings as bare JSON.
pub fn typography_prompt(brief: &MoodBrief) -> String {
    [
        format!(
            "You are a professional typography designer creating font pairings for a {}.",
            brief.project
        ),
        design_context(brief),
        section(
            "Task",
            "Generate exactly 4 typography pairing options. Each pairing must include:\n\
             1. A **display** font for titles and headings\n\
             2. A **body** font for paragraphs and UI text\n\
             3. An optional **mono** font for code or technical content",
        ),
        section(
            "Requirements",
            "- Use only Google Fonts\n\
             - Ensure readability and accessibility\n\
             - Give each pairing a distinct character that still fits the mood\n\
             - Include appropriate font weights",
        ),
        section(
            "Output Format",
            "Return ONLY valid JSON in this exact structure (no markdown, no explanation):\n\n\
             {\n  \"typography\": [\n    {\n      \"name\": \"Pairing Name\",\n      \
             \"description\": \"Brief description of this pairing's character\",\n      \
             \"display\": {\"family\": \"Font Name\", \"weights\": [500, 600, 700], \"style\": \"serif\"},\n      \
             \"body\": {\"family\": \"Font Name\", \"weights\": [400, 500, 600], \"style\": \"sans-serif\"},\n      \
             \"mono\": {\"family\": \"Font Name\", \"weights\": [400, 500]},\n      \
             \"google_fonts_url\": \"https://fonts.googleapis.com/css2?family=...\"\n    }\n  ]\n}",
        ),
        section(
            "Google Fonts URL Format",
            "`https://fonts.googleapis.com/css2?family=Font+Name:wght@400;500;600&family=Other+Font:wght@400;700&display=swap`",
        ),
        "Generate the 4 typography pairings now. Output ONLY the JSON, no other text.".to_string(),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list() {
        let items = vec![
            "First".to_string(),
            "Second".to_string(),
            "Third".to_string(),
        ];
        assert_eq!(numbered_list(&items), "1. First\n2. Second\n3. Third");
        assert_eq!(numbered_list(&[]), "");
    }

    #[test]
    fn test_section() {
        assert_eq!(section("Context", "Some knowledge here"), "## Context\nSome knowledge here");
    }

    #[test]
    fn test_component_prompt_optional_sections() {
        let spec = DesignSpec::new("Landing hero")
            .with_context("Uses Tailwind")
            .with_feedback("Buttons too small");
        let prompt = component_prompt(&spec);
        assert!(prompt.contains("## Framework\nreact"));
        assert!(prompt.contains("## Design Specification\nLanding hero"));
        assert!(prompt.contains("## Existing Context\nUses Tailwind"));
        assert!(prompt.contains("## Feedback to Address (from previous iteration)\nButtons too small"));
        assert!(prompt.ends_with("Generate the code now:"));
    }

    #[test]
    fn test_iteration_prompt_lists() {
        let request = IterationRequest {
            design_spec: "Login form".into(),
            framework: Framework::Vue,
            score: 6.5,
            critical_fixes: vec!["Add labels".into(), "Fix focus ring".into()],
            major_fixes: vec![],
            preserve: vec!["Color palette".into()],
        };
        let prompt = iteration_prompt(&request);
        assert!(prompt.starts_with("The previous code generation scored 6.5/10."));
        assert!(prompt.contains("1. Add labels\n2. Fix focus ring"));
        assert!(prompt.contains("None - all major issues resolved"));
        assert!(prompt.contains("## Preserve (do not change)\n- Color palette"));
        assert!(prompt.contains("## Framework\nvue"));
    }

    #[test]
    fn test_palette_prompt_with_and_without_reference() {
        let brief = MoodBrief::new("Warm & Cozy").with_project("pomodoro timer");
        let prompt = palette_prompt(&brief);
        assert!(prompt.contains("color palettes for a pomodoro timer"));
        assert!(prompt.contains("## Generation Approach"));
        assert!(prompt.contains("12. error"));
        assert!(prompt.contains("\"border_focus\": \"#HEXCODE\""));

        let with_ref = palette_prompt(
            &brief.with_reference_colors(vec!["#FAF6F1".into(), "#C4704A".into()]),
        );
        assert!(with_ref.contains("inspiration: #FAF6F1, #C4704A"));
        assert!(!with_ref.contains("## Generation Approach"));
    }

    #[test]
    fn test_typography_prompt() {
        let prompt = typography_prompt(&MoodBrief::new("Editorial"));
        assert!(prompt.contains("- **Mood**: Editorial"));
        assert!(prompt.contains("- **Aesthetic**: modern"));
        assert!(prompt.contains("\"typography\": ["));
    }

    #[test]
    fn test_simple_prompt() {
        let prompt = simple_prompt("a toggle switch", Framework::Html);
        assert!(prompt.starts_with("Generate a html component"));
        assert!(prompt.contains("a toggle switch"));
    }
}
