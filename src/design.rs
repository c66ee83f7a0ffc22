//! Request documents: what the caller wants generated.
//!
//! [`DesignSpec`] describes a component; [`MoodBrief`] describes the feel
//! of a palette or typography request. Both deserialize straight from the
//! JSON the command-line wrappers read on stdin, and both validate into a
//! list of human-readable problems rather than failing on the first one.

use crate::error::{CouncilError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frontend frameworks the component prompt knows how to target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
    Svelte,
    Html,
    Nextjs,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::React,
        Framework::Vue,
        Framework::Svelte,
        Framework::Html,
        Framework::Nextjs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
            Framework::Html => "html",
            Framework::Nextjs => "nextjs",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Framework::ALL
            .into_iter()
            .find(|fw| fw.as_str() == wanted)
            .ok_or_else(|| {
                let supported: Vec<&str> = Framework::ALL.iter().map(|fw| fw.as_str()).collect();
                format!(
                    "Unsupported framework '{}'. Supported: {}",
                    s,
                    supported.join(", ")
                )
            })
    }
}

/// A component generation request.
///
/// Either `design_spec` or `description` must carry the text; `design_spec`
/// wins when both are present.
///
/// # Example
///
/// ```
/// use design_council::design::{DesignSpec, Framework};
///
/// let spec: DesignSpec = serde_json::from_str(
///     r#"{"description": "A pomodoro timer card", "framework": "Vue"}"#,
/// ).unwrap();
/// assert!(spec.validate().is_empty());
/// assert_eq!(spec.framework().unwrap(), Framework::Vue);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_spec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept as text so an unsupported value can be reported, not rejected by serde.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Existing codebase context to stay consistent with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Reviewer feedback from a previous round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl DesignSpec {
    pub fn new(design_spec: impl Into<String>) -> Self {
        Self {
            design_spec: Some(design_spec.into()),
            ..Self::default()
        }
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework.as_str().to_string());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// The specification text: `design_spec`, else `description`, else empty.
    pub fn spec_text(&self) -> &str {
        non_empty(&self.design_spec)
            .or_else(|| non_empty(&self.description))
            .unwrap_or("")
    }

    /// The target framework; React when unset.
    pub fn framework(&self) -> std::result::Result<Framework, String> {
        match non_empty(&self.framework) {
            Some(name) => name.parse(),
            None => Ok(Framework::default()),
        }
    }

    pub fn context(&self) -> Option<&str> {
        non_empty(&self.context)
    }

    pub fn feedback(&self) -> Option<&str> {
        non_empty(&self.feedback)
    }

    /// Every problem with this request, empty when it is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.spec_text().is_empty() {
            errors.push("Missing 'design_spec' or 'description' field".to_string());
        }
        if let Err(message) = self.framework() {
            errors.push(message);
        }
        errors
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CouncilError::InvalidInput(errors))
        }
    }
}

fn default_aesthetic() -> String {
    "modern".to_string()
}

fn default_project() -> String {
    "web application".to_string()
}

/// The brief behind a palette or typography request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBrief {
    #[serde(default)]
    pub mood: String,
    #[serde(default = "default_aesthetic")]
    pub aesthetic: String,
    #[serde(default = "default_project")]
    pub project: String,
    /// Hex colors the user supplied as inspiration (palettes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_colors: Option<Vec<String>>,
}

impl MoodBrief {
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            aesthetic: default_aesthetic(),
            project: default_project(),
            reference_colors: None,
        }
    }

    pub fn with_aesthetic(mut self, aesthetic: impl Into<String>) -> Self {
        self.aesthetic = aesthetic.into();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_reference_colors(mut self, colors: Vec<String>) -> Self {
        self.reference_colors = Some(colors);
        self
    }

    /// Whether non-empty reference colors were supplied.
    pub fn has_reference(&self) -> bool {
        self.reference_colors.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn validate(&self) -> Vec<String> {
        if self.mood.trim().is_empty() {
            vec!["Missing required field: mood".to_string()]
        } else {
            Vec::new()
        }
    }

    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CouncilError::InvalidInput(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_parse() {
        assert_eq!(" React ".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!("NEXTJS".parse::<Framework>().unwrap(), Framework::Nextjs);
        let err = "angular".parse::<Framework>().unwrap_err();
        assert_eq!(
            err,
            "Unsupported framework 'angular'. Supported: react, vue, svelte, html, nextjs"
        );
    }

    #[test]
    fn test_design_spec_requires_text() {
        let spec = DesignSpec::default();
        assert_eq!(
            spec.validate(),
            vec!["Missing 'design_spec' or 'description' field".to_string()]
        );
        let err = spec.ensure_valid().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation errors: Missing 'design_spec' or 'description' field"
        );
    }

    #[test]
    fn test_design_spec_collects_all_errors() {
        let spec: DesignSpec =
            serde_json::from_str(r#"{"design_spec": "  ", "framework": "angular"}"#).unwrap();
        assert_eq!(spec.validate().len(), 2);
    }

    #[test]
    fn test_design_spec_prefers_design_spec_field() {
        let spec: DesignSpec = serde_json::from_str(
            r#"{"design_spec": "Full spec", "description": "Short"}"#,
        )
        .unwrap();
        assert_eq!(spec.spec_text(), "Full spec");
        assert_eq!(spec.framework().unwrap(), Framework::React);
        assert!(spec.context().is_none());
    }

    #[test]
    fn test_non_string_feedback_rejected_at_decode() {
        let result: std::result::Result<DesignSpec, _> =
            serde_json::from_str(r#"{"design_spec": "x", "feedback": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_mood_brief_defaults() {
        let brief: MoodBrief = serde_json::from_str(r#"{"mood": "Warm & Cozy"}"#).unwrap();
        assert_eq!(brief.aesthetic, "modern");
        assert_eq!(brief.project, "web application");
        assert!(!brief.has_reference());
        assert!(brief.validate().is_empty());
    }

    #[test]
    fn test_mood_brief_requires_mood() {
        let brief: MoodBrief = serde_json::from_str(r#"{"aesthetic": "brutalist"}"#).unwrap();
        assert_eq!(brief.validate(), vec!["Missing required field: mood".to_string()]);
        assert!(brief.ensure_valid().is_err());
    }
}
