//! Section scraping for generated frontend code.
//!
//! The component prompt asks for labelled sections (components, styles,
//! utilities, imports). These helpers split a response along those lines.
//! All of them are best-effort: missing sections come back as `None` or an
//! empty list, never as an error.

use super::extract::blocks_tagged;
use crate::error::{CouncilError, Result};
use crate::types::{ParsedResult, StructuredOutput};
use regex::Regex;
use std::sync::OnceLock;

/// Fence languages treated as component source.
pub const COMPONENT_LANGUAGES: &[&str] = &["tsx", "ts", "jsx", "js", "vue", "svelte"];

/// Fence languages treated as stylesheets.
pub const STYLE_LANGUAGES: &[&str] = &["css", "scss", "sass"];

fn reasoning_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?s)## Reasoning\n(.*?)(?:##|\z)").expect("reasoning pattern is valid"),
            Regex::new(r"(?s)## Explanation\n(.*?)(?:##|\z)").expect("explanation pattern is valid"),
            Regex::new(r"(?s)### Why\n(.*?)(?:###|\z)").expect("why pattern is valid"),
        ]
    })
}

fn import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^import\s+.*$").expect("import pattern is valid"))
}

fn utility_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)## (?:Utility|Utils|Helpers).*?```(?:ts|js)\n(.*?)```")
            .expect("utility pattern is valid")
    })
}

/// Body of the first `## Reasoning`, `## Explanation` or `### Why` section.
///
/// Patterns are tried in that order; the body runs to the next heading of
/// the same depth or the end of the text.
///
/// # Examples
///
/// ```
/// use design_council::output_parser::extract_reasoning;
///
/// let text = "## Reasoning\nSerif headings feel editorial.\n## Code\n...";
/// assert_eq!(extract_reasoning(text).as_deref(), Some("Serif headings feel editorial."));
/// ```
pub fn extract_reasoning(text: &str) -> Option<String> {
    reasoning_patterns().iter().find_map(|pattern| {
        let body = pattern.captures(text)?.get(1)?.as_str().trim();
        (!body.is_empty()).then(|| body.to_string())
    })
}

/// Every line starting with `import `, joined by newlines.
pub fn extract_imports(text: &str) -> Option<String> {
    let lines: Vec<&str> = import_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('\r'))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// ts/js blocks that follow a `## Utility`, `## Utils` or `## Helpers` heading.
pub fn extract_utilities(text: &str) -> Option<String> {
    let bodies: Vec<&str> = utility_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    (!bodies.is_empty()).then(|| bodies.join("\n\n"))
}

/// Split generated text into components, styles, utilities, imports and reasoning.
pub fn structure_text(text: &str) -> StructuredOutput {
    let components = blocks_tagged(text, COMPONENT_LANGUAGES)
        .into_iter()
        .map(str::to_string)
        .collect();

    let styles = blocks_tagged(text, STYLE_LANGUAGES);
    let styles = (!styles.is_empty()).then(|| styles.join("\n\n"));

    StructuredOutput {
        raw_code: text.to_string(),
        components,
        styles,
        utilities: extract_utilities(text),
        imports: extract_imports(text),
        reasoning: extract_reasoning(text),
    }
}

/// Structure an extracted response, refusing one the extractor flagged.
pub fn parse_structured_output(parsed: &ParsedResult) -> Result<StructuredOutput> {
    if let Some(ref message) = parsed.error {
        return Err(CouncilError::Envelope(message.clone()));
    }
    Ok(structure_text(&parsed.code))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "## Reasoning
A warm serif pairs with a neutral sans for readability.

## Main Component
```tsx
import React from 'react';
import { useState } from 'react';

export function Timer() {
  return <div className=\"timer\" />;
}
```

## Styles
```css
.timer { color: var(--accent); }
```

```scss
.timer { &:hover { opacity: 0.9; } }
```

## Utility Functions
```ts
export const pad = (n: number) => String(n).padStart(2, '0');
```
";

    #[test]
    fn test_structure_text_sections() {
        let out = structure_text(RESPONSE);
        assert_eq!(out.raw_code, RESPONSE);
        // the tsx component and the ts utility block
        assert_eq!(out.components.len(), 2);
        assert!(out.components[0].contains("export function Timer"));

        let styles = out.styles.unwrap();
        assert!(styles.contains(".timer { color"));
        assert!(styles.contains("&:hover"));
        assert!(styles.contains("\n\n"));

        assert!(out.utilities.unwrap().contains("padStart"));
        assert_eq!(
            out.imports.as_deref(),
            Some("import React from 'react';\nimport { useState } from 'react';")
        );
        assert_eq!(
            out.reasoning.as_deref(),
            Some("A warm serif pairs with a neutral sans for readability.")
        );
    }

    #[test]
    fn test_missing_sections() {
        let out = structure_text("Nothing fenced here.");
        assert!(out.components.is_empty());
        assert!(out.styles.is_none());
        assert!(out.utilities.is_none());
        assert!(out.imports.is_none());
        assert!(out.reasoning.is_none());
    }

    #[test]
    fn test_reasoning_fallbacks() {
        assert_eq!(
            extract_reasoning("## Explanation\nBecause grids.").as_deref(),
            Some("Because grids.")
        );
        assert_eq!(
            extract_reasoning("### Why\nContrast.\n### Next\nmore").as_deref(),
            Some("Contrast.")
        );
        assert!(extract_reasoning("## Reasoning\n\n## Code").is_none());
    }

    #[test]
    fn test_import_lines_only_at_line_start() {
        let text = "// we import nothing here\nimport a from 'a';\n  import b from 'b';";
        assert_eq!(extract_imports(text).as_deref(), Some("import a from 'a';"));
    }

    #[test]
    fn test_parse_structured_output_refuses_failed_extraction() {
        let parsed = ParsedResult::failed("No parts in response content");
        let err = parse_structured_output(&parsed).unwrap_err();
        assert!(err.to_string().contains("parts"));

        let ok = ParsedResult {
            code: "```vue\n<template />\n```".into(),
            ..ParsedResult::default()
        };
        assert_eq!(parse_structured_output(&ok).unwrap().components, vec!["<template />\n"]);
    }
}
