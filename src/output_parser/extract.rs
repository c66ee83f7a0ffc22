//! Markdown fence scanning.
//!
//! Every parser that looks at model text goes through these functions to
//! find fenced code blocks or to peel a single fence off a JSON payload.

use crate::types::CodeBlock;

/// One fenced region as it appears in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Info string after the opening backticks, trimmed. Empty when untagged.
    pub language: &'a str,
    /// Everything between the opening line and the closing backticks, untrimmed.
    pub body: &'a str,
}

/// Scan `text` for fenced blocks in order.
///
/// An opening fence is triple backticks followed by an optional language
/// tag and a line break; backticks followed by anything else (prose, inline
/// code) are skipped. The block closes at the next triple backtick. An
/// opening fence with no closing one ends the scan.
///
/// # Examples
///
/// ```
/// use design_council::output_parser::extract::fences;
///
/// let text = "Intro\n```tsx\nexport const A = 1;\n```\nand\n```\nplain\n```";
/// let found = fences(text);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].language, "tsx");
/// assert_eq!(found[1].body, "plain\n");
/// ```
pub fn fences(text: &str) -> Vec<Fence<'_>> {
    let mut found = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find("```") {
        let after_backticks = search_from + offset + 3;
        let Some(line_end) = text[after_backticks..].find('\n') else {
            break;
        };
        let language = text[after_backticks..after_backticks + line_end].trim_end();
        if !is_language_tag(language) {
            search_from = after_backticks;
            continue;
        }
        let body_start = after_backticks + line_end + 1;

        let Some(close_offset) = text[body_start..].find("```") else {
            break;
        };
        found.push(Fence {
            language,
            body: &text[body_start..body_start + close_offset],
        });
        search_from = body_start + close_offset + 3;
    }
    found
}

fn is_language_tag(info: &str) -> bool {
    info.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '+'))
}

/// Every fenced block with its language; untagged blocks are labelled `"text"`.
///
/// Code is trimmed of surrounding whitespace.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    fences(text)
        .into_iter()
        .map(|fence| CodeBlock {
            language: if fence.language.is_empty() {
                "text".to_string()
            } else {
                fence.language.to_string()
            },
            code: fence.body.trim().to_string(),
        })
        .collect()
}

/// Bodies of the blocks whose language is one of `languages`, in order.
pub fn blocks_tagged<'a>(text: &'a str, languages: &[&str]) -> Vec<&'a str> {
    fences(text)
        .into_iter()
        .filter(|fence| languages.contains(&fence.language))
        .map(|fence| fence.body)
        .collect()
}

/// Remove one leading ` ```json ` (or bare ` ``` `) fence and one trailing
/// ` ``` ` fence, then trim.
///
/// # Examples
///
/// ```
/// use design_council::output_parser::extract::strip_outer_fence;
///
/// assert_eq!(strip_outer_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_outer_fence("  {\"a\": 1}  "), "{\"a\": 1}");
/// ```
pub fn strip_outer_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Total line count across every fenced block.
pub fn estimate_lines_of_code(text: &str) -> usize {
    extract_code_blocks(text)
        .iter()
        .map(|block| block.code.split('\n').count())
        .sum()
}
