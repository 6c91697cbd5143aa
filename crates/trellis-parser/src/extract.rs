//! Source extraction: pulling literal diagram text out of raw input.
//!
//! Input may be a bare diagram or a markdown document embedding one in a
//! fenced code block. The first block whose language hint names a known
//! dialect alias wins; when no tagged block exists, the first untagged
//! block is unwrapped instead; otherwise the whole input is taken
//! verbatim. No file or network access happens here.

use log::debug;

use trellis_core::{
    dialect::Dialect,
    source::{DiagramSource, Origin},
};

use crate::error::{Diagnostic, ErrorCode, ParseError};

/// A fenced code block found in the raw input.
#[derive(Debug)]
struct FencedBlock {
    /// Language hint following the opening fence, lowercased.
    hint: String,
    body: String,
}

/// Extracts the literal diagram text from raw input.
///
/// # Errors
///
/// Returns an `E001` diagnostic when the input, or the selected block,
/// contains no diagram text.
///
/// # Examples
///
/// ```
/// use trellis_core::source::Origin;
///
/// let input = "Some prose.\n```dot\ndigraph G { a -> b; }\n```\n";
/// let source = trellis_parser::extract(input).unwrap();
/// assert_eq!(source.raw_text(), "digraph G { a -> b; }");
/// assert_eq!(source.origin(), Origin::MarkdownBlock);
/// ```
pub fn extract(input: &str) -> Result<DiagramSource, ParseError> {
    if input.trim().is_empty() {
        return Err(empty_source_error().into());
    }

    let blocks = fenced_blocks(input);

    let tagged = blocks
        .iter()
        .find(|block| Dialect::from_alias(&block.hint).is_some());
    let untagged = blocks.iter().find(|block| block.hint.is_empty());

    let (text, origin) = match tagged.or(untagged) {
        Some(block) => {
            debug!(hint = block.hint; "Extracted fenced code block");
            (block.body.trim(), Origin::MarkdownBlock)
        }
        None => (input.trim(), Origin::Inline),
    };

    if text.is_empty() {
        return Err(empty_source_error().into());
    }

    Ok(DiagramSource::new(text, origin))
}

fn empty_source_error() -> Diagnostic {
    Diagnostic::error("no diagram text found in input")
        .with_code(ErrorCode::E001)
        .with_help("provide diagram source directly or inside a fenced code block")
}

/// Scans the input for markdown fenced code blocks.
///
/// Unterminated fences are ignored rather than treated as blocks; the
/// surrounding text is then handled as inline diagram source.
fn fenced_blocks(input: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut open_hint: Option<String> = None;
    let mut body_lines: Vec<&str> = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("```") {
            match open_hint.take() {
                Some(hint) => {
                    blocks.push(FencedBlock {
                        hint,
                        body: body_lines.join("\n"),
                    });
                    body_lines.clear();
                }
                None => {
                    open_hint = Some(rest.trim().to_ascii_lowercase());
                }
            }
        } else if open_hint.is_some() {
            body_lines.push(line);
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_block_is_extracted_exactly() {
        let input = "intro\n```mermaid\nflowchart TD\n A-->B\n```\noutro";
        let source = extract(input).unwrap();
        assert_eq!(source.raw_text(), "flowchart TD\n A-->B");
        assert_eq!(source.origin(), Origin::MarkdownBlock);
    }

    #[test]
    fn test_alias_hints_are_case_insensitive() {
        for hint in ["DOT", "Graphviz", "gv", "PlantUML", "uml", "puml"] {
            let input = format!("```{}\ndigraph G {{}}\n```", hint);
            let source = extract(&input).unwrap();
            assert_eq!(source.origin(), Origin::MarkdownBlock);
        }
    }

    #[test]
    fn test_first_tagged_block_wins_over_untagged() {
        let input = "```\nnot this\n```\n```dot\ndigraph G {}\n```";
        let source = extract(input).unwrap();
        assert_eq!(source.raw_text(), "digraph G {}");
    }

    #[test]
    fn test_untagged_block_is_a_fallback() {
        let input = "prose\n```\ndigraph G {}\n```\nmore prose";
        let source = extract(input).unwrap();
        assert_eq!(source.raw_text(), "digraph G {}");
        assert_eq!(source.origin(), Origin::MarkdownBlock);
    }

    #[test]
    fn test_block_with_unknown_hint_is_not_extracted() {
        let input = "```python\nprint('hi')\n```";
        let source = extract(input).unwrap();
        // Whole input taken verbatim; detection will reject it later.
        assert_eq!(source.origin(), Origin::Inline);
        assert!(source.raw_text().contains("print"));
    }

    #[test]
    fn test_whole_input_when_no_fences() {
        let input = "  digraph G { a -> b; }  ";
        let source = extract(input).unwrap();
        assert_eq!(source.raw_text(), "digraph G { a -> b; }");
        assert_eq!(source.origin(), Origin::Inline);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = extract("").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));

        let err = extract("   \n\t\n").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_empty_block_is_an_error() {
        let err = extract("```dot\n\n```").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }
}
