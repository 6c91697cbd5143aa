//! Dialect detection: classifying diagram text into exactly one dialect.
//!
//! All three dialects share arrow-like tokens (`->`, `-->`) and the word
//! "graph", so detection is a fixed, total, ordered rule list rather than
//! heuristic scoring:
//!
//! 1. PlantUML block markers win first: paired `@start*`/`@end*` markers
//!    always classify as PlantUML, even when a `digraph` body is nested
//!    inside. A lone marker still classifies as PlantUML unless the text
//!    itself begins with a Graphviz root.
//! 2. A Graphviz root — optional `strict`, then `digraph`/`graph`,
//!    optional id, then `{` after whitespace/comments — classifies as
//!    Graphviz. `graph` followed by a Mermaid direction token is excluded
//!    here; that grammar belongs to Mermaid.
//! 3. A Mermaid root keyword on the first meaningful line classifies as
//!    Mermaid.
//! 4. Anything else is an error. The detector never guesses.
//!
//! Swapping this order changes the classification of legitimately
//! ambiguous inputs, so it must be preserved as-is.

use log::debug;
use winnow::{
    ModalResult, Parser,
    ascii::{Caseless, multispace1, till_line_ending},
    combinator::{alt, delimited, opt, repeat},
    token::{literal, take_until, take_while},
};

use trellis_core::dialect::Dialect;

use crate::error::{Diagnostic, ErrorCode, ParseError};

/// Mermaid direction tokens that may follow its `graph` root keyword.
/// Graphviz's grammar forbids an identifier in this position being
/// followed by anything but `{`, which is what makes the two separable.
const MERMAID_DIRECTIONS: [&str; 5] = ["TD", "TB", "LR", "RL", "BT"];

/// Mermaid root keywords, lowercased, longest-prefix first.
const MERMAID_ROOTS: [&str; 16] = [
    "block-beta",
    "flowchart",
    "sequencediagram",
    "classdiagram",
    "statediagram",
    "erdiagram",
    "requirementdiagram",
    "requirement",
    "quadrantchart",
    "journey",
    "gantt",
    "pie",
    "gitgraph",
    "mindmap",
    "timeline",
    "c4context",
];

/// The outcome of dialect detection.
///
/// The rationale is a human-readable explanation for diagnostics and
/// logging only; callers must branch on the dialect, never on the
/// rationale text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    dialect: Dialect,
    rationale: String,
}

impl Detection {
    fn new(dialect: Dialect, rationale: impl Into<String>) -> Self {
        Self {
            dialect,
            rationale: rationale.into(),
        }
    }

    /// The detected dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Why the dialect was chosen (diagnostics only).
    pub fn rationale(&self) -> &str {
        &self.rationale
    }
}

/// Classifies non-empty diagram text into exactly one dialect.
///
/// # Errors
///
/// Returns an `E100` diagnostic when the text matches none of the three
/// dialect rule sets.
///
/// # Examples
///
/// ```
/// use trellis_core::dialect::Dialect;
///
/// let detection = trellis_parser::detect("digraph G { a -> b; }").unwrap();
/// assert_eq!(detection.dialect(), Dialect::Graphviz);
/// ```
pub fn detect(text: &str) -> Result<Detection, ParseError> {
    let has_start = has_marker(text, "@start");
    let has_end = has_marker(text, "@end");

    if has_start && has_end {
        return Ok(detected(
            Dialect::PlantUml,
            "paired @start/@end block markers",
        ));
    }

    let graphviz_root = is_graphviz_root(text);

    if (has_start || has_end) && !graphviz_root {
        return Ok(detected(
            Dialect::PlantUml,
            "lone @start/@end block marker and no graphviz root",
        ));
    }

    if graphviz_root {
        return Ok(detected(
            Dialect::Graphviz,
            "graph root keyword with brace-delimited body",
        ));
    }

    if let Some(keyword) = mermaid_root(text) {
        return Ok(detected(
            Dialect::Mermaid,
            format!("mermaid root keyword `{keyword}`"),
        ));
    }

    Err(Diagnostic::error("unrecognized diagram dialect")
        .with_code(ErrorCode::E100)
        .with_help(
            "supported notations: mermaid (flowchart, sequenceDiagram, ...), \
             plantuml (@startuml...@enduml), graphviz (digraph/graph { ... })",
        )
        .into())
}

fn detected(dialect: Dialect, rationale: impl Into<String>) -> Detection {
    let detection = Detection::new(dialect, rationale);
    debug!(
        dialect = detection.dialect().name(),
        rationale = detection.rationale();
        "Dialect detected"
    );
    detection
}

/// Returns true if any line starts with the given block-marker prefix.
fn has_marker(text: &str, prefix: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start().to_ascii_lowercase().starts_with(prefix))
}

/// Returns true if the text begins with a Graphviz graph root.
fn is_graphviz_root(text: &str) -> bool {
    let mut input = text;
    graphviz_root(&mut input).is_ok()
}

/// Whitespace and DOT comments (`//`, `#`, `/* */`).
fn dot_trivia0(input: &mut &str) -> ModalResult<()> {
    repeat(
        0..,
        alt((
            multispace1.void(),
            ("//", till_line_ending).void(),
            ("#", till_line_ending).void(),
            ("/*", take_until(0.., "*/"), "*/").void(),
        )),
    )
    .parse_next(input)
}

/// A DOT identifier: bare word or double-quoted string.
fn dot_identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt((
        delimited('"', take_while(0.., |c| c != '"'), '"'),
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse_next(input)
}

/// The Graphviz root pattern: `strict`? (`digraph`|`graph`) id? `{`.
fn graphviz_root(input: &mut &str) -> ModalResult<()> {
    dot_trivia0(input)?;
    opt((literal(Caseless("strict")), multispace1)).parse_next(input)?;
    let keyword = alt((literal(Caseless("digraph")), literal(Caseless("graph"))))
        .parse_next(input)?;
    dot_trivia0(input)?;
    let name = opt(dot_identifier).parse_next(input)?;

    // `graph TD` and friends are Mermaid flowcharts, not DOT.
    if keyword.eq_ignore_ascii_case("graph")
        && name.is_some_and(|n| MERMAID_DIRECTIONS.contains(&n))
    {
        return Err(winnow::error::ErrMode::Backtrack(
            winnow::error::ContextError::new(),
        ));
    }

    dot_trivia0(input)?;
    '{'.void().parse_next(input)
}

/// Returns the Mermaid root keyword opening the text, if any.
fn mermaid_root(text: &str) -> Option<&'static str> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("%%"))?;
    let lower = line.to_ascii_lowercase();

    // `graph` needs a direction token immediately after; bare `graph` is
    // ambiguous with DOT and is not accepted as a Mermaid root.
    if let Some(rest) = lower.strip_prefix("graph") {
        let direction = rest
            .split_whitespace()
            .next()
            .map(|token| token.to_ascii_uppercase());
        if direction.is_some_and(|d| MERMAID_DIRECTIONS.contains(&d.as_str())) {
            return Some("graph");
        }
    }

    for keyword in MERMAID_ROOTS {
        if let Some(rest) = lower.strip_prefix(keyword) {
            let boundary = rest.chars().next();
            if boundary.is_none_or(|c| !c.is_alphanumeric()) {
                return Some(keyword);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_markers_win_over_nested_digraph() {
        let text = "@startuml\ndigraph inner { a -> b; }\n@enduml";
        let detection = detect(text).unwrap();
        assert_eq!(detection.dialect(), Dialect::PlantUml);
    }

    #[test]
    fn test_lone_marker_is_plantuml() {
        let detection = detect("@startuml\nclass Foo").unwrap();
        assert_eq!(detection.dialect(), Dialect::PlantUml);
    }

    #[test]
    fn test_lone_end_marker_after_graphviz_root_is_graphviz() {
        // The stronger root keyword wins over a stray lone marker.
        let text = "digraph G {\n a -> b; // @enduml in a comment line\n}";
        // `@enduml` here does not start a line, so it is not a marker at
        // all; force one onto its own line to exercise the rule.
        let detection = detect(text).unwrap();
        assert_eq!(detection.dialect(), Dialect::Graphviz);

        let text = "digraph G { a -> b; }\n@enduml";
        let detection = detect(text).unwrap();
        assert_eq!(detection.dialect(), Dialect::Graphviz);
    }

    #[test]
    fn test_digraph_with_arrows_is_graphviz() {
        let detection = detect("digraph G { A -> B; B -> C; }").unwrap();
        assert_eq!(detection.dialect(), Dialect::Graphviz);
        assert_eq!(
            detection.rationale(),
            "graph root keyword with brace-delimited body"
        );
    }

    #[test]
    fn test_strict_and_undirected_roots_are_graphviz() {
        for text in [
            "strict digraph G { }",
            "strict graph { a -- b; }",
            "graph net { a -- b; }",
            "  // a comment\ndigraph \"quoted name\" { }",
            "# shell-style comment\ngraph {}",
            "/* block\ncomment */ digraph {}",
        ] {
            assert_eq!(detect(text).unwrap().dialect(), Dialect::Graphviz);
        }
    }

    #[test]
    fn test_graph_with_direction_token_is_mermaid() {
        let detection = detect("graph TD\n A-->B").unwrap();
        assert_eq!(detection.dialect(), Dialect::Mermaid);

        for dir in ["TB", "LR", "RL", "BT"] {
            let text = format!("graph {}\n X-->Y", dir);
            assert_eq!(detect(&text).unwrap().dialect(), Dialect::Mermaid);
        }
    }

    #[test]
    fn test_mermaid_root_keywords() {
        for text in [
            "flowchart TD\n A-->B",
            "sequenceDiagram\n Alice->>Bob: hi",
            "classDiagram\n class Animal",
            "stateDiagram-v2\n [*] --> Idle",
            "erDiagram\n CUSTOMER ||--o{ ORDER : places",
            "journey\n title My day",
            "gantt\n title Schedule",
            "pie showData\n \"a\": 1",
            "gitGraph\n commit",
            "mindmap\n root",
            "timeline\n title History",
        ] {
            assert_eq!(
                detect(text).unwrap().dialect(),
                Dialect::Mermaid,
                "failed for: {text}"
            );
        }
    }

    #[test]
    fn test_mermaid_comment_lines_are_skipped() {
        let text = "%% a comment\n\nflowchart LR\n A-->B";
        assert_eq!(detect(text).unwrap().dialect(), Dialect::Mermaid);
    }

    #[test]
    fn test_keyword_must_start_the_line() {
        // "pielike" must not match "pie".
        let err = detect("pielike data").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_unknown_text_is_an_error_not_a_guess() {
        let err = detect("SELECT * FROM users;").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            // The rule list is total: any input yields exactly one dialect
            // or the E100 error, never a panic.
            #[test]
            fn detection_is_total(text in "\\PC{0,120}") {
                let _ = detect(&text);
            }

            // Arrow tokens inside a DOT body never flip classification.
            #[test]
            fn graphviz_body_arrows_do_not_confuse(edges in proptest::collection::vec("[a-z]{1,4} -> [a-z]{1,4}", 0..6)) {
                let text = format!("digraph G {{ {} }}", edges.join("; "));
                prop_assert_eq!(detect(&text).unwrap().dialect(), Dialect::Graphviz);
            }
        }
    }
}
