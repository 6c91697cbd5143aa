//! Line-level parsing of PlantUML diagram bodies.
//!
//! Each body line is classified into exactly one statement shape:
//! presentation directives are skipped, entity declarations, edges and
//! container delimiters are parsed, and everything else is `Unknown`,
//! which the converter reports rather than drops.

use winnow::{
    ModalResult, Parser,
    ascii::{space0, space1},
    combinator::{alt, delimited, eof, opt, preceded},
    token::{rest, take_while},
};

use super::kind::DiagramKind;

/// Presentation directives that carry no graph structure.
const SKIP_PREFIXES: [&str; 16] = [
    "title",
    "caption",
    "header",
    "footer",
    "skinparam",
    "hide",
    "show",
    "autonumber",
    "autoactivate",
    "activate",
    "deactivate",
    "scale",
    "left to right direction",
    "top to bottom direction",
    "allowmixing",
    "newpage",
];

/// One classified body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    /// A recognized directive with no graph effect.
    Skip,
    /// Opens a multi-line note or legend; lines are skipped until the
    /// matching close.
    NoteOpen,
    /// Closes a multi-line note or legend.
    NoteClose,
    /// Opens a named container (`package X {`, composite `state X {`).
    ContainerOpen { label: String },
    /// A bare `}` closing the innermost container.
    ContainerClose,
    Entity(EntityDecl),
    Edge(EdgeDecl),
    /// Not part of the supported subset.
    Unknown,
}

/// An entity declaration (`participant "Web App" as web <<browser>>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntityDecl {
    pub keyword: String,
    pub name: String,
    pub alias: Option<String>,
    pub stereotype: Option<String>,
    /// Trailing `{` opening a member body (class diagrams).
    pub opens_body: bool,
}

impl EntityDecl {
    /// The node identifier: the alias when present, the name otherwise.
    pub fn id(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// One endpoint of a relationship line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Name(String),
    /// The `[*]` pseudo-state in state diagrams.
    Boundary,
}

/// An edge declaration (`Animal <|-- Dog`, `Alice -> Bob: hello`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeDecl {
    pub from: Endpoint,
    pub to: Endpoint,
    /// Normalized arrow token, direction hints stripped.
    pub token: &'static str,
    pub label: Option<String>,
}

/// Classifies one trimmed body line.
pub(crate) fn classify(kind: DiagramKind, line: &str) -> Line {
    let line = line.trim();
    if line.is_empty() || line.starts_with('\'') {
        return Line::Skip;
    }

    let lower = line.to_ascii_lowercase();
    if lower.starts_with("@start") || lower.starts_with("@end") {
        return Line::Skip;
    }

    if matches!(
        lower.as_str(),
        "end note" | "endnote" | "end rnote" | "end hnote" | "end legend" | "endlegend"
    ) {
        return Line::NoteClose;
    }
    if starts_with_word(&lower, "note")
        || starts_with_word(&lower, "rnote")
        || starts_with_word(&lower, "hnote")
    {
        // `note left of X: text` is one line; without the colon the note
        // body continues until `end note`.
        return if line.contains(':') {
            Line::Skip
        } else {
            Line::NoteOpen
        };
    }
    if lower == "legend" || starts_with_word(&lower, "legend") {
        return Line::NoteOpen;
    }

    if SKIP_PREFIXES
        .iter()
        .any(|prefix| starts_with_word(&lower, prefix))
    {
        return Line::Skip;
    }
    // Sequence separators and delays.
    if (line.starts_with("==") && line.ends_with("=="))
        || line.starts_with("...")
        || line == "|||"
    {
        return Line::Skip;
    }

    // Preprocessor lines (`!include`, `!define`, ...) are outside the
    // subset and must surface as errors, not silence.
    if line.starts_with('!') {
        return Line::Unknown;
    }

    if line == "}" {
        return Line::ContainerClose;
    }

    if let Ok(edge) = edge_line.parse(line) {
        return Line::Edge(edge);
    }

    if let Some(stmt) = declaration(kind, line) {
        return stmt;
    }

    // A lone wrapped reference (`[Frontend]`, `(Login)`, `:User:`)
    // declares a node with the kind's default shape.
    if let Ok(name) = wrapped_reference.parse(line) {
        return Line::Entity(EntityDecl {
            keyword: String::new(),
            name,
            alias: None,
            stereotype: None,
            opens_body: false,
        });
    }

    Line::Unknown
}

fn wrapped_reference(input: &mut &str) -> ModalResult<String> {
    delimited(
        space0,
        alt((
            delimited('[', take_while(1.., |c| c != ']'), ']'),
            delimited('(', take_while(1.., |c| c != ')'), ')'),
            delimited(':', take_while(1.., |c| c != ':'), ':'),
        )),
        (space0, eof),
    )
    .map(|s: &str| s.trim().to_owned())
    .parse_next(input)
}

fn starts_with_word(line: &str, word: &str) -> bool {
    line.strip_prefix(word)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Parses entity declarations and container opens, which share the
/// `keyword name ...` shape.
fn declaration(kind: DiagramKind, line: &str) -> Option<Line> {
    let (keyword, rest) = split_keyword(line)?;

    let opens_container = line.trim_end().ends_with('{') && kind.is_container_keyword(&keyword);
    let declares_entity = kind.entity_shape(&keyword).is_some();
    if !opens_container && !declares_entity {
        return None;
    }

    let mut decl = entity_tail.parse(rest.trim()).ok()?;
    decl.keyword = keyword;

    if opens_container && decl.opens_body {
        return Some(Line::ContainerOpen {
            label: decl.name.clone(),
        });
    }
    if decl.opens_body && !matches!(kind, DiagramKind::Class | DiagramKind::Object) {
        // Only classifier declarations carry member bodies.
        return None;
    }
    declares_entity.then_some(Line::Entity(decl))
}

/// Splits the leading declaration keyword, folding `abstract class` and
/// bare `abstract` into one keyword.
fn split_keyword(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim_start();
    let word_end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let (word, rest) = trimmed.split_at(word_end);
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let word = word.to_ascii_lowercase();

    if word == "abstract" {
        let rest = rest.trim_start();
        let rest = rest.strip_prefix("class").unwrap_or(rest);
        return Some(("abstract class".to_owned(), rest));
    }
    Some((word, rest))
}

/// The declaration tail after the keyword: name, optional alias and
/// stereotype in either order, optional trailing `{`.
fn entity_tail(input: &mut &str) -> ModalResult<EntityDecl> {
    let name = preceded(space0, identifier).parse_next(input)?;

    let mut alias = None;
    let mut stereotype = None;
    loop {
        if alias.is_none() {
            if let Some(found) =
                opt(preceded((space1, "as", space1), identifier)).parse_next(input)?
            {
                alias = Some(found);
                continue;
            }
        }
        if stereotype.is_none() {
            if let Some(found) = opt(preceded(space0, stereotype_token)).parse_next(input)? {
                stereotype = Some(found);
                continue;
            }
        }
        break;
    }

    let brace = opt(preceded(space0, '{')).parse_next(input)?;
    (space0, eof).parse_next(input)?;

    Ok(EntityDecl {
        keyword: String::new(),
        name,
        alias,
        stereotype,
        opens_body: brace.is_some(),
    })
}

/// `<<stereotype>>`, inner token lowercased.
fn stereotype_token(input: &mut &str) -> ModalResult<String> {
    delimited("<<", take_while(1.., |c| c != '>'), ">>")
        .map(|s: &str| s.trim().to_ascii_lowercase())
        .parse_next(input)
}

/// A relationship line: endpoint, arrow, endpoint, optional `: label`.
///
/// Class multiplicities (`Customer "1" --> "many" Order`) are accepted
/// and discarded; they have no DOT counterpart.
fn edge_line(input: &mut &str) -> ModalResult<EdgeDecl> {
    let from = preceded(space0, endpoint).parse_next(input)?;
    opt(preceded(space1, quoted)).parse_next(input)?;
    let token = preceded(space0, arrow_token).parse_next(input)?;
    let to = alt((
        preceded((space1, quoted, space1), endpoint),
        preceded(space0, endpoint),
    ))
    .parse_next(input)?;
    let label = opt(preceded((space0, ':', space0), rest.map(str::to_owned))).parse_next(input)?;
    (space0, eof).parse_next(input)?;

    Ok(EdgeDecl {
        from,
        to,
        token,
        label: label.filter(|l| !l.trim().is_empty()).map(|l| l.trim_end().to_owned()),
    })
}

fn endpoint(input: &mut &str) -> ModalResult<Endpoint> {
    alt((
        "[*]".value(Endpoint::Boundary),
        identifier.map(Endpoint::Name),
    ))
    .parse_next(input)
}

/// A node reference: quoted text, `[component]`, `(usecase)`, `:actor:`
/// or a bare word.
fn identifier(input: &mut &str) -> ModalResult<String> {
    alt((
        quoted,
        delimited('[', take_while(1.., |c| c != ']'), ']').map(|s: &str| s.trim().to_owned()),
        delimited('(', take_while(1.., |c| c != ')'), ')').map(|s: &str| s.trim().to_owned()),
        delimited(':', take_while(1.., |c| c != ':'), ':').map(|s: &str| s.trim().to_owned()),
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '.')
            .map(str::to_owned),
    ))
    .parse_next(input)
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited('"', take_while(0.., |c| c != '"'), '"')
        .map(str::to_owned)
        .parse_next(input)
}

/// The supported arrow tokens, longest first. Direction hints
/// (`-down->`, `-l->`) normalize to the plain directed arrow.
fn arrow_token(input: &mut &str) -> ModalResult<&'static str> {
    alt((
        alt((
            "<|--".value("<|--"),
            "<|..".value("<|.."),
            "--|>".value("--|>"),
            "..|>".value("..|>"),
            "-->>".value("-->>"),
            "<<--".value("<<--"),
        )),
        alt((
            "->>".value("->>"),
            "<<-".value("<<-"),
            "--*".value("--*"),
            "*--".value("*--"),
            "--o".value("--o"),
        )),
        alt((
            "o--".value("o--"),
            "..>".value("..>"),
            "<..".value("<.."),
            "-->".value("-->"),
            "<--".value("<--"),
        )),
        direction_hinted,
        alt((
            "->".value("->"),
            "<-".value("<-"),
            "--".value("--"),
            "..".value(".."),
        )),
    ))
    .parse_next(input)
}

fn direction_hinted(input: &mut &str) -> ModalResult<&'static str> {
    (
        '-',
        alt(("down", "up", "left", "right", "d", "u", "l", "r")),
        "->",
    )
        .value("->")
        .parse_next(input)
}
