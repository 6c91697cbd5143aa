//! Diagram kind recognition and per-kind conversion tables.
//!
//! The supported kinds form a closed enumeration: adding a kind means
//! adding a variant and its rule tables here, keeping conversion behavior
//! auditable. Kinds outside the set are rejected before line-by-line
//! parsing begins.

use trellis_core::graph::{NodeAttrs, NodeStyle, RankDir, Shape};

use crate::error::{Diagnostic, ErrorCode, ParseError};

/// The supported PlantUML diagram kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Sequence,
    Class,
    UseCase,
    Component,
    State,
    Deployment,
    Object,
    Network,
}

impl DiagramKind {
    /// Human-readable kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "class",
            DiagramKind::UseCase => "use-case",
            DiagramKind::Component => "component",
            DiagramKind::State => "state",
            DiagramKind::Deployment => "deployment",
            DiagramKind::Object => "object",
            DiagramKind::Network => "network",
        }
    }

    /// Name given to the emitted graph program.
    pub(crate) fn graph_name(&self) -> &'static str {
        match self {
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "classes",
            DiagramKind::UseCase => "usecases",
            DiagramKind::Component => "components",
            DiagramKind::State => "states",
            DiagramKind::Deployment => "deployment",
            DiagramKind::Object => "objects",
            DiagramKind::Network => "network",
        }
    }

    /// Layout direction for the emitted graph, when not DOT's default.
    pub(crate) fn rankdir(&self) -> Option<RankDir> {
        match self {
            DiagramKind::Sequence | DiagramKind::Network => Some(RankDir::LeftRight),
            _ => None,
        }
    }

    /// Graph-wide node defaults (`node [...]` statement).
    pub(crate) fn node_defaults(&self) -> NodeAttrs {
        NodeAttrs::shaped(self.default_shape())
            .with_style(NodeStyle::Filled)
            .with_fill("white")
    }

    /// Default shape for this kind, assigned to implicitly declared edge
    /// endpoints.
    pub(crate) fn default_shape(&self) -> Shape {
        match self {
            DiagramKind::Sequence => Shape::Box,
            DiagramKind::Class | DiagramKind::Object => Shape::Record,
            DiagramKind::UseCase => Shape::Ellipse,
            DiagramKind::Component => Shape::Component,
            DiagramKind::State => Shape::Box,
            DiagramKind::Deployment => Shape::Box3d,
            DiagramKind::Network => Shape::Box,
        }
    }

    /// Maps an entity declaration keyword to its node shape.
    ///
    /// Returns `None` when the keyword does not declare entities in this
    /// diagram kind.
    pub(crate) fn entity_shape(&self, keyword: &str) -> Option<Shape> {
        match self {
            DiagramKind::Sequence => match keyword {
                "participant" | "collections" | "queue" => Some(Shape::Box),
                "actor" | "boundary" | "control" | "entity" => Some(Shape::Ellipse),
                "database" => Some(Shape::Cylinder),
                _ => None,
            },
            DiagramKind::Class => match keyword {
                "class" | "abstract class" | "interface" | "enum" | "annotation" => {
                    Some(Shape::Record)
                }
                _ => None,
            },
            DiagramKind::UseCase => match keyword {
                "usecase" => Some(Shape::Ellipse),
                "actor" => Some(Shape::Ellipse),
                _ => None,
            },
            DiagramKind::Component => match keyword {
                "component" => Some(Shape::Component),
                "interface" => Some(Shape::Ellipse),
                "database" => Some(Shape::Cylinder),
                _ => None,
            },
            DiagramKind::State => match keyword {
                "state" => Some(Shape::Box),
                _ => None,
            },
            DiagramKind::Deployment => match keyword {
                "node" | "storage" => Some(Shape::Box3d),
                "artifact" => Some(Shape::Note),
                "database" => Some(Shape::Cylinder),
                "cloud" => Some(Shape::Egg),
                "folder" => Some(Shape::Folder),
                "frame" => Some(Shape::Box),
                "actor" => Some(Shape::Ellipse),
                "component" => Some(Shape::Component),
                _ => None,
            },
            DiagramKind::Object => match keyword {
                "object" => Some(Shape::Record),
                _ => None,
            },
            DiagramKind::Network => match keyword {
                "node" | "server" => Some(Shape::Box),
                "cloud" => Some(Shape::Egg),
                "database" => Some(Shape::Cylinder),
                _ => None,
            },
        }
    }

    /// Maps a stereotype icon token to a node shape.
    ///
    /// Each kind recognizes a small closed set; anything else is an
    /// unsupported construct, reported rather than dropped.
    pub(crate) fn stereotype_shape(&self, stereotype: &str) -> Option<Shape> {
        match self {
            DiagramKind::Sequence => match stereotype {
                "actor" => Some(Shape::Ellipse),
                "database" => Some(Shape::Cylinder),
                _ => None,
            },
            DiagramKind::Class => match stereotype {
                // Classifier stereotypes keep the record shape.
                "interface" | "abstract" | "enumeration" | "annotation" => Some(Shape::Record),
                _ => None,
            },
            DiagramKind::UseCase => match stereotype {
                "actor" | "business" => Some(Shape::Ellipse),
                _ => None,
            },
            DiagramKind::Component => match stereotype {
                "component" => Some(Shape::Component),
                "database" => Some(Shape::Cylinder),
                "cloud" => Some(Shape::Egg),
                _ => None,
            },
            DiagramKind::State => None,
            DiagramKind::Deployment => match stereotype {
                "node" | "device" => Some(Shape::Box3d),
                "database" => Some(Shape::Cylinder),
                "cloud" => Some(Shape::Egg),
                "artifact" => Some(Shape::Note),
                "folder" => Some(Shape::Folder),
                _ => None,
            },
            DiagramKind::Object => None,
            DiagramKind::Network => match stereotype {
                "cloud" => Some(Shape::Egg),
                "database" => Some(Shape::Cylinder),
                "server" | "node" => Some(Shape::Box),
                _ => None,
            },
        }
    }

    /// Keywords that open a container when followed by `{`.
    pub(crate) fn is_container_keyword(&self, keyword: &str) -> bool {
        match self {
            DiagramKind::State => matches!(keyword, "state"),
            DiagramKind::Network => matches!(keyword, "network" | "cloud" | "package"),
            _ => matches!(
                keyword,
                "package"
                    | "namespace"
                    | "folder"
                    | "frame"
                    | "node"
                    | "cloud"
                    | "database"
                    | "rectangle"
            ),
        }
    }
}

/// Diagram kinds that are recognized and explicitly unsupported.
///
/// These are rejected up front with an `E200` error naming the kind;
/// they must never degrade into partial or placeholder output.
const UNSUPPORTED_KINDS: [(&str, &str); 9] = [
    ("@startmindmap", "mindmap"),
    ("@startgantt", "gantt"),
    ("@startsalt", "salt"),
    ("@starttiming", "timing"),
    ("@startwbs", "wbs"),
    ("@startjson", "json"),
    ("@startyaml", "yaml"),
    ("timeline", "timeline"),
    ("mindmap", "mindmap"),
];

/// Recognizes the diagram kind from the lines of a PlantUML block.
///
/// # Errors
///
/// Returns `E200` for kinds outside the supported set (activity, timing,
/// timeline, mindmap, gantt, salt, wbs, json, yaml) and for blocks whose
/// kind cannot be recognized at all.
pub(crate) fn recognize(lines: &[&str]) -> Result<DiagramKind, ParseError> {
    if let Some(kind_name) = unsupported_kind(lines) {
        return Err(unsupported_kind_error(kind_name).into());
    }

    for line in lines {
        let lower = line.trim().to_ascii_lowercase();
        if let Some(kind) = supported_marker(&lower) {
            return Ok(kind);
        }
    }

    // Relationship arrows carry kind information of their own: UML
    // inheritance/composition tokens only occur in class diagrams.
    if lines.iter().any(|line| {
        ["<|--", "--|>", "<|..", "..|>", "*--", "--*", "o--", "--o"]
            .iter()
            .any(|token| line.contains(token))
    }) {
        return Ok(DiagramKind::Class);
    }

    // Bare message arrows with no declarations read as a sequence
    // exchange (`A -> B: text`).
    if lines
        .iter()
        .any(|line| line.contains("->") && line.contains(':'))
    {
        return Ok(DiagramKind::Sequence);
    }

    Err(Diagnostic::error("unrecognized plantuml diagram kind")
        .with_code(ErrorCode::E200)
        .with_help(
            "supported kinds: sequence, class, use-case, component, state, \
             deployment, object, network",
        )
        .into())
}

fn unsupported_kind_error(kind_name: &str) -> Diagnostic {
    Diagnostic::error(format!(
        "unsupported plantuml diagram kind: {kind_name}"
    ))
    .with_code(ErrorCode::E200)
    .with_help("this diagram kind requires the full PlantUML engine and is not transpiled")
}

/// Scans for markers of explicitly unsupported kinds.
fn unsupported_kind(lines: &[&str]) -> Option<&'static str> {
    for line in lines {
        let lower = line.trim().to_ascii_lowercase();
        for (marker, kind_name) in UNSUPPORTED_KINDS {
            if lower == marker || lower.starts_with(&format!("{marker} ")) {
                return Some(kind_name);
            }
        }
        // Timing diagrams declare `robust`/`concise` lifelines.
        if lower.starts_with("robust ") || lower.starts_with("concise ") {
            return Some("timing");
        }
        // Activity flow: bare start/stop markers and `:action;` steps.
        if lower == "start" || lower == "stop" {
            return Some("activity");
        }
        if lower.starts_with(':') && lower.ends_with(';') {
            return Some("activity");
        }
        if lower.starts_with("if (") || lower.starts_with("while (") || lower.starts_with("repeat")
        {
            return Some("activity");
        }
    }
    None
}

/// Returns the kind declared by a single lowercased line, if any.
///
/// Checks are ordered: more specific markers (object, class, `[*]` state
/// transitions) take precedence over the generic ones, and the
/// sequence-participant keywords come last because several of them also
/// appear in other kinds.
fn supported_marker(lower: &str) -> Option<DiagramKind> {
    if starts_with_keyword(lower, "object") {
        return Some(DiagramKind::Object);
    }
    if starts_with_keyword(lower, "class")
        || starts_with_keyword(lower, "abstract")
        || starts_with_keyword(lower, "enum")
        || starts_with_keyword(lower, "annotation")
    {
        return Some(DiagramKind::Class);
    }
    if starts_with_keyword(lower, "state") || lower.starts_with("[*]") || lower.ends_with("[*]") {
        return Some(DiagramKind::State);
    }
    if starts_with_keyword(lower, "artifact") || starts_with_keyword(lower, "storage") {
        return Some(DiagramKind::Deployment);
    }
    if starts_with_keyword(lower, "node") && lower.contains("<<") {
        return Some(DiagramKind::Deployment);
    }
    if starts_with_keyword(lower, "nwdiag")
        || starts_with_keyword(lower, "network")
        || starts_with_keyword(lower, "cloud")
    {
        return Some(DiagramKind::Network);
    }
    if starts_with_keyword(lower, "node") {
        return Some(DiagramKind::Deployment);
    }
    if starts_with_keyword(lower, "usecase") || (lower.starts_with(':') && lower.contains('(')) {
        return Some(DiagramKind::UseCase);
    }
    if starts_with_keyword(lower, "component") || lower.starts_with('[') {
        return Some(DiagramKind::Component);
    }
    if starts_with_keyword(lower, "interface") {
        return Some(DiagramKind::Class);
    }
    if starts_with_keyword(lower, "participant")
        || starts_with_keyword(lower, "actor")
        || starts_with_keyword(lower, "boundary")
        || starts_with_keyword(lower, "control")
        || starts_with_keyword(lower, "collections")
        || starts_with_keyword(lower, "queue")
        || starts_with_keyword(lower, "database")
        || starts_with_keyword(lower, "entity")
    {
        return Some(DiagramKind::Sequence);
    }
    None
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}
