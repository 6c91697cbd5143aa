//! Conversion of classified PlantUML lines into a graph program.
//!
//! The converter walks the body once, feeding a [`GraphBuilder`] and a
//! [`DiagnosticCollector`]. Unsupported lines never vanish: each one
//! becomes an `E201` diagnostic carrying its span, line number and
//! verbatim text, and the whole pass fails if any were seen.

use trellis_core::graph::{
    ArrowHead, EdgeAttrs, EdgeStyle, GraphBuilder, GraphError, GraphProgram, NodeAttrs, Shape,
};
use trellis_core::identifier::Id;

use crate::Span;
use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

use super::kind::DiagramKind;
use super::statement::{self, EdgeDecl, Endpoint, EntityDecl, Line};

/// Identifier for the `[*]` initial pseudo-state.
const INITIAL_STATE: &str = "__start";
/// Identifier for the `[*]` final pseudo-state.
const FINAL_STATE: &str = "__end";

/// Converts a recognized PlantUML body into a graph program.
///
/// # Errors
///
/// Accumulates `E201` for every line outside the supported subset and
/// `E202` for unbalanced container braces and unterminated note or
/// member blocks; returns them all at once.
pub(crate) fn convert(kind: DiagramKind, text: &str) -> Result<GraphProgram, ParseError> {
    let mut builder = GraphBuilder::new(kind.graph_name());
    builder.set_default_shape(kind.default_shape());
    builder.set_node_defaults(kind.node_defaults());
    if let Some(rankdir) = kind.rankdir() {
        builder.set_rankdir(rankdir);
    }

    let mut collector = DiagnosticCollector::new();
    let mut note_open: Option<(Span, usize)> = None;
    let mut member_open: Option<(Span, usize)> = None;

    let mut offset = 0;
    for (index, chunk) in text.split_inclusive('\n').enumerate() {
        let line = chunk.trim_end_matches(['\n', '\r']);
        let line_no = index + 1;
        let span = Span::new(offset..offset + line.len());
        offset += chunk.len();

        if note_open.is_some() {
            if statement::classify(kind, line) == Line::NoteClose {
                note_open = None;
            }
            continue;
        }
        if member_open.is_some() {
            // Classifier members are part of the declaration, not graph
            // statements of their own.
            if line.trim() == "}" {
                member_open = None;
            }
            continue;
        }

        match statement::classify(kind, line) {
            Line::Skip | Line::NoteClose => {}
            Line::NoteOpen => note_open = Some((span, line_no)),
            Line::ContainerOpen { label } => builder.open_cluster(label),
            Line::ContainerClose => {
                if let Err(err) = builder.close_cluster() {
                    collector.emit(container_error(err, Some((span, line_no))));
                }
            }
            Line::Entity(decl) => {
                declare_entity(kind, &decl, &mut builder, &mut collector, span, line_no);
                if decl.opens_body {
                    member_open = Some((span, line_no));
                }
            }
            Line::Edge(edge) => {
                add_edge(kind, &edge, &mut builder, &mut collector, span, line_no, line);
            }
            Line::Unknown => {
                collector.emit(unsupported_line(line, span, line_no));
            }
        }
    }

    // A still-open block at end of input has swallowed every line after
    // its opener; that must surface, not pass silently.
    if let Some((span, line_no)) = note_open {
        collector.emit(
            Diagnostic::error("unterminated note")
                .with_code(ErrorCode::E202)
                .with_label(span, "this note is never closed")
                .with_line(line_no)
                .with_help("close multi-line notes with `end note`"),
        );
    }
    if let Some((span, line_no)) = member_open {
        collector.emit(
            Diagnostic::error("unterminated member body")
                .with_code(ErrorCode::E202)
                .with_label(span, "the `{` opened here is never closed")
                .with_line(line_no),
        );
    }

    collector.finish()?;

    builder
        .finish()
        .map_err(|err| container_error(err, None).into())
}

fn declare_entity(
    kind: DiagramKind,
    decl: &EntityDecl,
    builder: &mut GraphBuilder,
    collector: &mut DiagnosticCollector,
    span: Span,
    line_no: usize,
) {
    let shape = match &decl.stereotype {
        Some(stereotype) => match kind.stereotype_shape(stereotype) {
            Some(shape) => shape,
            None => {
                collector.emit(
                    Diagnostic::error(format!(
                        "unsupported stereotype <<{stereotype}>> in {} diagram",
                        kind.name()
                    ))
                    .with_code(ErrorCode::E201)
                    .with_label(span, "stereotype outside the recognized set")
                    .with_line(line_no),
                );
                return;
            }
        },
        None => kind
            .entity_shape(&decl.keyword)
            .unwrap_or_else(|| kind.default_shape()),
    };

    let attrs = NodeAttrs::shaped(shape).with_label(decl.name.clone());
    builder.declare_node(Id::new(decl.id()), attrs);
}

fn add_edge(
    kind: DiagramKind,
    edge: &EdgeDecl,
    builder: &mut GraphBuilder,
    collector: &mut DiagnosticCollector,
    span: Span,
    line_no: usize,
    line: &str,
) {
    let Some((reversed, mut attrs)) = edge_attrs(kind, edge.token) else {
        collector.emit(unsupported_line(line, span, line_no));
        return;
    };
    if let Some(label) = &edge.label {
        attrs = attrs.with_label(label.clone());
    }

    let (tail, head) = if reversed {
        (&edge.to, &edge.from)
    } else {
        (&edge.from, &edge.to)
    };

    let Some(tail) = resolve_endpoint(kind, tail, builder) else {
        collector.emit(unsupported_line(line, span, line_no));
        return;
    };
    let Some(head) = resolve_endpoint(kind, head, builder) else {
        collector.emit(unsupported_line(line, span, line_no));
        return;
    };
    builder.add_edge(tail, head, attrs);
}

/// Resolves an endpoint to a node identifier, declaring the `[*]`
/// pseudo-states on first use. The pseudo-states only exist in state
/// diagrams.
fn resolve_endpoint(
    kind: DiagramKind,
    endpoint: &Endpoint,
    builder: &mut GraphBuilder,
) -> Option<Id> {
    match endpoint {
        Endpoint::Name(name) => Some(Id::new(name)),
        Endpoint::Boundary if kind == DiagramKind::State => {
            // Positions share one marker token but denote distinct
            // nodes; the initial marker appears first in practice, so
            // the first boundary reference is the initial state.
            let initial = Id::new(INITIAL_STATE);
            if !builder.is_declared(initial) {
                builder.declare_node(
                    initial,
                    NodeAttrs::shaped(Shape::Point).with_label(""),
                );
                return Some(initial);
            }
            let terminal = Id::new(FINAL_STATE);
            if !builder.is_declared(terminal) {
                builder.declare_node(
                    terminal,
                    NodeAttrs::shaped(Shape::DoubleCircle).with_label(""),
                );
            }
            Some(terminal)
        }
        Endpoint::Boundary => None,
    }
}

/// Maps an arrow token to edge direction and attributes.
///
/// Returns the pair `(reversed, attrs)`: a reversed arrow points at its
/// left operand, so the emitted edge runs right-to-left (`Animal <|--
/// Dog` becomes `Dog -> Animal`).
fn edge_attrs(kind: DiagramKind, token: &str) -> Option<(bool, EdgeAttrs)> {
    let sequence = kind == DiagramKind::Sequence;
    let attrs = EdgeAttrs::default();

    let (reversed, attrs) = match token {
        "<|--" => (true, attrs.with_arrowhead(ArrowHead::Empty)),
        "--|>" => (false, attrs.with_arrowhead(ArrowHead::Empty)),
        "<|.." => (
            true,
            attrs
                .with_arrowhead(ArrowHead::Empty)
                .with_style(EdgeStyle::Dashed),
        ),
        "..|>" => (
            false,
            attrs
                .with_arrowhead(ArrowHead::Empty)
                .with_style(EdgeStyle::Dashed),
        ),
        "*--" => (true, attrs.with_arrowhead(ArrowHead::Diamond)),
        "--*" => (false, attrs.with_arrowhead(ArrowHead::Diamond)),
        "o--" => (true, attrs.with_arrowhead(ArrowHead::ODiamond)),
        "--o" => (false, attrs.with_arrowhead(ArrowHead::ODiamond)),
        "..>" => (
            false,
            attrs
                .with_arrowhead(ArrowHead::Open)
                .with_style(EdgeStyle::Dashed),
        ),
        "<.." => (
            true,
            attrs
                .with_arrowhead(ArrowHead::Open)
                .with_style(EdgeStyle::Dashed),
        ),
        "->>" => (false, attrs.with_arrowhead(ArrowHead::Open)),
        "<<-" => (true, attrs.with_arrowhead(ArrowHead::Open)),
        // The long-bodied arrows are reply messages in sequence
        // diagrams, drawn dashed there and solid elsewhere.
        "-->>" if sequence => (
            false,
            attrs
                .with_arrowhead(ArrowHead::Open)
                .with_style(EdgeStyle::Dashed),
        ),
        "-->>" => (false, attrs.with_arrowhead(ArrowHead::Open)),
        "<<--" if sequence => (
            true,
            attrs
                .with_arrowhead(ArrowHead::Open)
                .with_style(EdgeStyle::Dashed),
        ),
        "<<--" => (true, attrs.with_arrowhead(ArrowHead::Open)),
        "-->" if sequence => (false, attrs.with_style(EdgeStyle::Dashed)),
        "<--" if sequence => (true, attrs.with_style(EdgeStyle::Dashed)),
        "-->" => (false, attrs),
        "<--" => (true, attrs),
        "->" => (false, attrs),
        "<-" => (true, attrs),
        "--" => (false, attrs.with_arrowhead(ArrowHead::None)),
        ".." => (
            false,
            attrs
                .with_arrowhead(ArrowHead::None)
                .with_style(EdgeStyle::Dashed),
        ),
        _ => return None,
    };
    Some((reversed, attrs))
}

fn unsupported_line(line: &str, span: Span, line_no: usize) -> Diagnostic {
    Diagnostic::error(format!("unsupported construct: `{}`", line.trim()))
        .with_code(ErrorCode::E201)
        .with_label(span, "not part of the supported plantuml subset")
        .with_line(line_no)
}

fn container_error(err: GraphError, at: Option<(Span, usize)>) -> Diagnostic {
    let diag = Diagnostic::error(err.to_string()).with_code(ErrorCode::E202);
    match at {
        Some((span, line_no)) => diag
            .with_label(span, "container brace without a match")
            .with_line(line_no),
        None => diag.with_help("every `{` container must be closed by a matching `}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(kind: DiagramKind, text: &str) -> String {
        convert(kind, text).unwrap().to_dot()
    }

    #[test]
    fn test_class_inheritance_reverses_direction() {
        let out = dot(DiagramKind::Class, "class Animal\nclass Dog\nAnimal <|-- Dog\n");
        assert!(out.contains("\"Dog\" -> \"Animal\" [arrowhead=empty];"));
    }

    #[test]
    fn test_sequence_reply_is_dashed() {
        let out = dot(
            DiagramKind::Sequence,
            "Alice -> Bob: Request\nBob --> Alice: Response\n",
        );
        assert!(out.contains("rankdir=LR;"));
        assert!(out.contains("\"Alice\" -> \"Bob\" [label=\"Request\"];"));
        assert!(out.contains("\"Bob\" -> \"Alice\" [style=dashed, label=\"Response\"];"));
    }

    #[test]
    fn test_async_message_has_open_head() {
        let out = dot(DiagramKind::Sequence, "Alice ->> Bob: fire and forget\n");
        assert!(out.contains("arrowhead=open"));
    }

    #[test]
    fn test_composition_and_aggregation_heads() {
        let out = dot(
            DiagramKind::Class,
            "Car *-- Engine\nTeam o-- Player\nCar ..> Fuel\n",
        );
        assert!(out.contains("\"Engine\" -> \"Car\" [arrowhead=diamond];"));
        assert!(out.contains("\"Player\" -> \"Team\" [arrowhead=odiamond];"));
        assert!(out.contains("\"Car\" -> \"Fuel\" [arrowhead=open, style=dashed];"));
    }

    #[test]
    fn test_state_boundaries_become_markers() {
        let out = dot(
            DiagramKind::State,
            "[*] --> Idle\nIdle --> Busy: work\nBusy --> [*]\n",
        );
        assert!(out.contains("\"__start\" [shape=point, label=\"\"];"));
        assert!(out.contains("\"__end\" [shape=doublecircle, label=\"\"];"));
        assert!(out.contains("\"__start\" -> \"Idle\";"));
        assert!(out.contains("\"Busy\" -> \"__end\";"));
    }

    #[test]
    fn test_containers_become_clusters() {
        let out = dot(
            DiagramKind::Component,
            "package \"Web Tier\" {\n[Frontend]\n}\n[Frontend] --> [API]\n",
        );
        assert!(out.contains("subgraph cluster_0 {"));
        assert!(out.contains("label=\"Web Tier\""));
    }

    #[test]
    fn test_class_member_bodies_do_not_leak() {
        let out = dot(
            DiagramKind::Class,
            "class Animal {\n +int age\n +isMammal()\n}\nclass Dog\nAnimal <|-- Dog\n",
        );
        assert!(out.contains("\"Animal\" [shape=record, label=\"Animal\"];"));
        assert!(!out.contains("age"));
    }

    #[test]
    fn test_note_bodies_are_skipped_entirely() {
        let out = dot(
            DiagramKind::Sequence,
            "Alice -> Bob: hi\nnote over Alice\nthis -> looks like an edge\nend note\n",
        );
        assert!(!out.contains("looks"));
    }

    #[test]
    fn test_unsupported_lines_collect_into_one_error() {
        let err = convert(
            DiagramKind::Sequence,
            "Alice -> Bob: hi\nalt happy path\nBob --> Alice: ok\nend\n",
        )
        .unwrap_err();
        let diags = err.diagnostics();
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.code() == Some(ErrorCode::E201)));
        assert!(diags[0].message().contains("alt happy path"));
        assert_eq!(diags[0].line(), Some(2));
    }

    #[test]
    fn test_include_is_reported_not_expanded() {
        let err = convert(
            DiagramKind::Sequence,
            "!include common.puml\nAlice -> Bob: hi\n",
        )
        .unwrap_err();
        assert!(err.diagnostics()[0].message().contains("!include"));
    }

    #[test]
    fn test_unbalanced_close_is_a_container_error() {
        let err = convert(DiagramKind::Component, "[A] --> [B]\n}\n").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E202));
    }

    #[test]
    fn test_unclosed_container_is_a_container_error() {
        let err =
            convert(DiagramKind::Component, "package P {\n[A] --> [B]\n").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E202));
    }

    #[test]
    fn test_unterminated_note_is_an_error() {
        let err = convert(
            DiagramKind::Sequence,
            "Alice -> Bob: hi\nnote over Alice\nBob -> Alice: ok\n",
        )
        .unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.line(), Some(2));
        assert!(diag.message().contains("note"));
    }

    #[test]
    fn test_unclosed_member_body_is_an_error() {
        let err = convert(DiagramKind::Class, "class A {\nclass B\nA <|-- B\n").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.line(), Some(1));
    }

    #[test]
    fn test_stereotype_overrides_shape() {
        let out = dot(
            DiagramKind::Deployment,
            "node Web <<cloud>>\nnode App\nWeb --> App\n",
        );
        assert!(out.contains("\"Web\" [shape=egg, label=\"Web\"];"));
        assert!(out.contains("\"App\" [shape=box3d, label=\"App\"];"));
    }

    #[test]
    fn test_unknown_stereotype_is_reported() {
        let err = convert(DiagramKind::State, "state S <<history>>\n").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert!(diag.message().contains("history"));
    }
}
