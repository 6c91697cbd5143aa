//! Integration tests for the parsing front-end public API
//!
//! These exercise extract → detect → transpile as a whole, the way the
//! pipeline crate drives them.

use trellis_core::dialect::Dialect;
use trellis_parser::error::ErrorCode;
use trellis_parser::{detect, extract, transpile};

#[test]
fn test_markdown_block_to_dot() {
    let input = "\
# Architecture

```plantuml
@startuml
class Animal
class Dog
Animal <|-- Dog
@enduml
```
";
    let source = extract(input).expect("Should extract the fenced block");
    let detection = detect(source.raw_text()).expect("Should detect plantuml");
    assert_eq!(detection.dialect(), Dialect::PlantUml);

    let program = transpile(source.raw_text()).expect("Should transpile the class diagram");
    assert_eq!(
        program.to_dot(),
        "digraph classes {\n\
         \x20 node [shape=record, style=filled, fillcolor=white];\n\
         \x20 \"Animal\" [shape=record, label=\"Animal\"];\n\
         \x20 \"Dog\" [shape=record, label=\"Dog\"];\n\
         \x20 \"Dog\" -> \"Animal\" [arrowhead=empty];\n\
         }"
    );
}

#[test]
fn test_sequence_diagram_layout_defaults() {
    let text = "@startuml\n\
                participant Alice\n\
                participant Bob\n\
                Alice -> Bob: Authentication Request\n\
                Bob --> Alice: Authentication Response\n\
                @enduml";
    let program = transpile(text).expect("Should transpile the sequence diagram");
    let dot = program.to_dot();

    assert!(dot.starts_with("digraph sequence {"));
    assert!(dot.contains("rankdir=LR;"));
    assert!(dot.contains("node [shape=box, style=filled, fillcolor=white];"));
    assert!(dot.contains("\"Alice\" -> \"Bob\" [label=\"Authentication Request\"];"));
    assert!(dot.contains("\"Bob\" -> \"Alice\" [style=dashed, label=\"Authentication Response\"];"));
}

#[test]
fn test_mermaid_text_is_detected_not_transpiled() {
    let source = extract("```mermaid\nflowchart TD\n A-->B\n```").unwrap();
    let detection = detect(source.raw_text()).unwrap();
    assert_eq!(detection.dialect(), Dialect::Mermaid);
}

#[test]
fn test_graphviz_passthrough_detection() {
    let text = "digraph G {\n  a -> b;\n}";
    let detection = detect(text).unwrap();
    assert_eq!(detection.dialect(), Dialect::Graphviz);
}

#[test]
fn test_unknown_dialect_reports_e100() {
    let err = detect("SELECT 1;").expect_err("Should not guess a dialect");
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_timeline_diagram_reports_e200() {
    let text = "@startuml\ntimeline\n2024 : founded\n@enduml";
    let err = transpile(text).expect_err("Timeline diagrams are unsupported");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E200));
    assert!(diag.message().contains("timeline"));
}

#[test]
fn test_every_unsupported_line_is_reported() {
    let text = "@startuml\n\
                participant Alice\n\
                !include shared.puml\n\
                Alice -> Bob: hi\n\
                alt happy\n\
                Bob --> Alice: ok\n\
                end\n\
                @enduml";
    let err = transpile(text).expect_err("Fragments and includes are unsupported");
    let diags = err.diagnostics();
    assert_eq!(diags.len(), 3);
    assert!(diags.iter().all(|d| d.code() == Some(ErrorCode::E201)));

    // Line numbers point into the original text, markers included.
    assert_eq!(diags[0].line(), Some(3));
    assert!(diags[0].message().contains("!include"));
}

#[test]
fn test_component_packages_nest_as_clusters() {
    let text = "@startuml\n\
                package \"Web Tier\" {\n\
                [Frontend]\n\
                }\n\
                package \"Service Tier\" {\n\
                [API]\n\
                [Worker]\n\
                }\n\
                [Frontend] --> [API]: REST\n\
                [API] --> [Worker]\n\
                @enduml";
    let dot = transpile(text).unwrap().to_dot();

    assert!(dot.contains("subgraph cluster_0 {"));
    assert!(dot.contains("subgraph cluster_1 {"));
    assert!(dot.contains("label=\"Web Tier\";"));
    assert!(dot.contains("\"Frontend\" -> \"API\" [label=\"REST\"];"));
}

#[test]
fn test_state_machine_end_to_end() {
    let text = "@startuml\n\
                [*] --> Idle\n\
                Idle --> Running: start\n\
                Running --> Idle: stop\n\
                Running --> [*]\n\
                @enduml";
    let dot = transpile(text).unwrap().to_dot();

    assert!(dot.starts_with("digraph states {"));
    assert!(dot.contains("\"__start\" [shape=point, label=\"\"];"));
    assert!(dot.contains("\"__end\" [shape=doublecircle, label=\"\"];"));
    assert!(dot.contains("\"Idle\" -> \"Running\" [label=\"start\"];"));
}

#[test]
fn test_empty_input_reports_e001() {
    let err = extract("   \n\n").expect_err("Empty input has no diagram");
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
}
