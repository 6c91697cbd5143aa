//! PlantUML-to-DOT transpilation.
//!
//! The transpiler handles a deliberate subset of PlantUML: entity
//! declarations, relationship arrows, containers and presentation
//! directives across eight structural diagram kinds. Everything outside
//! the subset fails with a diagnostic naming the construct; there is no
//! partial or placeholder output.
//!
//! The pass runs in two stages:
//!
//! 1. [`kind`] recognizes which diagram kind the block declares and
//!    rejects kinds outside the supported set.
//! 2. [`convert`] classifies each line ([`statement`]) and feeds a
//!    graph builder, accumulating diagnostics for unsupported lines.

mod convert;
mod kind;
mod statement;

pub use kind::DiagramKind;

use log::info;
use trellis_core::graph::GraphProgram;

use crate::error::ParseError;

/// Transpiles PlantUML text into a DOT graph program.
///
/// The input may or may not carry `@startuml`/`@enduml` markers; marker
/// lines are ignored either way. Output is deterministic: statements
/// appear in input order and attributes serialize in canonical order,
/// so equal inputs produce byte-identical DOT.
///
/// # Errors
///
/// Returns `E200` when the diagram kind is outside the supported set,
/// and the accumulated `E201`/`E202` diagnostics when the body contains
/// unsupported constructs or unbalanced containers.
///
/// # Examples
///
/// ```
/// let program = trellis_parser::transpile(
///     "@startuml\nclass Animal\nclass Dog\nAnimal <|-- Dog\n@enduml",
/// )
/// .unwrap();
/// assert!(program.to_dot().contains("\"Dog\" -> \"Animal\" [arrowhead=empty];"));
/// ```
pub fn transpile(text: &str) -> Result<GraphProgram, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let kind = kind::recognize(&lines)?;
    info!(kind = kind.name(); "Recognized plantuml diagram kind");

    convert::convert(kind, text)
}
