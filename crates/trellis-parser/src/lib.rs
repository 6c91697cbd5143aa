//! Parsing front-end for the Trellis diagram pipeline.
//!
//! The crate covers the three text-handling phases that run before any
//! rendering decision:
//!
//! - [`extract`]: pull literal diagram text out of raw input, unwrapping
//!   markdown fenced code blocks.
//! - [`detect`]: classify the text into exactly one dialect (Mermaid,
//!   PlantUML or Graphviz) with a fixed, ordered rule list.
//! - [`transpile`]: convert a supported PlantUML subset into a
//!   deterministic DOT graph program.
//!
//! All phases are pure text processing; no file or network access
//! happens here. Failures are reported as [`error::ParseError`]s
//! carrying one diagnostic per problem found.

pub mod error;

mod detect;
mod extract;
mod span;
mod transpile;

pub use detect::{Detection, detect};
pub use extract::extract;
pub use span::Span;
pub use transpile::{DiagramKind, transpile};
