//! Error and diagnostic system for the Trellis pipeline.
//!
//! This module provides an error handling system with:
//! - Error codes mapping 1:1 to the pipeline's public error kinds
//! - Labeled spans pointing at offending lines in the source text
//! - A collector for accumulating multiple errors in one pass
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, a single error
//! with an optional code, labeled source locations, and help text. One
//! or more diagnostics are wrapped in [`ParseError`] when a phase
//! fails.
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::{Diagnostic, ErrorCode};
//! # use trellis_parser::Span;
//!
//! let span = Span::new(100..120);
//!
//! let diag = Diagnostic::error("unsupported construct in sequence diagram")
//!     .with_code(ErrorCode::E201)
//!     .with_label(span, "`alt` fragments are not supported")
//!     .with_line(7);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
