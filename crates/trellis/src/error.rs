//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] which wraps
//! the error conditions that can occur while processing diagram input.

use std::io;

use thiserror::Error;

use trellis_parser::error::ParseError;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics together with the
/// source text they point into, so callers can produce rich reports with
/// labeled spans.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrellisError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
