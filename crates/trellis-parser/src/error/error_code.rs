//! Error codes for the Trellis diagnostic system.
//!
//! Error codes are organized by pipeline phase:
//! - `E0xx` - Source extraction errors
//! - `E1xx` - Dialect detection errors
//! - `E2xx` - Transpilation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
///
/// Each code corresponds to one error kind in the pipeline's public
/// failure contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Extraction Errors (E0xx)
    // =========================================================================
    /// Empty source.
    ///
    /// The input, or the extracted code block, contained no diagram text.
    E001,

    // =========================================================================
    // Detection Errors (E1xx)
    // =========================================================================
    /// Unrecognized dialect.
    ///
    /// The text matched none of the three dialect rule sets. The detector
    /// never guesses; unknown input is always reported.
    E100,

    // =========================================================================
    // Transpilation Errors (E2xx)
    // =========================================================================
    /// Unsupported diagram kind.
    ///
    /// The PlantUML block is a diagram kind outside the supported set
    /// (activity, timing, timeline, mindmap, gantt, salt, wbs, json, yaml),
    /// rejected before line-by-line parsing begins.
    E200,

    /// Unsupported construct.
    ///
    /// A line or token inside a supported diagram kind could not be
    /// converted. The offending line is carried verbatim; nothing is
    /// dropped silently or replaced with placeholder output.
    E201,

    /// Unbalanced container.
    ///
    /// A container close had no matching open, or a container was left
    /// open at the end of the block.
    E202,
}

impl ErrorCode {
    /// Returns the stable kind name used in the pipeline's failure contract.
    pub fn kind(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "EmptySource",
            ErrorCode::E100 => "UnrecognizedDialect",
            ErrorCode::E200 => "UnsupportedDiagramKind",
            ErrorCode::E201 => "UnsupportedConstruct",
            ErrorCode::E202 => "UnbalancedContainer",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
