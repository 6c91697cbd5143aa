//! Collector for accumulating diagnostics during a processing phase.
//!
//! The transpiler reports every unsupported line in a block rather than
//! stopping at the first; the collector gathers them and converts to a
//! single [`ParseError`] at the end of the pass.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection; `Ok(())` when no diagnostics were emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_empty_collector_finishes_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_errors_accumulate() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("first").with_code(ErrorCode::E201));
        collector.emit(Diagnostic::error("second").with_code(ErrorCode::E201));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
    }
}
