//! Collector for accumulating lint findings.

use crate::error::{Diagnostic, DiagnosticError};

/// Accumulates diagnostics so a pass can report every finding instead of
/// stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Every diagnostic emitted so far, in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(DiagnosticError)` with all diagnostics,
    ///   warnings included.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, DiagnosticError> {
        if self.has_errors {
            Err(DiagnosticError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
