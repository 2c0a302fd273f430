//! Structural lint over a parsed source.
//!
//! The structure builder tolerates malformed nesting and duplicate aliases.
//! This pass reports them so users can fix the text before editing or
//! rendering it.

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::{Diagnostic, DiagnosticCollector, DiagnosticError, ErrorCode},
    structure::SourceStructure,
};

/// Report every structural finding in `structure`, in source order per kind.
pub fn lint(structure: &SourceStructure<'_>) -> Vec<Diagnostic> {
    let diagnostics = collect(structure).into_diagnostics();
    debug!(findings = diagnostics.len(); "Linted source structure");
    diagnostics
}

/// Run the lint and fail if any finding is an error.
///
/// On success, returns the warnings.
///
/// # Example
///
/// ```
/// # use c4pad_parser::{check, parse};
/// let structure = parse("System_Boundary(sb, \"Shop\") {\n");
/// let err = check(&structure).unwrap_err();
/// assert_eq!(err.to_string(), "error[E100]: boundary `sb` is never closed");
/// ```
pub fn check(structure: &SourceStructure<'_>) -> Result<Vec<Diagnostic>, DiagnosticError> {
    let result = collect(structure).finish();
    debug!(passed = result.is_ok(); "Checked source structure");
    result
}

fn collect(structure: &SourceStructure<'_>) -> DiagnosticCollector {
    let mut collector = DiagnosticCollector::new();

    for boundary in structure.boundaries() {
        if boundary.closing_line().is_none() {
            collector.emit(
                Diagnostic::error(format!("boundary `{}` is never closed", boundary.alias()))
                    .with_code(ErrorCode::E100)
                    .with_label(structure.line_span(boundary.line()), "block opened here")
                    .with_help("add a line containing only `}` after its last element"),
            );
        }
    }

    for &line in structure.stray_closings() {
        collector.emit(
            Diagnostic::warning("unmatched closing brace")
                .with_code(ErrorCode::E101)
                .with_label(structure.line_span(line), "no open block to close")
                .with_help("remove this line or add the boundary it was meant to close"),
        );
    }

    let mut first_declarations = IndexMap::new();
    for node in structure.nodes() {
        match first_declarations.get(node.alias()) {
            Some(&first_line) => collector.emit(
                Diagnostic::error(format!(
                    "alias `{}` is declared multiple times",
                    node.alias()
                ))
                .with_code(ErrorCode::E200)
                .with_label(structure.line_span(node.line()), "declared again here")
                .with_secondary_label(structure.line_span(first_line), "first declared here")
                .with_help("give each element a unique alias"),
            ),
            None => {
                first_declarations.insert(node.alias(), node.line());
            }
        }
    }

    collector
}
