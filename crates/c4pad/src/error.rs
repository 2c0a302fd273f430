//! Error types for C4Pad operations.
//!
//! [`C4padError`] is the error returned by the library's fallible operations.
//! [`EditError`] covers the validation the editing layer performs before it
//! touches the source text.

use std::io;

use thiserror::Error;

use c4pad_core::{DiagramKind, ElementKind};
use c4pad_parser::error::DiagnosticError;

use crate::edit::SpliceError;

/// The main error type for C4Pad operations.
///
/// The `Lint` variant keeps the source text alongside the diagnostics so
/// their spans can be rendered as snippets.
#[derive(Debug, Error)]
pub enum C4padError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Lint { err: DiagnosticError, src: String },

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl C4padError {
    /// Create a new `Lint` error with the associated source code.
    pub fn new_lint_error(err: DiagnosticError, src: impl Into<String>) -> Self {
        Self::Lint {
            err,
            src: src.into(),
        }
    }
}

/// A rejected edit. The source text is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("alias must not be empty")]
    EmptyAlias,

    #[error("alias `{0}` is not an identifier (letters, digits and `_`, not starting with a digit)")]
    InvalidAlias(String),

    #[error("label must not be empty")]
    EmptyLabel,

    #[error("{0} must fit on one line")]
    LineBreak(&'static str),

    #[error("alias `{0}` already exists")]
    DuplicateAlias(String),

    #[error("`{kind}` elements are not available in {diagram} diagrams")]
    KindNotAllowed {
        kind: ElementKind,
        diagram: DiagramKind,
    },

    #[error("relation needs both a source and a target alias")]
    MissingEndpoint,

    #[error("no element with alias `{0}`")]
    UnknownAlias(String),

    #[error(transparent)]
    Splice(#[from] SpliceError),
}
