//! Severity levels for lint findings.

use std::fmt;

/// How serious a lint finding is.
///
/// Ordered so that sorting puts warnings before errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Text the structure builder tolerated but that is probably a mistake,
    /// such as a stray closing brace.
    Warning,

    /// A structural problem that makes edits or rendering unreliable, such as
    /// a boundary block that is never closed.
    Error,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
