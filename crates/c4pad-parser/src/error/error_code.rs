//! Error codes for the C4Pad lint.
//!
//! Error codes are organized by concern:
//! - `E1xx` - Block nesting
//! - `E2xx` - Aliases

use std::fmt;

/// Error codes for categorizing lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Nesting (E1xx)
    // =========================================================================
    /// Unterminated boundary.
    ///
    /// A boundary opened a block with `{` that is never closed. Elements
    /// cannot be inserted into it.
    E100,

    /// Unmatched closing brace.
    ///
    /// A line consisting of `}` appears while no block is open. It is ignored
    /// by the structure builder.
    E101,

    // =========================================================================
    // Aliases (E2xx)
    // =========================================================================
    /// Duplicate alias.
    ///
    /// Two declarations share the same alias, so relations referencing it are
    /// ambiguous.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unterminated boundary",
            ErrorCode::E101 => "unmatched closing brace",
            ErrorCode::E200 => "duplicate alias",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unterminated boundary");
        assert_eq!(ErrorCode::E101.description(), "unmatched closing brace");
        assert_eq!(ErrorCode::E200.description(), "duplicate alias");
    }
}
