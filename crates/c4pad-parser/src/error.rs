//! Diagnostic system for the C4Pad parser.
//!
//! Parsing itself never fails: malformed text simply degrades to
//! "not structural". The structural lint, however, reports what a user would
//! want to fix before rendering. This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple findings
//!
//! # Example
//!
//! ```
//! # use c4pad_parser::error::{Diagnostic, ErrorCode};
//! # use c4pad_parser::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error("alias `db` is declared multiple times")
//!     .with_code(ErrorCode::E200)
//!     .with_label(span, "duplicate declaration")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("choose a different alias");
//! ```

mod collector;
mod diagnostic;
mod diagnostic_error;
mod error_code;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use diagnostic_error::DiagnosticError;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
