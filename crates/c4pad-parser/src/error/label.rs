//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the source.
///
/// A diagnostic usually carries one primary label marking the offending
/// line, and optionally secondary labels pointing at related lines, such as
/// the first declaration of a duplicated alias.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary() {
        let primary = Label::primary(Span::new(10..20), "declared again here");
        let secondary = Label::secondary(Span::new(0..5), "first declared here");

        assert!(primary.is_primary());
        assert_eq!(primary.span(), Span::new(10..20));
        assert_eq!(primary.message(), "declared again here");
        assert!(!secondary.is_primary());
    }
}
