//! Alias identifiers.
//!
//! Aliases are the tokens by which elements reference each other. They follow
//! the macro language's identifier rule: `[A-Za-z_][A-Za-z0-9_]*`.

/// Returns `true` if `text` is a valid identifier.
///
/// # Example
///
/// ```
/// # use c4pad_core::identifier::is_identifier;
/// assert!(is_identifier("web_app"));
/// assert!(is_identifier("_db2"));
/// assert!(!is_identifier("2db"));
/// assert!(!is_identifier("web-app"));
/// ```
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}

/// Returns `true` if `c` may appear after the first character of an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(!is_identifier("сервис"));
        assert!(!is_identifier("db_é"));
    }

    #[test]
    fn test_accepts_underscore_only() {
        assert!(is_identifier("_"));
        assert!(is_identifier("__root__"));
    }

    proptest! {
        #[test]
        fn prop_generated_identifiers_are_accepted(s in "[A-Za-z_][A-Za-z0-9_]{0,16}") {
            prop_assert!(is_identifier(&s));
        }

        #[test]
        fn prop_leading_digit_is_rejected(s in "[0-9][A-Za-z0-9_]{0,16}") {
            prop_assert!(!is_identifier(&s));
        }
    }
}
