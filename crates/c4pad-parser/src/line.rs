//! Context-free classification of single source lines.
//!
//! This is the first of the two parsing passes. Each line is classified on its
//! own, without knowing what came before it:
//!
//! - [`Line::Directive`] - blank lines, comments (`'`), wrappers (`@`),
//!   preprocessor lines (`!`), and layout/title keywords
//! - [`Line::Macro`] - `Name(args...)` with an optional trailing `{`, whose
//!   alias and label both resolve
//! - [`Line::BlockEnd`] - a line consisting only of `}`
//! - [`Line::Text`] - anything else
//!
//! The second pass, in [`structure`](crate::structure), folds these into a tree.

use indexmap::IndexMap;
use log::trace;
use winnow::{
    Parser as _,
    ascii::multispace0,
    error::{ContextError, ErrMode},
    token::take_while,
};

use c4pad_core::{RelationKind, identifier};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Keyword prefixes that mark a line as carrying no structure.
const DIRECTIVE_PREFIXES: &[&str] = &["@", "!", "'", "LAYOUT_", "SHOW_", "HIDE_", "title"];

/// The category of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'src> {
    /// Blank, comment, wrapper, include, or layout/title line.
    Directive,
    /// A macro invocation with a resolved alias and label.
    Macro(MacroCall<'src>),
    /// A line containing only `}`.
    BlockEnd,
    /// Text that carries no recognized structure.
    Text,
}

/// A recognized macro invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCall<'src> {
    name: &'src str,
    arguments: Arguments<'src>,
    alias: &'src str,
    label: &'src str,
    opens_block: bool,
}

impl<'src> MacroCall<'src> {
    /// The macro name, e.g. `Container` or `Rel_U`.
    pub fn name(&self) -> &'src str {
        self.name
    }

    /// The decomposed argument list.
    pub fn arguments(&self) -> &Arguments<'src> {
        &self.arguments
    }

    /// The resolved alias, never empty.
    pub fn alias(&self) -> &'src str {
        self.alias
    }

    /// The resolved label, never empty.
    pub fn label(&self) -> &'src str {
        self.label
    }

    /// Returns `true` if the line ends with `{`.
    pub fn opens_block(&self) -> bool {
        self.opens_block
    }

    /// Returns `true` if the macro name follows the relation naming convention.
    pub fn is_relation(&self) -> bool {
        RelationKind::is_relation_name(self.name)
    }
}

/// Positional and named arguments of a macro invocation.
///
/// Quoted values have their surrounding quotes stripped. Named argument keys
/// are stored without their `$` prefix and in lowercase; a repeated name keeps
/// the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments<'src> {
    positional: Vec<&'src str>,
    named: IndexMap<String, &'src str>,
}

impl<'src> Arguments<'src> {
    /// Positional values in order of appearance.
    pub fn positional(&self) -> &[&'src str] {
        &self.positional
    }

    /// Look up a named value. `name` is matched case-insensitively, with or
    /// without a leading `$`.
    pub fn named(&self, name: &str) -> Option<&'src str> {
        self.named.get(&normalize_arg_name(name)).copied()
    }

    /// Resolve a value from its named form, falling back to a positional slot.
    pub fn resolve(&self, name: &str, position: usize) -> &'src str {
        self.named(name)
            .or_else(|| self.positional.get(position).copied())
            .unwrap_or("")
    }
}

/// Returns `true` if the line carries no structural meaning.
///
/// # Example
///
/// ```
/// # use c4pad_parser::line::is_directive;
/// assert!(is_directive("   "));
/// assert!(is_directive("@startuml"));
/// assert!(is_directive("  ' a comment"));
/// assert!(is_directive("LAYOUT_WITH_LEGEND()"));
/// assert!(!is_directive("System(s, \"S\")"));
/// ```
pub fn is_directive(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || DIRECTIVE_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

/// Classify one line of source text.
pub fn classify(line: &str) -> Line<'_> {
    if is_directive(line) {
        return Line::Directive;
    }

    if let Some(call) = parse_macro(line) {
        return Line::Macro(call);
    }

    if line.trim() == "}" {
        Line::BlockEnd
    } else {
        Line::Text
    }
}

/// Parse a line shaped like `Name(args) {`? into a [`MacroCall`].
///
/// Returns `None` if the line does not have that exact shape, or if its alias
/// or label does not resolve to a non-empty value.
pub fn parse_macro(line: &str) -> Option<MacroCall<'_>> {
    let (name, raw_args, opens_block) = call_shape(line)?;
    let arguments = parse_arguments(raw_args);

    let alias = arguments.resolve("alias", 0);
    let label = arguments.resolve("label", 1);
    if alias.is_empty() || label.is_empty() {
        trace!(name; "Macro shape without alias or label");
        return None;
    }

    Some(MacroCall {
        name,
        arguments,
        alias,
        label,
        opens_block,
    })
}

/// Recognize a line that starts a relation invocation, e.g. `  Rel_U(`.
///
/// Only the closed [`RelationKind`] vocabulary is recognized; the rest of the
/// line is not inspected.
pub fn relation_call(line: &str) -> Option<RelationKind> {
    let mut input = line;
    let name = call_head(&mut input).ok()?;
    name.parse().ok()
}

/// Split a raw argument list on commas outside double quotes.
///
/// Quotes only toggle the in-string state; there is no escape sequence for a
/// literal quote. Interior empty arguments are kept, a trailing empty one is
/// dropped.
///
/// # Example
///
/// ```
/// # use c4pad_parser::line::split_arguments;
/// assert_eq!(
///     split_arguments(r#"web, "Web, App", $techn="Rust""#),
///     ["web", r#""Web, App""#, r#"$techn="Rust""#]
/// );
/// assert_eq!(split_arguments("a,,b,"), ["a", "", "b"]);
/// ```
pub fn split_arguments(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut start = 0;

    for (index, c) in raw.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                parts.push(raw[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }

    let last = raw[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Decompose a raw argument list into positional and named arguments.
pub fn parse_arguments(raw: &str) -> Arguments<'_> {
    let mut arguments = Arguments::default();

    for token in split_arguments(raw) {
        match split_named(token) {
            Some((name, value)) => {
                arguments
                    .named
                    .insert(normalize_arg_name(name), unquote(value));
            }
            None => arguments.positional.push(unquote(token)),
        }
    }

    arguments
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Split `name=value` at the first `=` outside quotes.
///
/// Only the first unquoted `=` is considered: if the text before it is not an
/// identifier (optionally `$`-prefixed), the whole token is positional.
fn split_named(token: &str) -> Option<(&str, &str)> {
    let mut in_quote = false;

    for (index, c) in token.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '=' if !in_quote => {
                let name = token[..index].trim();
                let bare = name.strip_prefix('$').unwrap_or(name);
                return identifier::is_identifier(bare)
                    .then(|| (name, token[index + 1..].trim()));
            }
            _ => {}
        }
    }

    None
}

fn normalize_arg_name(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix('$').unwrap_or(name).to_lowercase()
}

/// Parse an identifier: `[A-Za-z_][A-Za-z0-9_]*`
fn macro_name<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., identifier::is_identifier_char)
        .verify(|name: &str| !name.starts_with(|c: char| c.is_ascii_digit()))
        .parse_next(input)
}

/// Parse leading whitespace, the macro name, and the opening parenthesis.
fn call_head<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    (multispace0, macro_name, multispace0, '(')
        .map(|(_, name, _, _)| name)
        .parse_next(input)
}

/// Match `Name(args) {`? against the whole line.
///
/// The argument list extends to the last `)` that is followed only by an
/// optional `{` and whitespace.
fn call_shape(line: &str) -> Option<(&str, &str, bool)> {
    let mut input = line;
    let name = call_head(&mut input).ok()?;

    let tail = input.trim_end();
    let (tail, opens_block) = match tail.strip_suffix('{') {
        Some(rest) => (rest.trim_end(), true),
        None => (tail, false),
    };
    let raw_args = tail.strip_suffix(')')?;

    Some((name, raw_args, opens_block))
}
