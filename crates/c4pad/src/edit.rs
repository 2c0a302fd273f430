//! Source mutators.
//!
//! Each mutator takes the structure of the current text and returns a new
//! text with one macro call spliced in. The caller is expected to reparse the
//! result before the next edit; line indices from an old structure are
//! meaningless against new text.
//!
//! Inserted lines are joined with `\n`, so a document using `\r\n` comes back
//! with `\n` terminators.

use log::{debug, warn};
use thiserror::Error;

use c4pad_core::{ElementKind, RelationKind};
use c4pad_parser::{SourceStructure, line};

const INDENT: &str = "  ";

/// Where a new element is placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'a> {
    /// At document level.
    #[default]
    Root,
    /// Inside the boundary with the given alias.
    Boundary(&'a str),
}

/// Why an element could not be spliced into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    #[error("no boundary with alias `{0}`")]
    ParentNotFound(String),

    #[error("boundary `{0}` has no closing `}}`")]
    UnterminatedBoundary(String),
}

/// An element to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewElement<'a> {
    kind: ElementKind,
    alias: &'a str,
    label: &'a str,
    technology: Option<&'a str>,
    description: Option<&'a str>,
    parent: Parent<'a>,
}

impl<'a> NewElement<'a> {
    /// Creates a root-level element with no technology or description.
    pub fn new(kind: ElementKind, alias: &'a str, label: &'a str) -> Self {
        Self {
            kind,
            alias,
            label,
            technology: None,
            description: None,
            parent: Parent::Root,
        }
    }

    /// Sets the technology (or person/system type) argument.
    pub fn with_technology(mut self, technology: &'a str) -> Self {
        self.technology = Some(technology);
        self
    }

    /// Sets the description argument.
    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Places the element inside `parent`.
    pub fn with_parent(mut self, parent: Parent<'a>) -> Self {
        self.parent = parent;
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn alias(&self) -> &'a str {
        self.alias
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn technology(&self) -> Option<&'a str> {
        self.technology
    }

    pub fn description(&self) -> Option<&'a str> {
        self.description
    }

    pub fn parent(&self) -> Parent<'a> {
        self.parent
    }

    /// Renders the declaring macro call, including ` {` for boundaries.
    ///
    /// # Example
    ///
    /// ```
    /// # use c4pad::edit::NewElement;
    /// # use c4pad_core::ElementKind;
    /// let element = NewElement::new(ElementKind::ContainerDb, "db", "Orders")
    ///     .with_technology("PostgreSQL");
    /// assert_eq!(
    ///     element.to_macro(),
    ///     r#"ContainerDb($alias=db, $label="Orders", $techn="PostgreSQL")"#
    /// );
    /// ```
    pub fn to_macro(&self) -> String {
        let mut args = vec![
            format!("$alias={}", self.alias),
            format!("$label={}", quote(self.label.trim())),
        ];
        if let (Some(arg), Some(technology)) =
            (self.kind.technology_arg(), present(self.technology))
        {
            args.push(format!("{}={}", arg.as_str(), quote(technology)));
        }
        if let Some(description) = present(self.description) {
            args.push(format!("$descr={}", quote(description)));
        }

        let open = if self.kind.is_boundary() { " {" } else { "" };
        format!("{}({}){open}", self.kind, args.join(", "))
    }
}

/// A relation to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelation<'a> {
    kind: RelationKind,
    from: &'a str,
    to: &'a str,
    label: &'a str,
    technology: Option<&'a str>,
    description: Option<&'a str>,
}

impl<'a> NewRelation<'a> {
    pub fn new(kind: RelationKind, from: &'a str, to: &'a str, label: &'a str) -> Self {
        Self {
            kind,
            from,
            to,
            label,
            technology: None,
            description: None,
        }
    }

    pub fn with_technology(mut self, technology: &'a str) -> Self {
        self.technology = Some(technology);
        self
    }

    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn from(&self) -> &'a str {
        self.from
    }

    pub fn to(&self) -> &'a str {
        self.to
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn technology(&self) -> Option<&'a str> {
        self.technology
    }

    pub fn description(&self) -> Option<&'a str> {
        self.description
    }

    /// Renders the relation macro call.
    pub fn to_macro(&self) -> String {
        let mut args = vec![
            format!("$from={}", self.from),
            format!("$to={}", self.to),
            format!("$label={}", quote(self.label.trim())),
        ];
        if let Some(technology) = present(self.technology) {
            args.push(format!("$techn={}", quote(technology)));
        }
        if let Some(description) = present(self.description) {
            args.push(format!("$descr={}", quote(description)));
        }
        format!("{}({})", self.kind, args.join(", "))
    }
}

/// Wrap `value` in double quotes, escaping `\` and `"`.
///
/// ```
/// # use c4pad::edit::quote;
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Optional arguments count only when they have non-whitespace content.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Insert `element` into the text `structure` was built from.
///
/// Returns the text unchanged when the element cannot be placed; use
/// [`try_insert_element`] to learn why.
pub fn insert_element(structure: &SourceStructure<'_>, element: &NewElement<'_>) -> String {
    try_insert_element(structure, element).unwrap_or_else(|err| {
        warn!(alias = element.alias, err:%; "Element not inserted");
        structure.source().to_string()
    })
}

/// Insert `element`, reporting why placement failed.
///
/// Root elements go before the first relation, else before `@enduml`, else
/// at the end. Nested elements go right before the parent's closing `}`,
/// indented two spaces deeper than the parent's declaration.
///
/// # Errors
///
/// Returns [`SpliceError::ParentNotFound`] if the parent alias names no
/// boundary, and [`SpliceError::UnterminatedBoundary`] if the parent's block
/// never closes.
pub fn try_insert_element(
    structure: &SourceStructure<'_>,
    element: &NewElement<'_>,
) -> Result<String, SpliceError> {
    let lines = structure.lines();
    let call = element.to_macro();

    let (at, inserted) = match element.parent {
        Parent::Root => {
            let mut inserted = vec![call];
            if element.kind.is_boundary() {
                inserted.push("}".to_string());
            }
            (root_insertion_index(lines), inserted)
        }
        Parent::Boundary(alias) => {
            let boundary = structure
                .boundary(alias)
                .ok_or_else(|| SpliceError::ParentNotFound(alias.to_string()))?;
            let close = boundary
                .closing_line()
                .or_else(|| scan_closing_line(lines, boundary.line()))
                .ok_or_else(|| SpliceError::UnterminatedBoundary(alias.to_string()))?;

            let declaration = lines[boundary.line()];
            let indent = &declaration[..declaration.len() - declaration.trim_start().len()];
            let child_indent = format!("{indent}{INDENT}");

            let mut inserted = vec![format!("{child_indent}{call}")];
            if element.kind.is_boundary() {
                inserted.push(format!("{child_indent}}}"));
            }
            (close, inserted)
        }
    };

    debug!(
        alias = element.alias,
        parent:? = element.parent,
        line = at;
        "Inserting element"
    );
    Ok(splice(lines, at, &inserted))
}

/// Insert `relation` after the last relation line, or where a root element
/// would go if there is none.
pub fn insert_relation(structure: &SourceStructure<'_>, relation: &NewRelation<'_>) -> String {
    let lines = structure.lines();
    let at = lines
        .iter()
        .rposition(|&text| line::relation_call(text).is_some())
        .map_or_else(|| root_insertion_index(lines), |last| last + 1);

    debug!(
        from = relation.from,
        to = relation.to,
        line = at;
        "Inserting relation"
    );
    splice(lines, at, &[relation.to_macro()])
}

/// First relation line, else the first `@enduml` line, else the end.
fn root_insertion_index(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|&text| line::relation_call(text).is_some())
        .or_else(|| {
            lines
                .iter()
                .position(|text| text.to_ascii_lowercase().contains("@enduml"))
        })
        .unwrap_or_else(|| end_of_document(lines))
}

/// Index past the last line, keeping a trailing line terminator in place.
fn end_of_document(lines: &[&str]) -> usize {
    match lines.last() {
        Some(last) if last.is_empty() => lines.len() - 1,
        _ => lines.len(),
    }
}

/// Find the `}` closing the block opened at `open` by counting braces.
fn scan_closing_line(lines: &[&str], open: usize) -> Option<usize> {
    let mut depth: i64 = 0;
    for (index, text) in lines.iter().enumerate().skip(open) {
        let opens = text.matches('{').count() as i64;
        let closes = text.matches('}').count() as i64;
        depth += opens - closes;
        if closes > 0 && depth == 0 {
            return Some(index);
        }
    }
    None
}

fn splice(lines: &[&str], at: usize, inserted: &[String]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + inserted.len());
    out.extend_from_slice(&lines[..at]);
    out.extend(inserted.iter().map(String::as_str));
    out.extend_from_slice(&lines[at..]);
    out.join("\n")
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use c4pad_parser::parse;

    use super::*;

    fn document() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            prop_oneof![
                "[a-z]{1,4}".prop_map(|alias| format!("System({alias}, \"S\")")),
                "[a-z]{1,4}".prop_map(|alias| format!("Rel({alias}, x, \"uses\")")),
                Just("@enduml".to_string()),
                Just(String::new()),
                "[ -~]{0,20}",
            ],
            0..20,
        )
    }

    fn block_body() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            prop_oneof![
                "[a-z]{1,4}".prop_map(|alias| format!("  Container({alias}, \"C\")")),
                Just(String::new()),
                "[ -~]{0,20}".prop_map(|text| format!("' {text}")),
            ],
            0..8,
        )
    }

    /// Removes the line at `at` from `after` and checks the rest is `before`.
    fn without_line(after: &[&str], at: usize, before: &[&str]) -> Result<(), TestCaseError> {
        let mut restored = after.to_vec();
        restored.remove(at);
        prop_assert_eq!(restored, before);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_nested_insert_preserves_other_lines(
            prefix in document(),
            body in block_body(),
            suffix in document(),
        ) {
            let mut lines = prefix;
            let open = lines.len();
            lines.push("  System_Boundary(host_b, \"Host\") {".to_string());
            lines.extend(body);
            let close = lines.len();
            lines.push("  }".to_string());
            lines.extend(suffix);
            let source = lines.join("\n");

            let element = NewElement::new(ElementKind::System, "fresh_alias", "Fresh")
                .with_parent(Parent::Boundary("host_b"));
            let structure = parse(&source);
            prop_assume!(structure.boundary("host_b").map(|b| b.line()) == Some(open));
            let result = try_insert_element(&structure, &element).expect("host_b is closed");

            let before: Vec<_> = source.split('\n').collect();
            let after: Vec<_> = result.split('\n').collect();
            prop_assert_eq!(after.len(), before.len() + 1);
            prop_assert_eq!(after[close], format!("    {}", element.to_macro()));
            without_line(&after, close, &before)?;
        }

        #[test]
        fn prop_relation_insert_preserves_other_lines(lines in document()) {
            let source = lines.join("\n");
            let relation = NewRelation::new(RelationKind::Rel, "a", "b", "Calls");
            let result = insert_relation(&parse(&source), &relation);

            let before: Vec<_> = source.split('\n').collect();
            let after: Vec<_> = result.split('\n').collect();
            prop_assert_eq!(after.len(), before.len() + 1);

            let at = after
                .iter()
                .position(|l| *l == relation.to_macro())
                .expect("inserted line is present");
            if let Some(last) = before.iter().rposition(|l| line::relation_call(l).is_some()) {
                prop_assert_eq!(at, last + 1);
            }
            without_line(&after, at, &before)?;
        }

        #[test]
        fn prop_root_insert_adds_exactly_one_line(lines in document()) {
            let source = lines.join("\n");
            let element = NewElement::new(ElementKind::System, "fresh_alias", "Fresh");
            let result = insert_element(&parse(&source), &element);

            let before: Vec<_> = source.split('\n').collect();
            let after: Vec<_> = result.split('\n').collect();
            prop_assert_eq!(after.len(), before.len() + 1);

            let at = after
                .iter()
                .position(|l| *l == element.to_macro())
                .expect("inserted line is present");
            let mut restored = after.clone();
            restored.remove(at);
            prop_assert_eq!(restored, before);
        }

        #[test]
        fn prop_inserted_element_is_parsed_back(lines in document(), label in "[a-zA-Z \"\\\\]{1,12}") {
            prop_assume!(!label.trim().is_empty());
            let source = lines.join("\n");
            let element = NewElement::new(ElementKind::System, "fresh_alias", &label);
            let result = insert_element(&parse(&source), &element);

            let structure = parse(&result);
            prop_assert!(structure.contains_alias("fresh_alias"));
        }
    }
}
