//! Turning pasted or partial text into a renderable document.
//!
//! [`normalize`] strips Markdown code fences, unifies line endings and adds
//! whatever the document is missing out of the `@startuml`/`@enduml`
//! wrapper, the standard-library `!include` and the default layout calls.
//! Running it on its own output changes nothing.

use log::debug;

use c4pad_core::DiagramKind;

const FENCE: &str = "```";
const FENCE_TAGS: [&str; 2] = ["plantuml", "puml"];
const LAYOUT_CALLS: [&str; 4] = [
    "LAYOUT_WITH_LEGEND",
    "LAYOUT_LEFT_RIGHT",
    "LAYOUT_LANDSCAPE",
    "LAYOUT_TOP_DOWN",
];
const DEFAULT_LAYOUT: [&str; 2] = ["LAYOUT_WITH_LEGEND()", "LAYOUT_LANDSCAPE()"];
const PART_SEPARATOR: &str = "\n\n";

/// Normalize `raw` into a complete diagram of `kind`.
///
/// Empty or whitespace-only input (after fence removal) yields an empty
/// string. A document that already has both wrapper markers keeps them, and
/// missing header lines are placed right after its `@startuml` line.
///
/// # Example
///
/// ```
/// # use c4pad::normalize::normalize;
/// # use c4pad_core::DiagramKind;
/// let text = normalize("```plantuml\r\nPerson(u, \"User\")\r\n```", DiagramKind::Context);
/// assert!(text.starts_with("@startuml\n\n!include "));
/// assert!(text.ends_with("Person(u, \"User\")\n\n@enduml"));
/// assert_eq!(normalize(&text, DiagramKind::Context), text);
/// ```
pub fn normalize(raw: &str, kind: DiagramKind) -> String {
    let stripped = unify_line_endings(&strip_fences(raw));
    let source = stripped.trim();
    if source.is_empty() {
        return String::new();
    }

    let mut header = Vec::new();
    let has_include = has_stdlib_include(source);
    if !has_include {
        header.push(kind.include_line());
    }
    let has_layout = has_layout_call(source);
    if !has_layout {
        header.extend(DEFAULT_LAYOUT.iter().map(|call| call.to_string()));
    }
    let wrapped = has_wrappers(source);

    debug!(
        kind:%,
        wrapped,
        has_include,
        has_layout;
        "Normalizing diagram source"
    );

    if !wrapped {
        let mut parts = vec!["@startuml".to_string()];
        parts.extend(header);
        parts.push(source.to_string());
        parts.push("@enduml".to_string());
        return parts.join(PART_SEPARATOR);
    }

    if header.is_empty() {
        return source.to_string();
    }

    let (head, tail) = split_after_start(source);
    let mut parts = vec![head.to_string()];
    parts.extend(header);
    let tail = tail.trim_start_matches('\n');
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts.join(PART_SEPARATOR)
}

/// Remove every ```` ``` ```` fence marker, with an optional `plantuml` or
/// `puml` tag (any case) directly after it.
fn strip_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(at) = rest.find(FENCE) {
        out.push_str(&rest[..at]);
        rest = &rest[at + FENCE.len()..];
        if let Some(tag) = FENCE_TAGS.iter().find(|tag| starts_with_ignore_case(rest, tag)) {
            rest = &rest[tag.len()..];
        }
    }

    out.push_str(rest);
    out
}

/// Drop carriage returns that end a line, including runs like `\r\r\n`.
fn unify_line_endings(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect::<Vec<_>>()
        .join("\n")
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn has_wrappers(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.contains("@startuml") && lower.contains("@enduml")
}

/// An `!include` of any level's standard-library module, wherever it lives.
fn has_stdlib_include(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    let modules: Vec<String> = DiagramKind::ALL
        .iter()
        .map(|kind| kind.stdlib_file().to_ascii_lowercase())
        .collect();

    lower.lines().any(|line| {
        line.match_indices("!include").any(|(at, directive)| {
            let rest = &line[at + directive.len()..];
            rest.starts_with(char::is_whitespace)
                && modules.iter().any(|module| rest.contains(module.as_str()))
        })
    })
}

/// A call to any of the standard layout macros.
fn has_layout_call(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    LAYOUT_CALLS.iter().any(|call| {
        let call = call.to_ascii_lowercase();
        lower
            .match_indices(call.as_str())
            .any(|(at, _)| lower[at + call.len()..].trim_start().starts_with('('))
    })
}

/// Split after the end of the first line mentioning `@startuml`.
fn split_after_start(source: &str) -> (&str, &str) {
    let lower = source.to_ascii_lowercase();
    let Some(marker) = lower.find("@startuml") else {
        return (source, "");
    };
    let line_end = source[marker..]
        .find('\n')
        .map_or(source.len(), |offset| marker + offset);
    source.split_at(line_end)
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    fn kind_strategy() -> impl Strategy<Value = DiagramKind> {
        prop::sample::select(DiagramKind::ALL.to_vec())
    }

    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("```".to_string()),
            Just("```plantuml".to_string()),
            Just("@startuml".to_string()),
            Just("@enduml".to_string()),
            Just("LAYOUT_TOP_DOWN()".to_string()),
            Just("!include C4_Context.puml".to_string()),
            Just("\r\n".to_string()),
            Just("\n".to_string()),
            "\\PC{0,12}",
        ]
    }

    proptest! {
        #[test]
        fn prop_idempotent_on_arbitrary_text(raw in "\\PC{0,120}", kind in kind_strategy()) {
            let once = normalize(&raw, kind);
            prop_assert_eq!(normalize(&once, kind), once);
        }

        #[test]
        fn prop_idempotent_on_diagram_fragments(
            parts in proptest::collection::vec(fragment(), 0..12),
            kind in kind_strategy(),
        ) {
            let raw = parts.concat();
            let once = normalize(&raw, kind);
            prop_assert_eq!(normalize(&once, kind), once.clone());

            if !once.is_empty() {
                prop_assert!(has_wrappers(&once));
                prop_assert!(has_stdlib_include(&once));
                prop_assert!(has_layout_call(&once));
                prop_assert!(!once.contains(FENCE));
            }
        }
    }
}
