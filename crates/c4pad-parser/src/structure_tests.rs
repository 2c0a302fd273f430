//! Tests for structure building and the structural lint.
//!
//! These exercise the full two-pass parse over realistic documents, including
//! partial and malformed text.

use crate::{check, error::ErrorCode, lint, parse};

const SHOP: &str = r#"@startuml
!include https://raw.githubusercontent.com/plantuml-stdlib/C4-PlantUML/master/C4_Container.puml
title [Containers] Shop

Person(customer, "Customer", "Buys things")

System_Boundary(shop, "Shop") {
  Container(web, "Web App", "Rust", "Serves pages")
  Container_Boundary(backend, "Backend") {
    Container(api, "API", "Rust")
    ContainerDb(db, "Orders", "PostgreSQL")
  }
}

System_Ext(payments, "Payments")

Rel(customer, web, "Browses", "HTTPS")
BiRel_R(api, db, "Reads and writes")
Rel_Neighbor(api, payments, "Charges")
@enduml"#;

#[cfg(test)]
mod building_tests {
    use super::*;

    #[test]
    fn test_nodes_in_order_of_appearance() {
        let structure = parse(SHOP);
        let aliases: Vec<_> = structure.nodes().iter().map(|n| n.alias()).collect();

        assert_eq!(
            aliases,
            ["customer", "shop", "web", "backend", "api", "db", "payments"]
        );
    }

    #[test]
    fn test_relations_are_not_nodes() {
        let structure = parse(SHOP);

        assert!(
            structure
                .nodes()
                .iter()
                .all(|n| !n.macro_name().contains("Rel"))
        );
        assert_eq!(structure.aliases().len(), 7);
    }

    #[test]
    fn test_parent_linkage_follows_nesting() {
        let structure = parse(SHOP);
        let parent_of = |alias| structure.node(alias).and_then(|n| n.parent());

        assert_eq!(parent_of("customer"), None);
        assert_eq!(parent_of("shop"), None);
        assert_eq!(parent_of("web"), Some("shop"));
        assert_eq!(parent_of("backend"), Some("shop"));
        assert_eq!(parent_of("api"), Some("backend"));
        assert_eq!(parent_of("db"), Some("backend"));
        assert_eq!(parent_of("payments"), None);
    }

    #[test]
    fn test_boundaries_record_open_and_close_lines() {
        let structure = parse(SHOP);
        let boundaries: Vec<_> = structure
            .boundaries()
            .map(|b| (b.alias(), b.line(), b.closing_line()))
            .collect();

        assert_eq!(
            boundaries,
            [("shop", 6, Some(12)), ("backend", 8, Some(11))]
        );
        assert_eq!(structure.lines()[12], "}");
        assert_eq!(structure.lines()[11], "  }");
    }

    #[test]
    fn test_leaves_have_no_closing_line() {
        let structure = parse(SHOP);
        let web = structure.node("web").expect("web is declared");

        assert!(!web.is_boundary());
        assert_eq!(web.closing_line(), None);
        assert_eq!(web.kind(), Some(c4pad_core::ElementKind::Container));
        assert_eq!(web.label(), "Web App");
    }

    #[test]
    fn test_unknown_macro_kinds_are_still_nodes() {
        let structure = parse(r#"Custom_Thing(ct, "Custom")"#);
        let node = structure.node("ct").expect("custom macros are tolerated");

        assert_eq!(node.macro_name(), "Custom_Thing");
        assert_eq!(node.kind(), None);
    }

    #[test]
    fn test_children() {
        let structure = parse(SHOP);

        let top: Vec<_> = structure.children(None).map(|n| n.alias()).collect();
        assert_eq!(top, ["customer", "shop", "payments"]);

        let backend: Vec<_> = structure
            .children(Some("backend"))
            .map(|n| n.alias())
            .collect();
        assert_eq!(backend, ["api", "db"]);
    }

    #[test]
    fn test_children_at_separates_repeated_aliases() {
        let source = "System_Boundary(a, \"A\") {\n  System_Boundary(a, \"B\") {\n    System(x, \"X\")\n  }\n}\n";
        let structure = parse(source);

        let top: Vec<_> = structure.children_at(None).map(|(i, _)| i).collect();
        assert_eq!(top, [0]);
        let outer: Vec<_> = structure.children_at(Some(0)).map(|(i, _)| i).collect();
        assert_eq!(outer, [1]);
        let inner: Vec<_> = structure
            .children_at(Some(1))
            .map(|(_, n)| n.alias())
            .collect();
        assert_eq!(inner, ["x"]);
        assert_eq!(structure.nodes()[1].parent_index(), Some(0));
    }

    #[test]
    fn test_empty_source() {
        let structure = parse("");

        assert!(structure.nodes().is_empty());
        assert_eq!(structure.boundaries().count(), 0);
        assert_eq!(structure.lines(), [""]);
    }

    #[test]
    fn test_stray_closing_brace_is_ignored() {
        let source = "}\nSystem(s, \"S\")\n}";
        let structure = parse(source);

        assert_eq!(structure.nodes().len(), 1);
        assert_eq!(structure.node("s").and_then(|n| n.parent()), None);
        assert_eq!(structure.stray_closings(), [0, 2]);
    }

    #[test]
    fn test_unclosed_boundary_keeps_children() {
        let source = "System_Boundary(sb, \"X\") {\n  Container(a, \"A\")";
        let structure = parse(source);

        let sb = structure.boundary("sb").expect("sb is declared");
        assert_eq!(sb.closing_line(), None);
        assert_eq!(structure.node("a").and_then(|n| n.parent()), Some("sb"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "System_Boundary(sb, \"X\") {\r\n  Container(a, \"A\")\r\n}\r\n";
        let structure = parse(source);

        assert_eq!(structure.lines(), ["System_Boundary(sb, \"X\") {", "  Container(a, \"A\")", "}", ""]);
        assert_eq!(
            structure.boundary("sb").and_then(|b| b.closing_line()),
            Some(2)
        );
    }

    #[test]
    fn test_commented_out_elements_are_skipped() {
        let source = "' System(old, \"Old\")\nSystem(new, \"New\")";
        let structure = parse(source);

        assert!(!structure.contains_alias("old"));
        assert!(structure.contains_alias("new"));
    }

    #[test]
    fn test_picker_options() {
        let source = "System(a, \"A\")\nSystem_Boundary(sb, \"SB\") {\n  System(a, \"A again\")\n}";
        let structure = parse(source);

        let parents: Vec<_> = structure
            .parent_options()
            .into_iter()
            .map(|option| option.map(|b| b.alias()))
            .collect();
        assert_eq!(parents, [None, Some("sb")]);

        let nodes: Vec<_> = structure
            .node_options()
            .into_iter()
            .map(|n| (n.alias(), n.label()))
            .collect();
        assert_eq!(nodes, [("a", "A"), ("sb", "SB")]);
    }

    #[test]
    fn test_line_span_covers_trimmed_content() {
        let source = "System(a, \"A\")\n  System(b, \"B\")  \n";
        let structure = parse(source);

        let span = structure.line_span(1);
        assert_eq!(&source[span.start()..span.end()], "System(b, \"B\")");
        assert!(structure.line_span(2).is_empty());
    }
}

#[cfg(test)]
mod lint_tests {
    use super::*;

    #[test]
    fn test_clean_document_has_no_findings() {
        let structure = parse(SHOP);

        assert!(lint(&structure).is_empty());
        assert!(check(&structure).is_ok_and(|warnings| warnings.is_empty()));
    }

    #[test]
    fn test_unterminated_boundary() {
        let source = "System_Boundary(sb, \"X\") {\n  Container(a, \"A\")\n";
        let structure = parse(source);

        let err = check(&structure).unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.message(), "boundary `sb` is never closed");
        assert_eq!(diag.labels()[0].span(), structure.line_span(0));
    }

    #[test]
    fn test_stray_brace_is_a_warning() {
        let structure = parse("System(a, \"A\")\n}\n");

        let warnings = check(&structure).expect("stray braces only warn");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E101));
        assert!(warnings[0].severity().is_warning());
    }

    #[test]
    fn test_duplicate_alias_points_at_both_declarations() {
        let source = "ContainerDb(db, \"Main\")\nContainerDb(db, \"Replica\")";
        let structure = parse(source);

        let findings = lint(&structure);
        assert_eq!(findings.len(), 1);

        let labels = findings[0].labels();
        assert_eq!(findings[0].code(), Some(ErrorCode::E200));
        assert_eq!(labels[0].span(), structure.line_span(1));
        assert!(labels[0].is_primary());
        assert_eq!(labels[1].span(), structure.line_span(0));
        assert!(!labels[1].is_primary());
    }

    #[test]
    fn test_errors_and_warnings_reported_together() {
        let source = "}\nSystem_Boundary(sb, \"X\") {\nSystem(a, \"A\")\nSystem(a, \"B\")";
        let structure = parse(source);

        let err = check(&structure).unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.to_string(), "error[E100]: boundary `sb` is never closed (+1 more)");
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("}".to_string()),
            Just(String::new()),
            Just("@enduml".to_string()),
            "[a-z]{1,3}".prop_map(|alias| format!("System_Boundary({alias}, \"B\") {{")),
            "[a-z]{1,3}".prop_map(|alias| format!("  Container({alias}, \"C\", \"Rust\")")),
            "[a-z]{1,3}".prop_map(|alias| format!("Rel({alias}, x, \"uses\")")),
            "[ -~]{0,24}",
        ]
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(source in "\\PC{0,200}") {
            let structure = parse(&source);
            let _ = lint(&structure);
        }

        #[test]
        fn prop_parents_are_boundaries_declared_earlier(
            lines in proptest::collection::vec(line_strategy(), 0..40)
        ) {
            let source = lines.join("\n");
            let structure = parse(&source);

            for node in structure.nodes() {
                if let Some(parent) = node.parent() {
                    let declared_before = structure
                        .boundaries()
                        .any(|b| b.alias() == parent && b.line() < node.line());
                    prop_assert!(declared_before, "{} -> {}", node.alias(), parent);
                }
            }
        }

        #[test]
        fn prop_parent_index_points_backwards_at_a_boundary(
            lines in proptest::collection::vec(line_strategy(), 0..40)
        ) {
            let source = lines.join("\n");
            let structure = parse(&source);

            for (position, node) in structure.nodes().iter().enumerate() {
                if let Some(parent) = node.parent_index() {
                    prop_assert!(parent < position);
                    let boundary = &structure.nodes()[parent];
                    prop_assert!(boundary.is_boundary());
                    prop_assert_eq!(Some(boundary.alias()), node.parent());
                }
            }
        }

        #[test]
        fn prop_closing_lines_are_braces_after_openers(
            lines in proptest::collection::vec(line_strategy(), 0..40)
        ) {
            let source = lines.join("\n");
            let structure = parse(&source);

            for boundary in structure.boundaries() {
                if let Some(close) = boundary.closing_line() {
                    prop_assert!(close > boundary.line());
                    prop_assert_eq!(structure.lines()[close].trim(), "}");
                }
            }
        }
    }
}
