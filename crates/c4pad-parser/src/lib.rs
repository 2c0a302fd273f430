//! # C4Pad Parser
//!
//! Tolerant structure parser for C4-PlantUML diagram sources. Instead of a
//! full grammar, it recovers just enough meaning to edit a diagram: declared
//! elements, how boundaries nest, and where each block closes.
//!
//! Parsing is split in two passes that can be used and tested on their own:
//!
//! 1. [`line::classify`] looks at a single line.
//! 2. [`parse`] folds classified lines into a [`SourceStructure`].
//!
//! ## Usage
//!
//! ```
//! # use c4pad_parser::parse;
//! let source = r#"
//! System_Boundary(shop, "Shop") {
//!   Container(web, "Web App", "Rust")
//!   ContainerDb(db, "Orders", "PostgreSQL")
//! }
//! "#;
//!
//! let structure = parse(source);
//! let boundary = structure.boundary("shop").expect("declared above");
//! assert_eq!(boundary.closing_line(), Some(4));
//! assert_eq!(structure.children(Some("shop")).count(), 2);
//! ```

pub mod error;
pub mod line;

mod lint;
mod span;
mod structure;
#[cfg(test)]
mod structure_tests;

pub use lint::{check, lint};
pub use span::Span;
pub use structure::{EntityNode, SourceStructure, parse};
