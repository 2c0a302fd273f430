//! C4Pad Core Types and Definitions
//!
//! This crate provides the closed vocabularies shared by every layer of the
//! C4Pad toolchain. It includes:
//!
//! - **Diagram kinds**: The four C4 levels and their standard-library includes ([`diagram`] module)
//! - **Element kinds**: Leaf and boundary macros with their argument conventions ([`element`] module)
//! - **Relation kinds**: Directional and bidirectional relation macros ([`relation`] module)
//! - **Identifiers**: Alias validation ([`identifier`] module)

pub mod diagram;
pub mod element;
pub mod error;
pub mod identifier;
pub mod relation;

pub use diagram::DiagramKind;
pub use element::{ElementKind, TechnologyArg};
pub use error::UnknownKindError;
pub use relation::RelationKind;
