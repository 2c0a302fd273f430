//! Relation macro kinds.
//!
//! Relation macros follow a naming convention: a base name (`Rel` or `BiRel`)
//! optionally suffixed with a direction (`_U`, `_D`, `_L`, `_R`) or, for the
//! unidirectional form only, `_Neighbor`.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::UnknownKindError;

/// A macro kind that declares a relation between two aliases.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RelationKind {
    #[default]
    Rel,
    #[serde(rename = "Rel_U")]
    RelUp,
    #[serde(rename = "Rel_D")]
    RelDown,
    #[serde(rename = "Rel_L")]
    RelLeft,
    #[serde(rename = "Rel_R")]
    RelRight,
    #[serde(rename = "Rel_Neighbor")]
    RelNeighbor,
    BiRel,
    #[serde(rename = "BiRel_U")]
    BiRelUp,
    #[serde(rename = "BiRel_D")]
    BiRelDown,
    #[serde(rename = "BiRel_L")]
    BiRelLeft,
    #[serde(rename = "BiRel_R")]
    BiRelRight,
}

impl RelationKind {
    /// Every relation kind, unidirectional forms first.
    pub const ALL: [RelationKind; 11] = [
        RelationKind::Rel,
        RelationKind::RelUp,
        RelationKind::RelDown,
        RelationKind::RelLeft,
        RelationKind::RelRight,
        RelationKind::RelNeighbor,
        RelationKind::BiRel,
        RelationKind::BiRelUp,
        RelationKind::BiRelDown,
        RelationKind::BiRelLeft,
        RelationKind::BiRelRight,
    ];

    /// Returns the macro name as written in source text.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Rel => "Rel",
            RelationKind::RelUp => "Rel_U",
            RelationKind::RelDown => "Rel_D",
            RelationKind::RelLeft => "Rel_L",
            RelationKind::RelRight => "Rel_R",
            RelationKind::RelNeighbor => "Rel_Neighbor",
            RelationKind::BiRel => "BiRel",
            RelationKind::BiRelUp => "BiRel_U",
            RelationKind::BiRelDown => "BiRel_D",
            RelationKind::BiRelLeft => "BiRel_L",
            RelationKind::BiRelRight => "BiRel_R",
        }
    }

    /// Returns `true` for the `BiRel` family.
    pub fn is_bidirectional(self) -> bool {
        matches!(
            self,
            RelationKind::BiRel
                | RelationKind::BiRelUp
                | RelationKind::BiRelDown
                | RelationKind::BiRelLeft
                | RelationKind::BiRelRight
        )
    }

    /// Returns `true` if `name` follows the relation naming convention.
    ///
    /// This is looser than [`FromStr`]: any alphabetic qualifier after the base
    /// name is accepted (`Rel_Back`, `BiRel_Up`), so relation-like macros from
    /// newer library versions are still never mistaken for elements.
    ///
    /// # Example
    ///
    /// ```
    /// # use c4pad_core::RelationKind;
    /// assert!(RelationKind::is_relation_name("Rel"));
    /// assert!(RelationKind::is_relation_name("Rel_Back"));
    /// assert!(!RelationKind::is_relation_name("Relay"));
    /// assert!(!RelationKind::is_relation_name("Rel_"));
    /// ```
    pub fn is_relation_name(name: &str) -> bool {
        let Some(rest) = name
            .strip_prefix("BiRel")
            .or_else(|| name.strip_prefix("Rel"))
        else {
            return false;
        };

        match rest.strip_prefix('_') {
            None => rest.is_empty(),
            Some(qualifier) => {
                !qualifier.is_empty() && qualifier.chars().all(|c| c.is_ascii_alphabetic())
            }
        }
    }
}

impl FromStr for RelationKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKindError::new("relation kind", s))
    }
}

impl From<RelationKind> for &'static str {
    fn from(val: RelationKind) -> Self {
        val.as_str()
    }
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
