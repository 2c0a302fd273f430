//! Element macro kinds.
//!
//! Every macro that declares a diagram element is either a *leaf* (a single
//! element such as a person or a container) or a *boundary* that groups other
//! elements inside a brace-delimited block. [`ElementKind::is_boundary`] is the
//! capability flag the editing layer dispatches on.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::UnknownKindError;

/// A macro kind that declares an element or a boundary.
///
/// The [`Display`] form is the exact macro name used in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ElementKind {
    // Leaf kinds
    Person,
    #[serde(rename = "Person_Ext")]
    PersonExt,
    System,
    #[serde(rename = "System_Ext")]
    SystemExt,
    SystemDb,
    #[serde(rename = "SystemDb_Ext")]
    SystemDbExt,
    SystemQueue,
    #[serde(rename = "SystemQueue_Ext")]
    SystemQueueExt,
    Container,
    #[serde(rename = "Container_Ext")]
    ContainerExt,
    ContainerDb,
    #[serde(rename = "ContainerDb_Ext")]
    ContainerDbExt,
    ContainerQueue,
    #[serde(rename = "ContainerQueue_Ext")]
    ContainerQueueExt,
    Component,
    #[serde(rename = "Component_Ext")]
    ComponentExt,
    ComponentDb,
    #[serde(rename = "ComponentDb_Ext")]
    ComponentDbExt,
    ComponentQueue,
    #[serde(rename = "ComponentQueue_Ext")]
    ComponentQueueExt,

    // Boundary kinds
    Boundary,
    #[serde(rename = "Enterprise_Boundary")]
    EnterpriseBoundary,
    #[serde(rename = "System_Boundary")]
    SystemBoundary,
    #[serde(rename = "Container_Boundary")]
    ContainerBoundary,
    #[serde(rename = "Deployment_Node")]
    DeploymentNode,
    Node,
    #[serde(rename = "Node_L")]
    NodeL,
    #[serde(rename = "Node_R")]
    NodeR,
}

/// The argument name used to carry an element's technology.
///
/// The macro language uses `$type` for the "type of actor" of persons and
/// systems, and `$techn` for the technology of every other leaf kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechnologyArg {
    Type,
    Techn,
}

impl TechnologyArg {
    /// The named-argument spelling, including the `$` prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            TechnologyArg::Type => "$type",
            TechnologyArg::Techn => "$techn",
        }
    }
}

impl ElementKind {
    /// Every element kind, leaf kinds first.
    pub const ALL: [ElementKind; 28] = [
        ElementKind::Person,
        ElementKind::PersonExt,
        ElementKind::System,
        ElementKind::SystemExt,
        ElementKind::SystemDb,
        ElementKind::SystemDbExt,
        ElementKind::SystemQueue,
        ElementKind::SystemQueueExt,
        ElementKind::Container,
        ElementKind::ContainerExt,
        ElementKind::ContainerDb,
        ElementKind::ContainerDbExt,
        ElementKind::ContainerQueue,
        ElementKind::ContainerQueueExt,
        ElementKind::Component,
        ElementKind::ComponentExt,
        ElementKind::ComponentDb,
        ElementKind::ComponentDbExt,
        ElementKind::ComponentQueue,
        ElementKind::ComponentQueueExt,
        ElementKind::Boundary,
        ElementKind::EnterpriseBoundary,
        ElementKind::SystemBoundary,
        ElementKind::ContainerBoundary,
        ElementKind::DeploymentNode,
        ElementKind::Node,
        ElementKind::NodeL,
        ElementKind::NodeR,
    ];

    /// Returns the macro name as written in source text.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Person => "Person",
            ElementKind::PersonExt => "Person_Ext",
            ElementKind::System => "System",
            ElementKind::SystemExt => "System_Ext",
            ElementKind::SystemDb => "SystemDb",
            ElementKind::SystemDbExt => "SystemDb_Ext",
            ElementKind::SystemQueue => "SystemQueue",
            ElementKind::SystemQueueExt => "SystemQueue_Ext",
            ElementKind::Container => "Container",
            ElementKind::ContainerExt => "Container_Ext",
            ElementKind::ContainerDb => "ContainerDb",
            ElementKind::ContainerDbExt => "ContainerDb_Ext",
            ElementKind::ContainerQueue => "ContainerQueue",
            ElementKind::ContainerQueueExt => "ContainerQueue_Ext",
            ElementKind::Component => "Component",
            ElementKind::ComponentExt => "Component_Ext",
            ElementKind::ComponentDb => "ComponentDb",
            ElementKind::ComponentDbExt => "ComponentDb_Ext",
            ElementKind::ComponentQueue => "ComponentQueue",
            ElementKind::ComponentQueueExt => "ComponentQueue_Ext",
            ElementKind::Boundary => "Boundary",
            ElementKind::EnterpriseBoundary => "Enterprise_Boundary",
            ElementKind::SystemBoundary => "System_Boundary",
            ElementKind::ContainerBoundary => "Container_Boundary",
            ElementKind::DeploymentNode => "Deployment_Node",
            ElementKind::Node => "Node",
            ElementKind::NodeL => "Node_L",
            ElementKind::NodeR => "Node_R",
        }
    }

    /// Returns `true` if this kind opens a nested block.
    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            ElementKind::Boundary
                | ElementKind::EnterpriseBoundary
                | ElementKind::SystemBoundary
                | ElementKind::ContainerBoundary
                | ElementKind::DeploymentNode
                | ElementKind::Node
                | ElementKind::NodeL
                | ElementKind::NodeR
        )
    }

    /// Returns the argument used for the technology of this kind.
    ///
    /// Boundaries carry no technology and return `None`.
    pub fn technology_arg(self) -> Option<TechnologyArg> {
        match self {
            ElementKind::Person
            | ElementKind::PersonExt
            | ElementKind::System
            | ElementKind::SystemExt => Some(TechnologyArg::Type),
            kind if kind.is_boundary() => None,
            _ => Some(TechnologyArg::Techn),
        }
    }
}

impl FromStr for ElementKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKindError::new("element kind", s))
    }
}

impl From<ElementKind> for &'static str {
    fn from(val: ElementKind) -> Self {
        val.as_str()
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
