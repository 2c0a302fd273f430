//! Diagram kinds.
//!
//! Each [`DiagramKind`] corresponds to one level of the C4 model and maps to
//! its own standard-library include and to the element kinds an editor offers
//! at that level. Adding a kind means extending both tables together.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{element::ElementKind, error::UnknownKindError};

const STDLIB_BASE: &str = "https://raw.githubusercontent.com/plantuml-stdlib/C4-PlantUML/master";

const CONTEXT_ELEMENTS: &[ElementKind] = &[
    ElementKind::Person,
    ElementKind::PersonExt,
    ElementKind::System,
    ElementKind::SystemExt,
    ElementKind::SystemDb,
    ElementKind::SystemDbExt,
    ElementKind::SystemQueue,
    ElementKind::SystemQueueExt,
    ElementKind::Boundary,
    ElementKind::EnterpriseBoundary,
    ElementKind::SystemBoundary,
];

const CONTAINER_ELEMENTS: &[ElementKind] = &[
    ElementKind::Person,
    ElementKind::PersonExt,
    ElementKind::System,
    ElementKind::SystemExt,
    ElementKind::Container,
    ElementKind::ContainerExt,
    ElementKind::ContainerDb,
    ElementKind::ContainerDbExt,
    ElementKind::ContainerQueue,
    ElementKind::ContainerQueueExt,
    ElementKind::Boundary,
    ElementKind::EnterpriseBoundary,
    ElementKind::SystemBoundary,
    ElementKind::ContainerBoundary,
];

const COMPONENT_ELEMENTS: &[ElementKind] = &[
    ElementKind::Person,
    ElementKind::PersonExt,
    ElementKind::System,
    ElementKind::SystemExt,
    ElementKind::Container,
    ElementKind::ContainerExt,
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
];

const DEPLOYMENT_ELEMENTS: &[ElementKind] = &[
    ElementKind::Person,
    ElementKind::PersonExt,
    ElementKind::System,
    ElementKind::SystemExt,
    ElementKind::Container,
    ElementKind::ContainerExt,
    ElementKind::ContainerDb,
    ElementKind::ContainerDbExt,
    ElementKind::DeploymentNode,
    ElementKind::Node,
    ElementKind::NodeL,
    ElementKind::NodeR,
    ElementKind::Boundary,
    ElementKind::EnterpriseBoundary,
    ElementKind::SystemBoundary,
    ElementKind::ContainerBoundary,
];

/// One of the four C4 diagram levels.
///
/// # Variants
///
/// - `Context` - People and software systems
/// - `Container` - Applications and data stores inside a system (default)
/// - `Component` - Components inside a container
/// - `Deployment` - Infrastructure nodes hosting containers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Context,
    #[default]
    Container,
    Component,
    Deployment,
}

impl DiagramKind {
    /// Every diagram kind, from the most abstract level down.
    pub const ALL: [DiagramKind; 4] = [
        DiagramKind::Context,
        DiagramKind::Container,
        DiagramKind::Component,
        DiagramKind::Deployment,
    ];

    /// The file name of this level's standard-library module.
    pub fn stdlib_file(self) -> &'static str {
        match self {
            DiagramKind::Context => "C4_Context.puml",
            DiagramKind::Container => "C4_Container.puml",
            DiagramKind::Component => "C4_Component.puml",
            DiagramKind::Deployment => "C4_Deployment.puml",
        }
    }

    /// The canonical `!include` directive for this level.
    ///
    /// # Example
    ///
    /// ```
    /// # use c4pad_core::DiagramKind;
    /// assert!(DiagramKind::Deployment.include_line().ends_with("/C4_Deployment.puml"));
    /// ```
    pub fn include_line(self) -> String {
        format!("!include {STDLIB_BASE}/{}", self.stdlib_file())
    }

    /// The element kinds offered for insertion at this level.
    pub fn element_kinds(self) -> &'static [ElementKind] {
        match self {
            DiagramKind::Context => CONTEXT_ELEMENTS,
            DiagramKind::Container => CONTAINER_ELEMENTS,
            DiagramKind::Component => COMPONENT_ELEMENTS,
            DiagramKind::Deployment => DEPLOYMENT_ELEMENTS,
        }
    }

    /// Returns `true` if `kind` is offered for insertion at this level.
    pub fn allows(self, kind: ElementKind) -> bool {
        self.element_kinds().contains(&kind)
    }
}

impl FromStr for DiagramKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "context" => Ok(Self::Context),
            "container" => Ok(Self::Container),
            "component" => Ok(Self::Component),
            "deployment" => Ok(Self::Deployment),
            _ => Err(UnknownKindError::new("diagram kind", s)),
        }
    }
}

impl From<DiagramKind> for &'static str {
    fn from(val: DiagramKind) -> Self {
        match val {
            DiagramKind::Context => "context",
            DiagramKind::Container => "container",
            DiagramKind::Component => "component",
            DiagramKind::Deployment => "deployment",
        }
    }
}

impl Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
