//! C4Pad - structured editing of C4-PlantUML diagram sources.
//!
//! The diagram text is the single source of truth. C4Pad reads its structure,
//! splices new elements and relations into it, normalizes it into a
//! renderable document, and encodes it into a PlantUML server URL.

pub mod codec;
pub mod config;
pub mod edit;
pub mod normalize;

mod error;
mod snippet;

pub use c4pad_core::{DiagramKind, ElementKind, RelationKind, identifier};
pub use c4pad_parser::{EntityNode, SourceStructure, error::Diagnostic};

pub use error::{C4padError, EditError};
pub use snippet::DEFAULT_SNIPPET;

use log::{debug, info};
use url::Url;

use config::{AppConfig, RenderConfig};
use edit::{NewElement, NewRelation};

/// Validating editor for diagram sources.
///
/// Every operation takes the current text and, for edits, returns the new
/// text. Nothing is cached between calls, so the editor can be shared across
/// documents.
///
/// # Examples
///
/// ```rust
/// use c4pad::{DiagramEditor, ElementKind, edit::NewElement};
///
/// let editor = DiagramEditor::default();
/// let source = "Person(u, \"User\")";
///
/// let source = editor
///     .add_element(source, &NewElement::new(ElementKind::System, "s", "Shop"))
///     .expect("alias is new");
/// assert_eq!(source, "Person(u, \"User\")\nSystem($alias=s, $label=\"Shop\")");
///
/// // Aliases must stay unique.
/// assert!(editor
///     .add_element(&source, &NewElement::new(ElementKind::System, "s", "Again"))
///     .is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct DiagramEditor {
    config: AppConfig,
}

impl DiagramEditor {
    /// Create a new editor with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this editor validates and renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The diagram level edits are validated against.
    pub fn diagram_kind(&self) -> DiagramKind {
        self.config.diagram().kind()
    }

    /// Build the structural model of `source`.
    pub fn outline<'src>(&self, source: &'src str) -> SourceStructure<'src> {
        c4pad_parser::parse(source)
    }

    /// Run the structural lint over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`C4padError::Lint`] if any finding is an error. Warnings
    /// alone are returned in the `Ok` value.
    pub fn check(&self, source: &str) -> Result<Vec<Diagnostic>, C4padError> {
        let structure = c4pad_parser::parse(source);
        c4pad_parser::check(&structure).map_err(|err| C4padError::new_lint_error(err, source))
    }

    /// Insert a new element into `source`.
    ///
    /// Every value is trimmed. The alias must be a fresh identifier, the
    /// label must be non-empty, and the kind must belong to the configured
    /// diagram level. Quoted values may not contain line breaks.
    ///
    /// # Errors
    ///
    /// Returns [`C4padError::Edit`] if validation fails or the parent
    /// boundary cannot take children.
    pub fn add_element(&self, source: &str, element: &NewElement<'_>) -> Result<String, C4padError> {
        let alias = element.alias().trim();
        let label = element.label().trim();
        if alias.is_empty() {
            return Err(EditError::EmptyAlias.into());
        }
        if label.is_empty() {
            return Err(EditError::EmptyLabel.into());
        }
        if !identifier::is_identifier(alias) {
            return Err(EditError::InvalidAlias(alias.to_string()).into());
        }
        let technology = element.technology().map(str::trim);
        let description = element.description().map(str::trim);
        single_line("label", label)?;
        single_line("technology", technology.unwrap_or_default())?;
        single_line("description", description.unwrap_or_default())?;

        let diagram = self.diagram_kind();
        if !diagram.allows(element.kind()) {
            return Err(EditError::KindNotAllowed {
                kind: element.kind(),
                diagram,
            }
            .into());
        }

        let structure = c4pad_parser::parse(source);
        if structure.contains_alias(alias) {
            return Err(EditError::DuplicateAlias(alias.to_string()).into());
        }

        let mut trimmed = NewElement::new(element.kind(), alias, label).with_parent(element.parent());
        if let Some(technology) = technology {
            trimmed = trimmed.with_technology(technology);
        }
        if let Some(description) = description {
            trimmed = trimmed.with_description(description);
        }

        let updated = edit::try_insert_element(&structure, &trimmed).map_err(EditError::from)?;
        info!(alias, kind:% = element.kind(); "Element added");
        Ok(updated)
    }

    /// Insert a new relation into `source`.
    ///
    /// Every value is trimmed. Both endpoints must be declared aliases, and
    /// the label must be non-empty and fit on one line.
    ///
    /// # Errors
    ///
    /// Returns [`C4padError::Edit`] if validation fails.
    pub fn add_relation(
        &self,
        source: &str,
        relation: &NewRelation<'_>,
    ) -> Result<String, C4padError> {
        let from = relation.from().trim();
        let to = relation.to().trim();
        if from.is_empty() || to.is_empty() {
            return Err(EditError::MissingEndpoint.into());
        }
        let label = relation.label().trim();
        if label.is_empty() {
            return Err(EditError::EmptyLabel.into());
        }
        let technology = relation.technology().map(str::trim);
        let description = relation.description().map(str::trim);
        single_line("label", label)?;
        single_line("technology", technology.unwrap_or_default())?;
        single_line("description", description.unwrap_or_default())?;

        let structure = c4pad_parser::parse(source);
        if let Some(unknown) = [from, to].into_iter().find(|a| !structure.contains_alias(a)) {
            return Err(EditError::UnknownAlias(unknown.to_string()).into());
        }

        let mut trimmed = NewRelation::new(relation.kind(), from, to, label);
        if let Some(technology) = technology {
            trimmed = trimmed.with_technology(technology);
        }
        if let Some(description) = description {
            trimmed = trimmed.with_description(description);
        }

        let updated = edit::insert_relation(&structure, &trimmed);
        info!(from, to, kind:% = relation.kind(); "Relation added");
        Ok(updated)
    }

    /// Normalize `source` for the configured diagram level.
    pub fn normalize(&self, source: &str) -> String {
        normalize::normalize(source, self.diagram_kind())
    }

    /// The render URL for `source`, or `None` if there is nothing to render.
    ///
    /// # Errors
    ///
    /// Returns [`C4padError::Config`] if the configured server URL is invalid.
    pub fn render_url(&self, source: &str) -> Result<Option<Url>, C4padError> {
        render_url(source, self.diagram_kind(), self.config.render())
    }
}

/// A macro call occupies exactly one line.
fn single_line(field: &'static str, value: &str) -> Result<(), EditError> {
    if value.contains(['\n', '\r']) {
        return Err(EditError::LineBreak(field));
    }
    Ok(())
}

/// Normalize `source`, encode it, and build the URL that renders it.
///
/// The URL has the shape `{server_url}/{format}/{encoded}`. Returns `None`
/// when the normalized text is empty.
///
/// # Errors
///
/// Returns [`C4padError::Config`] if the configured server URL is invalid.
///
/// # Example
///
/// ```
/// # use c4pad::{render_url, DiagramKind, config::RenderConfig};
/// let url = render_url("Person(u, \"User\")", DiagramKind::Context, &RenderConfig::default())
///     .expect("default config is valid")
///     .expect("source is not empty");
/// assert!(url.as_str().starts_with("https://www.plantuml.com/plantuml/svg/"));
///
/// assert!(render_url("  ", DiagramKind::Context, &RenderConfig::default())
///     .expect("default config is valid")
///     .is_none());
/// ```
pub fn render_url(
    source: &str,
    kind: DiagramKind,
    config: &RenderConfig,
) -> Result<Option<Url>, C4padError> {
    let normalized = normalize::normalize(source, kind);
    if normalized.is_empty() {
        debug!("Nothing to render");
        return Ok(None);
    }

    let encoded = codec::encode(&normalized);
    let mut url = config.server_url().map_err(C4padError::Config)?;
    url.path_segments_mut()
        .map_err(|()| C4padError::Config("Render server URL cannot have path segments".to_string()))?
        .pop_if_empty()
        .push(config.format().into())
        .push(&encoded);

    debug!(url:% = url, encoded_len = encoded.len(); "Built render URL");
    Ok(Some(url))
}
