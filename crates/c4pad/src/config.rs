//! Configuration types for C4Pad.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so a
//! configuration file only needs to mention what it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and diagram settings.
//! - [`RenderConfig`] - Where and in which format diagrams are rendered.
//! - [`DiagramConfig`] - Defaults for the diagram being edited.
//!
//! # Example
//!
//! ```
//! # use c4pad::config::{AppConfig, ImageFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.render().format(), ImageFormat::Svg);
//! assert!(config.render().server_url().is_ok());
//! ```

use std::fmt::{self, Display};

use serde::Deserialize;
use url::Url;

use c4pad_core::DiagramKind;

/// The public PlantUML rendering service.
pub const DEFAULT_SERVER_URL: &str = "https://www.plantuml.com/plantuml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, diagram: DiagramConfig) -> Self {
        Self { render, diagram }
    }

    /// Replaces the diagram section, e.g. for a command-line override.
    pub fn with_diagram(mut self, diagram: DiagramConfig) -> Self {
        self.diagram = diagram;
        self
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }
}

/// Image format requested from the rendering service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl From<ImageFormat> for &'static str {
    fn from(val: ImageFormat) -> Self {
        match val {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Rendering service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Base URL of the rendering service.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Requested image format.
    #[serde(default)]
    format: ImageFormat,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            format: ImageFormat::default(),
        }
    }
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    pub fn new(server_url: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            server_url: server_url.into(),
            format,
        }
    }

    /// Returns the parsed service base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not an absolute URL that
    /// can carry path segments.
    pub fn server_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.server_url)
            .map_err(|err| format!("Invalid render server URL `{}`: {err}", self.server_url))?;
        if url.cannot_be_a_base() {
            return Err(format!(
                "Render server URL `{}` cannot have path segments",
                self.server_url
            ));
        }
        Ok(url)
    }

    /// Returns the requested image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// Defaults for the diagram being edited.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiagramConfig {
    /// Default diagram level.
    #[serde(default)]
    kind: DiagramKind,
}

impl DiagramConfig {
    /// Creates a new [`DiagramConfig`].
    pub fn new(kind: DiagramKind) -> Self {
        Self { kind }
    }

    /// Returns the default diagram level.
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_url_parses() {
        let url = RenderConfig::default()
            .server_url()
            .expect("default URL is valid");
        assert_eq!(url.as_str(), "https://www.plantuml.com/plantuml");
    }

    #[test]
    fn test_invalid_server_url() {
        let config = RenderConfig::new("not a url", ImageFormat::Png);
        assert!(config.server_url().is_err());

        let config = RenderConfig::new("mailto:render@example.com", ImageFormat::Png);
        assert!(config.server_url().is_err());
    }

    #[test]
    fn test_image_format_display() {
        assert_eq!(ImageFormat::Svg.to_string(), "svg");
        assert_eq!(ImageFormat::Png.to_string(), "png");
    }

    #[test]
    fn test_default_diagram_kind() {
        assert_eq!(AppConfig::default().diagram().kind(), DiagramKind::Container);
    }
}
