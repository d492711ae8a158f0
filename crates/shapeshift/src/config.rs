//! Configuration types for parsing and rendering shape documents.
//!
//! All types implement [`serde::Deserialize`], so a configuration can be
//! loaded from TOML or any other serde format. Every field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and render settings.
//! - [`ParserConfig`] - Controls the parser's read buffer.
//! - [`RenderConfig`] - Controls the container label and the SVG tree geometry.
//!
//! # Example
//!
//! ```
//! # use shapeshift::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().container_label(), "Container");
//! assert!(config.parser().buffer_size().is_ok());
//! ```

use std::num::NonZeroUsize;

use serde::Deserialize;

use shapeshift_core::forest::DEFAULT_CONTAINER_LABEL;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, render: RenderConfig) -> Self {
        Self { parser, render }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Parser configuration.
///
/// When no buffer size is set, in-memory documents use a buffer sized to the
/// input and streamed documents use the parser's default.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ParserConfig {
    /// Read buffer size in bytes.
    #[serde(default)]
    buffer_size: Option<usize>,
}

impl ParserConfig {
    /// Creates a [`ParserConfig`] with an explicit buffer size.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: Some(buffer_size),
        }
    }

    /// Returns the configured buffer size, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured size is zero.
    pub fn buffer_size(&self) -> Result<Option<NonZeroUsize>, String> {
        self.buffer_size
            .map(|size| {
                NonZeroUsize::new(size)
                    .ok_or_else(|| "Invalid buffer size in config: must be greater than zero".to_string())
            })
            .transpose()
    }
}

/// Rendering configuration for outlines and SVG trees.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    container_label: String,
    node_width: f32,
    node_height: f32,
    level_gap: f32,
    sibling_gap: f32,
}

impl RenderConfig {
    /// Label given to the root container of every parsed document.
    pub fn container_label(&self) -> &str {
        &self.container_label
    }

    /// Width of one node box in the SVG tree.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Height of one node box in the SVG tree.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Vertical distance between tree levels.
    pub fn level_gap(&self) -> f32 {
        self.level_gap
    }

    /// Horizontal distance between neighbouring leaves.
    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    /// Returns a copy with a different container label.
    pub fn with_container_label(mut self, label: impl Into<String>) -> Self {
        self.container_label = label.into();
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_label: DEFAULT_CONTAINER_LABEL.to_string(),
            node_width: 80.0,
            node_height: 36.0,
            level_gap: 40.0,
            sibling_gap: 16.0,
        }
    }
}
