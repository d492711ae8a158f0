//! Shapeshift - parse and render trees of circles and squares.
//!
//! A Shapeshift document is a forest written in bracket notation, where
//! `(LABEL ...)` is a circle with an uppercase label and `[123 ...]` is a
//! square with a numeric label. Squares may only contain squares.
//!
//! This crate ties the streaming parser to configuration and rendering.

pub mod config;
pub mod render;

mod error;

pub use shapeshift_core::{Circle, Container, Shape, ShapeKind, Square};
pub use shapeshift_parser::{ErrorCode, Location, ParseError};

pub use error::ShapeshiftError;

use std::io::Read;

use log::{debug, info, trace};

use shapeshift_parser::{Parser, TreeBuilder};

use config::AppConfig;

/// Builder for parsing and rendering Shapeshift documents.
///
/// # Examples
///
/// ```rust
/// use shapeshift::{ShapeshiftBuilder, config::AppConfig};
///
/// let builder = ShapeshiftBuilder::new(AppConfig::default());
///
/// let container = builder
///     .parse("[12](BALL(INK[1[35]](CHARLIE)))")
///     .expect("Failed to parse");
/// assert_eq!(container.shape_count(), 6);
///
/// let svg = builder.render_svg(&container);
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct ShapeshiftBuilder {
    config: AppConfig,
}

impl ShapeshiftBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse an in-memory document into a [`Container`].
    ///
    /// The document is checked for emptiness, stray characters, and bracket
    /// balance before it is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeshiftError::Parse`] carrying the document text for any
    /// parse failure, or [`ShapeshiftError::Config`] for an invalid parser
    /// configuration.
    pub fn parse(&self, text: &str) -> Result<Container, ShapeshiftError> {
        info!(bytes = text.len(); "Parsing shapes");

        let mut builder = TreeBuilder::new();
        self.parser(&mut builder)?
            .parse_str(text)
            .map_err(|err| ShapeshiftError::new_parse_error(err, text))?;

        Ok(self.finish(builder))
    }

    /// Parse a document streamed from `reader` into a [`Container`].
    ///
    /// Streamed input skips the whole-document checks that [`parse`](Self::parse)
    /// performs, and its errors carry no source text.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeshiftError::Parse`] for parse and read failures, or
    /// [`ShapeshiftError::Config`] for an invalid parser configuration.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Container, ShapeshiftError> {
        info!("Parsing shapes from stream");

        let mut builder = TreeBuilder::new();
        self.parser(&mut builder)?
            .parse_reader(reader)
            .map_err(|err| ShapeshiftError::new_parse_error(err, String::new()))?;

        Ok(self.finish(builder))
    }

    /// Render a container as an indented text outline.
    pub fn render_outline(&self, container: &Container) -> String {
        render::render_outline(container)
    }

    /// Render a container as an SVG tree diagram.
    pub fn render_svg(&self, container: &Container) -> String {
        info!(shapes = container.shape_count(); "Rendering SVG");
        let svg = render::render_svg(container, self.config.render());
        debug!(bytes = svg.len(); "SVG rendered");
        svg
    }

    fn parser<'h>(
        &self,
        builder: &'h mut TreeBuilder,
    ) -> Result<Parser<'h, TreeBuilder>, ShapeshiftError> {
        let buffer_size = self
            .config
            .parser()
            .buffer_size()
            .map_err(ShapeshiftError::Config)?;

        let parser = Parser::new(builder);
        Ok(match buffer_size {
            Some(size) => parser.with_buffer_size(size),
            None => parser,
        })
    }

    fn finish(&self, builder: TreeBuilder) -> Container {
        let mut container = builder.into_container();
        container.set_label(self.config.render().container_label());

        debug!(
            top_level = container.len(),
            shapes = container.shape_count();
            "Shapes parsed successfully"
        );
        trace!(container:?; "Parsed container");

        container
    }
}
