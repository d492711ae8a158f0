//! Read-only renderers for parsed shape forests.
//!
//! - [`render_outline`] produces an indented text tree.
//! - [`render_svg`] lays the tree out top-down and writes it as an SVG document.

mod outline;
mod tree;

pub use outline::render_outline;
pub use tree::render_svg;
