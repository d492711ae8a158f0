//! Shapeshift Core Types
//!
//! This crate provides the shape model produced by the Shapeshift parser and
//! consumed by renderers. It includes:
//!
//! - **Shapes**: labelled [`shape::Circle`] and [`shape::Square`] nodes wrapped
//!   in the [`shape::Shape`] enum
//! - **Forest**: the [`forest::Container`] root that holds top-level shapes in
//!   input order, together with read-only traversal helpers

pub mod forest;
pub mod shape;

pub use forest::Container;
pub use shape::{Circle, Shape, ShapeError, ShapeKind, Square};
