//! The forest root that holds every top-level shape of a document.
//!
//! A [`Container`] is not a [`Shape`] variant, so it can never be nested
//! inside another shape. Renderers walk it read-only through
//! [`Container::walk`].

use crate::shape::Shape;

/// Default display label of the forest root.
pub const DEFAULT_CONTAINER_LABEL: &str = "Container";

/// Virtual root of a parsed document.
///
/// Its children are the top-level shapes in the order they appeared in the
/// input. Top-level siblings form a forest, not a chain: nothing about their
/// relative position is kept beyond that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    label: String,
    children: Vec<Shape>,
}

impl Container {
    /// Create a container with the default label around the given forest.
    pub fn new(children: Vec<Shape>) -> Self {
        Self::with_label(DEFAULT_CONTAINER_LABEL, children)
    }

    /// Create a container with a custom display label.
    pub fn with_label(label: impl Into<String>, children: Vec<Shape>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Returns the top-level shapes in input order.
    pub fn shapes(&self) -> &[Shape] {
        &self.children
    }

    /// Consume the container and return the top-level shapes.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.children
    }

    /// Number of top-level shapes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of shapes in the forest, at any depth.
    pub fn shape_count(&self) -> usize {
        self.children
            .iter()
            .map(|shape| 1 + shape.descendant_count())
            .sum()
    }

    /// Visit every shape in pre-order.
    ///
    /// The visitor receives the depth of each shape (top-level shapes are at
    /// depth 1, the container itself being depth 0) and the shape.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(usize, &Shape),
    {
        let mut pending: Vec<(usize, &Shape)> =
            self.children.iter().rev().map(|shape| (1, shape)).collect();

        while let Some((depth, shape)) = pending.pop() {
            visitor(depth, shape);
            pending.extend(shape.children().iter().rev().map(|child| (depth + 1, child)));
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Shape>> for Container {
    fn from(children: Vec<Shape>) -> Self {
        Self::new(children)
    }
}
