//! Shape nodes and their structural rules.
//!
//! A [`Shape`] is either a [`Circle`] or a [`Square`]. Both carry a label and an
//! ordered list of children. Circles accept children of any kind, while squares
//! only accept other squares. The rule is checked when a child is attached, so
//! a tree that violates it can never be built.
//!
//! # Example
//!
//! ```
//! # use shapeshift_core::{Circle, Shape, Square};
//! let mut outer = Square::new("1");
//! outer.push_child(Shape::Square(Square::new("35"))).unwrap();
//!
//! let err = outer.push_child(Shape::Circle(Circle::new("INK")));
//! assert!(err.is_err());
//! assert_eq!(outer.children().len(), 1);
//! ```

use std::{fmt, mem};

use log::debug;
use thiserror::Error;

/// Errors raised when a shape tree would violate a structural rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A non-square child was attached to a square.
    #[error("square `{parent}` may only contain squares, found a {child}")]
    SquareChild { parent: String, child: ShapeKind },
}

/// The two kinds of shape that can appear in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A round-bracketed node: `(LABEL ...)`.
    Circle,
    /// A square-bracketed node: `[123 ...]`.
    Square,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Square => write!(f, "square"),
        }
    }
}

/// A circle node. May hold children of either kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circle {
    label: String,
    children: Vec<Shape>,
}

impl Circle {
    /// Create a circle with the given label and no children.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Append a child. Circles accept every kind of shape.
    pub fn push_child(&mut self, child: Shape) {
        self.children.push(child);
    }
}

/// A square node. Every child of a square is itself a square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Square {
    label: String,
    children: Vec<Shape>,
}

impl Square {
    /// Create a square with the given label and no children.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Append a child, rejecting anything that is not a square.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::SquareChild`] when `child` is a circle. The square
    /// is left unchanged in that case.
    pub fn push_child(&mut self, child: Shape) -> Result<(), ShapeError> {
        if let Shape::Circle(circle) = &child {
            debug!(parent = self.label, child = circle.label(); "Rejected circle inside square");
            return Err(ShapeError::SquareChild {
                parent: self.label.clone(),
                child: child.kind(),
            });
        }
        self.children.push(child);
        Ok(())
    }
}

/// A labelled node of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
}

impl Shape {
    /// Returns the kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Square(_) => ShapeKind::Square,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Shape::Circle(circle) => circle.label(),
            Shape::Square(square) => square.label(),
        }
    }

    /// Returns the children in the order they appeared in the input.
    pub fn children(&self) -> &[Shape] {
        match self {
            Shape::Circle(circle) => circle.children(),
            Shape::Square(square) => square.children(),
        }
    }

    pub fn is_square(&self) -> bool {
        matches!(self, Shape::Square(_))
    }

    /// Attach a child, applying the rules of this shape's kind.
    ///
    /// # Errors
    ///
    /// Fails when `self` is a square and `child` is not.
    pub fn push_child(&mut self, child: Shape) -> Result<(), ShapeError> {
        match self {
            Shape::Circle(circle) => {
                circle.push_child(child);
                Ok(())
            }
            Shape::Square(square) => square.push_child(child),
        }
    }

    /// Number of shapes below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        let mut pending: Vec<&Shape> = self.children().iter().collect();
        let mut count = 0;
        while let Some(shape) = pending.pop() {
            count += 1;
            pending.extend(shape.children());
        }
        count
    }

    fn children_mut(&mut self) -> &mut Vec<Shape> {
        match self {
            Shape::Circle(circle) => &mut circle.children,
            Shape::Square(square) => &mut square.children,
        }
    }
}

/// Tears the tree down level by level, so dropping a deeply nested shape
/// does not recurse once per level.
impl Drop for Shape {
    fn drop(&mut self) {
        let mut pending = mem::take(self.children_mut());
        while let Some(mut shape) = pending.pop() {
            pending.append(shape.children_mut());
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Square> for Shape {
    fn from(square: Square) -> Self {
        Shape::Square(square)
    }
}
