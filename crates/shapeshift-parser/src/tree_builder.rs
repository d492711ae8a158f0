//! The default handler, which builds a [`Container`] of shapes.

use log::trace;

use shapeshift_core::{Circle, Container, Shape, ShapeError, Square};

use crate::{handler::ShapesHandler, location::Location};

/// A [`ShapesHandler`] that builds the shape forest.
///
/// The builder keeps a single pending slot holding the shape that was
/// completed last. A parent's `end_*_child` callback moves that shape into its
/// children, and [`fold`](ShapesHandler::fold) moves it into the forest, so
/// every shape has exactly one owner at all times.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    pending: Option<Shape>,
    forest: Vec<Shape>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level shapes completed so far, in input order.
    pub fn forest(&self) -> &[Shape] {
        &self.forest
    }

    pub fn into_forest(self) -> Vec<Shape> {
        self.forest
    }

    /// Wrap the forest in a [`Container`] with the default label.
    pub fn into_container(self) -> Container {
        Container::new(self.forest)
    }
}

impl ShapesHandler for TreeBuilder {
    type Circle = Circle;
    type Square = Square;

    fn end_circle_label(&mut self, circle: &mut Circle, label: &str, _at: Location) {
        circle.set_label(label);
    }

    fn end_circle_child(
        &mut self,
        circle: &mut Circle,
        _label: &str,
        _at: Location,
    ) -> Result<(), ShapeError> {
        if let Some(child) = self.pending.take() {
            circle.push_child(child);
        }
        Ok(())
    }

    fn end_circle(&mut self, circle: Circle, _at: Location) {
        self.pending = Some(Shape::Circle(circle));
    }

    fn end_square_label(&mut self, square: &mut Square, label: &str, _at: Location) {
        square.set_label(label);
    }

    fn end_square_child(
        &mut self,
        square: &mut Square,
        _label: &str,
        _at: Location,
    ) -> Result<(), ShapeError> {
        match self.pending.take() {
            Some(child) => square.push_child(child),
            None => Ok(()),
        }
    }

    fn end_square(&mut self, square: Square, _at: Location) {
        self.pending = Some(Shape::Square(square));
    }

    fn fold(&mut self, at: Location) {
        if let Some(shape) = self.pending.take() {
            trace!(label = shape.label(), line = at.line(); "Top-level shape completed");
            self.forest.push(shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use shapeshift_core::ShapeKind;

    use super::*;

    #[test]
    fn test_builds_nested_shapes() {
        let at = Location::start();
        let mut builder = TreeBuilder::new();

        let mut outer = builder.start_circle(at);
        builder.end_circle_label(&mut outer, "A", at);

        let mut inner = builder.start_square(at);
        builder.end_square_label(&mut inner, "1", at);
        builder.end_square(inner, at);
        builder.end_circle_child(&mut outer, "A", at).unwrap();

        builder.end_circle(outer, at);
        builder.fold(at);

        let forest = builder.into_forest();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].label(), "A");
        assert_eq!(forest[0].children()[0].kind(), ShapeKind::Square);
        assert_eq!(forest[0].children()[0].label(), "1");
    }

    #[test]
    fn test_square_refuses_circle_child() {
        let at = Location::start();
        let mut builder = TreeBuilder::new();

        let mut square = builder.start_square(at);
        builder.end_square_label(&mut square, "1", at);
        let mut circle = builder.start_circle(at);
        builder.end_circle_label(&mut circle, "A", at);
        builder.end_circle(circle, at);

        let err = builder.end_square_child(&mut square, "1", at).unwrap_err();
        assert!(matches!(err, ShapeError::SquareChild { .. }));
        assert!(square.children().is_empty());
    }

    #[test]
    fn test_fold_moves_pending_into_forest() {
        let at = Location::start();
        let mut builder = TreeBuilder::new();

        for label in ["1", "2", "3"] {
            let mut square = builder.start_square(at);
            builder.end_square_label(&mut square, label, at);
            builder.end_square(square, at);
            builder.fold(at);
        }
        // A fold without a completed shape adds nothing.
        builder.fold(at);

        let labels: Vec<_> = builder.forest().iter().map(Shape::label).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert_eq!(builder.into_container().label(), "Container");
    }
}
