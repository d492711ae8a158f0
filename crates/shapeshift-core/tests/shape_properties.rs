//! Property tests for the shape model invariants.

use proptest::prelude::*;

use shapeshift_core::{Circle, Container, Shape, ShapeKind, Square};

/// Strategy for an arbitrary shape tree that respects the square rule.
fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        "[A-Z]{1,6}".prop_map(|label| Shape::Circle(Circle::new(label))),
        "[0-9]{1,6}".prop_map(|label| Shape::Square(Square::new(label))),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            ("[A-Z]{1,6}", prop::collection::vec(inner.clone(), 0..4)).prop_map(
                |(label, children)| {
                    let mut circle = Circle::new(label);
                    for child in children {
                        circle.push_child(child);
                    }
                    Shape::Circle(circle)
                }
            ),
            ("[0-9]{1,6}", prop::collection::vec(inner, 0..4)).prop_map(|(label, children)| {
                let mut square = Square::new(label);
                for child in children {
                    // Rejected children are simply dropped.
                    let _ = square.push_child(child);
                }
                Shape::Square(square)
            }),
        ]
    })
}

fn only_squares_below_squares(shape: &Shape) -> bool {
    let children_ok = match shape.kind() {
        ShapeKind::Square => shape.children().iter().all(Shape::is_square),
        ShapeKind::Circle => true,
    };
    children_ok && shape.children().iter().all(only_squares_below_squares)
}

proptest! {
    #[test]
    fn square_children_are_always_squares(shape in shape_strategy()) {
        prop_assert!(only_squares_below_squares(&shape));
    }

    #[test]
    fn walk_visits_every_shape_once(shapes in prop::collection::vec(shape_strategy(), 0..5)) {
        let container = Container::new(shapes);
        let mut visited = 0;
        container.walk(|_, _| visited += 1);
        prop_assert_eq!(visited, container.shape_count());
    }
}
