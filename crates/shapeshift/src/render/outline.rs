use std::fmt::Write;

use shapeshift_core::{Container, ShapeKind};

const INDENT: &str = "  ";

/// Render a container as an indented outline, one shape per line.
///
/// Circles are written as `(LABEL)` and squares as `[LABEL]`, indented by
/// depth below the container label.
///
/// ```
/// # use shapeshift::render::render_outline;
/// let container = shapeshift_parser::parse("(A[1])").unwrap();
/// assert_eq!(render_outline(&container), "Container\n  (A)\n    [1]\n");
/// ```
pub fn render_outline(container: &Container) -> String {
    let mut out = String::new();
    out.push_str(container.label());
    out.push('\n');

    container.walk(|depth, shape| {
        let (open, close) = match shape.kind() {
            ShapeKind::Circle => ('(', ')'),
            ShapeKind::Square => ('[', ']'),
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{}{open}{}{close}",
            INDENT.repeat(depth),
            shape.label()
        );
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use shapeshift_core::{Circle, Shape, Square};

    #[test]
    fn test_empty_container() {
        let container = Container::with_label("Root", Vec::new());
        assert_eq!(render_outline(&container), "Root\n");
    }

    #[test]
    fn test_nested_outline() {
        let mut ink = Circle::new("INK");
        let mut one = Square::new("1");
        one.push_child(Square::new("35").into()).unwrap();
        ink.push_child(one.into());
        ink.push_child(Circle::new("CHARLIE").into());
        let mut ball = Circle::new("BALL");
        ball.push_child(ink.into());

        let container = Container::new(vec![Square::new("12").into(), Shape::from(ball)]);

        let expected = "\
Container
  [12]
  (BALL)
    (INK)
      [1]
        [35]
      (CHARLIE)
";
        assert_eq!(render_outline(&container), expected);
    }
}
