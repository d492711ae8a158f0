use log::debug;
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use shapeshift_core::{Container, Shape, ShapeKind};

use crate::config::RenderConfig;

const MARGIN: f32 = 20.0;
const FONT_SIZE: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Container,
    Circle,
    Square,
}

impl From<ShapeKind> for NodeKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => Self::Circle,
            ShapeKind::Square => Self::Square,
        }
    }
}

#[derive(Debug)]
struct Node<'a> {
    label: &'a str,
    kind: NodeKind,
    depth: usize,
    slot: f32,
    first_child: Option<usize>,
    last_child: Option<usize>,
}

/// Compact top-down tree layout.
///
/// Leaves occupy consecutive horizontal slots and every parent sits centred
/// over its first and last child. A childless container takes one slot.
#[derive(Debug)]
struct TreeLayout<'a> {
    nodes: Vec<Node<'a>>,
    edges: Vec<(usize, usize)>,
    leaves: usize,
    levels: usize,
}

impl<'a> TreeLayout<'a> {
    fn new(container: &'a Container) -> Self {
        let mut layout = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            leaves: 0,
            levels: 1,
        };

        let root = layout.push(container.label(), NodeKind::Container, 0, container.is_empty());

        // Pre-order, so leaves are met left to right and every child is
        // numbered after its parent.
        let mut pending: Vec<(&'a Shape, usize, usize)> = container
            .shapes()
            .iter()
            .rev()
            .map(|shape| (shape, root, 1))
            .collect();
        while let Some((shape, parent, depth)) = pending.pop() {
            let leaf = shape.children().is_empty();
            let index = layout.push(shape.label(), shape.kind().into(), depth, leaf);
            layout.link(parent, index);
            pending.extend(
                shape
                    .children()
                    .iter()
                    .rev()
                    .map(|child| (child, index, depth + 1)),
            );
        }

        for index in (0..layout.nodes.len()).rev() {
            let node = &layout.nodes[index];
            if let (Some(first), Some(last)) = (node.first_child, node.last_child) {
                let slot = (layout.nodes[first].slot + layout.nodes[last].slot) / 2.0;
                layout.nodes[index].slot = slot;
            }
        }

        layout
    }

    fn push(&mut self, label: &'a str, kind: NodeKind, depth: usize, leaf: bool) -> usize {
        self.levels = self.levels.max(depth + 1);
        let slot = if leaf {
            self.leaves += 1;
            (self.leaves - 1) as f32
        } else {
            0.0
        };
        self.nodes.push(Node {
            label,
            kind,
            depth,
            slot,
            first_child: None,
            last_child: None,
        });
        self.nodes.len() - 1
    }

    fn link(&mut self, parent: usize, child: usize) {
        self.edges.push((parent, child));
        let parent = &mut self.nodes[parent];
        parent.first_child.get_or_insert(child);
        parent.last_child = Some(child);
    }
}

/// Geometry derived from a [`RenderConfig`].
struct Canvas<'c> {
    config: &'c RenderConfig,
}

impl Canvas<'_> {
    fn centre_x(&self, slot: f32) -> f32 {
        MARGIN + slot * (self.config.node_width() + self.config.sibling_gap())
            + self.config.node_width() / 2.0
    }

    fn top_y(&self, depth: usize) -> f32 {
        MARGIN + depth as f32 * (self.config.node_height() + self.config.level_gap())
    }

    fn width(&self, leaves: usize) -> f32 {
        let leaves = leaves.max(1) as f32;
        2.0 * MARGIN
            + leaves * self.config.node_width()
            + (leaves - 1.0) * self.config.sibling_gap()
    }

    fn height(&self, levels: usize) -> f32 {
        let levels = levels.max(1) as f32;
        2.0 * MARGIN
            + levels * self.config.node_height()
            + (levels - 1.0) * self.config.level_gap()
    }

    fn edge(&self, parent: &Node<'_>, child: &Node<'_>) -> svg_element::Line {
        svg_element::Line::new()
            .set("x1", self.centre_x(parent.slot))
            .set("y1", self.top_y(parent.depth) + self.config.node_height())
            .set("x2", self.centre_x(child.slot))
            .set("y2", self.top_y(child.depth))
            .set("stroke", "black")
            .set("stroke-width", 1.5)
    }

    fn node(&self, node: &Node<'_>) -> svg_element::Group {
        let width = self.config.node_width();
        let height = self.config.node_height();
        let cx = self.centre_x(node.slot);
        let top = self.top_y(node.depth);

        let outline: Box<dyn svg::Node> = match node.kind {
            NodeKind::Circle => Box::new(
                svg_element::Ellipse::new()
                    .set("cx", cx)
                    .set("cy", top + height / 2.0)
                    .set("rx", width / 2.0)
                    .set("ry", height / 2.0)
                    .set("fill", "#ffb347")
                    .set("stroke", "black"),
            ),
            NodeKind::Square | NodeKind::Container => {
                let fill = if node.kind == NodeKind::Container {
                    "#e0e0e0"
                } else {
                    "white"
                };
                Box::new(
                    svg_element::Rectangle::new()
                        .set("x", cx - width / 2.0)
                        .set("y", top)
                        .set("width", width)
                        .set("height", height)
                        .set("fill", fill)
                        .set("stroke", "black"),
                )
            }
        };

        let text = svg_element::Text::new("")
            .set("x", cx)
            .set("y", top + height / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "Arial")
            .set("font-size", FONT_SIZE)
            .add(SvgText::new(node.label));

        svg_element::Group::new()
            .set("data-kind", node.kind.as_str())
            .add(outline)
            .add(text)
    }
}

impl NodeKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }
}

/// Render a container as an SVG tree diagram.
///
/// Circles are drawn as ellipses, squares and the container as rectangles,
/// and each parent is joined to each of its children by a line.
pub fn render_svg(container: &Container, config: &RenderConfig) -> String {
    let layout = TreeLayout::new(container);
    let canvas = Canvas { config };
    debug!(
        nodes = layout.nodes.len(),
        leaves = layout.leaves,
        levels = layout.levels;
        "Tree laid out"
    );

    let width = canvas.width(layout.leaves);
    let height = canvas.height(layout.levels);

    let edges = layout
        .edges
        .iter()
        .fold(svg_element::Group::new(), |group, &(parent, child)| {
            group.add(canvas.edge(&layout.nodes[parent], &layout.nodes[child]))
        });
    let nodes = layout
        .nodes
        .iter()
        .fold(svg_element::Group::new(), |group, node| {
            group.add(canvas.node(node))
        });

    Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
        .add(edges)
        .add(nodes)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use shapeshift_core::{Circle, Square};

    fn sample() -> Container {
        let mut a = Circle::new("A");
        a.push_child(Square::new("1").into());
        a.push_child(Circle::new("B").into());
        Container::new(vec![a.into(), Square::new("2").into()])
    }

    #[test]
    fn test_layout_centres_parents() {
        let container = sample();
        let layout = TreeLayout::new(&container);

        let slots: Vec<(&str, f32)> = layout
            .nodes
            .iter()
            .map(|node| (node.label, node.slot))
            .collect();
        assert_eq!(
            slots,
            vec![
                ("Container", 1.25),
                ("A", 0.5),
                ("1", 0.0),
                ("B", 1.0),
                ("2", 2.0),
            ]
        );
        assert_eq!(layout.leaves, 3);
        assert_eq!(layout.levels, 3);
        assert_eq!(layout.edges, vec![(0, 1), (1, 2), (1, 3), (0, 4)]);
    }

    #[test]
    fn test_empty_container_takes_one_slot() {
        let container = Container::default();
        let layout = TreeLayout::new(&container);
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.leaves, 1);
        assert_eq!(layout.levels, 1);
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn test_svg_elements() {
        let svg = render_svg(&sample(), &RenderConfig::default());

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert_eq!(svg.matches("<ellipse").count(), 2);
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<line").count(), 4);
        assert!(svg.contains("Container"));
        assert_eq!(svg.matches("data-kind=\"circle\"").count(), 2);
    }

    #[test]
    fn test_deep_chain_layout() {
        let depth = 20_000;
        let mut shape = Shape::from(Square::new("1"));
        for _ in 1..depth {
            let mut parent = Square::new("1");
            parent.push_child(shape).unwrap();
            shape = parent.into();
        }
        let container = Container::new(vec![shape]);

        let layout = TreeLayout::new(&container);
        assert_eq!(layout.nodes.len(), depth + 1);
        assert_eq!(layout.levels, depth + 1);
        assert_eq!(layout.leaves, 1);
        assert!(layout.nodes.iter().all(|node| node.slot == 0.0));
    }

    #[test]
    fn test_canvas_size_follows_config() {
        let config = RenderConfig::default();
        let canvas = Canvas { config: &config };
        // Three leaves of 80 with two gaps of 16, plus margins.
        assert_eq!(canvas.width(3), 40.0 + 240.0 + 32.0);
        assert_eq!(canvas.height(2), 40.0 + 72.0 + 40.0);
    }
}
