use serde::{Deserialize, Serialize};

use crate::frames::NodeType;
use crate::point::Point;
use crate::rect::Rect;

/// A node's variant together with the only geometry that variant may carry.
/// Point nodes have no extent; the rect-bearing kinds have no point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Tree(Option<Rect>),
    Simple(Option<Rect>),
    Composite(Option<Rect>),
    Point(Option<Point>),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Tree(_) => NodeType::Tree,
            NodeKind::Simple(_) => NodeType::Simple,
            NodeKind::Composite(_) => NodeType::Composite,
            NodeKind::Point(_) => NodeType::Point,
        }
    }

    pub fn rect(&self) -> Option<&Rect> {
        match self {
            NodeKind::Tree(r) | NodeKind::Simple(r) | NodeKind::Composite(r) => r.as_ref(),
            NodeKind::Point(_) => None,
        }
    }

    pub fn rect_mut(&mut self) -> Option<&mut Rect> {
        match self {
            NodeKind::Tree(r) | NodeKind::Simple(r) | NodeKind::Composite(r) => r.as_mut(),
            NodeKind::Point(_) => None,
        }
    }

    pub fn point(&self) -> Option<&Point> {
        match self {
            NodeKind::Point(p) => p.as_ref(),
            _ => None,
        }
    }

    pub fn point_mut(&mut self) -> Option<&mut Point> {
        match self {
            NodeKind::Point(p) => p.as_mut(),
            _ => None,
        }
    }

    /// Whether this kind carries geometry of its own.
    pub fn has_geometry(&self) -> bool {
        self.rect().is_some() || self.point().is_some()
    }
}

/// A node of the hierarchy. Children are owned; the hierarchy is a rooted
/// forest and ownership runs strictly top-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a geometry-less node of the given type.
    pub fn new(node_type: NodeType, id: impl Into<String>) -> Self {
        let kind = match node_type {
            NodeType::Tree => NodeKind::Tree(None),
            NodeType::Simple => NodeKind::Simple(None),
            NodeType::Composite => NodeKind::Composite(None),
            NodeType::Point => NodeKind::Point(None),
        };
        Self {
            id: id.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn rect(&self) -> Option<&Rect> {
        self.kind.rect()
    }

    pub fn rect_mut(&mut self) -> Option<&mut Rect> {
        self.kind.rect_mut()
    }

    pub fn point(&self) -> Option<&Point> {
        self.kind.point()
    }

    pub fn point_mut(&mut self) -> Option<&mut Point> {
        self.kind.point_mut()
    }

    /// Assign a rect. No-op on a Point node, which cannot carry extent.
    pub fn set_rect(&mut self, rect: Rect) {
        match &mut self.kind {
            NodeKind::Tree(r) | NodeKind::Simple(r) | NodeKind::Composite(r) => *r = Some(rect),
            NodeKind::Point(_) => {}
        }
    }

    /// Assign a position. No-op on a rect-bearing node.
    pub fn set_point(&mut self, point: Point) {
        if let NodeKind::Point(p) = &mut self.kind {
            *p = Some(point);
        }
    }

    /// Append a child; a Tree or Simple parent becomes Composite. A Point
    /// parent keeps its kind.
    pub fn add_child(&mut self, child: Node) {
        self.kind = match std::mem::replace(&mut self.kind, NodeKind::Composite(None)) {
            NodeKind::Tree(r) | NodeKind::Simple(r) => NodeKind::Composite(r),
            other => other,
        };
        self.children.push(child);
    }

    /// Depth-first pre-order search for a node by ID, starting at self.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        find_node_in(&self.children, id)
    }

    /// Whether this node or any descendant carries geometry.
    pub fn has_geometry(&self) -> bool {
        self.kind.has_geometry() || forest_has_geometry(&self.children)
    }
}

/// Depth-first pre-order search across a forest; first match wins.
pub fn find_node_in<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if let Some(found) = node.find(id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_in_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_in_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn forest_has_geometry(nodes: &[Node]) -> bool {
    nodes.iter().any(Node::has_geometry)
}

/// Whether a forest level has a single geometry-bearing container.
///
/// True iff exactly one node of `nodes` carries geometry of its own. When
/// none does, the rule descends one level: exactly one child forest may
/// satisfy it in turn. Two candidates at the same level disqualify the
/// whole forest.
pub fn toplevel_geometry(nodes: &[Node]) -> bool {
    let mut found = false;
    for node in nodes {
        if node.kind.has_geometry() {
            if found {
                return false;
            }
            found = true;
        }
    }
    if found {
        return true;
    }
    for node in nodes {
        if toplevel_geometry(&node.children) {
            if found {
                return false;
            }
            found = true;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_promotes_simple_to_composite() {
        let mut parent = Node::new(NodeType::Simple, "parent");
        parent.set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        parent.add_child(Node::new(NodeType::Simple, "child"));
        assert_eq!(parent.node_type(), NodeType::Composite);
        assert_eq!(parent.rect(), Some(&Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn add_child_keeps_point_kind() {
        let mut parent = Node::new(NodeType::Point, "pin");
        parent.set_point(Point::new(1.0, 2.0));
        parent.add_child(Node::new(NodeType::Simple, "child"));
        assert_eq!(parent.node_type(), NodeType::Point);
        assert_eq!(parent.point(), Some(&Point::new(1.0, 2.0)));
    }

    #[test]
    fn setters_respect_the_variant() {
        let mut pin = Node::new(NodeType::Point, "pin");
        pin.set_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(pin.rect().is_none());

        let mut simple = Node::new(NodeType::Simple, "simple");
        simple.set_point(Point::new(1.0, 1.0));
        assert!(simple.point().is_none());
    }

    #[test]
    fn find_is_preorder_first_match() {
        let mut root = Node::new(NodeType::Composite, "root");
        let mut a = Node::new(NodeType::Composite, "a");
        a.add_child(Node::new(NodeType::Simple, "x"));
        root.add_child(a);
        root.add_child(Node::new(NodeType::Simple, "b"));
        assert!(find_node_in(std::slice::from_ref(&root), "x").is_some());
        assert!(find_node_in(std::slice::from_ref(&root), "missing").is_none());
    }

    #[test]
    fn toplevel_geometry_requires_a_single_container() {
        let mut outer = Node::new(NodeType::Composite, "outer");
        outer.set_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let plain = Node::new(NodeType::Simple, "plain");
        assert!(toplevel_geometry(&[outer.clone(), plain.clone()]));

        let mut second = Node::new(NodeType::Simple, "second");
        second.set_rect(Rect::new(10.0, 10.0, 5.0, 5.0));
        assert!(!toplevel_geometry(&[outer.clone(), second]));

        // No geometry at this level: the rule descends one level.
        let mut wrapper = Node::new(NodeType::Composite, "wrapper");
        wrapper.add_child(outer);
        assert!(toplevel_geometry(&[wrapper, plain]));
    }
}
