use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::{find_node_in, forest_has_geometry, Node};

/// One diagram tree: a forest of nodes plus the edges connecting them.
/// Edge endpoints must resolve inside this tree.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Depth-first pre-order lookup across the forest.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        find_node_in(&self.nodes, id)
    }

    /// Whether any node or any edge of this tree carries geometry.
    pub fn has_geometry(&self) -> bool {
        forest_has_geometry(&self.nodes) || self.edges.iter().any(Edge::has_geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::NodeType;
    use crate::point::Point;

    #[test]
    fn geometry_on_an_edge_counts() {
        let mut tree = Tree::new();
        tree.add_node(Node::new(NodeType::Simple, "a"));
        tree.add_node(Node::new(NodeType::Simple, "b"));
        assert!(!tree.has_geometry());

        let mut edge = Edge::new("e", "a", "b");
        edge.label_point = Some(Point::new(1.0, 1.0));
        tree.add_edge(edge);
        assert!(tree.has_geometry());
    }
}
