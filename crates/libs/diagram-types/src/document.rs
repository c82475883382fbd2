use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::frames::Frames;
use crate::node::{toplevel_geometry, Node};
use crate::rect::Rect;
use crate::tree::Tree;

/// A whole diagram document: the trees, the cached bounding rect and the
/// coordinate conventions the stored geometry currently follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub frames: Frames,
    #[serde(default)]
    pub trees: Vec<Tree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<Rect>,
}

impl Document {
    pub fn new(frames: Frames) -> Self {
        Self {
            frames,
            trees: Vec::new(),
            bounding_rect: None,
        }
    }

    pub fn add_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    pub fn has_geometry(&self) -> bool {
        self.trees.iter().any(Tree::has_geometry)
    }

    /// Whether exactly one tree provides a single top-level container node.
    /// Ties between trees disable the outer-parent rule.
    pub fn has_single_outer(&self) -> bool {
        let mut found = false;
        for tree in &self.trees {
            if !tree.nodes.is_empty() && toplevel_geometry(&tree.nodes) {
                if found {
                    return false;
                }
                found = true;
            }
        }
        found
    }
}

// Debug dump. The format is not part of any contract.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "document [node={:?} edge={:?} polyline={:?} attachment={:?}]",
            self.frames.node, self.frames.edge, self.frames.edge_polyline, self.frames.attachment
        )?;
        if let Some(bounding) = &self.bounding_rect {
            writeln!(f, "bounding rect {bounding}")?;
        }
        for (index, tree) in self.trees.iter().enumerate() {
            writeln!(f, "tree #{index}")?;
            for node in &tree.nodes {
                fmt_node(f, node, 1)?;
            }
            for edge in &tree.edges {
                fmt_edge(f, edge)?;
            }
        }
        Ok(())
    }
}

fn fmt_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    write!(f, "{:indent$}{:?} \"{}\"", "", node.node_type(), node.id, indent = depth * 2)?;
    if let Some(rect) = node.rect() {
        write!(f, " rect {rect}")?;
    }
    if let Some(point) = node.point() {
        write!(f, " point {point}")?;
    }
    writeln!(f)?;
    for child in &node.children {
        fmt_node(f, child, depth + 1)?;
    }
    Ok(())
}

fn fmt_edge(f: &mut fmt::Formatter<'_>, edge: &Edge) -> fmt::Result {
    write!(f, "  edge \"{}\" {} -> {}", edge.id, edge.source_id, edge.target_id)?;
    if let Some(point) = &edge.source_point {
        write!(f, " source {point}")?;
    }
    if let Some(point) = &edge.target_point {
        write!(f, " target {point}")?;
    }
    if let Some(point) = &edge.label_point {
        write!(f, " label {point}")?;
    }
    if let Some(rect) = &edge.label_rect {
        write!(f, " label rect {rect}")?;
    }
    if let Some(polyline) = &edge.polyline {
        write!(f, " polyline [")?;
        for (i, vertex) in polyline.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{vertex}")?;
        }
        write!(f, "]")?;
    }
    writeln!(f)
}
