//! Default-geometry synthesis for documents whose nodes arrived bare.

use log::debug;

use diagram_types::{Document, Node, NodeKind, Point, Rect};

use crate::bounding;
use crate::collect::Collections;
use crate::error::{Error, Result};
use crate::transform::{document_to_absolute, document_to_frame};

/// Gap kept between a parent's corner and a synthesized child.
pub const PADDING: f64 = 10.0;
/// Extent of a synthesized rect node.
pub const NODE_WIDTH: f64 = 300.0;
pub const NODE_HEIGHT: f64 = 200.0;

/// Fill in defaults below `parent`, then optionally rebuild the parent's
/// own rect from its subtree.
///
/// Children lacking geometry are parked at the parent's padded corner; the
/// layout of siblings is not this engine's concern. Inner composites are
/// always rebuilt; `rebuild_parent` controls only the node this call starts
/// from.
fn reconstruct_node(parent: &mut Node, rebuild_parent: bool) {
    let corner = parent
        .rect()
        .map(|rect| rect.top_left())
        .unwrap_or_default();

    for child in &mut parent.children {
        match &mut child.kind {
            NodeKind::Point(point) => {
                if point.is_none() {
                    *point = Some(Point::new(corner.x + PADDING, corner.y + PADDING));
                }
            }
            NodeKind::Tree(rect) | NodeKind::Simple(rect) | NodeKind::Composite(rect) => {
                if rect.is_none() {
                    *rect = Some(Rect::new(
                        corner.x + PADDING,
                        corner.y + PADDING,
                        NODE_WIDTH,
                        NODE_HEIGHT,
                    ));
                }
            }
        }
        if !child.children.is_empty() {
            reconstruct_node(child, true);
        }
    }

    // A Point parent cannot hold a rect; nothing to rebuild there.
    if rebuild_parent && !matches!(parent.kind, NodeKind::Point(_)) {
        let had_rect = parent.rect().is_some();
        let mut collections = Collections::of_node(parent);
        let mut enclosure = bounding::bounding_rect(&mut collections);
        if !had_rect {
            enclosure.x -= PADDING;
            enclosure.y -= PADDING;
            enclosure.width += 2.0 * PADDING;
            enclosure.height += 2.0 * PADDING;
        }
        parent.set_rect(enclosure);
    }
}

/// Synthesize missing node geometry across the whole document.
///
/// Works in the absolute frame: the document is lifted there, every tree's
/// root forest is reconstructed, the bounding rect is rebuilt, and the
/// document returns to the frames it arrived in. `reconstruct_outer`
/// controls whether the top-level nodes' own rects are recomputed from
/// their children.
pub fn reconstruct_document_geometry(doc: &mut Document, reconstruct_outer: bool) -> Result<()> {
    if doc.trees.is_empty() {
        return Err(Error::BadParameter("document has no trees"));
    }

    let frames = doc.frames;
    debug!("reconstructing geometry (outer: {reconstruct_outer}), frames {frames:?}");
    document_to_absolute(doc);

    for tree in &mut doc.trees {
        for root in &mut tree.nodes {
            reconstruct_node(root, reconstruct_outer);
        }
    }

    doc.bounding_rect = None;
    let mut collections = Collections::of_document(doc);
    doc.bounding_rect = Some(bounding::bounding_rect(&mut collections));

    document_to_frame(doc, frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram_types::NodeType;

    #[test]
    fn bare_children_get_padded_defaults() {
        let mut parent = Node::new(NodeType::Composite, "parent");
        parent.set_rect(Rect::new(100.0, 50.0, 1000.0, 1000.0));
        parent.add_child(Node::new(NodeType::Simple, "a"));
        parent.add_child(Node::new(NodeType::Point, "p"));

        reconstruct_node(&mut parent, false);

        let a = parent.find("a").unwrap();
        assert_eq!(a.rect(), Some(&Rect::new(110.0, 60.0, 300.0, 200.0)));
        let p = parent.find("p").unwrap();
        assert_eq!(p.point(), Some(&Point::new(110.0, 60.0)));
        // rebuild was not requested
        assert_eq!(parent.rect(), Some(&Rect::new(100.0, 50.0, 1000.0, 1000.0)));
    }

    #[test]
    fn synthesized_parent_is_inflated() {
        let mut parent = Node::new(NodeType::Composite, "parent");
        let mut child = Node::new(NodeType::Simple, "child");
        child.set_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        parent.add_child(child);

        reconstruct_node(&mut parent, true);

        assert_eq!(
            parent.rect(),
            Some(&Rect::new(-10.0, -10.0, 120.0, 120.0))
        );
    }

    #[test]
    fn existing_parent_rect_joins_the_enclosure() {
        let mut parent = Node::new(NodeType::Composite, "parent");
        parent.set_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        let mut child = Node::new(NodeType::Simple, "child");
        child.set_rect(Rect::new(40.0, 40.0, 100.0, 100.0));
        parent.add_child(child);

        reconstruct_node(&mut parent, true);

        // Union of the old parent rect and the child, no inflation.
        assert_eq!(parent.rect(), Some(&Rect::new(0.0, 0.0, 140.0, 140.0)));
    }
}
