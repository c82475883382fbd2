//! Scenario tests for default-geometry reconstruction.

use diagram_geometry::reconstruct_document_geometry;
use diagram_types::{
    CoordFrame, Document, EdgeAttachment, Frames, Node, NodeType, Point, Rect, Tree,
};

fn absolute_border() -> Frames {
    Frames::new(
        CoordFrame::Absolute,
        CoordFrame::Absolute,
        CoordFrame::Absolute,
        EdgeAttachment::Border,
    )
}

#[test]
fn bare_children_get_defaults_and_the_parent_stays() {
    let mut doc = Document::new(absolute_border());
    let mut tree = Tree::new();
    let mut parent = Node::new(NodeType::Composite, "parent");
    parent.set_rect(Rect::new(0.0, 0.0, 1000.0, 1000.0));
    parent.add_child(Node::new(NodeType::Simple, "first"));
    parent.add_child(Node::new(NodeType::Point, "pin"));
    parent.add_child(Node::new(NodeType::Simple, "second"));
    tree.add_node(parent);
    doc.add_tree(tree);

    reconstruct_document_geometry(&mut doc, false).unwrap();

    let tree = &doc.trees[0];
    assert_eq!(
        tree.find_node("first").unwrap().rect(),
        Some(&Rect::new(10.0, 10.0, 300.0, 200.0))
    );
    // Defaults do not depend on sibling order.
    assert_eq!(
        tree.find_node("second").unwrap().rect(),
        Some(&Rect::new(10.0, 10.0, 300.0, 200.0))
    );
    assert_eq!(
        tree.find_node("pin").unwrap().point(),
        Some(&Point::new(10.0, 10.0))
    );
    // reconstruct_outer was false: the parent rect is untouched.
    assert_eq!(
        tree.find_node("parent").unwrap().rect(),
        Some(&Rect::new(0.0, 0.0, 1000.0, 1000.0))
    );
    assert_eq!(doc.frames, absolute_border());
}

#[test]
fn reconstruction_round_trips_through_the_stored_frames() {
    let left_top = Frames::new(
        CoordFrame::LeftTop,
        CoordFrame::LeftTop,
        CoordFrame::LeftTop,
        EdgeAttachment::Border,
    );
    let mut doc = Document::new(left_top);
    let mut tree = Tree::new();
    let mut parent = Node::new(NodeType::Composite, "parent");
    // Top-level, so left-top relative equals absolute here.
    parent.set_rect(Rect::new(100.0, 100.0, 1000.0, 1000.0));
    parent.add_child(Node::new(NodeType::Simple, "child"));
    tree.add_node(parent);
    doc.add_tree(tree);

    reconstruct_document_geometry(&mut doc, false).unwrap();

    assert_eq!(doc.frames, left_top);
    // Synthesized at the parent's absolute corner, then expressed relative
    // to the parent again.
    assert_eq!(
        doc.trees[0].find_node("child").unwrap().rect(),
        Some(&Rect::new(10.0, 10.0, 300.0, 200.0))
    );
    assert_eq!(
        doc.trees[0].find_node("parent").unwrap().rect(),
        Some(&Rect::new(100.0, 100.0, 1000.0, 1000.0))
    );
}

#[test]
fn outer_reconstruction_wraps_the_children_with_padding() {
    let mut doc = Document::new(absolute_border());
    let mut tree = Tree::new();
    let mut parent = Node::new(NodeType::Composite, "parent");
    let mut child = Node::new(NodeType::Simple, "child");
    child.set_rect(Rect::new(50.0, 50.0, 100.0, 100.0));
    parent.add_child(child);
    tree.add_node(parent);
    doc.add_tree(tree);

    reconstruct_document_geometry(&mut doc, true).unwrap();

    assert_eq!(
        doc.trees[0].find_node("parent").unwrap().rect(),
        Some(&Rect::new(40.0, 40.0, 120.0, 120.0))
    );
    assert_eq!(doc.bounding_rect, Some(Rect::new(40.0, 40.0, 120.0, 120.0)));
}

#[test]
fn reconstruction_requires_trees() {
    let mut doc = Document::new(absolute_border());
    let err = reconstruct_document_geometry(&mut doc, false).unwrap_err();
    assert_eq!(err.code(), 1);
}
