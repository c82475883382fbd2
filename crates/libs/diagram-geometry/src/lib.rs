//! Geometry engine for hierarchical diagram documents.
//!
//! Diagram formats disagree on coordinate conventions: node geometry may be
//! absolute, relative to the parent's top-left corner or relative to the
//! parent's center, and edges may terminate at node centers or on node
//! borders. This crate rewrites a [`diagram_types::Document`] from any of
//! those conventions into any other while preserving what the diagram looks
//! like, recomputes bounding rects, and synthesizes defaults for nodes that
//! arrived without geometry.
//!
//! The library mutates documents in place and performs no I/O; loading and
//! saving documents is the caller's business. The `diagram-convert` binary
//! in this crate is a thin host around the library for serde_json-encoded
//! documents.

pub mod attach;
pub mod bounding;
pub mod collect;
pub mod error;
pub mod reconstruct;
pub mod transform;

pub use error::{Error, Result};
pub use reconstruct::reconstruct_document_geometry;
pub use transform::convert_document_geometry;

use diagram_types::{find_node_in, Document, Rect};

use collect::Collections;

/// Compute the axis-aligned enclosure of every point, rect and polyline in
/// the document. The document itself is not touched; storing the result in
/// `bounding_rect` is the caller's decision.
pub fn build_bounding_rect(doc: &Document) -> Result<Rect> {
    if doc.trees.is_empty() {
        return Err(Error::BadParameter("document has no trees"));
    }
    let mut collections = Collections::of_document(doc);
    Ok(bounding::bounding_rect(&mut collections))
}

/// Deep-copy a document, verifying that every edge still resolves inside
/// the copied forest. A dangling endpoint discards the whole copy.
pub fn copy_document(doc: &Document) -> Result<Document> {
    let copy = doc.clone();
    for tree in &copy.trees {
        for edge in &tree.edges {
            for id in [&edge.source_id, &edge.target_id] {
                if find_node_in(&tree.nodes, id).is_none() {
                    return Err(Error::NotFound(id.clone()));
                }
            }
        }
    }
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram_types::{
        CoordFrame, Edge, EdgeAttachment, Frames, Node, NodeType, Tree,
    };

    fn two_node_doc() -> Document {
        let mut doc = Document::new(Frames::new(
            CoordFrame::Absolute,
            CoordFrame::Absolute,
            CoordFrame::Absolute,
            EdgeAttachment::Border,
        ));
        let mut tree = Tree::new();
        let mut a = Node::new(NodeType::Simple, "a");
        a.set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.add_node(a);
        let mut b = Node::new(NodeType::Simple, "b");
        b.set_rect(Rect::new(20.0, 0.0, 10.0, 10.0));
        tree.add_node(b);
        tree.add_edge(Edge::new("e", "a", "b"));
        doc.add_tree(tree);
        doc
    }

    #[test]
    fn copy_succeeds_when_edges_resolve() {
        let doc = two_node_doc();
        let copy = copy_document(&doc).unwrap();
        assert_eq!(copy, doc);
    }

    #[test]
    fn copy_fails_on_dangling_edge() {
        let mut doc = two_node_doc();
        doc.trees[0].edges[0].target_id = "ghost".into();
        let err = copy_document(&doc).unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn bounding_requires_trees() {
        let doc = Document::new(Frames::ABSOLUTE);
        assert!(build_bounding_rect(&doc).is_err());
    }
}
