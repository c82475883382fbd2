use diagram_types::{find_node_in, CoordFrame, Document, Node, Point, Rect, Tree};

/// A document's geometry flattened into three buffers. The buffers hold
/// copies; nothing here aliases the document.
///
/// Collected polylines are full point runs: the edge's interior vertices
/// with the synthetic start and end prepended/appended, since a stored
/// polyline carries interior vertices only.
#[derive(Debug, Default)]
pub struct Collections {
    pub points: Vec<Point>,
    pub rects: Vec<Rect>,
    pub polylines: Vec<Vec<Point>>,
}

impl Collections {
    pub fn of_document(doc: &Document) -> Self {
        let mut collections = Self::default();
        for tree in &doc.trees {
            collections.collect_tree(tree);
        }
        collections
    }

    pub fn of_tree(tree: &Tree) -> Self {
        let mut collections = Self::default();
        collections.collect_tree(tree);
        collections
    }

    /// Geometry of a single node's subtree, its own included.
    pub fn of_node(node: &Node) -> Self {
        let mut collections = Self::default();
        collections.collect_node(node);
        collections
    }

    fn collect_tree(&mut self, tree: &Tree) {
        for node in &tree.nodes {
            self.collect_node(node);
        }
        for edge in &tree.edges {
            let source = find_node_in(&tree.nodes, &edge.source_id);
            let target = find_node_in(&tree.nodes, &edge.target_id);
            let (Some(source), Some(target)) = (source, target) else {
                continue;
            };
            if let Some(polyline) = edge.polyline.as_ref().filter(|pl| !pl.is_empty()) {
                let start = edge.source_point.or_else(|| endpoint_fallback(source));
                let end = edge.target_point.or_else(|| endpoint_fallback(target));
                if let (Some(start), Some(end)) = (start, end) {
                    let mut run = Vec::with_capacity(polyline.len() + 2);
                    run.push(start);
                    run.extend(polyline.iter().copied());
                    run.push(end);
                    self.polylines.push(run);
                }
            }
            if let Some(label) = edge.label_point {
                self.points.push(label);
            }
            if let Some(label_rect) = edge.label_rect {
                self.rects.push(label_rect);
            }
        }
    }

    fn collect_node(&mut self, node: &Node) {
        if let Some(point) = node.point() {
            self.points.push(*point);
        }
        if let Some(rect) = node.rect() {
            self.rects.push(*rect);
        }
        for child in &node.children {
            self.collect_node(child);
        }
    }
}

fn endpoint_fallback(node: &Node) -> Option<Point> {
    node.rect()
        .map(|rect| rect.center(CoordFrame::Absolute))
        .or_else(|| node.point().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram_types::{Edge, EdgeAttachment, Frames, NodeType, Polyline};

    fn doc_with_polyline() -> Document {
        let mut doc = Document::new(Frames::new(
            CoordFrame::Absolute,
            CoordFrame::Absolute,
            CoordFrame::Absolute,
            EdgeAttachment::Center,
        ));
        let mut tree = Tree::new();
        let mut a = Node::new(NodeType::Simple, "a");
        a.set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.add_node(a);
        let mut b = Node::new(NodeType::Point, "b");
        b.set_point(Point::new(50.0, 50.0));
        tree.add_node(b);

        let mut edge = Edge::new("e", "a", "b");
        edge.polyline = Some(Polyline::from_points(vec![Point::new(20.0, 0.0)]));
        tree.add_edge(edge);
        doc.add_tree(tree);
        doc
    }

    #[test]
    fn polyline_gains_synthetic_endpoints() {
        let collections = Collections::of_document(&doc_with_polyline());
        assert_eq!(collections.polylines.len(), 1);
        // source rect center, the vertex, target node point
        assert_eq!(
            collections.polylines[0],
            vec![
                Point::new(5.0, 5.0),
                Point::new(20.0, 0.0),
                Point::new(50.0, 50.0)
            ]
        );
    }

    #[test]
    fn unresolved_edges_are_skipped() {
        let mut doc = doc_with_polyline();
        doc.trees[0].edges[0].target_id = "missing".into();
        let collections = Collections::of_document(&doc);
        assert!(collections.polylines.is_empty());
    }

    #[test]
    fn node_geometry_lands_in_the_buffers() {
        let collections = Collections::of_document(&doc_with_polyline());
        assert_eq!(collections.points, vec![Point::new(50.0, 50.0)]);
        assert_eq!(collections.rects, vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
    }
}
