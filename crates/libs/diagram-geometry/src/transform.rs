//! The coordinate-frame transformation pipeline.
//!
//! Every conversion funnels through the absolute frame: geometry is first
//! lifted to absolute coordinates (nodes, then edges), the bounding rect is
//! recomputed, and the document is then lowered into the requested frames
//! (edges before nodes, since the edge pass reads its source node's absolute
//! geometry).

use log::debug;

use diagram_types::{
    find_node_in, CoordFrame, Document, EdgeAttachment, Frames, Node, Point, Rect, Tree,
};

use crate::attach;
use crate::bounding;
use crate::collect::Collections;
use crate::error::{Error, Result};

/// The geometry a relative coordinate resolves against: its parent's rect
/// when the parent has one, the parent's point otherwise.
#[derive(Clone, Copy)]
pub(crate) enum Anchor<'a> {
    Rect(&'a Rect),
    Point(&'a Point),
}

impl<'a> Anchor<'a> {
    pub(crate) fn of_node(node: &'a Node) -> Option<Self> {
        node.rect()
            .map(Anchor::Rect)
            .or_else(|| node.point().map(Anchor::Point))
    }

    fn center(&self) -> Point {
        match self {
            Anchor::Rect(rect) => rect.center(CoordFrame::Absolute),
            Anchor::Point(point) => **point,
        }
    }
}

/// Resolve an edge endpoint to a node that carries geometry of its own.
fn resolve_endpoint<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    find_node_in(nodes, id).filter(|node| node.kind.has_geometry())
}

pub(crate) fn point_to_absolute(point: &mut Point, anchor: Anchor<'_>, frame: CoordFrame) {
    if !frame.is_relative() {
        return;
    }
    match anchor {
        Anchor::Point(parent) => point.translate(parent.x, parent.y),
        Anchor::Rect(parent) => {
            if frame == CoordFrame::LeftTop {
                point.translate(parent.x, parent.y);
            } else {
                point.translate(
                    parent.x + parent.width / 2.0,
                    parent.y + parent.height / 2.0,
                );
            }
        }
    }
}

pub(crate) fn rect_to_absolute(rect: &mut Rect, anchor: Anchor<'_>, frame: CoordFrame) {
    if !frame.is_relative() {
        return;
    }
    match anchor {
        Anchor::Point(parent) => rect.translate(parent.x, parent.y),
        Anchor::Rect(parent) => {
            if frame == CoordFrame::LeftTop {
                rect.translate(parent.x, parent.y);
            } else {
                // The child's own (x, y) is its center in this frame.
                rect.translate(
                    parent.x + parent.width / 2.0 - rect.width / 2.0,
                    parent.y + parent.height / 2.0 - rect.height / 2.0,
                );
            }
        }
    }
}

pub(crate) fn point_to_frame(point: &mut Point, anchor: Anchor<'_>, frame: CoordFrame) {
    if !frame.is_relative() {
        return;
    }
    match anchor {
        Anchor::Point(parent) => point.translate(-parent.x, -parent.y),
        Anchor::Rect(parent) => {
            if frame == CoordFrame::LeftTop {
                point.translate(-parent.x, -parent.y);
            } else {
                point.translate(
                    -(parent.x + parent.width / 2.0),
                    -(parent.y + parent.height / 2.0),
                );
            }
        }
    }
    point.snap_small();
}

pub(crate) fn rect_to_frame(rect: &mut Rect, anchor: Anchor<'_>, frame: CoordFrame) {
    if !frame.is_relative() {
        return;
    }
    match anchor {
        Anchor::Point(parent) => rect.translate(-parent.x, -parent.y),
        Anchor::Rect(parent) => {
            if frame == CoordFrame::LeftTop {
                rect.translate(-parent.x, -parent.y);
            } else {
                rect.translate(
                    -(parent.x + parent.width / 2.0 - rect.width / 2.0),
                    -(parent.y + parent.height / 2.0 - rect.height / 2.0),
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Node pass
// ---------------------------------------------------------------------------

fn forest_to_absolute(nodes: &mut [Node], parent: &Rect, frame: CoordFrame) {
    for node in nodes {
        if let Some(point) = node.point_mut() {
            point_to_absolute(point, Anchor::Rect(parent), frame);
        }
        if let Some(rect) = node.rect_mut() {
            rect_to_absolute(rect, Anchor::Rect(parent), frame);
        }
        // Children resolve against this node's now-absolute rect, or inherit
        // the current parent when the node has none.
        let next_parent = node.rect().copied().unwrap_or(*parent);
        forest_to_absolute(&mut node.children, &next_parent, frame);
    }
}

fn nodes_to_absolute(doc: &mut Document) {
    if doc.frames.node == CoordFrame::Absolute
        && doc.frames.edge == CoordFrame::Absolute
        && doc.frames.edge_polyline == CoordFrame::Absolute
    {
        return;
    }

    let mut outer = Rect::default();
    if doc.frames.node == CoordFrame::LocalCenter && !doc.has_single_outer() {
        // No single top-level container: the document's bounding rect acts
        // as the implicit outer parent, itself lifted to absolute first.
        if let Some(bounding) = doc.bounding_rect.as_mut() {
            rect_to_absolute(bounding, Anchor::Rect(&Rect::default()), CoordFrame::LocalCenter);
            outer = *bounding;
        }
    }

    let frame = doc.frames.node;
    for tree in &mut doc.trees {
        forest_to_absolute(&mut tree.nodes, &outer, frame);
    }
}

fn forest_to_frame(nodes: &mut [Node], parent: &Rect, frame: CoordFrame) {
    for node in nodes {
        // Children first: they resolve against this node's still-absolute
        // rect.
        let next_parent = node.rect().copied().unwrap_or(*parent);
        forest_to_frame(&mut node.children, &next_parent, frame);

        if let Some(point) = node.point_mut() {
            point_to_frame(point, Anchor::Rect(parent), frame);
        }
        if let Some(rect) = node.rect_mut() {
            rect_to_frame(rect, Anchor::Rect(parent), frame);
        }
    }
}

fn nodes_to_frame(doc: &mut Document, frame: CoordFrame) {
    if doc.frames.node == frame {
        return;
    }

    let mut outer = Rect::default();
    if frame == CoordFrame::LocalCenter && !doc.has_single_outer() {
        if let Some(bounding) = doc.bounding_rect {
            outer = bounding;
        }
    }

    for tree in &mut doc.trees {
        forest_to_frame(&mut tree.nodes, &outer, frame);
    }
}

// ---------------------------------------------------------------------------
// Edge pass, to absolute: endpoints & vertices, border attachment, labels
// ---------------------------------------------------------------------------

fn edges_to_absolute_points(doc: &mut Document) {
    if doc.frames.edge == CoordFrame::Absolute
        && doc.frames.edge_polyline == CoordFrame::Absolute
    {
        return;
    }
    let edge_frame = doc.frames.edge;
    let polyline_frame = doc.frames.edge_polyline;

    for tree in &mut doc.trees {
        let Tree { nodes, edges } = tree;
        for edge in edges.iter_mut() {
            let source = resolve_endpoint(nodes, &edge.source_id).and_then(Anchor::of_node);
            let target = resolve_endpoint(nodes, &edge.target_id).and_then(Anchor::of_node);
            let (Some(source), Some(target)) = (source, target) else {
                // An edge with a geometry-less end keeps no geometry of its
                // own.
                edge.clear_geometry();
                continue;
            };
            if let Some(point) = edge.source_point.as_mut() {
                point_to_absolute(point, source, edge_frame);
            }
            if let Some(point) = edge.target_point.as_mut() {
                point_to_absolute(point, target, edge_frame);
            }
            if let Some(polyline) = edge.polyline.as_mut() {
                for vertex in polyline.iter_mut() {
                    point_to_absolute(vertex, source, polyline_frame);
                }
            }
        }
    }
}

fn edges_to_absolute_borders(doc: &mut Document) {
    for tree in &mut doc.trees {
        let Tree { nodes, edges } = tree;
        for edge in edges.iter_mut() {
            let source = resolve_endpoint(nodes, &edge.source_id);
            let target = resolve_endpoint(nodes, &edge.target_id);
            let (Some(source), Some(target)) = (source, target) else {
                continue;
            };
            let (Some(source_anchor), Some(target_anchor)) =
                (Anchor::of_node(source), Anchor::of_node(target))
            else {
                continue;
            };

            let from = *edge
                .source_point
                .get_or_insert_with(|| source_anchor.center());
            let to = *edge
                .target_point
                .get_or_insert_with(|| target_anchor.center());

            // The segments that actually leave/enter the nodes: up to the
            // first polyline vertex, and from the last one.
            let (leave_end, enter_start) = match edge
                .polyline
                .as_ref()
                .and_then(|pl| pl.first().copied().zip(pl.last().copied()))
            {
                Some((first, last)) => (first, last),
                None => (to, from),
            };

            if let Some(rect) = source.rect() {
                if let Some(hit) = attach::segment_rect_intersections(from, leave_end, rect).first()
                {
                    edge.source_point = Some(*hit);
                }
            }
            if let Some(rect) = target.rect() {
                if let Some(hit) = attach::segment_rect_intersections(enter_start, to, rect).first()
                {
                    edge.target_point = Some(*hit);
                }
            }
        }
    }
}

fn edges_to_absolute_labels(doc: &mut Document) {
    let prior = doc.frames;
    // Label placement compatibility: documents in this exact frame
    // combination anchor edge labels to the edge's own source point rather
    // than the source node.
    let label_anchors_to_source_point = prior.node == CoordFrame::Absolute
        && prior.edge == CoordFrame::LocalCenter
        && prior.edge_polyline == CoordFrame::Absolute
        && prior.attachment == EdgeAttachment::Center;

    for tree in &mut doc.trees {
        let Tree { nodes, edges } = tree;
        for edge in edges.iter_mut() {
            let source = resolve_endpoint(nodes, &edge.source_id).and_then(Anchor::of_node);
            let target = resolve_endpoint(nodes, &edge.target_id).and_then(Anchor::of_node);
            let (Some(source), Some(_)) = (source, target) else {
                continue;
            };
            let source_point = edge.source_point;
            if let Some(label) = edge.label_point.as_mut() {
                if label_anchors_to_source_point {
                    if let Some(anchor) = source_point.as_ref() {
                        point_to_absolute(label, Anchor::Point(anchor), prior.edge);
                    }
                } else {
                    point_to_absolute(label, source, prior.edge);
                }
            }
            if let Some(label_rect) = edge.label_rect.as_mut() {
                rect_to_absolute(label_rect, source, prior.edge);
            }
        }
    }
}

fn edges_to_absolute(doc: &mut Document) {
    if doc.frames.edge != CoordFrame::Absolute
        || doc.frames.edge_polyline != CoordFrame::Absolute
    {
        edges_to_absolute_points(doc);
    }
    if doc.frames.attachment != EdgeAttachment::Border {
        edges_to_absolute_borders(doc);
    }
    edges_to_absolute_labels(doc);
}

// ---------------------------------------------------------------------------
// Edge pass, absolute to frame: labels first, then endpoints & vertices
// ---------------------------------------------------------------------------

fn edges_to_frame_labels(doc: &mut Document, target: Frames) {
    // Counterpart of the label compatibility rule above. On the way down it
    // keys on the target edge frames only; the node frame is not consulted.
    let label_anchors_to_source_point = target.edge == CoordFrame::LocalCenter
        && target.edge_polyline == CoordFrame::Absolute
        && target.attachment == EdgeAttachment::Center;

    for tree in &mut doc.trees {
        let Tree { nodes, edges } = tree;
        for edge in edges.iter_mut() {
            let source = resolve_endpoint(nodes, &edge.source_id).and_then(Anchor::of_node);
            let target_node = resolve_endpoint(nodes, &edge.target_id).and_then(Anchor::of_node);
            let (Some(source), Some(_)) = (source, target_node) else {
                continue;
            };
            let source_point = edge.source_point;
            if let Some(label) = edge.label_point.as_mut() {
                if label_anchors_to_source_point {
                    // The source point is still absolute here; endpoints are
                    // lowered after the labels.
                    if let Some(anchor) = source_point.as_ref() {
                        point_to_frame(label, Anchor::Point(anchor), target.edge);
                    }
                } else {
                    point_to_frame(label, source, target.edge);
                }
            }
            if let Some(label_rect) = edge.label_rect.as_mut() {
                rect_to_frame(label_rect, source, target.edge);
            }
        }
    }
}

fn edges_to_frame_points(doc: &mut Document, target: Frames) {
    for tree in &mut doc.trees {
        let Tree { nodes, edges } = tree;
        for edge in edges.iter_mut() {
            let source = resolve_endpoint(nodes, &edge.source_id).and_then(Anchor::of_node);
            let target_anchor = resolve_endpoint(nodes, &edge.target_id).and_then(Anchor::of_node);
            let (Some(source), Some(target_anchor)) = (source, target_anchor) else {
                continue;
            };
            if let Some(point) = edge.source_point.as_mut() {
                point_to_frame(point, source, target.edge);
            }
            if let Some(point) = edge.target_point.as_mut() {
                point_to_frame(point, target_anchor, target.edge);
            }
            if let Some(polyline) = edge.polyline.as_mut() {
                for vertex in polyline.iter_mut() {
                    point_to_frame(vertex, source, target.edge_polyline);
                }
            }
        }
    }
}

fn edges_to_frame(doc: &mut Document, target: Frames) {
    if doc.frames.edge == target.edge
        && doc.frames.edge_polyline == target.edge_polyline
        && doc.frames.attachment == target.attachment
    {
        return;
    }
    edges_to_frame_labels(doc, target);
    edges_to_frame_points(doc, target);
}

// ---------------------------------------------------------------------------
// Document-level conversion
// ---------------------------------------------------------------------------

pub(crate) fn document_to_absolute(doc: &mut Document) {
    debug!("lifting document to absolute from {:?}", doc.frames);
    nodes_to_absolute(doc);
    edges_to_absolute(doc);
    doc.frames = Frames::ABSOLUTE;
}

pub(crate) fn document_to_frame(doc: &mut Document, target: Frames) -> Result<()> {
    if doc.bounding_rect.is_none() {
        return Err(Error::BadParameter("document has no bounding rect"));
    }
    debug!("lowering document from absolute to {target:?}");
    edges_to_frame(doc, target);
    nodes_to_frame(doc, target.node);
    if let Some(bounding) = doc.bounding_rect.as_mut() {
        rect_to_frame(bounding, Anchor::Rect(&Rect::default()), target.node);
    }
    doc.frames = target;
    Ok(())
}

/// Rewrite the whole document into the requested coordinate conventions.
///
/// The document is lifted to the absolute frame, its bounding rect is
/// discarded and recomputed, and everything is lowered into `target`. On
/// success the document's frame fields equal `target`. Converting into the
/// `None` frame is rejected before any mutation.
pub fn convert_document_geometry(doc: &mut Document, target: Frames) -> Result<()> {
    if target.node == CoordFrame::None
        || target.edge == CoordFrame::None
        || target.edge_polyline == CoordFrame::None
    {
        return Err(Error::BadParameter("cannot convert into the None frame"));
    }

    document_to_absolute(doc);

    doc.bounding_rect = None;
    let mut collections = Collections::of_document(doc);
    doc.bounding_rect = Some(bounding::bounding_rect(&mut collections));

    document_to_frame(doc, target)
}
