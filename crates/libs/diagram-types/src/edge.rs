use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::polyline::Polyline;
use crate::rect::Rect;

/// A connection between two nodes of the same tree, referenced by ID.
/// All geometry is optional; a missing polyline (or an empty one) means a
/// straight segment between the endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_rect: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<Polyline>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            source_point: None,
            target_point: None,
            label_point: None,
            label_rect: None,
            polyline: None,
        }
    }

    pub fn set_endpoints(&mut self, source_x: f64, source_y: f64, target_x: f64, target_y: f64) {
        self.source_point = Some(Point::new(source_x, source_y));
        self.target_point = Some(Point::new(target_x, target_y));
    }

    pub fn has_geometry(&self) -> bool {
        self.source_point.is_some()
            || self.target_point.is_some()
            || self.label_point.is_some()
            || self.label_rect.is_some()
            || self.polyline.is_some()
    }

    /// Drop every optional geometry field. The edge itself survives.
    pub fn clear_geometry(&mut self) {
        self.source_point = None;
        self.target_point = None;
        self.label_point = None;
        self.label_rect = None;
        self.polyline = None;
    }

    /// The interior vertices, if any; an empty polyline counts as absent.
    pub fn vertices(&self) -> &[Point] {
        self.polyline.as_ref().map(Polyline::points).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_geometry_keeps_identity() {
        let mut edge = Edge::new("e", "a", "b");
        edge.set_endpoints(0.0, 0.0, 10.0, 10.0);
        edge.label_point = Some(Point::new(5.0, 5.0));
        edge.polyline = Some(Polyline::from_points(vec![Point::new(5.0, 0.0)]));
        assert!(edge.has_geometry());

        edge.clear_geometry();
        assert!(!edge.has_geometry());
        assert_eq!(edge.source_id, "a");
        assert_eq!(edge.target_id, "b");
    }
}
