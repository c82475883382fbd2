use serde::{Deserialize, Serialize};

/// Coordinate format of a geometry group. Discriminants are preserved for
/// storage compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordFrame {
    /// No geometry information.
    None = 0,
    /// Coordinates in the document's root system.
    Absolute = 1,
    /// Offsets from the parent's top-left corner.
    LeftTop = 2,
    /// Offsets from the parent's geometric center; a rect's own origin is
    /// its center.
    LocalCenter = 4,
}

impl CoordFrame {
    /// True for the frames that actually shift coordinates.
    pub fn is_relative(self) -> bool {
        matches!(self, CoordFrame::LeftTop | CoordFrame::LocalCenter)
    }
}

/// Where an edge visually terminates on its endpoint nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAttachment {
    None = 0,
    /// Endpoints bind to the nodes' centers.
    Center = 1,
    /// Endpoints are placed on the nodes' rectangle borders.
    Border = 2,
}

/// Discriminant of a node variant, kept as a standalone enum for storage
/// compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Tree = 0,
    Simple = 1,
    Composite = 2,
    Point = 4,
}

/// The document's coordinate conventions: one frame per geometry group plus
/// the edge attachment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frames {
    pub node: CoordFrame,
    pub edge: CoordFrame,
    pub edge_polyline: CoordFrame,
    pub attachment: EdgeAttachment,
}

impl Frames {
    /// The frame state every conversion passes through.
    pub const ABSOLUTE: Frames = Frames {
        node: CoordFrame::Absolute,
        edge: CoordFrame::Absolute,
        edge_polyline: CoordFrame::Absolute,
        attachment: EdgeAttachment::Border,
    };

    pub const fn new(
        node: CoordFrame,
        edge: CoordFrame,
        edge_polyline: CoordFrame,
        attachment: EdgeAttachment,
    ) -> Self {
        Self {
            node,
            edge,
            edge_polyline,
            attachment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_stable() {
        assert_eq!(CoordFrame::None as u8, 0);
        assert_eq!(CoordFrame::Absolute as u8, 1);
        assert_eq!(CoordFrame::LeftTop as u8, 2);
        assert_eq!(CoordFrame::LocalCenter as u8, 4);
        assert_eq!(EdgeAttachment::Border as u8, 2);
        assert_eq!(NodeType::Point as u8, 4);
    }

    #[test]
    fn only_left_top_and_local_center_are_relative() {
        assert!(!CoordFrame::None.is_relative());
        assert!(!CoordFrame::Absolute.is_relative());
        assert!(CoordFrame::LeftTop.is_relative());
        assert!(CoordFrame::LocalCenter.is_relative());
    }
}
