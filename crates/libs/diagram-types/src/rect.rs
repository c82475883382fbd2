use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

use crate::frames::CoordFrame;
use crate::point::{round_half_away, Point};

/// An axis-aligned rectangle with its origin at the top-left corner.
/// Width and height are never negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, From, Into, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// A rect is empty when all four fields are exactly zero.
    pub fn is_empty(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.width == 0.0 && self.height == 0.0
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The geometric center as expressed in `frame`. A rect stored in the
    /// `LocalCenter` frame carries its center in `(x, y)` already.
    pub fn center(&self, frame: CoordFrame) -> Point {
        if frame == CoordFrame::LocalCenter {
            Point::new(self.x, self.y)
        } else {
            Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
        }
    }

    /// The four border segments, in a fixed order: left, bottom (y + height),
    /// right, top (y).
    pub fn sides(&self) -> [(Point, Point); 4] {
        let (x1, y1) = (self.x, self.y);
        let (x2, y2) = (self.x + self.width, self.y + self.height);
        [
            (Point::new(x1, y1), Point::new(x1, y2)),
            (Point::new(x1, y2), Point::new(x2, y2)),
            (Point::new(x2, y2), Point::new(x2, y1)),
            (Point::new(x2, y1), Point::new(x1, y1)),
        ]
    }

    /// Round all four fields to `digits` decimal digits, half away from zero.
    pub fn round(&mut self, digits: u32) {
        self.x = round_half_away(self.x, digits);
        self.y = round_half_away(self.y, digits);
        self.width = round_half_away(self.width, digits);
        self.height = round_half_away(self.height, digits);
    }

    pub fn almost_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}
