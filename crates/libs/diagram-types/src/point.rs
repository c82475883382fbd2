use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

/// Default tolerance for approximate comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Residue smaller than this (and not exactly zero) collapses to zero after
/// an inverse frame transform.
pub const SNAP_EPSILON: f64 = 1e-6;

/// A 2D point, y growing downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, From, Into, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Round both coordinates to `digits` decimal digits,
    /// half away from zero.
    pub fn round(&mut self, digits: u32) {
        self.x = round_half_away(self.x, digits);
        self.y = round_half_away(self.y, digits);
    }

    /// Collapse sub-epsilon residue left behind by inverse transforms.
    pub fn snap_small(&mut self) {
        self.x = snap_small(self.x);
        self.y = snap_small(self.y);
    }

    pub fn almost_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub(crate) fn round_half_away(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5).floor()
    } else {
        (scaled - 0.5).ceil()
    };
    rounded / factor
}

pub(crate) fn snap_small(value: f64) -> f64 {
    if value != 0.0 && value.abs() < SNAP_EPSILON {
        0.0
    } else {
        value
    }
}
