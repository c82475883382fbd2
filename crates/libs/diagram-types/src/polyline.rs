use delegate::delegate;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// The interior vertices of an edge, in drawing order. The edge's own
/// endpoints are not stored here; an empty polyline is a straight segment
/// from source to target.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self(points)
    }

    delegate! {
        to self.0 {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn first(&self) -> Option<&Point>;
            pub fn last(&self) -> Option<&Point>;
            pub fn push(&mut self, point: Point);
            pub fn clear(&mut self);
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Point> {
        self.0.iter_mut()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.0 {
            point.translate(dx, dy);
        }
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut pl = Polyline::new();
        pl.push(Point::new(1.0, 1.0));
        pl.push(Point::new(2.0, 2.0));
        assert_eq!(pl.len(), 2);
        assert_eq!(pl.first(), Some(&Point::new(1.0, 1.0)));
        assert_eq!(pl.last(), Some(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn translate_moves_every_vertex() {
        let mut pl: Polyline = [Point::new(0.0, 0.0), Point::new(5.0, 5.0)]
            .into_iter()
            .collect();
        pl.translate(1.0, -1.0);
        assert_eq!(pl.points(), &[Point::new(1.0, -1.0), Point::new(6.0, 4.0)]);
    }
}
