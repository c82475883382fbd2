use diagram_types::{Point, Rect};

const TOLERANCE: f64 = 1e-9;

/// Crossing points of the finite segment `[a, b]` with `rect`'s border.
///
/// The rect's sides are tried in the fixed order of [`Rect::sides`]; the
/// consumer takes the first hit. Near-duplicate hits (a segment through a
/// corner meets two sides) are collapsed. Degenerate inputs (zero-length
/// segments, segments collinear with a side, segments entirely inside or
/// outside) yield an empty list, never an error.
pub fn segment_rect_intersections(a: Point, b: Point, rect: &Rect) -> Vec<Point> {
    let mut hits: Vec<Point> = Vec::new();
    for (p, q) in rect.sides() {
        if let Some(hit) = segment_intersect(a, b, p, q) {
            if !hits.iter().any(|prev| prev.almost_eq(&hit, TOLERANCE)) {
                hits.push(hit);
            }
        }
    }
    hits
}

/// Intersection of finite segments `[a, b]` and `[e, f]`, or `None` when
/// they are parallel, non-crossing or numerically unusable.
fn segment_intersect(a: Point, b: Point, e: Point, f: Point) -> Option<Point> {
    // Line coefficients: a1*x + b1*y + c1 = 0 through a and b.
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = b.x * a.y - a.x * b.y;

    let a2 = f.y - e.y;
    let b2 = e.x - f.x;
    let c2 = f.x * e.y - e.x * f.y;

    let denom = a1 * b2 - a2 * b1;
    if denom.abs() < TOLERANCE {
        return None;
    }

    let x = (b1 * c2 - b2 * c1) / denom;
    let y = (a2 * c1 - a1 * c2) / denom;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    if !in_range(x, a.x, b.x) || !in_range(y, a.y, b.y) {
        return None;
    }
    if !in_range(x, e.x, f.x) || !in_range(y, e.y, f.y) {
        return None;
    }

    Some(Point { x, y })
}

/// Whether `val` lies between `a` and `b`, inclusive within tolerance.
fn in_range(val: f64, a: f64, b: f64) -> bool {
    let (min_val, max_val) = if a < b { (a, b) } else { (b, a) };
    val >= min_val - TOLERANCE && val <= max_val + TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn center_to_outside_crosses_one_side() {
        let hits = segment_rect_intersections(Point::new(50.0, 50.0), Point::new(250.0, 50.0), &RECT);
        assert_eq!(hits, vec![Point::new(100.0, 50.0)]);
    }

    #[test]
    fn through_segment_crosses_two_sides() {
        let hits =
            segment_rect_intersections(Point::new(-50.0, 50.0), Point::new(150.0, 50.0), &RECT);
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&Point::new(0.0, 50.0)));
        assert!(hits.contains(&Point::new(100.0, 50.0)));
    }

    #[test]
    fn corner_hit_is_reported_once() {
        let hits =
            segment_rect_intersections(Point::new(50.0, 50.0), Point::new(150.0, 150.0), &RECT);
        assert_eq!(hits, vec![Point::new(100.0, 100.0)]);
    }

    #[test]
    fn degenerate_segment_misses() {
        let p = Point::new(50.0, 50.0);
        assert!(segment_rect_intersections(p, p, &RECT).is_empty());
    }

    #[test]
    fn collinear_with_a_side_reports_corner_crossings() {
        // Parallel sides contribute nothing; the perpendicular sides are
        // crossed at the corners.
        let hits =
            segment_rect_intersections(Point::new(-10.0, 0.0), Point::new(110.0, 0.0), &RECT);
        assert_eq!(hits, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn fully_inside_misses() {
        let hits =
            segment_rect_intersections(Point::new(20.0, 20.0), Point::new(80.0, 80.0), &RECT);
        assert!(hits.is_empty());
    }

    #[test]
    fn fully_outside_misses() {
        let hits =
            segment_rect_intersections(Point::new(200.0, 200.0), Point::new(300.0, 250.0), &RECT);
        assert!(hits.is_empty());
    }
}
