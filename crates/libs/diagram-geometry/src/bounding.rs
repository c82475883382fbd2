use diagram_types::{Point, Rect};

use crate::collect::Collections;

/// Axis-aligned bounding box of a point set. `None` when fewer than two
/// distinct points are available (an empty, single-point or all-coincident
/// set); callers fall through to the next enclosure step on `None`. A flat
/// axis-aligned span is a legitimate zero-width or zero-height rect.
pub fn bbox_of_points(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let (min_x, max_x, min_y, max_y) = rest.iter().fold(
        (first.x, first.x, first.y, first.y),
        |(min_x, max_x, min_y, max_y), p| {
            (
                min_x.min(p.x),
                max_x.max(p.x),
                min_y.min(p.y),
                max_y.max(p.y),
            )
        },
    );
    if min_x == max_x && min_y == max_y {
        return None;
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Combined bounding box of several point runs. A single degenerate run
/// poisons the whole step.
pub fn bbox_of_polylines(polylines: &[Vec<Point>]) -> Option<Rect> {
    let mut acc: Option<Rect> = None;
    for run in polylines {
        let bb = bbox_of_points(run)?;
        acc = Some(match acc {
            Some(prev) => union(prev, bb),
            None => bb,
        });
    }
    acc
}

/// Union of a rect list; `None` only when the list is empty.
pub fn union_of_rects(rects: &[Rect]) -> Option<Rect> {
    let (first, rest) = rects.split_first()?;
    Some(rest.iter().fold(*first, |acc, r| union(acc, *r)))
}

fn union(a: Rect, b: Rect) -> Rect {
    let min_x = a.x.min(b.x);
    let min_y = a.y.min(b.y);
    let max_x = (a.x + a.width).max(b.x + b.width);
    let max_y = (a.y + a.height).max(b.y + b.height);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Enclose a mixed collection of points, rects and polylines.
///
/// A lone point next to at least one rect first borrows that rect's
/// top-left corner as a second point; a single point on its own cannot
/// form a box and would silently vanish from the enclosure otherwise.
/// Degenerate sub-steps are absorbed: whatever still fails to form a box
/// simply does not contribute. An all-empty collection yields the zero
/// rect.
pub fn bounding_rect(collections: &mut Collections) -> Rect {
    if collections.points.len() == 1 && !collections.rects.is_empty() {
        collections.points.push(collections.rects[0].top_left());
    }
    if !collections.points.is_empty() {
        if let Some(bb) = bbox_of_points(&collections.points) {
            collections.rects.push(bb);
        }
    }
    if !collections.polylines.is_empty() {
        if let Some(bb) = bbox_of_polylines(&collections.polylines) {
            collections.rects.push(bb);
        }
    }
    union_of_rects(&collections.rects).unwrap_or_default()
}
