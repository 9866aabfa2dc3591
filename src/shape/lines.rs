use crate::foundation::core::Point;

/// Slopes steeper than this are treated as vertical.
pub const VERTICAL_SLOPE_LIMIT: f64 = 1e6;

/// Two points on a line.
pub type LinePoints = (Point, Point);

/// Slope of the line through `a` and `b`, or `None` when it is vertical, near-vertical or
/// degenerate (`a == b`).
pub fn slope(a: Point, b: Point) -> Option<f64> {
    let m = (b.y - a.y) / (b.x - a.x);
    if !m.is_finite() || m.abs() > VERTICAL_SLOPE_LIMIT {
        return None;
    }
    Some(m)
}

/// Whether `p` lies in the closed strip between two parallel lines.
///
/// The slope of `first` is used for both lines. Intercepts are taken through each line's
/// midpoint, so swapping the two points that define a line never changes the answer. Vertical
/// strips fall back to an x-range test.
pub fn between_lines(first: LinePoints, second: LinePoints, p: Point) -> bool {
    let m1 = first.0.midpoint(first.1);
    let m2 = second.0.midpoint(second.1);

    match slope(first.0, first.1) {
        Some(m) => {
            let b1 = m1.y - m * m1.x;
            let b2 = m2.y - m * m2.x;
            within(p.y - m * p.x, b1, b2)
        }
        None => within(p.x, m1.x, m2.x),
    }
}

fn within(v: f64, a: f64, b: f64) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/lines.rs"]
mod tests;
