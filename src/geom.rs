//! Geometric primitives, like points and parabolic arcs.

use crate::num::CheapOrderedFloat;

/// Threshold below which denominators and coordinate differences are treated
/// as degenerate. Results for near-degenerate configurations are approximate.
pub(crate) const EPS: f64 = 1e-9;

/// How far past the bounding box an open edge may be extended when its start
/// already lies near or outside the box.
pub(crate) const FINISH_MARGIN: f64 = 10.0;

/// A two-dimensional point.
///
/// Points are sorted by `y` and then by `x`, for the convenience of our
/// sweep-line algorithm (which moves in increasing `y`).
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate. The sweep line moves from small `y` to large `y`.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.y),
            CheapOrderedFloat::from(self.x),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.y),
                CheapOrderedFloat::from(other.x),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Convert to a [`kurbo::Point`].
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        p.to_kurbo()
    }
}

/// Euclidean distance between two points.
pub(crate) fn dist(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// The `y` value at `x` of the parabola of points equidistant from `site`
/// and the horizontal line at `sweep`.
///
/// Writing `dp = 2 (site.y - sweep)`, the parabola is
/// `y = (x - site.x)^2 / dp + (site.y + sweep) / 2`; the formula holds for a
/// site on either side of the line. A site lying on the sweep line itself
/// degenerates to a vertical ray, in which case we return the midpoint
/// height as an approximation.
pub(crate) fn parabola_y(site: Point, sweep: f64, x: f64) -> f64 {
    let dp = 2.0 * (site.y - sweep);
    let mid = (site.y + sweep) / 2.0;
    if dp.abs() < EPS {
        return mid;
    }
    let dx = x - site.x;
    dx * dx / dp + mid
}
