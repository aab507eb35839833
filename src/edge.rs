//! Bisector half-edges and the finished edges handed to consumers.

use crate::geom::{Point, EPS};

/// An index into our half-edge arena.
///
/// Half-edges are created in pairs at arc insertion and singly at arc
/// removal; they refer to each other by index, so they live in an arena
/// rather than owning one another.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub(crate) struct EdgeIdx(pub(crate) usize);

impl std::fmt::Debug for EdgeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e_{}", self.0)
    }
}

/// A bisector ray being traced by a breakpoint.
///
/// `start` is the vertex it was born at; `end` stays `None` until the ray is
/// closed, either by a circle-event convergence or by clipping against the
/// bounding box once the sweep finishes. The ray extends from `start` along
/// `dir` on the implicit line `y = f * x + g` (or on `x = start.x` when the
/// separated sites share a `y` coordinate, making `f` infinite).
#[derive(Debug, Clone)]
pub(crate) struct HalfEdge {
    pub start: Point,
    pub end: Option<Point>,
    /// Direction of propagation: the left→right site vector rotated 90°
    /// counter-clockwise, so that the ray grows as the sweep advances.
    pub dir: kurbo::Vec2,
    /// The site whose region lies to the left of the ray.
    pub left: Point,
    /// The site whose region lies to the right of the ray.
    pub right: Point,
    pub f: f64,
    pub g: f64,
    /// The twin half-ray born at the same breakpoint, if any. The two are
    /// joined into one segment once both endpoints are known.
    pub neighbor: Option<EdgeIdx>,
}

impl HalfEdge {
    /// Create the half of the `left`/`right` bisector that starts at `start`.
    ///
    /// `start` is assumed to lie on the bisector; the implicit line is
    /// anchored there.
    pub fn new(start: Point, left: Point, right: Point) -> Self {
        debug_assert!(left != right, "a site does not bisect itself");

        let f = (right.x - left.x) / (left.y - right.y);
        let g = if f.is_finite() {
            start.y - f * start.x
        } else {
            // Vertical bisector; the line is `x = start.x` and `g` is unused.
            f64::NAN
        };

        HalfEdge {
            start,
            end: None,
            dir: kurbo::Vec2::new(left.y - right.y, right.x - left.x),
            left,
            right,
            f,
            g,
            neighbor: None,
        }
    }

    /// Is this the bisector of two cohorizontal sites?
    pub fn is_vertical(&self) -> bool {
        !self.f.is_finite()
    }

    /// The `y` value of the implicit line at `x`. Meaningless for vertical
    /// edges.
    pub fn at_x(&self, x: f64) -> f64 {
        debug_assert!(!self.is_vertical());
        self.f * x + self.g
    }

    /// The point where the forward rays of `self` and `other` cross, or
    /// `None` if they are (near-)parallel or cross behind either start.
    pub fn intersection(&self, other: &HalfEdge) -> Option<Point> {
        let (x, y) = if self.is_vertical() {
            if other.is_vertical() {
                return None;
            }
            (self.start.x, other.at_x(self.start.x))
        } else if other.is_vertical() {
            (other.start.x, self.at_x(other.start.x))
        } else {
            if (self.f - other.f).abs() < EPS {
                return None;
            }
            let x = (other.g - self.g) / (self.f - other.f);
            (x, self.at_x(x))
        };

        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        // The crossing must lie forward of both rays. A zero component of
        // `dir` leaves the corresponding product at zero, which passes.
        if (x - self.start.x) * self.dir.x < 0.0 || (y - self.start.y) * self.dir.y < 0.0 {
            return None;
        }
        if (x - other.start.x) * other.dir.x < 0.0 || (y - other.start.y) * other.dir.y < 0.0 {
            return None;
        }

        Some(Point::new(x, y))
    }
}

/// The arena of half-edges built up during one sweep.
#[derive(Debug, Clone, Default)]
pub(crate) struct HalfEdges {
    edges: Vec<HalfEdge>,
}

impl HalfEdges {
    /// Adds a new half-edge, returning its index.
    pub fn push(&mut self, edge: HalfEdge) -> EdgeIdx {
        self.edges.push(edge);
        EdgeIdx(self.edges.len() - 1)
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }
}

impl std::ops::Index<EdgeIdx> for HalfEdges {
    type Output = HalfEdge;

    fn index(&self, index: EdgeIdx) -> &Self::Output {
        &self.edges[index.0]
    }
}

impl std::ops::IndexMut<EdgeIdx> for HalfEdges {
    fn index_mut(&mut self, index: EdgeIdx) -> &mut HalfEdge {
        &mut self.edges[index.0]
    }
}

/// A finished Voronoi edge: one segment of the bisector of two sites.
///
/// Both endpoints are concrete; open rays have been clipped against the
/// bounding box passed to [`Voronoi::edges`](crate::Voronoi::edges). For
/// non-vertical edges the endpoints satisfy `y = f * x + g`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// One endpoint of the segment.
    pub start: Point,
    /// The other endpoint.
    pub end: Point,
    /// The site whose region lies on one side of the edge.
    pub left: Point,
    /// The site whose region lies on the other side.
    pub right: Point,
    /// Slope of the implicit line `y = f * x + g`; infinite for vertical
    /// edges.
    pub f: f64,
    /// Intercept of the implicit line; NaN for vertical edges.
    pub g: f64,
}

impl Edge {
    /// The edge as a [`kurbo::Line`].
    pub fn to_line(&self) -> kurbo::Line {
        kurbo::Line::new(self.start.to_kurbo(), self.end.to_kurbo())
    }

    /// Is this the bisector of two cohorizontal sites?
    pub fn is_vertical(&self) -> bool {
        !self.f.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{dist, tests::Reasonable};
    use proptest::prelude::*;

    fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    proptest! {
        #[test]
        fn bisector_is_perpendicular_and_equidistant(
            a in Point::reasonable(),
            b in Point::reasonable(),
            t in -10.0..10.0f64,
        ) {
            prop_assume!((a.y - b.y).abs() > 1e-3);
            prop_assume!(dist(a, b) > 1e-3);

            let edge = HalfEdge::new(midpoint(a, b), a, b);
            let ab = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
            prop_assert!(edge.dir.dot(ab).abs() <= 1e-9 * ab.hypot2());

            let x = edge.start.x + t;
            let p = Point::new(x, edge.at_x(x));
            let (da, db) = (dist(p, a), dist(p, b));
            prop_assert!((da - db).abs() <= 1e-7 * da.max(1.0));
        }
    }

    #[test]
    fn cohorizontal_sites_make_a_vertical_edge() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(5.0, 1.0);
        let edge = HalfEdge::new(Point::new(3.0, 0.0), a, b);
        assert!(edge.is_vertical());
        assert_eq!(edge.dir.x, 0.0);
        assert!(edge.dir.y > 0.0);
    }

    #[test]
    fn crossing_behind_a_ray_is_rejected() {
        // Two rays on crossing lines, but one of them points away from the
        // crossing point.
        let towards = HalfEdge::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0));
        let mut away = HalfEdge::new(Point::new(2.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 1.0));

        let hit = towards.intersection(&away).expect("rays should cross");
        assert!((hit.x - 1.0).abs() < 1e-12);
        assert!((hit.y - 1.0).abs() < 1e-12);

        away.dir = -away.dir;
        assert!(towards.intersection(&away).is_none());
    }

    #[test]
    fn parallel_bisectors_do_not_cross() {
        // Three collinear sites: the two bisectors are parallel.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        let c = Point::new(2.0, 2.0);
        let ab = HalfEdge::new(midpoint(a, b), a, b);
        let bc = HalfEdge::new(midpoint(b, c), b, c);
        assert!(ab.intersection(&bc).is_none());
    }
}
