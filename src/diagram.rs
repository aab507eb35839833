//! The sweep-line engine: processes site and circle events in ascending `y`
//! order, maintaining the beachline and collecting bisector edges.

use crate::beachline::{Beachline, NodeIdx};
use crate::edge::{Edge, EdgeIdx, HalfEdge, HalfEdges};
use crate::geom::{dist, parabola_y, Point, FINISH_MARGIN};
use crate::queue::{Event, EventQueue, Tombstones};
use crate::Error;

/// If the second site arrives within this much `y` of a single-arc beachline,
/// the two arcs sit side by side rather than one nested in the other, and the
/// split is seeded at the bottom edge of the box. The threshold is absolute,
/// in world units.
const COINCIDENT_Y: f64 = 1.0;

/// A reusable Voronoi diagram builder.
///
/// All state is reset at the start of every [`edges`](Self::edges) call;
/// reuse only saves allocations. For one-off use, the free function
/// [`edges`](crate::edges) is more convenient.
#[derive(Debug, Default)]
pub struct Voronoi {
    beachline: Beachline,
    queue: EventQueue,
    tombstones: Tombstones,
    half_edges: HalfEdges,
    /// The input sites of the current call; circle events are validated
    /// against them.
    sites: Vec<Point>,
    /// Indices of the half-edges that make up the diagram. Twin halves are
    /// counted once; the twin only contributes its endpoint at the end.
    diagram: Vec<EdgeIdx>,
    vertices: Vec<Point>,
    sweep: f64,
    width: f64,
    height: f64,
}

impl Voronoi {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the Voronoi diagram of `sites` within the box
    /// `[0, width] × [0, height]`, returning its edges.
    ///
    /// Edges of unbounded regions are clipped against the box (with some
    /// slack: an endpoint can land outside the box when the geometry already
    /// is). Sites may also lie outside the box.
    ///
    /// Fails if any coordinate is non-finite or if two sites coincide
    /// exactly.
    pub fn edges(
        &mut self,
        sites: &[Point],
        width: f64,
        height: f64,
    ) -> Result<Vec<Edge>, Error> {
        validate(sites)?;
        self.reset(width, height);
        self.sites.extend_from_slice(sites);

        for &site in sites {
            self.queue.push(Event::Site(site));
        }

        while let Some((idx, event)) = self.queue.pop() {
            self.sweep = event.point().y;
            match event {
                Event::Site(p) => self.insert_arc(p),
                Event::Circle { .. } if self.tombstones.discard(idx) => {}
                Event::Circle { center, arc, .. } => self.remove_arc(center, arc),
            }
        }

        self.finish_edges();
        Ok(self.join_twins())
    }

    /// The diagram vertices found by the last [`edges`](Self::edges) call.
    ///
    /// Each vertex is the center of a circle through three sites with no
    /// site inside it.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    fn reset(&mut self, width: f64, height: f64) {
        self.beachline.clear();
        self.queue.clear();
        self.tombstones.clear();
        self.half_edges.clear();
        self.sites.clear();
        self.diagram.clear();
        self.vertices.clear();
        self.sweep = 0.0;
        self.width = width;
        self.height = height;
    }

    /// Handles a site event: split the arc above `p` and trace the two
    /// halves of the bisector between `p` and that arc's site.
    fn insert_arc(&mut self, p: Point) {
        let Some(root) = self.beachline.root() else {
            self.beachline.new_arc(p);
            return;
        };

        // A lone root arc whose site is almost level with `p` wouldn't be
        // split; the two arcs sit side by side and their near-vertical
        // bisector is seeded at the bottom of the box.
        if self.beachline.is_arc(root) && p.y - self.beachline.site(root).y < COINCIDENT_Y {
            let fp = self.beachline.site(root);
            let seed = Point::new((p.x + fp.x) / 2.0, 0.0);
            // Order the arcs (and the edge's sites) by `x`; ascending event
            // order only guarantees that for exactly level sites.
            let (lo, hi) = if p.x > fp.x { (fp, p) } else { (p, fp) };
            let edge = self.half_edges.push(HalfEdge::new(seed, lo, hi));
            self.diagram.push(edge);

            let left = self.beachline.new_arc(lo);
            let right = self.beachline.new_arc(hi);
            self.beachline.to_breakpoint(root, left, right, edge);
            return;
        }

        let arc = self.beachline.find_arc(p.x, self.sweep);
        if let Some(ev) = self.beachline.take_event(arc) {
            self.tombstones.add(ev);
        }
        let site = self.beachline.site(arc);

        let start = Point::new(p.x, parabola_y(site, self.sweep, p.x));
        let el = self.half_edges.push(HalfEdge::new(start, site, p));
        let er = self.half_edges.push(HalfEdge::new(start, p, site));
        self.half_edges[el].neighbor = Some(er);
        self.diagram.push(el);

        // The split arc becomes the breakpoint tracing `er`; below it, a new
        // breakpoint traces `el` between the left remnant and the new arc.
        let a0 = self.beachline.new_arc(site);
        let a1 = self.beachline.new_arc(p);
        let a2 = self.beachline.new_arc(site);
        let inner = self.beachline.new_breakpoint(a0, a1, el);
        self.beachline.to_breakpoint(arc, inner, a2, er);

        self.check_circle(a0);
        self.check_circle(a2);
    }

    /// Handles a circle event: the arc's bounding breakpoints have met at
    /// `vertex`, so the arc vanishes, both bisectors end there, and a new
    /// bisector between the outer arcs' sites starts there.
    fn remove_arc(&mut self, vertex: Point, arc: NodeIdx) {
        let xl = self
            .beachline
            .left_parent(arc)
            .expect("circle event on an arc with no left breakpoint");
        let xr = self
            .beachline
            .right_parent(arc)
            .expect("circle event on an arc with no right breakpoint");
        let a0 = self.beachline.arc_left_of(xl);
        let a2 = self.beachline.arc_right_of(xr);

        if let Some(ev) = self.beachline.take_event(a0) {
            self.tombstones.add(ev);
        }
        if let Some(ev) = self.beachline.take_event(a2) {
            self.tombstones.add(ev);
        }

        self.vertices.push(vertex);

        self.half_edges[self.beachline.edge(xl)].end = Some(vertex);
        self.half_edges[self.beachline.edge(xr)].end = Some(vertex);

        // One of the two bounding breakpoints is an ancestor of the other;
        // the ancestor survives the splice and takes over as the breakpoint
        // between the outer arcs.
        let mut higher = None;
        let mut n = arc;
        while let Some(parent) = self.beachline.parent(n) {
            if parent == xl {
                higher = Some(xl);
            }
            if parent == xr {
                higher = Some(xr);
            }
            n = parent;
        }
        let higher = higher.expect("vanishing arc not bounded by its breakpoints");

        let edge = self.half_edges.push(HalfEdge::new(
            vertex,
            self.beachline.site(a0),
            self.beachline.site(a2),
        ));
        self.diagram.push(edge);
        self.beachline.set_edge(higher, edge);

        self.beachline.splice_out(arc);

        self.check_circle(a0);
        self.check_circle(a2);
    }

    /// Schedules a circle event for `arc` if its bounding breakpoints are on
    /// course to meet ahead of the sweep line.
    fn check_circle(&mut self, arc: NodeIdx) {
        let (Some(lp), Some(rp)) = (
            self.beachline.left_parent(arc),
            self.beachline.right_parent(arc),
        ) else {
            return;
        };
        let a = self.beachline.site(self.beachline.arc_left_of(lp));
        let c = self.beachline.site(self.beachline.arc_right_of(rp));
        if a == c {
            return;
        }

        let Some(s) = self.half_edges[self.beachline.edge(lp)]
            .intersection(&self.half_edges[self.beachline.edge(rp)])
        else {
            return;
        };

        // The event fires when the sweep reaches the top of the circle
        // centered at `s` through the three sites.
        let d = dist(a, s);
        let y = s.y + d;
        if y <= self.sweep {
            return;
        }

        // A convergence point is a diagram vertex only if its circle holds
        // no other site; one strictly inside means the breakpoints get
        // rerouted before they meet.
        let slack = 1e-6 * (1.0 + d);
        if self.sites.iter().any(|&q| dist(q, s) < d - slack) {
            return;
        }

        let ev = self.queue.push(Event::Circle {
            point: Point::new(s.x, y),
            center: s,
            arc,
        });
        self.beachline.set_event(arc, ev);
    }

    /// Closes every breakpoint edge still open when the events run out, by
    /// extending it to the far side of the bounding box.
    fn finish_edges(&mut self) {
        let Some(root) = self.beachline.root() else {
            return;
        };
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            if self.beachline.is_arc(n) {
                continue;
            }
            self.finish_edge(self.beachline.edge(n));
            stack.push(self.beachline.left(n));
            stack.push(self.beachline.right(n));
        }
    }

    fn finish_edge(&mut self, idx: EdgeIdx) {
        let edge = &self.half_edges[idx];
        debug_assert!(edge.end.is_none(), "open breakpoint edge already closed");

        // Clip to the box edge in the direction of propagation, or just past
        // the start when the start already lies outside the box.
        let end = if edge.is_vertical() {
            let y = if edge.dir.y > 0.0 {
                self.height.max(edge.start.y + FINISH_MARGIN)
            } else {
                0.0f64.min(edge.start.y - FINISH_MARGIN)
            };
            Point::new(edge.start.x, y)
        } else {
            let x = if edge.dir.x > 0.0 {
                self.width.max(edge.start.x + FINISH_MARGIN)
            } else {
                0.0f64.min(edge.start.x - FINISH_MARGIN)
            };
            Point::new(x, edge.at_x(x))
        };
        self.half_edges[idx].end = Some(end);
    }

    /// Assembles the output: each twin pair becomes one segment spanning both
    /// endpoints, and unpaired half-edges keep their own start.
    fn join_twins(&mut self) -> Vec<Edge> {
        let mut out = Vec::with_capacity(self.diagram.len());
        for &idx in &self.diagram {
            if let Some(twin) = self.half_edges[idx].neighbor.take() {
                let start = self.half_edges[twin]
                    .end
                    .expect("twin half-edge left open");
                self.half_edges[idx].start = start;
            }
            let e = &self.half_edges[idx];
            out.push(Edge {
                start: e.start,
                end: e.end.expect("diagram edge left open"),
                left: e.left,
                right: e.right,
                f: e.f,
                g: e.g,
            });
        }
        out
    }
}

fn validate(sites: &[Point]) -> Result<(), Error> {
    for p in sites {
        if p.x.is_nan() || p.y.is_nan() {
            return Err(Error::NaN);
        }
        if !p.is_finite() {
            return Err(Error::Infinity);
        }
    }
    let mut sorted = sites.to_vec();
    sorted.sort();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(Error::DuplicateSite(pair[0]));
        }
    }
    Ok(())
}
