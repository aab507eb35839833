//! The beachline: a binary tree of parabolic arcs, one per site region the
//! sweep line is currently crossing.
//!
//! Leaves are arcs, ordered left to right by `x`; internal nodes are
//! breakpoints, each tracing one bisector half-edge. The tree is arena-backed
//! and nodes refer to each other by index, so structural surgery is cheap and
//! the borrow checker stays out of the way.

use crate::edge::EdgeIdx;
use crate::geom::{Point, EPS};
use crate::queue::EventIdx;

/// An index into the beachline's node arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl std::fmt::Debug for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n_{}", self.0)
    }
}

#[derive(Debug)]
enum NodeKind {
    /// A leaf: the arc of the parabola focused on `site`. `event` is the
    /// pending circle event that would squeeze this arc out, if one has been
    /// scheduled.
    Arc {
        site: Point,
        event: Option<EventIdx>,
    },
    /// An internal node: the breakpoint between the rightmost arc of its left
    /// subtree and the leftmost arc of its right subtree, tracing `edge`.
    Breakpoint {
        left: NodeIdx,
        right: NodeIdx,
        edge: EdgeIdx,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeIdx>,
    kind: NodeKind,
}

/// The sweep's beachline. Empty until the first site is inserted.
///
/// Spliced-out nodes stay in the arena as orphans; the whole arena is
/// discarded when the sweep finishes.
#[derive(Debug, Default)]
pub(crate) struct Beachline {
    nodes: Vec<Node>,
}

impl Beachline {
    /// The index of the root node. `None` before any site has been seen.
    ///
    /// The root is always the first node pushed, and surgery only ever
    /// replaces nodes in place or splices below the root's children.
    pub fn root(&self) -> Option<NodeIdx> {
        let mut idx = NodeIdx(0);
        if self.nodes.is_empty() {
            return None;
        }
        while let Some(parent) = self.nodes[idx.0].parent {
            idx = parent;
        }
        Some(idx)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Adds a detached arc leaf for `site`.
    pub fn new_arc(&mut self, site: Point) -> NodeIdx {
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Arc { site, event: None },
        });
        NodeIdx(self.nodes.len() - 1)
    }

    /// Adds a detached breakpoint over two existing subtrees.
    pub fn new_breakpoint(&mut self, left: NodeIdx, right: NodeIdx, edge: EdgeIdx) -> NodeIdx {
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Breakpoint { left, right, edge },
        });
        let idx = NodeIdx(self.nodes.len() - 1);
        self.nodes[left.0].parent = Some(idx);
        self.nodes[right.0].parent = Some(idx);
        idx
    }

    /// Converts the arc at `idx` into a breakpoint in place, keeping its
    /// position in the tree.
    pub fn to_breakpoint(&mut self, idx: NodeIdx, left: NodeIdx, right: NodeIdx, edge: EdgeIdx) {
        debug_assert!(self.is_arc(idx));
        self.nodes[idx.0].kind = NodeKind::Breakpoint { left, right, edge };
        self.nodes[left.0].parent = Some(idx);
        self.nodes[right.0].parent = Some(idx);
    }

    pub fn is_arc(&self, idx: NodeIdx) -> bool {
        matches!(self.nodes[idx.0].kind, NodeKind::Arc { .. })
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.nodes[idx.0].parent
    }

    pub fn site(&self, idx: NodeIdx) -> Point {
        match self.nodes[idx.0].kind {
            NodeKind::Arc { site, .. } => site,
            NodeKind::Breakpoint { .. } => panic!("site of a breakpoint node"),
        }
    }

    /// Detaches and returns the arc's pending circle event, if any.
    pub fn take_event(&mut self, idx: NodeIdx) -> Option<EventIdx> {
        match &mut self.nodes[idx.0].kind {
            NodeKind::Arc { event, .. } => event.take(),
            NodeKind::Breakpoint { .. } => panic!("event of a breakpoint node"),
        }
    }

    /// Records a pending circle event on an arc. The arc must not already
    /// have one.
    pub fn set_event(&mut self, idx: NodeIdx, ev: EventIdx) {
        match &mut self.nodes[idx.0].kind {
            NodeKind::Arc { event, .. } => {
                debug_assert!(event.is_none(), "arc already has a pending event");
                *event = Some(ev);
            }
            NodeKind::Breakpoint { .. } => panic!("event of a breakpoint node"),
        }
    }

    pub fn edge(&self, idx: NodeIdx) -> EdgeIdx {
        match self.nodes[idx.0].kind {
            NodeKind::Breakpoint { edge, .. } => edge,
            NodeKind::Arc { .. } => panic!("edge of an arc node"),
        }
    }

    pub fn set_edge(&mut self, idx: NodeIdx, new_edge: EdgeIdx) {
        match &mut self.nodes[idx.0].kind {
            NodeKind::Breakpoint { edge, .. } => *edge = new_edge,
            NodeKind::Arc { .. } => panic!("edge of an arc node"),
        }
    }

    pub fn left(&self, idx: NodeIdx) -> NodeIdx {
        match self.nodes[idx.0].kind {
            NodeKind::Breakpoint { left, .. } => left,
            NodeKind::Arc { .. } => panic!("child of an arc node"),
        }
    }

    pub fn right(&self, idx: NodeIdx) -> NodeIdx {
        match self.nodes[idx.0].kind {
            NodeKind::Breakpoint { right, .. } => right,
            NodeKind::Arc { .. } => panic!("child of an arc node"),
        }
    }

    fn set_left(&mut self, idx: NodeIdx, child: NodeIdx) {
        match &mut self.nodes[idx.0].kind {
            NodeKind::Breakpoint { left, .. } => *left = child,
            NodeKind::Arc { .. } => panic!("child of an arc node"),
        }
        self.nodes[child.0].parent = Some(idx);
    }

    fn set_right(&mut self, idx: NodeIdx, child: NodeIdx) {
        match &mut self.nodes[idx.0].kind {
            NodeKind::Breakpoint { right, .. } => *right = child,
            NodeKind::Arc { .. } => panic!("child of an arc node"),
        }
        self.nodes[child.0].parent = Some(idx);
    }

    /// The nearest ancestor whose breakpoint lies to the left of the subtree
    /// at `idx`: the first ancestor reached through a right-child link.
    pub fn left_parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        let mut child = idx;
        let mut parent = self.parent(child)?;
        while self.left(parent) == child {
            child = parent;
            parent = self.parent(parent)?;
        }
        Some(parent)
    }

    /// The mirror of [`left_parent`](Self::left_parent): the first ancestor
    /// reached through a left-child link.
    pub fn right_parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        let mut child = idx;
        let mut parent = self.parent(child)?;
        while self.right(parent) == child {
            child = parent;
            parent = self.parent(parent)?;
        }
        Some(parent)
    }

    /// The arc immediately left of the breakpoint `bp`: the rightmost leaf of
    /// its left subtree.
    pub fn arc_left_of(&self, bp: NodeIdx) -> NodeIdx {
        let mut n = self.left(bp);
        while !self.is_arc(n) {
            n = self.right(n);
        }
        n
    }

    /// The arc immediately right of the breakpoint `bp`.
    pub fn arc_right_of(&self, bp: NodeIdx) -> NodeIdx {
        let mut n = self.right(bp);
        while !self.is_arc(n) {
            n = self.left(n);
        }
        n
    }

    /// The current `x` coordinate of the breakpoint `bp`, with the sweep line
    /// at height `sweep`.
    ///
    /// The two arc parabolas meet at two points; which one is the breakpoint
    /// depends on which site is closer to the sweep line. When the sites are
    /// cohorizontal the meeting point is their vertical bisector, and when a
    /// site lies on the sweep line its parabola degenerates to a vertical ray
    /// at the site's own `x`.
    pub fn breakpoint_x(&self, bp: NodeIdx, sweep: f64) -> f64 {
        let p = self.site(self.arc_left_of(bp));
        let r = self.site(self.arc_right_of(bp));

        if (p.y - r.y).abs() < EPS {
            return (p.x + r.x) / 2.0;
        }
        let dp = 2.0 * (p.y - sweep);
        let dr = 2.0 * (r.y - sweep);
        if dp.abs() < EPS {
            return p.x;
        }
        if dr.abs() < EPS {
            return r.x;
        }

        let a = 1.0 / dp - 1.0 / dr;
        let b = -2.0 * (p.x / dp - r.x / dr);
        let c = (dp - dr) / 4.0 + p.x * p.x / dp - r.x * r.x / dr;

        let disc = (b * b - 4.0 * a * c).max(0.0);
        let sq = disc.sqrt();
        let x1 = (-b + sq) / (2.0 * a);
        let x2 = (-b - sq) / (2.0 * a);

        // The arc closer to the sweep line is the narrower parabola; it owns
        // the region between the two meeting points.
        if p.y > r.y {
            x1.max(x2)
        } else {
            x1.min(x2)
        }
    }

    /// The arc above `x` with the sweep line at `sweep`.
    pub fn find_arc(&self, x: f64, sweep: f64) -> NodeIdx {
        let mut n = self.root().expect("find_arc on an empty beachline");
        while !self.is_arc(n) {
            n = if self.breakpoint_x(n, sweep) > x {
                self.left(n)
            } else {
                self.right(n)
            };
        }
        n
    }

    /// Removes an arc leaf, collapsing its parent breakpoint: the leaf's
    /// sibling takes the parent's place under the grandparent.
    pub fn splice_out(&mut self, leaf: NodeIdx) {
        let parent = self.parent(leaf).expect("cannot splice out the root arc");
        let gparent = self
            .parent(parent)
            .expect("cannot splice out a child of the root");
        let sibling = if self.left(parent) == leaf {
            self.right(parent)
        } else {
            self.left(parent)
        };
        if self.left(gparent) == parent {
            self.set_left(gparent, sibling);
        } else {
            self.set_right(gparent, sibling);
        }
        self.nodes[leaf.0].parent = None;
        self.nodes[parent.0].parent = None;
    }
}
