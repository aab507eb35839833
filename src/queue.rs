//! The event queue driving the sweep, and the tombstone list for events
//! cancelled after being scheduled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::beachline::NodeIdx;
use crate::geom::Point;
use crate::num::CheapOrderedFloat;

/// An index into the event arena.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub(crate) struct EventIdx(usize);

impl std::fmt::Debug for EventIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ev_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Event {
    /// The sweep reaches a new site and an arc is inserted.
    Site(Point),
    /// The arc `arc` is squeezed out by its neighbors. The event point is
    /// the top of their common circle; the squeeze happens when the sweep
    /// gets there, and the circle's `center` becomes a diagram vertex.
    Circle {
        point: Point,
        center: Point,
        arc: NodeIdx,
    },
}

impl Event {
    pub fn point(&self) -> Point {
        match self {
            Event::Site(p) => *p,
            Event::Circle { point, .. } => *point,
        }
    }
}

/// A min-queue of events, ordered by `(y, x)` and then by insertion order so
/// that ties resolve the same way on every run.
///
/// Events are kept in an arena and handed out by index; indices are what the
/// beachline and the tombstone list hold on to.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: Vec<Event>,
    heap: BinaryHeap<Reverse<(CheapOrderedFloat, CheapOrderedFloat, EventIdx)>>,
}

impl EventQueue {
    pub fn push(&mut self, ev: Event) -> EventIdx {
        let idx = EventIdx(self.events.len());
        let p = ev.point();
        self.events.push(ev);
        self.heap.push(Reverse((p.y.into(), p.x.into(), idx)));
        idx
    }

    /// Pops the next event in sweep order.
    pub fn pop(&mut self) -> Option<(EventIdx, Event)> {
        let Reverse((_, _, idx)) = self.heap.pop()?;
        Some((idx, self.events[idx.0]))
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.heap.clear();
    }
}

/// Circle events cancelled after being queued.
///
/// The heap doesn't support removal, so a cancelled event sits in the queue
/// until it surfaces and is discarded then. The list stays tiny (each live
/// arc accounts for at most one entry), so a linear scan beats anything
/// fancier.
#[derive(Debug, Default)]
pub(crate) struct Tombstones(Vec<EventIdx>);

impl Tombstones {
    pub fn add(&mut self, ev: EventIdx) {
        debug_assert!(!self.0.contains(&ev), "event tombstoned twice");
        self.0.push(ev);
    }

    /// If `ev` is tombstoned, forget the tombstone and report `true`.
    pub fn discard(&mut self, ev: EventIdx) -> bool {
        if let Some(i) = self.0.iter().position(|&t| t == ev) {
            self.0.swap_remove(i);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
