//! Cubic segment helper between two nodes.

use crate::foundation::core::{CubicBez, ParamCurve, Point};
use crate::node::model::Node;

/// The cubic curve running from one node's anchor to another's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment(pub CubicBez);

impl CubicSegment {
    /// Segment from its four control points.
    pub fn new(p0: Point, c1: Point, c2: Point, p3: Point) -> Self {
        Self(CubicBez::new(p0, c1, c2, p3))
    }

    /// Segment leaving `prev` through its out handle and arriving at `next` through its
    /// in handle.
    pub fn from_nodes(prev: &Node, next: &Node) -> Self {
        Self::new(prev.anchor, prev.out_handle, next.in_handle, next.anchor)
    }

    /// Start point.
    pub fn start(&self) -> Point {
        self.0.p0
    }

    /// First control point.
    pub fn start_handle(&self) -> Point {
        self.0.p1
    }

    /// Second control point.
    pub fn end_handle(&self) -> Point {
        self.0.p2
    }

    /// End point.
    pub fn end(&self) -> Point {
        self.0.p3
    }

    /// Point at `t`, clamped to `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        self.0.eval(t.clamp(0.0, 1.0))
    }

    /// Split at `t` into the `[0, t]` and `[t, 1]` halves.
    ///
    /// The halves share the split point exactly, so stitching them back together traces the
    /// same curve.
    pub fn divided_at_t(&self, t: f64) -> (Self, Self) {
        let t = t.clamp(0.0, 1.0);
        let first = self.0.subsegment(0.0..t);
        let mut second = self.0.subsegment(t..1.0);
        second.p0 = first.p3;
        (Self(first), Self(second))
    }
}

impl From<CubicBez> for CubicSegment {
    fn from(value: CubicBez) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/segment.rs"]
mod tests;
