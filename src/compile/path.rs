use smallvec::SmallVec;

use crate::{
    foundation::core::{BezPath, PathEl, Point},
    foundation::error::PathResult,
    foundation::math::map_t_to_fragment,
    geometry::segment::CubicSegment,
    node::model::{Node, NodeType},
    topology::list::NodeList,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Curve drawing command consumed by a vector renderer.
pub enum PathCommand {
    /// Start a new sub-path at the point.
    MoveTo(Point),
    /// Cubic to the last point, using the first two as control points.
    CubicTo(Point, Point, Point),
    /// Close the current sub-path.
    Close,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Output of [`NodeList::to_path`]: sub-paths concatenated in discovery order.
pub struct CompiledPath {
    /// Commands in emission order.
    pub commands: Vec<PathCommand>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Options for [`CompiledPath::flatten`].
pub struct FlattenOpts {
    /// Maximum distance between the curve and its polyline approximation.
    pub tolerance: f64,
}

impl Default for FlattenOpts {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl CompiledPath {
    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Same commands as a kurbo [`BezPath`].
    pub fn to_bez_path(&self) -> BezPath {
        let mut out = BezPath::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => out.move_to(p),
                PathCommand::CubicTo(c1, c2, p) => out.curve_to(c1, c2, p),
                PathCommand::Close => out.close_path(),
            }
        }
        out
    }

    /// Approximate every sub-path by a polyline. Closed sub-paths repeat their first
    /// point at the end.
    pub fn flatten(&self, opts: &FlattenOpts) -> Vec<Vec<Point>> {
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        kurbo::flatten(self.to_bez_path(), opts.tolerance, |el| match el {
            PathEl::MoveTo(p) => polylines.push(vec![p]),
            PathEl::LineTo(p) => {
                if let Some(line) = polylines.last_mut() {
                    line.push(p);
                }
            }
            PathEl::ClosePath => {
                if let Some(line) = polylines.last_mut()
                    && let Some(&start) = line.first()
                {
                    line.push(start);
                }
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        polylines
    }
}

type PendingTs = SmallVec<[f64; 4]>;

impl NodeList {
    /// Compile the node graph into curve commands.
    ///
    /// Each segment starts with a move to its first normal node. Consecutive normal nodes
    /// are joined by their cubic, sliced at every dissolved marker lying between them.
    /// Closed segments curve back to their first normal node and close; markers stored
    /// ahead of that node slice the closing curve. In an open segment they are dropped.
    #[tracing::instrument(skip(self), fields(nodes = self.len()))]
    pub fn to_path(&self) -> PathResult<CompiledPath> {
        let mut commands = Vec::new();
        let mut visited = vec![false; self.len()];
        let mut pending = PendingTs::new();

        for id in 0..self.len() {
            if visited[id] {
                continue;
            }
            let Some(first) = self.first_segment_node(id)? else {
                visited[id] = true;
                continue;
            };
            if visited[first] {
                visited[id] = true;
                continue;
            }

            pending.clear();
            let mut leading = PendingTs::new();
            let mut first_normal: Option<&Node> = None;
            let mut prev_normal: Option<&Node> = None;
            let mut close = false;
            for step in self.segment_iter(first) {
                let node_id = step?;
                visited[node_id] = true;
                let node = self.at(node_id)?;
                match node.node_type() {
                    NodeType::Dummy => {}
                    NodeType::Dissolved => pending.push(node.t),
                    NodeType::Move => break,
                    NodeType::Normal => {
                        match prev_normal {
                            None => {
                                first_normal = Some(node);
                                close = self.closes_on_itself(first)?;
                                // Markers before the first vertex lie on the closing curve.
                                if close {
                                    leading = std::mem::take(&mut pending);
                                }
                                pending.clear();
                                let (x, y) = (node.anchor.x, node.anchor.y);
                                tracing::trace!(x, y, "move to");
                                commands.push(PathCommand::MoveTo(node.anchor));
                            }
                            Some(prev) => cubic_to(prev, node, &mut pending, &mut commands),
                        }
                        prev_normal = Some(node);
                    }
                }
            }

            if close && let (Some(prev), Some(start)) = (prev_normal, first_normal) {
                pending.extend(leading);
                cubic_to(prev, start, &mut pending, &mut commands);
                tracing::trace!("close");
                commands.push(PathCommand::Close);
            }
        }
        Ok(CompiledPath { commands })
    }
}

/// Emit the curve from `prev` to `next`, sliced at every pending marker, then clear them.
fn cubic_to(prev: &Node, next: &Node, pending: &mut PendingTs, out: &mut Vec<PathCommand>) {
    let mut seg = CubicSegment::from_nodes(prev, next);
    let mut last_t = 0.0;
    for &t in pending.iter() {
        let (first, rest) = seg.divided_at_t(map_t_to_fragment(last_t, 1.0, t));
        push_cubic(&first, out);
        seg = rest;
        last_t = t;
    }
    push_cubic(&seg, out);
    pending.clear();
}

fn push_cubic(seg: &CubicSegment, out: &mut Vec<PathCommand>) {
    let end = seg.end();
    tracing::trace!(x = end.x, y = end.y, "cubic to");
    out.push(PathCommand::CubicTo(seg.start_handle(), seg.end_handle(), end));
}

#[cfg(test)]
#[path = "../../tests/unit/compile/path.rs"]
mod tests;
