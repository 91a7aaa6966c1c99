//! Split, promote and dissolve operations on a [`NodeList`].

use crate::{
    foundation::core::{NodeId, Point},
    foundation::error::{PathError, PathResult},
    foundation::math::{EPSILON, map_t_from_fragment, map_t_to_fragment},
    geometry::segment::CubicSegment,
    node::model::{Node, NodeType},
    topology::list::NodeList,
};

const MIN_DISSOLVE_T: f64 = 1e-6;

impl NodeList {
    /// Duplicate the node at `id` and insert the copy right after it.
    ///
    /// For a normal node the two halves meet through a zero-length seam (the original's
    /// out handle and the copy's in handle collapse onto the anchor), so the traced curve
    /// does not change. Returns the id of the copy.
    pub fn split_node(&mut self, id: NodeId) -> PathResult<NodeId> {
        let node = *self.at(id)?;
        if node.is_move() {
            return Err(PathError::validation(format!("cannot split move node {id}")));
        }
        let mut copy = node;
        if node.is_normal() {
            let original = self.node_mut_unchecked(id);
            original.out_handle = original.anchor;
            copy.in_handle = copy.anchor;
        }
        self.insert_after(id, copy)
    }

    /// Split `id` and break the path between the two halves.
    ///
    /// Returns `(move_id, copy_id)`.
    pub fn split_and_disconnect(&mut self, id: NodeId) -> PathResult<(NodeId, NodeId)> {
        let copy_id = self.split_node(id)?;
        let move_id = self.insert_after(id, Node::move_break())?;
        Ok((move_id, copy_id + 1))
    }

    /// Turn the dissolved marker at `id` into a normal vertex without changing the curve.
    ///
    /// The curve between the enclosing normal nodes is split at the marker's `t`; markers
    /// on either side are remapped onto the half they now belong to.
    pub fn promote_dissolved_to_normal(&mut self, id: NodeId) -> PathResult<()> {
        let node = *self.at(id)?;
        if !node.is_dissolved() {
            return Err(PathError::validation(format!(
                "node {id} is {:?}, only dissolved nodes can be promoted",
                node.node_type()
            )));
        }
        let (prev_id, next_id) = self.enclosing_normals(id)?;
        let split_t = node.t;

        let seg = CubicSegment::from_nodes(self.at(prev_id)?, self.at(next_id)?);
        let (first, second) = seg.divided_at_t(split_t);

        self.node_mut_unchecked(prev_id).out_handle = first.start_handle();
        {
            let promoted = self.node_mut_unchecked(id);
            promoted.in_handle = first.end_handle();
            promoted.anchor = first.end();
            promoted.out_handle = second.start_handle();
        }
        self.set_node_type(id, NodeType::Normal);
        self.node_mut_unchecked(next_id).in_handle = second.end_handle();

        self.remap_markers(prev_id, id, |t| map_t_to_fragment(0.0, split_t, t))?;
        self.remap_markers(id, next_id, |t| map_t_to_fragment(split_t, 1.0, t))?;
        tracing::debug!(id, prev_id, next_id, t = split_t, "promoted dissolved node");
        Ok(())
    }

    /// Turn the normal node at `id` into a dissolved marker on the merged curve of its
    /// enclosing normal neighbours.
    ///
    /// The marker's `t` is read off the node's handles, which is exact for a node that
    /// lies on the merged curve (for example one produced by
    /// [`NodeList::promote_dissolved_to_normal`]). The outer handles are rescaled so that
    /// the merged curve starts and ends with the same tangents.
    pub fn dissolve_normal(&mut self, id: NodeId) -> PathResult<()> {
        let node = *self.at(id)?;
        if !node.is_normal() {
            return Err(PathError::validation(format!(
                "node {id} is {:?}, only normal nodes can be dissolved",
                node.node_type()
            )));
        }
        let (prev_id, next_id) = self.enclosing_normals(id)?;
        if prev_id == id || next_id == id {
            return Err(PathError::validation(format!(
                "node {id} is the only normal node of its segment"
            )));
        }
        let prev = *self.at(prev_id)?;
        let next = *self.at(next_id)?;
        let t = dissolve_parameter(&prev, &node, &next);

        self.node_mut_unchecked(prev_id).out_handle =
            prev.anchor + (prev.out_handle - prev.anchor) / t;
        self.node_mut_unchecked(next_id).in_handle =
            next.anchor + (next.in_handle - next.anchor) / (1.0 - t);
        {
            let dissolved = self.node_mut_unchecked(id);
            dissolved.t = t;
            dissolved.in_handle = dissolved.anchor;
            dissolved.out_handle = dissolved.anchor;
        }
        self.set_node_type(id, NodeType::Dissolved);

        self.remap_markers(prev_id, id, |m| map_t_from_fragment(0.0, t, m))?;
        self.remap_markers(id, next_id, |m| map_t_from_fragment(t, 1.0, m))?;
        tracing::debug!(id, prev_id, next_id, t, "dissolved normal node");
        Ok(())
    }

    fn enclosing_normals(&self, id: NodeId) -> PathResult<(NodeId, NodeId)> {
        let prev_id = self.prev_normal_id(id)?.ok_or_else(|| {
            PathError::validation(format!("node {id} has no previous normal node"))
        })?;
        let next_id = self.next_normal_id(id)?.ok_or_else(|| {
            PathError::validation(format!("node {id} has no next normal node"))
        })?;
        Ok((prev_id, next_id))
    }

    fn remap_markers(
        &mut self,
        from: NodeId,
        to: NodeId,
        map: impl Fn(f64) -> f64,
    ) -> PathResult<()> {
        for marker in self.ids_between(from, to)? {
            let node = self.node_mut_unchecked(marker);
            if node.is_dissolved() {
                node.t = map(node.t).clamp(0.0, 1.0);
            }
        }
        Ok(())
    }

    /// Whether `id` must be split in this list before it can be matched against the same
    /// id in `sibling`.
    pub fn should_split_node(&self, id: NodeId, sibling: &NodeList) -> PathResult<bool> {
        should_split_this_node(id, self.at(id)?, sibling.at(id)?, self, sibling)
    }
}

/// Split decision for node `id`, given the node as stored in `this_list` and in
/// `sibling_list`.
///
/// An interior normal node only needs a split when both of its neighbours differ from
/// the sibling's. Boundary and non-normal nodes are split when either neighbour differs.
pub fn should_split_this_node(
    id: NodeId,
    this_node: &Node,
    sibling_node: &Node,
    this_list: &NodeList,
    sibling_list: &NodeList,
) -> PathResult<bool> {
    let this_prev = this_node.prev_id();
    let this_next = this_node.next_id();
    let prev_differs = this_prev != sibling_node.prev_id() && this_prev != sibling_node.next_id();
    let next_differs = this_next != sibling_node.next_id() && this_next != sibling_node.prev_id();

    if this_node.is_normal()
        && let (Some(_), Some(next_id)) = (this_prev, this_next)
    {
        if this_list.next_normal_id(id)?.is_none() && sibling_list.next_normal_id(id)?.is_some()
        {
            return Ok(true);
        }
        if !this_list.linked(id, next_id)?.is_move() {
            return Ok(prev_differs && next_differs);
        }
    }
    Ok(prev_differs || next_differs)
}

/// Parameter at which `node` sits between `prev` and `next`.
///
/// De Casteljau places the anchor at `t` along the line between the in and out handles;
/// degenerate handles fall back to the chord-length ratio.
fn dissolve_parameter(prev: &Node, node: &Node, next: &Node) -> f64 {
    let handle_span = (node.out_handle - node.in_handle).hypot();
    let t = if handle_span > EPSILON {
        (node.anchor - node.in_handle).hypot() / handle_span
    } else {
        chord_ratio(prev.anchor, node.anchor, next.anchor)
    };
    t.clamp(MIN_DISSOLVE_T, 1.0 - MIN_DISSOLVE_T)
}

fn chord_ratio(a: Point, b: Point, c: Point) -> f64 {
    let first = (b - a).hypot();
    let total = first + (c - b).hypot();
    if total > EPSILON { first / total } else { 0.5 }
}

#[cfg(test)]
#[path = "../../tests/unit/topology/split.rs"]
mod tests;
