use crate::{
    foundation::core::NodeId,
    foundation::error::{PathError, PathResult},
    node::model::{Node, NodeType},
};

/// Dense, index-addressed sequence of path nodes.
///
/// A node's id is its storage position and links are plain ids, so every insertion or
/// removal renumbers the links that point past the touched slot.
///
/// Walks over the graph are bounded by the list length: a walk that would run longer is
/// reported as [`PathError::CorruptTopology`] instead of looping.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from nodes whose links are already set.
    ///
    /// Rejects links that dangle or point at their own node.
    pub fn from_nodes(nodes: Vec<Node>) -> PathResult<Self> {
        let len = nodes.len();
        for (id, node) in nodes.iter().enumerate() {
            for link in [node.prev, node.next].into_iter().flatten() {
                if link == id {
                    return Err(PathError::corrupt_topology(format!(
                        "node {id} points to itself"
                    )));
                }
                if link >= len {
                    return Err(PathError::corrupt_topology(format!(
                        "node {id} links to missing node {link}"
                    )));
                }
            }
        }
        Ok(Self { nodes })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at `id`, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Node at `id`, or [`PathError::NodeOutOfRange`].
    pub fn at(&self, id: NodeId) -> PathResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| PathError::out_of_range(id, self.nodes.len()))
    }

    /// Mutable access for geometry edits. Links stay under the list's control.
    pub fn at_mut(&mut self, id: NodeId) -> PathResult<&mut Node> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id)
            .ok_or_else(|| PathError::out_of_range(id, len))
    }

    /// Follow a stored link from `from`, treating a dangling target as corruption.
    pub(crate) fn linked(&self, from: NodeId, to: NodeId) -> PathResult<&Node> {
        self.nodes.get(to).ok_or_else(|| {
            PathError::corrupt_topology(format!("node {from} links to missing node {to}"))
        })
    }

    fn set_prev(&mut self, id: Option<NodeId>, prev: Option<NodeId>) {
        if let Some(node) = id.and_then(|id| self.nodes.get_mut(id)) {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, id: Option<NodeId>, next: Option<NodeId>) {
        if let Some(node) = id.and_then(|id| self.nodes.get_mut(id)) {
            node.next = next;
        }
    }

    fn insert_slot(&mut self, pos: NodeId, node: Node) {
        for n in &mut self.nodes {
            n.shift_ids_for_insert(pos);
        }
        self.nodes.insert(pos, node);
    }

    /// Insert `blueprint` in front of `next_id`, taking over its previous link.
    pub fn insert_before(&mut self, next_id: NodeId, blueprint: Node) -> PathResult<NodeId> {
        self.at(next_id)?;
        let insert_id = next_id;
        let shifted_next = next_id + 1;
        self.insert_slot(insert_id, blueprint);

        let prev_id = self.nodes[shifted_next].prev;
        self.set_next(prev_id, Some(insert_id));
        self.set_prev(Some(shifted_next), Some(insert_id));
        let inserted = &mut self.nodes[insert_id];
        inserted.prev = prev_id;
        inserted.next = Some(shifted_next);
        Ok(insert_id)
    }

    /// Insert `blueprint` right after `prev_id`, in storage and in the chain.
    ///
    /// A [`NodeType::Move`] blueprint cuts the chain: it keeps a back link to `prev_id`,
    /// gets no forward link, and the former next node becomes the start of a new chain.
    pub fn insert_after(&mut self, prev_id: NodeId, blueprint: Node) -> PathResult<NodeId> {
        self.at(prev_id)?;
        let insert_id = prev_id + 1;
        let is_move = blueprint.is_move();
        self.insert_slot(insert_id, blueprint);

        let next_id = self.nodes[prev_id].next;
        self.set_prev(next_id, if is_move { None } else { Some(insert_id) });
        self.set_next(Some(prev_id), Some(insert_id));
        let inserted = &mut self.nodes[insert_id];
        inserted.prev = Some(prev_id);
        inserted.next = if is_move { None } else { next_id };
        Ok(insert_id)
    }

    /// Push `blueprint` at the end. Its links are kept as given.
    pub fn append(&mut self, blueprint: Node) -> NodeId {
        let insert_id = self.nodes.len();
        self.nodes.push(blueprint);
        insert_id
    }

    /// Remove the node at `id`, bridging its neighbours together.
    ///
    /// When the bridge would link a node to itself (the last two nodes of a loop) that
    /// node is left without links.
    pub fn remove_at(&mut self, id: NodeId) -> PathResult<Node> {
        let removed = *self.at(id)?;
        self.detach(id);
        for n in &mut self.nodes {
            if n.prev == Some(id) {
                n.prev = None;
            }
            if n.next == Some(id) {
                n.next = None;
            }
        }
        self.nodes.remove(id);
        for n in &mut self.nodes {
            n.shift_ids_for_remove(id);
        }
        Ok(removed)
    }

    /// Unlink `id` from its chain and connect its old neighbours to each other.
    fn detach(&mut self, id: NodeId) {
        let Node { prev, next, .. } = self.nodes[id];
        if prev.is_some() && prev == next {
            self.set_prev(prev, None);
            self.set_next(prev, None);
        } else {
            if let Some(p) = prev
                && self.nodes.get(p).is_some_and(|n| n.next == Some(id))
            {
                self.nodes[p].next = next;
            }
            if let Some(n) = next
                && self.nodes.get(n).is_some_and(|node| node.prev == Some(id))
            {
                self.nodes[n].prev = prev;
            }
        }
        let node = &mut self.nodes[id];
        node.prev = None;
        node.next = None;
    }

    /// Relink `move_id` so that it follows `after_id`. Ids do not change.
    ///
    /// A node that already follows `after_id` is left alone, so a two-node loop stays
    /// closed.
    pub fn move_after(&mut self, move_id: NodeId, after_id: NodeId) -> PathResult<()> {
        self.check_move_pair(move_id, after_id)?;
        if self.nodes[move_id].prev == Some(after_id)
            && self.nodes[after_id].next == Some(move_id)
        {
            return Ok(());
        }
        self.detach(move_id);

        let after_next = self.nodes[after_id].next;
        self.nodes[after_id].next = Some(move_id);
        let moved = &mut self.nodes[move_id];
        moved.prev = Some(after_id);
        moved.next = after_next;
        self.set_prev(after_next, Some(move_id));
        Ok(())
    }

    /// Relink `move_id` so that it precedes `before_id`. Ids do not change.
    pub fn move_before(&mut self, move_id: NodeId, before_id: NodeId) -> PathResult<()> {
        self.check_move_pair(move_id, before_id)?;
        if self.nodes[move_id].next == Some(before_id)
            && self.nodes[before_id].prev == Some(move_id)
        {
            return Ok(());
        }
        self.detach(move_id);

        let before_prev = self.nodes[before_id].prev;
        self.nodes[before_id].prev = Some(move_id);
        let moved = &mut self.nodes[move_id];
        moved.prev = before_prev;
        moved.next = Some(before_id);
        self.set_next(before_prev, Some(move_id));
        Ok(())
    }

    fn check_move_pair(&self, move_id: NodeId, target_id: NodeId) -> PathResult<()> {
        self.at(move_id)?;
        self.at(target_id)?;
        if move_id == target_id {
            return Err(PathError::validation(format!(
                "cannot move node {move_id} relative to itself"
            )));
        }
        Ok(())
    }

    fn walk_budget(&self) -> usize {
        2 * self.nodes.len() + 1
    }

    /// First node of the segment containing `id`, or `None` if `id` does not exist.
    ///
    /// Walks previous links until a chain start, a [`NodeType::Move`] or, for a closed
    /// segment, back to the smallest id of the loop.
    pub fn first_segment_node(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        let Some(mut curr) = self.nodes.get(id) else {
            return Ok(None);
        };
        let mut curr_id = id;
        let mut smallest = id;
        for _ in 0..self.walk_budget() {
            let Some(prev_id) = curr.prev else {
                return Ok(Some(curr_id));
            };
            if prev_id == curr_id {
                return Err(PathError::corrupt_topology(format!(
                    "node {curr_id} points to itself"
                )));
            }
            let prev = self.linked(curr_id, prev_id)?;
            if prev.is_move() {
                return Ok(Some(curr_id));
            }
            if prev_id == smallest {
                return Ok(Some(smallest));
            }
            smallest = smallest.min(prev_id);
            curr = prev;
            curr_id = prev_id;
        }
        Err(PathError::corrupt_topology(format!(
            "backward walk from node {id} does not terminate"
        )))
    }

    /// Last node of the segment containing `id`, or `None` if `id` does not exist.
    ///
    /// A terminating [`NodeType::Move`] is the last node of the segment it ends.
    pub fn last_segment_node(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        let Some(mut curr) = self.nodes.get(id) else {
            return Ok(None);
        };
        let mut curr_id = id;
        let mut smallest = id;
        for _ in 0..self.walk_budget() {
            if curr.is_move() {
                return Ok(Some(curr_id));
            }
            let Some(next_id) = curr.next else {
                return Ok(Some(curr_id));
            };
            if next_id == curr_id {
                return Err(PathError::corrupt_topology(format!(
                    "node {curr_id} points to itself"
                )));
            }
            if next_id == smallest {
                return Ok(Some(curr_id));
            }
            smallest = smallest.min(next_id);
            curr = self.linked(curr_id, next_id)?;
            curr_id = next_id;
        }
        Err(PathError::corrupt_topology(format!(
            "forward walk from node {id} does not terminate"
        )))
    }

    /// Iterate a segment forward from its first node.
    ///
    /// Stops after a terminating [`NodeType::Move`], at a node without a next link, or
    /// before coming back to `first`.
    pub fn segment_iter(&self, first: NodeId) -> SegmentIter<'_> {
        SegmentIter {
            list: self,
            first,
            next: Some(first),
            remaining: self.nodes.len(),
        }
    }

    /// Ids of the segment containing `id`, in forward order.
    pub fn segment_ids(&self, id: NodeId) -> PathResult<Vec<NodeId>> {
        let Some(first) = self.first_segment_node(id)? else {
            return Err(PathError::out_of_range(id, self.nodes.len()));
        };
        self.segment_iter(first).collect()
    }

    /// Whether the segment starting at `first` loops back onto itself.
    pub(crate) fn closes_on_itself(&self, first: NodeId) -> PathResult<bool> {
        let node = self.at(first)?;
        match node.prev {
            Some(prev) => Ok(!self.linked(first, prev)?.is_move()),
            None => Ok(false),
        }
    }

    /// Swap the direction of the segment containing `id`.
    ///
    /// A [`NodeType::Move`] bounding the segment flips with it, so that reversing twice
    /// restores every link.
    pub fn reverse_segment(&mut self, id: NodeId) -> PathResult<()> {
        let Some(first) = self.first_segment_node(id)? else {
            return Ok(());
        };
        let mut ids: Vec<NodeId> = self.segment_iter(first).collect::<PathResult<_>>()?;
        if let Some(prev) = self.nodes[first].prev
            && self.linked(first, prev)?.is_move()
        {
            ids.push(prev);
        }
        for id in ids {
            self.nodes[id].switch_prev_and_next();
        }
        Ok(())
    }

    /// Whether both ids resolve to the same segment. Missing ids are never in a segment.
    pub fn nodes_in_same_segment(&self, a: NodeId, b: NodeId) -> PathResult<bool> {
        let first_a = self.first_segment_node(a)?;
        let first_b = self.first_segment_node(b)?;
        Ok(first_a.is_some() && first_a == first_b)
    }

    /// Whether the segment containing `id` loops back on itself.
    pub fn segment_closed(&self, id: NodeId) -> PathResult<bool> {
        match self.first_segment_node(id)? {
            Some(first) => self.closes_on_itself(first),
            None => Ok(false),
        }
    }

    /// Whether `b` is linked directly from `a`, in either direction.
    pub fn nodes_connected(&self, a: NodeId, b: NodeId) -> PathResult<bool> {
        let node = self.at(a)?;
        self.at(b)?;
        Ok(node.next == Some(b) || node.prev == Some(b))
    }

    /// Walk links from `id` in one direction until `accept` matches.
    ///
    /// Stops with `None` at a chain end, at a [`NodeType::Move`] or after a full loop.
    fn find_linked(
        &self,
        id: NodeId,
        forward: bool,
        accept: impl Fn(&Node) -> bool,
    ) -> PathResult<Option<NodeId>> {
        let mut curr = self.at(id)?;
        let mut curr_id = id;
        for _ in 0..self.nodes.len() {
            let link = if forward { curr.next } else { curr.prev };
            let Some(link) = link else {
                return Ok(None);
            };
            if link == id {
                return Ok(None);
            }
            curr = self.linked(curr_id, link)?;
            curr_id = link;
            if accept(curr) {
                return Ok(Some(curr_id));
            }
            if curr.is_move() {
                return Ok(None);
            }
        }
        Err(PathError::corrupt_topology(format!(
            "neighbour walk from node {id} does not terminate"
        )))
    }

    /// Closest [`NodeType::Normal`] node before `id` in its segment.
    pub fn prev_normal_id(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        self.find_linked(id, false, Node::is_normal)
    }

    /// Closest [`NodeType::Normal`] node after `id` in its segment.
    pub fn next_normal_id(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        self.find_linked(id, true, Node::is_normal)
    }

    /// Closest node before `id` that is not a [`NodeType::Dummy`].
    pub fn prev_non_dummy_id(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        self.find_linked(id, false, |n| !n.is_dummy())
    }

    /// Closest node after `id` that is not a [`NodeType::Dummy`].
    pub fn next_non_dummy_id(&self, id: NodeId) -> PathResult<Option<NodeId>> {
        self.find_linked(id, true, |n| !n.is_dummy())
    }

    /// Parametric lower bound for a marker at `id`: the previous marker's `t`, or `0` at
    /// a normal node or chain boundary.
    pub fn prev_t(&self, id: NodeId) -> PathResult<f64> {
        Ok(match self.prev_non_dummy_id(id)? {
            Some(prev) if self.nodes[prev].is_dissolved() => self.nodes[prev].t,
            _ => 0.0,
        })
    }

    /// Parametric upper bound for a marker at `id`: the next marker's `t`, or `1` at a
    /// normal node or chain boundary.
    pub fn next_t(&self, id: NodeId) -> PathResult<f64> {
        Ok(match self.next_non_dummy_id(id)? {
            Some(next) if self.nodes[next].is_dissolved() => self.nodes[next].t,
            _ => 1.0,
        })
    }

    /// Ids strictly between `from` and `to`, following next links.
    pub(crate) fn ids_between(&self, from: NodeId, to: NodeId) -> PathResult<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut curr_id = from;
        for _ in 0..self.nodes.len() {
            let Some(next) = self.at(curr_id)?.next else {
                return Err(PathError::corrupt_topology(format!(
                    "node {to} is not reachable from node {from}"
                )));
            };
            if next == to {
                return Ok(out);
            }
            self.linked(curr_id, next)?;
            out.push(next);
            curr_id = next;
        }
        Err(PathError::corrupt_topology(format!(
            "node {to} is not reachable from node {from}"
        )))
    }

    pub(crate) fn node_mut_unchecked(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub(crate) fn set_node_type(&mut self, id: NodeId, node_type: NodeType) {
        self.nodes[id].set_type(node_type);
    }
}

/// Forward iterator over one segment, created by [`NodeList::segment_iter`].
#[derive(Debug)]
pub struct SegmentIter<'a> {
    list: &'a NodeList,
    first: NodeId,
    next: Option<NodeId>,
    remaining: usize,
}

impl Iterator for SegmentIter<'_> {
    type Item = PathResult<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if self.remaining == 0 {
            return Some(Err(PathError::corrupt_topology(format!(
                "segment starting at node {} does not terminate",
                self.first
            ))));
        }
        self.remaining -= 1;
        let node = match self.list.at(id) {
            Ok(node) => node,
            Err(_) => {
                return Some(Err(PathError::corrupt_topology(format!(
                    "segment starting at node {} reaches missing node {id}",
                    self.first
                ))));
            }
        };
        if node.next == Some(id) {
            return Some(Err(PathError::corrupt_topology(format!(
                "node {id} points to itself"
            ))));
        }
        let ends_here = node.is_move() && id != self.first;
        if !ends_here {
            self.next = node.next.filter(|&next| next != self.first);
        }
        Some(Ok(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/topology/list.rs"]
mod tests;
