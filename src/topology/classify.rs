//! Placeholder classification.
//!
//! Nodes that are neither normal nor move exist only to keep mirrored lists aligned.
//! Whether such a placeholder must carry a parametric position depends on how the same id
//! looks in the neighbouring lists.

use crate::{
    foundation::core::NodeId,
    foundation::error::PathResult,
    node::model::{Node, NodeType},
    topology::list::NodeList,
};

/// Read-only copies of the nodes sharing an id in the previous and next sibling lists.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SiblingSnapshot {
    /// Node at the same id in the previous list, if there is one.
    pub prev: Option<Node>,
    /// Node at the same id in the next list, if there is one.
    pub next: Option<Node>,
}

impl SiblingSnapshot {
    fn iter(&self) -> impl Iterator<Item = &Node> {
        self.prev.iter().chain(self.next.iter())
    }
}

/// Type a node should carry given its siblings.
///
/// Normal and move nodes keep their type. A placeholder becomes
/// [`NodeType::Dissolved`] when a sibling holds a real vertex or break at this id, or
/// when its next link matches neither link of a non-dummy sibling; otherwise it is a
/// [`NodeType::Dummy`].
pub fn classify_placeholder(node: &Node, siblings: &SiblingSnapshot) -> NodeType {
    if node.is_normal() || node.is_move() {
        return node.node_type();
    }
    let next = node.next_id();
    let needs_geometry = siblings.iter().any(|sibling| {
        let real = sibling.is_normal() || sibling.is_move();
        let diverges =
            !sibling.is_dummy() && next != sibling.next_id() && next != sibling.prev_id();
        real || diverges
    });
    if needs_geometry {
        NodeType::Dissolved
    } else {
        NodeType::Dummy
    }
}

impl NodeList {
    /// Reclassify the placeholder at `id` against `siblings`. Returns whether its type
    /// changed.
    ///
    /// A placeholder that becomes dissolved is placed halfway between the parametric
    /// bounds of its non-dummy neighbours. One that is already dissolved keeps its `t`.
    pub fn update_node_type(
        &mut self,
        id: NodeId,
        siblings: &SiblingSnapshot,
    ) -> PathResult<bool> {
        let node = *self.at(id)?;
        let target = classify_placeholder(&node, siblings);
        if target == node.node_type() {
            return Ok(false);
        }
        match target {
            NodeType::Dissolved => {
                let t = 0.5 * (self.prev_t(id)? + self.next_t(id)?);
                self.at_mut(id)?.t = t;
                self.set_node_type(id, NodeType::Dissolved);
            }
            other => self.set_node_type(id, other),
        }
        tracing::debug!(id, from = ?node.node_type(), to = ?target, "placeholder reclassified");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/topology/classify.rs"]
mod tests;
