use crate::foundation::core::{NodeId, Point};
use crate::foundation::error::{PathError, PathResult};

/// Classification of a node inside a [`crate::NodeList`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NodeType {
    /// Real curve vertex with its own anchor and handles.
    Normal,
    /// Sub-path break.
    Move,
    /// Parametric marker at `t` on the curve between the enclosing normal nodes.
    Dissolved,
    /// Alignment placeholder without geometry.
    #[default]
    Dummy,
}

impl NodeType {
    /// Stable tag used by external serializers.
    pub fn tag(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Move => 1,
            Self::Dissolved => 2,
            Self::Dummy => 3,
        }
    }

    /// Decode a tag produced by [`NodeType::tag`].
    pub fn from_tag(tag: u8) -> PathResult<Self> {
        match tag {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Move),
            2 => Ok(Self::Dissolved),
            3 => Ok(Self::Dummy),
            other => Err(PathError::UnrecognizedNodeType(other)),
        }
    }
}

impl TryFrom<u8> for NodeType {
    type Error = PathError;

    fn try_from(tag: u8) -> PathResult<Self> {
        Self::from_tag(tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A control node: anchor with in/out handles, a type tag and topology links.
pub struct Node {
    /// Handle controlling the curve arriving at the anchor.
    pub in_handle: Point,
    /// Point the curve passes through.
    pub anchor: Point,
    /// Handle controlling the curve leaving the anchor.
    pub out_handle: Point,
    /// Parametric position on the enclosing segment (dissolved nodes only).
    pub t: f64,
    pub(crate) node_type: NodeType,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            in_handle: Point::ORIGIN,
            anchor: Point::ORIGIN,
            out_handle: Point::ORIGIN,
            t: 0.5,
            node_type: NodeType::Dummy,
            prev: None,
            next: None,
        }
    }
}

impl Node {
    /// Normal vertex with explicit handles.
    pub fn normal(in_handle: Point, anchor: Point, out_handle: Point) -> Self {
        Self {
            in_handle,
            anchor,
            out_handle,
            node_type: NodeType::Normal,
            ..Self::default()
        }
    }

    /// Normal vertex whose handles sit on the anchor (a corner).
    pub fn corner(anchor: Point) -> Self {
        Self::normal(anchor, anchor, anchor)
    }

    /// Sub-path break.
    pub fn move_break() -> Self {
        Self::of_type(NodeType::Move)
    }

    /// Dissolved marker at `t`.
    pub fn dissolved(t: f64) -> Self {
        Self {
            t: t.clamp(0.0, 1.0),
            node_type: NodeType::Dissolved,
            ..Self::default()
        }
    }

    /// Blank node of the given type.
    pub fn of_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            ..Self::default()
        }
    }

    /// Same node with explicit links, for building lists by hand.
    pub fn with_links(mut self, prev: Option<NodeId>, next: Option<NodeId>) -> Self {
        self.prev = prev;
        self.next = next;
        self
    }

    /// Kind of this node.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Previous node in the chain, if linked.
    pub fn prev_id(&self) -> Option<NodeId> {
        self.prev
    }

    /// Next node in the chain, if linked.
    pub fn next_id(&self) -> Option<NodeId> {
        self.next
    }

    /// Whether a prev link is set.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    /// Whether a next link is set.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether this is a [`NodeType::Normal`] node.
    pub fn is_normal(&self) -> bool {
        self.node_type == NodeType::Normal
    }

    /// Whether this is a [`NodeType::Move`] node.
    pub fn is_move(&self) -> bool {
        self.node_type == NodeType::Move
    }

    /// Whether this is a [`NodeType::Dissolved`] node.
    pub fn is_dissolved(&self) -> bool {
        self.node_type == NodeType::Dissolved
    }

    /// Whether this is a [`NodeType::Dummy`] node.
    pub fn is_dummy(&self) -> bool {
        self.node_type == NodeType::Dummy
    }

    pub(crate) fn set_type(&mut self, node_type: NodeType) {
        self.node_type = node_type;
    }

    pub(crate) fn switch_prev_and_next(&mut self) {
        std::mem::swap(&mut self.prev, &mut self.next);
    }

    /// Renumber links after a slot was inserted at `pos`.
    pub(crate) fn shift_ids_for_insert(&mut self, pos: NodeId) {
        for id in [&mut self.prev, &mut self.next].into_iter().flatten() {
            if *id >= pos {
                *id += 1;
            }
        }
    }

    /// Renumber links after the slot at `pos` was removed.
    pub(crate) fn shift_ids_for_remove(&mut self, pos: NodeId) {
        for id in [&mut self.prev, &mut self.next].into_iter().flatten() {
            if *id > pos {
                *id -= 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/model.rs"]
mod tests;
