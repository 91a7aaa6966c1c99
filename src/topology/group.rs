use crate::{
    foundation::core::{Neighbour, NodeId},
    foundation::error::{PathError, PathResult},
    node::model::Node,
    topology::classify::SiblingSnapshot,
    topology::list::NodeList,
};

/// Index of a list inside a [`SyncGroup`].
pub type ListIndex = usize;

/// Owning group of mirrored node lists that share id alignment.
///
/// Lists are kept in keyframe order: list `i - 1` is the previous sibling of list `i` and
/// list `i + 1` its next sibling. Edits that must keep the group aligned go through the
/// group, which replays them onto the siblings in the requested direction.
///
/// Replays are not transactional. If a sibling rejects a replayed edit, the lists edited
/// before it stay edited and the error is returned.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SyncGroup {
    lists: Vec<NodeList>,
}

impl SyncGroup {
    /// Group `lists`, which must all have the same length.
    pub fn new(lists: Vec<NodeList>) -> PathResult<Self> {
        if let Some(first) = lists.first()
            && let Some((i, other)) = lists
                .iter()
                .enumerate()
                .find(|(_, l)| l.len() != first.len())
        {
            return Err(PathError::validation(format!(
                "list {i} has {} nodes, list 0 has {}",
                other.len(),
                first.len()
            )));
        }
        Ok(Self { lists })
    }

    /// Group of `count` empty lists.
    pub fn with_empty_lists(count: usize) -> Self {
        Self {
            lists: vec![NodeList::new(); count],
        }
    }

    /// Number of lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether there are no lists.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// All lists in keyframe order.
    pub fn lists(&self) -> &[NodeList] {
        &self.lists
    }

    /// Take the lists back out of the group.
    pub fn into_lists(self) -> Vec<NodeList> {
        self.lists
    }

    /// List at `index`, or a validation error.
    pub fn list(&self, index: ListIndex) -> PathResult<&NodeList> {
        self.lists
            .get(index)
            .ok_or_else(|| PathError::validation(format!("no list at index {index}")))
    }

    /// Direct access to one list. Structural edits made here are not replayed.
    pub fn list_mut(&mut self, index: ListIndex) -> PathResult<&mut NodeList> {
        self.lists
            .get_mut(index)
            .ok_or_else(|| PathError::validation(format!("no list at index {index}")))
    }

    /// Sibling lists an edit on `origin` is replayed onto, nearest first per direction.
    fn replay_targets(&self, origin: ListIndex, neigh: Neighbour) -> Vec<ListIndex> {
        let mut out = Vec::new();
        if neigh.contains(Neighbour::NEXT) {
            out.extend(origin + 1..self.lists.len());
        }
        if neigh.contains(Neighbour::PREV) {
            out.extend((0..origin).rev());
        }
        out
    }

    fn replay(
        &mut self,
        origin: ListIndex,
        neigh: Neighbour,
        op: &'static str,
        mut edit: impl FnMut(&mut NodeList) -> PathResult<()>,
    ) -> PathResult<()> {
        for target in self.replay_targets(origin, neigh) {
            tracing::debug!(origin, target, op, "replaying edit on sibling list");
            edit(&mut self.lists[target])?;
        }
        Ok(())
    }

    /// Insert `blueprint` before `next_id` in `list`, then insert blank nodes at the same
    /// position in the siblings selected by `neigh`.
    #[tracing::instrument(skip(self, blueprint))]
    pub fn insert_before(
        &mut self,
        list: ListIndex,
        next_id: NodeId,
        blueprint: Node,
        neigh: Neighbour,
    ) -> PathResult<NodeId> {
        let id = self.list_mut(list)?.insert_before(next_id, blueprint)?;
        self.replay(list, neigh, "insert_before", |l| {
            l.insert_before(next_id, Node::default()).map(|_| ())
        })?;
        Ok(id)
    }

    /// Insert after `prev_id`; replayed like [`SyncGroup::insert_before`].
    #[tracing::instrument(skip(self, blueprint))]
    pub fn insert_after(
        &mut self,
        list: ListIndex,
        prev_id: NodeId,
        blueprint: Node,
        neigh: Neighbour,
    ) -> PathResult<NodeId> {
        let id = self.list_mut(list)?.insert_after(prev_id, blueprint)?;
        self.replay(list, neigh, "insert_after", |l| {
            l.insert_after(prev_id, Node::default()).map(|_| ())
        })?;
        Ok(id)
    }

    /// Append to `list`; siblings get a blank node appended.
    #[tracing::instrument(skip(self, blueprint))]
    pub fn append(
        &mut self,
        list: ListIndex,
        blueprint: Node,
        neigh: Neighbour,
    ) -> PathResult<NodeId> {
        let id = self.list_mut(list)?.append(blueprint);
        self.replay(list, neigh, "append", |l| {
            l.append(Node::default());
            Ok(())
        })?;
        Ok(id)
    }

    /// Remove `id` from `list` and from the siblings selected by `neigh`.
    #[tracing::instrument(skip(self))]
    pub fn remove_at(
        &mut self,
        list: ListIndex,
        id: NodeId,
        neigh: Neighbour,
    ) -> PathResult<Node> {
        let removed = self.list_mut(list)?.remove_at(id)?;
        self.replay(list, neigh, "remove_at", |l| l.remove_at(id).map(|_| ()))?;
        Ok(removed)
    }

    /// Split `id` in `list` and insert a blank placeholder after `id` in the siblings.
    #[tracing::instrument(skip(self))]
    pub fn split_node(
        &mut self,
        list: ListIndex,
        id: NodeId,
        neigh: Neighbour,
    ) -> PathResult<NodeId> {
        let copy_id = self.list_mut(list)?.split_node(id)?;
        self.replay(list, neigh, "split_node", |l| {
            l.insert_after(id, Node::default()).map(|_| ())
        })?;
        Ok(copy_id)
    }

    /// Relink a node after another in one list.
    ///
    /// Moves are never replayed onto siblings; callers that need the siblings relinked
    /// must repeat the move on each list.
    pub fn move_after(
        &mut self,
        list: ListIndex,
        move_id: NodeId,
        after_id: NodeId,
    ) -> PathResult<()> {
        self.list_mut(list)?.move_after(move_id, after_id)
    }

    /// Counterpart of [`SyncGroup::move_after`]; not replayed either.
    pub fn move_before(
        &mut self,
        list: ListIndex,
        move_id: NodeId,
        before_id: NodeId,
    ) -> PathResult<()> {
        self.list_mut(list)?.move_before(move_id, before_id)
    }

    /// Nodes sharing `id` in the lists around `list`.
    pub fn sibling_snapshot(&self, list: ListIndex, id: NodeId) -> PathResult<SiblingSnapshot> {
        self.list(list)?;
        let fetch = |index: Option<ListIndex>| -> PathResult<Option<Node>> {
            match index.and_then(|i| self.lists.get(i)) {
                Some(sibling) => Ok(Some(*sibling.at(id)?)),
                None => Ok(None),
            }
        };
        Ok(SiblingSnapshot {
            prev: fetch(list.checked_sub(1))?,
            next: fetch(Some(list + 1))?,
        })
    }

    /// Reclassify one placeholder of `list` against its siblings.
    pub fn update_node_type(&mut self, list: ListIndex, id: NodeId) -> PathResult<bool> {
        let snapshot = self.sibling_snapshot(list, id)?;
        self.list_mut(list)?.update_node_type(id, &snapshot)
    }

    /// Reclassify every placeholder of `list`. Returns the ids whose type changed.
    #[tracing::instrument(skip(self))]
    pub fn update_all_node_types(&mut self, list: ListIndex) -> PathResult<Vec<NodeId>> {
        let mut changed = Vec::new();
        for id in 0..self.list(list)?.len() {
            if self.update_node_type(list, id)? {
                changed.push(id);
            }
        }
        Ok(changed)
    }

    /// Whether `id` must be split in `list` before matching it against `sibling`.
    pub fn should_split_node(
        &self,
        list: ListIndex,
        sibling: ListIndex,
        id: NodeId,
    ) -> PathResult<bool> {
        self.list(list)?.should_split_node(id, self.list(sibling)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/topology/group.rs"]
mod tests;
