pub use kurbo::{BezPath, CubicBez, ParamCurve, PathEl, Point, Vec2};

/// Storage position of a node inside its [`crate::NodeList`].
///
/// Ids are dense: inserting or removing a node renumbers every id after it.
pub type NodeId = usize;

/// Direction flags for replaying an edit onto mirrored sibling lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Neighbour(u8);

impl Neighbour {
    /// Do not propagate.
    pub const NONE: Self = Self(0);
    /// Propagate towards lower list indices.
    pub const PREV: Self = Self(1);
    /// Propagate towards higher list indices.
    pub const NEXT: Self = Self(2);
    /// Propagate both ways.
    pub const BOTH: Self = Self(3);

    /// Whether all flags of `other` are set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl std::ops::BitOr for Neighbour {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
