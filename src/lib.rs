//! Topology engine for editable vector paths.
//!
//! A path is stored as a [`NodeList`]: a dense, index-addressed sequence of control nodes
//! whose links form one or more chains (segments). Structural edits keep links symmetric
//! and renumber ids in place. Mirrored lists used for shape interpolation between
//! keyframes live together in a [`SyncGroup`], which replays edits so the lists stay
//! aligned id for id.
//!
//! # Node kinds
//!
//! - **Normal**: a real vertex with anchor and handles.
//! - **Move**: a sub-path break.
//! - **Dissolved**: a marker at parameter `t` on the curve between the enclosing normal
//!   nodes. It has no geometry of its own and can be promoted to a normal vertex without
//!   changing the curve.
//! - **Dummy**: a placeholder that only keeps ids aligned across mirrored lists.
//!
//! # Pipeline
//!
//! 1. **Edit**: insert/remove/split/move nodes on a list or through the group.
//! 2. **Classify**: [`SyncGroup::update_all_node_types`] decides which placeholders must
//!    carry a parametric position.
//! 3. **Compile**: [`NodeList::to_path`] produces move/cubic/close commands for a
//!    renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod compile;
mod foundation;
mod geometry;
mod node;
mod topology;

pub use compile::path::{CompiledPath, FlattenOpts, PathCommand};
pub use foundation::core::{BezPath, CubicBez, Neighbour, NodeId, PathEl, Point, Vec2};
pub use foundation::error::{PathError, PathResult};
pub use geometry::segment::CubicSegment;
pub use node::model::{Node, NodeType};
pub use topology::classify::{SiblingSnapshot, classify_placeholder};
pub use topology::group::{ListIndex, SyncGroup};
pub use topology::list::{NodeList, SegmentIter};
pub use topology::split::should_split_this_node;
