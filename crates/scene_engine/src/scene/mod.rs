//! Scene management system
//!
//! The editable scene graph: nodes, their bounds, the interface transform
//! mirror and the graph itself with its selection and grouping state.
//!
//! ## State machine
//!
//! ```text
//!   NoSelection <-> SingleSelected
//!        |  add_selected_to_group / reopen_group  ^
//!        v                                        | close_group
//!   GroupOpenNoSelection <-> GroupOpenSelected ---+
//! ```

mod bounds;
mod interface;
mod node;
mod scene_graph;

#[cfg(test)]
mod tests;

pub use bounds::AABB;
pub use interface::InterfaceTransform;
pub use node::{Node, NodeId, NodeKind, PrimitiveKind};
pub use scene_graph::{SceneGraph, SceneListing};
