//! Scene nodes
//!
//! A node is either a primitive shape or a group owning an ordered list of
//! children. Both share the same transform, color and selection state; the
//! variant only decides what geometry is emitted and whether the node can
//! hold children.

use std::fmt;
use std::str::FromStr;

use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::scene::bounds::AABB;

slotmap::new_key_type! {
    /// Stable, generational handle of a node inside a [`SceneGraph`](crate::scene::SceneGraph)
    pub struct NodeId;
}

/// Built-in primitive shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Wire cone
    Cone,
    /// Wire sphere
    Sphere,
    /// The Utah teapot
    Teapot,
    /// Wire torus
    Torus,
    /// Gaussian surface of revolution
    Spindle,
}

impl PrimitiveKind {
    /// Every primitive, in menu order
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Cone,
        PrimitiveKind::Sphere,
        PrimitiveKind::Teapot,
        PrimitiveKind::Torus,
        PrimitiveKind::Spindle,
    ];

    /// Display name used by the scene listing
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Teapot => "Teapot",
            PrimitiveKind::Torus => "Torus",
            PrimitiveKind::Spindle => "Spindle",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Variant payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A leaf shape
    Primitive(PrimitiveKind),
    /// A container; children are drawn in insertion order
    Group {
        /// Owned children
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// An empty group
    pub fn group() -> Self {
        NodeKind::Group { children: Vec::new() }
    }

    /// Display name used by the scene listing
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Primitive(kind) => kind.name(),
            NodeKind::Group { .. } => "Group",
        }
    }
}

/// A drawable entity in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    /// Translation relative to the parent
    pub translation: Vec3,
    /// Accumulated rotation matrix
    pub rotation: Mat4,
    /// Incremental rotation in degrees, consumed by [`Node::compose_rotation`]
    pub pending_rotation: Vec3,
    /// Non-uniform scale factors
    pub scale: Vec3,
    /// Base color
    pub color: Color,
    /// Scale of the debug axes relative to the node
    pub axis_scale: f32,
    /// Object-space bounds before any transform
    pub local_bounds: AABB,
    pub(crate) selected: bool,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Create a node with identity transform
    pub fn new(kind: NodeKind, color: Color, axis_scale: f32) -> Self {
        Self {
            kind,
            translation: Vec3::zeros(),
            rotation: Mat4::identity(),
            pending_rotation: Vec3::zeros(),
            scale: Vec3::repeat(1.0),
            color,
            axis_scale,
            local_bounds: AABB::cube(0.5),
            selected: false,
            parent: None,
        }
    }

    /// Create a primitive node
    pub fn primitive(kind: PrimitiveKind, color: Color, axis_scale: f32) -> Self {
        Self::new(NodeKind::Primitive(kind), color, axis_scale)
    }

    /// Create an empty group node
    pub fn group(color: Color, axis_scale: f32) -> Self {
        Self::new(NodeKind::group(), color, axis_scale)
    }

    /// What the node is
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether the node is a group
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Children of a group; empty for primitives
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children } => children,
            NodeKind::Primitive(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Group { children } => Some(children),
            NodeKind::Primitive(_) => None,
        }
    }

    /// Whether the node is drawn as selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The group owning this node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Local transform: translate, then rotate, then scale
    pub fn local_transform(&self) -> Mat4 {
        Mat4::translate_rotate_scale(&self.translation, &self.rotation, &self.scale)
    }

    /// Fold the pending incremental rotation into the stored matrix
    ///
    /// Computes `rotation · Rx(dx) · Ry(dy) · Rz(dz)` and clears the pending
    /// angles, so repeated small edits accumulate without Euler singularities.
    pub fn compose_rotation(&mut self) {
        let d = self.pending_rotation;
        self.rotation = self.rotation
            * Mat4::rotation_x_deg(d.x)
            * Mat4::rotation_y_deg(d.y)
            * Mat4::rotation_z_deg(d.z);
        self.pending_rotation = Vec3::zeros();
    }
}
